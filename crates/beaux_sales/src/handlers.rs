// --- File: crates/beaux_sales/src/handlers.rs ---
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Json,
};
use beaux_common::{bearer_token, ApiClient};
use beaux_config::{AppConfig, SessionConfig};
use beaux_format::{currency_for_session, format_money, normalize_currency_code};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

use crate::error::SalesError;
use crate::logic::{
    available_periods, churn_clientes, dashboard_clientes, metricas_para_moneda,
    ventas_dashboard,
};
use crate::models::{
    ChurnResponse, ClientesDashboard, DashboardQuery, PeriodsResponse, Range, VentasMetricas,
};
use crate::payment_summary::{summarize_payment_methods, totals_from_facturas, PaymentMethodTotals};

// Shared state for the sales handlers
#[derive(Clone)]
pub struct SalesState {
    pub config: Arc<AppConfig>,
    /// `None` when the backend section is missing from the config.
    pub client: Option<ApiClient>,
}

impl SalesState {
    fn client_for(&self, headers: &HeaderMap) -> Result<ApiClient, SalesError> {
        if !self.config.use_sales {
            return Err(SalesError::Disabled);
        }
        let client = self.client.as_ref().ok_or_else(|| {
            warn!("Backend configuration missing in AppConfig.");
            SalesError::ConfigMissing
        })?;
        Ok(client.with_token(bearer_token(headers)))
    }
}

#[derive(Debug, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SalesQuery {
    /// Period id such as `last_30_days`, or `custom`.
    pub period: Option<String>,
    pub sede_id: Option<String>,
    /// Currency to report in. Defaults to the branch currency.
    pub moneda: Option<String>,
    #[cfg_attr(feature = "openapi", param(value_type = Option<String>))]
    pub start_date: Option<NaiveDate>,
    #[cfg_attr(feature = "openapi", param(value_type = Option<String>))]
    pub end_date: Option<NaiveDate>,
}

impl SalesQuery {
    fn dashboard_query(&self, session: &SessionConfig) -> DashboardQuery {
        DashboardQuery {
            period: self.period.clone(),
            sede_id: self.sede_id.clone().or_else(|| session.sede_id.clone()),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Amounts ready for display in the report currency.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MontosFormateados {
    pub ventas_totales: String,
    pub ventas_servicios: String,
    pub ventas_productos: String,
    pub ticket_promedio: String,
    pub efectivo: String,
    pub transferencia: String,
    pub tarjetas: String,
    pub link_pagos: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SalesDashboardView {
    pub success: bool,
    pub moneda: String,
    pub period: Option<String>,
    pub range: Option<Range>,
    pub sede_id: Option<String>,
    pub metricas: VentasMetricas,
    pub metodos_pago: PaymentMethodTotals,
    pub formatted: MontosFormateados,
    /// Currencies the backend reported figures for.
    pub monedas: Vec<String>,
}

fn formatted(metricas: &VentasMetricas, pagos: &PaymentMethodTotals, moneda: &str) -> MontosFormateados {
    let money = |amount: f64| format_money(amount, moneda, None);
    MontosFormateados {
        ventas_totales: money(metricas.ventas_totales),
        ventas_servicios: money(metricas.ventas_servicios),
        ventas_productos: money(metricas.ventas_productos),
        ticket_promedio: money(metricas.ticket_promedio),
        efectivo: money(pagos.efectivo),
        transferencia: money(pagos.transferencia),
        tarjetas: money(pagos.tarjetas),
        link_pagos: money(pagos.link_pagos),
    }
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/sales/dashboard",
    params(SalesQuery),
    responses(
        (status = 200, description = "Sales metrics with formatted amounts", body = SalesDashboardView),
        (status = 503, description = "Sales feature disabled")
    ),
    tag = "Sales"
))]
pub async fn sales_dashboard_handler(
    State(state): State<Arc<SalesState>>,
    headers: HeaderMap,
    Query(query): Query<SalesQuery>,
) -> Result<Json<SalesDashboardView>, SalesError> {
    let client = state.client_for(&headers)?;
    let session = &state.config.session;
    let dashboard_query = query.dashboard_query(session);
    let response = ventas_dashboard(&client, &dashboard_query).await;

    let moneda = match query.moneda.as_deref().or(response.moneda_sede.as_deref()) {
        Some(moneda) => normalize_currency_code(Some(moneda)),
        None => currency_for_session(&session.overlay(&SessionConfig {
            sede_id: dashboard_query.sede_id.clone(),
            ..Default::default()
        })),
    };
    let metricas = metricas_para_moneda(&response, &moneda);
    let metodos_pago = summarize_payment_methods(&Value::Object(metricas.metodos_pago.clone()))
        .unwrap_or_default();

    Ok(Json(SalesDashboardView {
        success: response.success,
        formatted: formatted(&metricas, &metodos_pago, &moneda),
        moneda,
        period: response.period.or(dashboard_query.period),
        range: response.range,
        sede_id: response.sede_id.or(dashboard_query.sede_id),
        metricas,
        metodos_pago,
        monedas: response.metricas_por_moneda.into_keys().collect(),
    }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/sales/clientes",
    params(SalesQuery),
    responses((status = 200, description = "Client analytics", body = ClientesDashboard)),
    tag = "Sales"
))]
pub async fn clientes_dashboard_handler(
    State(state): State<Arc<SalesState>>,
    headers: HeaderMap,
    Query(query): Query<SalesQuery>,
) -> Result<Json<ClientesDashboard>, SalesError> {
    let client = state.client_for(&headers)?;
    let today = Utc::now().date_naive();
    dashboard_clientes(&client, &query.dashboard_query(&state.config.session), today)
        .await
        .map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/sales/periods",
    responses((status = 200, description = "Selectable periods", body = PeriodsResponse)),
    tag = "Sales"
))]
pub async fn periods_handler(
    State(state): State<Arc<SalesState>>,
    headers: HeaderMap,
) -> Result<Json<PeriodsResponse>, SalesError> {
    let client = state.client_for(&headers)?;
    available_periods(&client).await.map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/sales/churn",
    params(SalesQuery),
    responses(
        (status = 200, description = "Inactive clients", body = ChurnResponse),
        (status = 400, description = "Invalid range")
    ),
    tag = "Sales"
))]
pub async fn churn_handler(
    State(state): State<Arc<SalesState>>,
    headers: HeaderMap,
    Query(query): Query<SalesQuery>,
) -> Result<Json<ChurnResponse>, SalesError> {
    let client = state.client_for(&headers)?;
    churn_clientes(&client, &query.dashboard_query(&state.config.session))
        .await
        .map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/sales/payment-summary",
    request_body(content = Object, description = "Invoice rows, or a backend summary object"),
    responses((status = 200, description = "Totals per payment method", body = PaymentMethodTotals)),
    tag = "Sales"
))]
pub async fn payment_summary_handler(
    State(state): State<Arc<SalesState>>,
    Json(body): Json<Value>,
) -> Result<Json<PaymentMethodTotals>, SalesError> {
    if !state.config.use_sales {
        return Err(SalesError::Disabled);
    }
    let totals = match &body {
        Value::Array(rows) => totals_from_facturas(rows),
        Value::Object(_) => summarize_payment_methods(&body).unwrap_or_default(),
        _ => {
            return Err(SalesError::Validation(
                "Se esperaba una lista de facturas o un resumen".to_string(),
            ))
        }
    };
    info!("Summarized payments: total {:.2}", totals.total());
    Ok(Json(totals))
}
