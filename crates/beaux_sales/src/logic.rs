// --- File: crates/beaux_sales/src/logic.rs ---
use beaux_common::ApiClient;
use beaux_format::normalize_currency_code;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::SalesError;
use crate::models::{
    ChurnResponse, ClientesDashboard, DashboardQuery, PeriodsResponse, VentasDashboardResponse,
    VentasMetricas,
};

/// Period id that takes explicit dates.
pub const CUSTOM_PERIOD: &str = "custom";

/// Span used for a custom period sent without dates.
const DEFAULT_CUSTOM_DAYS: i64 = 30;

/// Sales dashboard for a period and branch. A failed call yields an empty,
/// unsuccessful dashboard instead of an error.
pub async fn ventas_dashboard(client: &ApiClient, query: &DashboardQuery) -> VentasDashboardResponse {
    match client
        .get_json::<VentasDashboardResponse, _>("api/sales-dashboard/ventas/dashboard", query)
        .await
    {
        Ok(response) => {
            debug!(
                "Sales dashboard has {} currencies",
                response.metricas_por_moneda.len()
            );
            response
        }
        Err(e) => {
            warn!("Sales dashboard unavailable: {}", e);
            VentasDashboardResponse::unavailable()
        }
    }
}

/// Metrics for `moneda`, zeroed when the dashboard has none for it.
pub fn metricas_para_moneda(response: &VentasDashboardResponse, moneda: &str) -> VentasMetricas {
    response
        .metricas_por_moneda
        .get(&normalize_currency_code(Some(moneda)))
        .cloned()
        .unwrap_or_default()
}

/// Query the client dashboard is called with. A standard period is sent as
/// is; a custom one sends its dates, or the last 30 days up to `today`.
pub fn clientes_query(query: &DashboardQuery, today: NaiveDate) -> DashboardQuery {
    let sede_id = query.sede_id.clone();
    match query.period.as_deref() {
        Some(period) if period != CUSTOM_PERIOD => DashboardQuery {
            period: Some(period.to_string()),
            sede_id,
            ..Default::default()
        },
        period => match (query.start_date, query.end_date) {
            (Some(start), Some(end)) => DashboardQuery {
                start_date: Some(start),
                end_date: Some(end),
                sede_id,
                ..Default::default()
            },
            _ if period == Some(CUSTOM_PERIOD) => DashboardQuery {
                start_date: Some(today - Duration::days(DEFAULT_CUSTOM_DAYS)),
                end_date: Some(today),
                sede_id,
                ..Default::default()
            },
            _ => DashboardQuery {
                sede_id,
                ..Default::default()
            },
        },
    }
}

pub async fn dashboard_clientes(
    client: &ApiClient,
    query: &DashboardQuery,
    today: NaiveDate,
) -> Result<ClientesDashboard, SalesError> {
    let query = clientes_query(query, today);
    Ok(client.get_json("analytics/dashboard", &query).await?)
}

pub async fn available_periods(client: &ApiClient) -> Result<PeriodsResponse, SalesError> {
    Ok(client.get("analytics/dashboard/periods").await?)
}

#[derive(Serialize)]
struct ChurnQuery<'a> {
    export: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    sede_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
}

/// Clients who stopped visiting within the range.
pub async fn churn_clientes(
    client: &ApiClient,
    query: &DashboardQuery,
) -> Result<ChurnResponse, SalesError> {
    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if start > end {
            return Err(SalesError::Validation(
                "start_date debe ser anterior a end_date".to_string(),
            ));
        }
    }
    let query = ChurnQuery {
        export: false,
        sede_id: query.sede_id.as_deref(),
        start_date: query.start_date,
        end_date: query.end_date,
    };
    Ok(client.get_json("analytics/churn-clientes", &query).await?)
}

/// Signed change with one decimal, e.g. `"+12.5%"`. From zero any rise is
/// `"+100.0%"`.
pub fn calculate_growth(current: f64, previous: f64) -> String {
    if previous == 0.0 {
        return if current > 0.0 { "+100.0%" } else { "0.0%" }.to_string();
    }
    let change = (current - previous) / previous.abs() * 100.0;
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, change)
}
