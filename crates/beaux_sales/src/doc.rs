// File: crates/beaux_sales/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{MontosFormateados, SalesDashboardView};
use crate::models::{
    Advertencia, ChurnCliente, ChurnResponse, ClientesDashboard, ClientesKpis, Kpi,
    PeriodOption, PeriodRecommendations, PeriodsResponse, Range, VentasMetricas,
};
use crate::payment_summary::PaymentMethodTotals;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::sales_dashboard_handler,
        crate::handlers::clientes_dashboard_handler,
        crate::handlers::periods_handler,
        crate::handlers::churn_handler,
        crate::handlers::payment_summary_handler
    ),
    components(
        schemas(
            SalesDashboardView, MontosFormateados, VentasMetricas, PaymentMethodTotals, Range,
            ClientesDashboard, ClientesKpis, Kpi, Advertencia,
            PeriodsResponse, PeriodOption, PeriodRecommendations,
            ChurnResponse, ChurnCliente
        )
    ),
    tags(
        (name = "Sales", description = "Sales dashboard and client analytics")
    ),
    servers(
        (url = "/api", description = "Beaux API server")
    )
)]
pub struct SalesApiDoc;
