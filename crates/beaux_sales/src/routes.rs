// --- File: crates/beaux_sales/src/routes.rs ---

use crate::handlers::{
    churn_handler, clientes_dashboard_handler, payment_summary_handler, periods_handler,
    sales_dashboard_handler, SalesState,
};
use axum::{
    routing::{get, post},
    Router,
};
use beaux_common::ApiClient;
use beaux_config::AppConfig;
use std::sync::Arc;
use tracing::warn;

/// Creates a router containing all routes for the sales feature.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let client = config
        .backend
        .as_ref()
        .and_then(|backend| match ApiClient::from_config(backend) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Sales backend client unavailable: {}", e);
                None
            }
        });
    routes_with_client(config, client)
}

pub fn routes_with_client(config: Arc<AppConfig>, client: Option<ApiClient>) -> Router {
    let state = Arc::new(SalesState { config, client });

    Router::new()
        .route("/sales/dashboard", get(sales_dashboard_handler))
        .route("/sales/clientes", get(clientes_dashboard_handler))
        .route("/sales/periods", get(periods_handler))
        .route("/sales/churn", get(churn_handler))
        .route("/sales/payment-summary", post(payment_summary_handler))
        .with_state(state)
}
