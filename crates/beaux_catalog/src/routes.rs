// --- File: crates/beaux_catalog/src/routes.rs ---

use crate::handlers::{
    create_servicio_handler, delete_servicio_handler, get_servicio_handler,
    list_productos_handler, list_servicios_handler, servicio_por_codigo_handler,
    servicios_estilista_handler, update_servicio_handler, CatalogState,
};
use axum::{routing::get, Router};
use beaux_common::ApiClient;
use beaux_config::AppConfig;
use std::sync::Arc;
use tracing::warn;

/// Creates a router containing all routes for the catalog feature.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let client = config
        .backend
        .as_ref()
        .and_then(|backend| match ApiClient::from_config(backend) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Catalog backend client unavailable: {}", e);
                None
            }
        });
    routes_with_client(config, client)
}

/// Same as [`routes`] with an explicit backend client.
pub fn routes_with_client(config: Arc<AppConfig>, client: Option<ApiClient>) -> Router {
    let state = Arc::new(CatalogState { config, client });

    Router::new()
        .route(
            "/catalog/servicios",
            get(list_servicios_handler).post(create_servicio_handler),
        )
        .route(
            "/catalog/servicios/codigo/{codigo}",
            get(servicio_por_codigo_handler),
        )
        .route(
            "/catalog/servicios/{servicio_id}",
            get(get_servicio_handler)
                .put(update_servicio_handler)
                .delete(delete_servicio_handler),
        )
        .route(
            "/catalog/estilistas/{profesional_id}/servicios",
            get(servicios_estilista_handler),
        )
        .route("/catalog/productos", get(list_productos_handler))
        .with_state(state)
}
