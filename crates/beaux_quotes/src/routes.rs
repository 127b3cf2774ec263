// --- File: crates/beaux_quotes/src/routes.rs ---

use crate::handlers::{
    actualizar_bloqueo_handler, agregar_productos_handler, cambiar_estado_handler,
    cancelar_cita_handler, crear_bloqueo_handler, crear_cita_handler, editar_cita_handler,
    eliminar_bloqueo_handler, list_bloqueos_handler, list_citas_handler, registrar_pago_handler,
    QuotesState,
};
use axum::{
    routing::{get, patch, post, put},
    Router,
};
use beaux_common::ApiClient;
use beaux_config::AppConfig;
use std::sync::Arc;
use tracing::warn;

/// Creates a router containing all routes for the quotes feature.
///
/// A missing or unusable backend section does not stop the server; the
/// handlers answer with a configuration error instead.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let client = config
        .backend
        .as_ref()
        .and_then(|backend| match ApiClient::from_config(backend) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Quotes backend client unavailable: {}", e);
                None
            }
        });
    routes_with_client(config, client)
}

/// Same as [`routes`] with an explicit backend client.
pub fn routes_with_client(config: Arc<AppConfig>, client: Option<ApiClient>) -> Router {
    let state = Arc::new(QuotesState { config, client });

    Router::new()
        .route("/citas", get(list_citas_handler).post(crear_cita_handler))
        .route("/citas/{cita_id}", put(editar_cita_handler))
        .route("/citas/{cita_id}/cancelar", patch(cancelar_cita_handler))
        .route("/citas/{cita_id}/estado", patch(cambiar_estado_handler))
        .route("/citas/{cita_id}/pago", post(registrar_pago_handler))
        .route("/citas/{cita_id}/productos", post(agregar_productos_handler))
        .route(
            "/bloqueos",
            get(list_bloqueos_handler).post(crear_bloqueo_handler),
        )
        .route(
            "/bloqueos/{bloqueo_id}",
            patch(actualizar_bloqueo_handler).delete(eliminar_bloqueo_handler),
        )
        .with_state(state)
}
