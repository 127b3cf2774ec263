// --- File: crates/beaux_quotes/src/handlers.rs ---
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use beaux_common::models::{BloqueoRecord, CitaRecord};
use beaux_common::services::CitaFilter;
use beaux_common::{bearer_token, ApiClient};
use beaux_config::AppConfig;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::bloqueos::{
    actualizar_bloqueo, crear_bloqueo, eliminar_bloqueo, list_bloqueos, BloqueoFiltro,
    CambiosBloqueo, NuevoBloqueo,
};
use crate::error::QuotesError;
use crate::logic::{
    agregar_productos, cambiar_estado, cancelar_cita, crear_cita, editar_cita, list_citas,
    registrar_pago, CambioEstado, NuevaCita, Pago, ProductoItem,
};

// Shared state for the quotes handlers
#[derive(Clone)]
pub struct QuotesState {
    pub config: Arc<AppConfig>,
    /// `None` when the backend section is missing from the config.
    pub client: Option<ApiClient>,
}

impl QuotesState {
    /// Backend client acting with the caller's token.
    fn client_for(&self, headers: &HeaderMap) -> Result<ApiClient, QuotesError> {
        if !self.config.use_quotes {
            return Err(QuotesError::Disabled);
        }
        let client = self.client.as_ref().ok_or_else(|| {
            warn!("Backend configuration missing in AppConfig.");
            QuotesError::ConfigMissing
        })?;
        Ok(client.with_token(bearer_token(headers)))
    }
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/citas",
    params(
        ("sede_id" = Option<String>, Query, description = "Branch id"),
        ("profesional_id" = Option<String>, Query, description = "Professional id"),
        ("fecha" = Option<String>, Query, description = "Day in YYYY-MM-DD format", format = "date")
    ),
    responses(
        (status = 200, description = "Appointments", body = Vec<CitaRecord>),
        (status = 502, description = "Backend error")
    ),
    tag = "Quotes"
))]
pub async fn list_citas_handler(
    State(state): State<Arc<QuotesState>>,
    headers: HeaderMap,
    Query(filter): Query<CitaFilter>,
) -> Result<Json<Vec<CitaRecord>>, QuotesError> {
    let client = state.client_for(&headers)?;
    list_citas(&client, &filter).await.map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/citas",
    request_body = NuevaCita,
    responses(
        (status = 200, description = "Appointment created"),
        (status = 400, description = "Invalid request or rejected by the backend"),
        (status = 404, description = "Client, service, professional or branch not found"),
        (status = 409, description = "Slot taken or blocked")
    ),
    tag = "Quotes"
))]
pub async fn crear_cita_handler(
    State(state): State<Arc<QuotesState>>,
    headers: HeaderMap,
    Json(payload): Json<NuevaCita>,
) -> Result<Json<Value>, QuotesError> {
    let client = state.client_for(&headers)?;
    let created = crear_cita(&client, payload).await.map_err(|e| {
        info!("Cita creation refused: {}", e);
        e
    })?;
    Ok(Json(created))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/citas/{cita_id}",
    params(("cita_id" = String, Path, description = "Appointment id")),
    request_body(content = Object, description = "Fields to change"),
    responses(
        (status = 200, description = "Appointment updated"),
        (status = 400, description = "Invalid change")
    ),
    tag = "Quotes"
))]
pub async fn editar_cita_handler(
    State(state): State<Arc<QuotesState>>,
    headers: HeaderMap,
    Path(cita_id): Path<String>,
    Json(cambios): Json<Value>,
) -> Result<Json<Value>, QuotesError> {
    let client = state.client_for(&headers)?;
    editar_cita(&client, &cita_id, &cambios).await.map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/citas/{cita_id}/cancelar",
    params(("cita_id" = String, Path, description = "Appointment id")),
    responses((status = 200, description = "Appointment cancelled")),
    tag = "Quotes"
))]
pub async fn cancelar_cita_handler(
    State(state): State<Arc<QuotesState>>,
    headers: HeaderMap,
    Path(cita_id): Path<String>,
) -> Result<Json<Value>, QuotesError> {
    let client = state.client_for(&headers)?;
    cancelar_cita(&client, &cita_id).await.map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/citas/{cita_id}/estado",
    params(("cita_id" = String, Path, description = "Appointment id")),
    request_body = CambioEstado,
    responses((status = 200, description = "Status changed")),
    tag = "Quotes"
))]
pub async fn cambiar_estado_handler(
    State(state): State<Arc<QuotesState>>,
    headers: HeaderMap,
    Path(cita_id): Path<String>,
    Json(payload): Json<CambioEstado>,
) -> Result<Json<Value>, QuotesError> {
    let client = state.client_for(&headers)?;
    cambiar_estado(&client, &cita_id, &payload.nuevo_estado)
        .await
        .map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/citas/{cita_id}/pago",
    params(("cita_id" = String, Path, description = "Appointment id")),
    request_body = Pago,
    responses(
        (status = 200, description = "Payment registered"),
        (status = 400, description = "Invalid amount or missing gift card code")
    ),
    tag = "Quotes"
))]
pub async fn registrar_pago_handler(
    State(state): State<Arc<QuotesState>>,
    headers: HeaderMap,
    Path(cita_id): Path<String>,
    Json(pago): Json<Pago>,
) -> Result<Json<Value>, QuotesError> {
    let client = state.client_for(&headers)?;
    registrar_pago(&client, &cita_id, pago).await.map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/citas/{cita_id}/productos",
    params(("cita_id" = String, Path, description = "Appointment id")),
    request_body = Vec<ProductoItem>,
    responses((status = 200, description = "Products added")),
    tag = "Quotes"
))]
pub async fn agregar_productos_handler(
    State(state): State<Arc<QuotesState>>,
    headers: HeaderMap,
    Path(cita_id): Path<String>,
    Json(productos): Json<Vec<ProductoItem>>,
) -> Result<Json<Value>, QuotesError> {
    let client = state.client_for(&headers)?;
    agregar_productos(&client, &cita_id, &productos)
        .await
        .map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/bloqueos",
    params(BloqueoFiltro),
    responses((status = 200, description = "Blocks", body = Vec<BloqueoRecord>)),
    tag = "Quotes"
))]
pub async fn list_bloqueos_handler(
    State(state): State<Arc<QuotesState>>,
    headers: HeaderMap,
    Query(filtro): Query<BloqueoFiltro>,
) -> Result<Json<Vec<BloqueoRecord>>, QuotesError> {
    let client = state.client_for(&headers)?;
    list_bloqueos(&client, &filtro).await.map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/bloqueos",
    request_body = NuevoBloqueo,
    responses(
        (status = 200, description = "Block created"),
        (status = 400, description = "Invalid block")
    ),
    tag = "Quotes"
))]
pub async fn crear_bloqueo_handler(
    State(state): State<Arc<QuotesState>>,
    headers: HeaderMap,
    Json(bloqueo): Json<NuevoBloqueo>,
) -> Result<Json<Value>, QuotesError> {
    let client = state.client_for(&headers)?;
    crear_bloqueo(&client, &bloqueo).await.map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/bloqueos/{bloqueo_id}",
    params(("bloqueo_id" = String, Path, description = "Block id")),
    request_body = CambiosBloqueo,
    responses((status = 200, description = "Block updated")),
    tag = "Quotes"
))]
pub async fn actualizar_bloqueo_handler(
    State(state): State<Arc<QuotesState>>,
    headers: HeaderMap,
    Path(bloqueo_id): Path<String>,
    Json(cambios): Json<CambiosBloqueo>,
) -> Result<Json<Value>, QuotesError> {
    let client = state.client_for(&headers)?;
    actualizar_bloqueo(&client, &bloqueo_id, &cambios)
        .await
        .map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/bloqueos/{bloqueo_id}",
    params(("bloqueo_id" = String, Path, description = "Block id")),
    responses((status = 200, description = "Block deleted")),
    tag = "Quotes"
))]
pub async fn eliminar_bloqueo_handler(
    State(state): State<Arc<QuotesState>>,
    headers: HeaderMap,
    Path(bloqueo_id): Path<String>,
) -> Result<Json<Value>, QuotesError> {
    let client = state.client_for(&headers)?;
    eliminar_bloqueo(&client, &bloqueo_id).await.map(Json)
}
