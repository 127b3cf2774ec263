// --- File: crates/beaux_catalog/src/handlers.rs ---
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use beaux_common::{bearer_token, ApiClient};
use beaux_config::{AppConfig, SessionConfig};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

#[cfg(feature = "openapi")]
use utoipa::IntoParams;

use crate::error::CatalogError;
use crate::logic::{
    create_servicio, delete_servicio, get_servicio, list_productos, list_servicios,
    moneda_sesion, servicio_por_codigo, servicios_estilista, update_servicio,
};
use crate::models::{CambiosServicio, NuevoServicio, Producto, Servicio};

// Shared state for the catalog handlers
#[derive(Clone)]
pub struct CatalogState {
    pub config: Arc<AppConfig>,
    /// `None` when the backend section is missing from the config.
    pub client: Option<ApiClient>,
}

impl CatalogState {
    fn client_for(&self, headers: &HeaderMap) -> Result<ApiClient, CatalogError> {
        if !self.config.use_catalog {
            return Err(CatalogError::Disabled);
        }
        let client = self.client.as_ref().ok_or_else(|| {
            warn!("Backend configuration missing in AppConfig.");
            CatalogError::ConfigMissing
        })?;
        Ok(client.with_token(bearer_token(headers)))
    }
}

/// Session values a request may carry, laid over the configured session.
#[derive(Debug, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SessionQuery {
    pub sede_id: Option<String>,
    pub nombre_local: Option<String>,
    pub moneda: Option<String>,
    pub pais: Option<String>,
}

impl SessionQuery {
    fn session(&self, configured: &SessionConfig) -> SessionConfig {
        configured.overlay(&SessionConfig {
            sede_id: self.sede_id.clone(),
            nombre_local: self.nombre_local.clone(),
            moneda: self.moneda.clone(),
            pais: self.pais.clone(),
            ..Default::default()
        })
    }
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/catalog/servicios",
    params(SessionQuery),
    responses((status = 200, description = "Services of the branch", body = Vec<Servicio>)),
    tag = "Catalog"
))]
pub async fn list_servicios_handler(
    State(state): State<Arc<CatalogState>>,
    headers: HeaderMap,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Vec<Servicio>>, CatalogError> {
    let client = state.client_for(&headers)?;
    let session = query.session(&state.config.session);
    Ok(Json(list_servicios(&client, &session).await))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/catalog/servicios/codigo/{codigo}",
    params(("codigo" = String, Path, description = "Reference code or service id"), SessionQuery),
    responses(
        (status = 200, description = "The service", body = Servicio),
        (status = 404, description = "No such code")
    ),
    tag = "Catalog"
))]
pub async fn servicio_por_codigo_handler(
    State(state): State<Arc<CatalogState>>,
    headers: HeaderMap,
    Path(codigo): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Servicio>, CatalogError> {
    let client = state.client_for(&headers)?;
    let session = query.session(&state.config.session);
    servicio_por_codigo(&client, &session, &codigo)
        .await
        .map(Json)
        .ok_or_else(|| CatalogError::NotFound(format!("Servicio {} no encontrado", codigo)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/catalog/servicios/{servicio_id}",
    params(("servicio_id" = String, Path, description = "Service id"), SessionQuery),
    responses(
        (status = 200, description = "The service", body = Servicio),
        (status = 404, description = "Not found")
    ),
    tag = "Catalog"
))]
pub async fn get_servicio_handler(
    State(state): State<Arc<CatalogState>>,
    headers: HeaderMap,
    Path(servicio_id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Servicio>, CatalogError> {
    let client = state.client_for(&headers)?;
    let session = query.session(&state.config.session);
    get_servicio(&client, &session, &servicio_id).await.map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/catalog/servicios",
    request_body = NuevoServicio,
    responses(
        (status = 200, description = "Service created"),
        (status = 400, description = "Invalid service")
    ),
    tag = "Catalog"
))]
pub async fn create_servicio_handler(
    State(state): State<Arc<CatalogState>>,
    headers: HeaderMap,
    Json(servicio): Json<NuevoServicio>,
) -> Result<Json<Value>, CatalogError> {
    let client = state.client_for(&headers)?;
    create_servicio(&client, servicio).await.map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/catalog/servicios/{servicio_id}",
    params(("servicio_id" = String, Path, description = "Service id")),
    request_body = CambiosServicio,
    responses((status = 200, description = "Service updated")),
    tag = "Catalog"
))]
pub async fn update_servicio_handler(
    State(state): State<Arc<CatalogState>>,
    headers: HeaderMap,
    Path(servicio_id): Path<String>,
    Json(cambios): Json<CambiosServicio>,
) -> Result<Json<Value>, CatalogError> {
    let client = state.client_for(&headers)?;
    update_servicio(&client, &servicio_id, cambios).await.map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/catalog/servicios/{servicio_id}",
    params(("servicio_id" = String, Path, description = "Service id")),
    responses((status = 200, description = "Service deleted")),
    tag = "Catalog"
))]
pub async fn delete_servicio_handler(
    State(state): State<Arc<CatalogState>>,
    headers: HeaderMap,
    Path(servicio_id): Path<String>,
) -> Result<Json<Value>, CatalogError> {
    let client = state.client_for(&headers)?;
    delete_servicio(&client, &servicio_id).await.map(Json)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/catalog/estilistas/{profesional_id}/servicios",
    params(("profesional_id" = String, Path, description = "Professional id"), SessionQuery),
    responses((status = 200, description = "Services the professional offers", body = Vec<Servicio>)),
    tag = "Catalog"
))]
pub async fn servicios_estilista_handler(
    State(state): State<Arc<CatalogState>>,
    headers: HeaderMap,
    Path(profesional_id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Vec<Servicio>>, CatalogError> {
    let client = state.client_for(&headers)?;
    let session = query.session(&state.config.session);
    Ok(Json(servicios_estilista(&client, &session, &profesional_id).await))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/catalog/productos",
    params(SessionQuery),
    responses((status = 200, description = "Inventory products", body = Vec<Producto>)),
    tag = "Catalog"
))]
pub async fn list_productos_handler(
    State(state): State<Arc<CatalogState>>,
    headers: HeaderMap,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Vec<Producto>>, CatalogError> {
    let client = state.client_for(&headers)?;
    let moneda = moneda_sesion(&query.session(&state.config.session));
    list_productos(&client, &moneda).await.map(Json)
}
