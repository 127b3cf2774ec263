// --- File: crates/beaux_catalog/src/logic.rs ---
use beaux_common::models::{decode_lenient, extract_list, Estilista};
use beaux_common::{path_segment, ApiClient};
use beaux_config::SessionConfig;
use beaux_format::{is_guayaquil_sede, normalize_currency_code, SedeCurrencyInput};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::error::CatalogError;
use crate::fallback::{catalogo_guayaquil, referencia_por_nombre, Origen, GUAYAQUIL_SEDE_ID, SERVICIOS_GUAYAQUIL};
use crate::models::{CambiosServicio, NuevoServicio, Producto, Servicio, ServicioApi};

#[derive(Serialize)]
struct SedeQuery<'a> {
    sede_id: &'a str,
}

#[derive(Serialize)]
struct MonedaQuery<'a> {
    moneda: &'a str,
}

/// Currency prices are shown in for the session.
pub fn moneda_sesion(session: &SessionConfig) -> String {
    normalize_currency_code(session.moneda.as_deref())
}

fn sede_id(session: &SessionConfig) -> Option<&str> {
    session
        .sede_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn decode_servicios(body: Value) -> Vec<ServicioApi> {
    decode_lenient(extract_list(body, "servicios"))
}

/// Services of the session's branch priced in its currency.
///
/// Never fails: other branches get an empty list when the backend errors,
/// Guayaquil gets its reference list.
pub async fn list_servicios(client: &ApiClient, session: &SessionConfig) -> Vec<Servicio> {
    let moneda = moneda_sesion(session);
    if is_guayaquil_sede(&SedeCurrencyInput::from(session)) {
        return servicios_guayaquil(client, sede_id(session), &moneda).await;
    }

    let result = match sede_id(session) {
        Some(sede_id) => {
            client
                .get_json::<Value, _>("admin/servicios/", &SedeQuery { sede_id })
                .await
        }
        None => client.get::<Value>("admin/servicios/").await,
    };
    match result {
        Ok(body) => {
            let servicios: Vec<Servicio> = decode_servicios(body)
                .into_iter()
                .map(|s| Servicio::from_api(s, &moneda, sede_id(session)))
                .collect();
            debug!("Loaded {} servicios priced in {}", servicios.len(), moneda);
            servicios
        }
        Err(e) => {
            warn!("Loading servicios failed: {}", e);
            Vec::new()
        }
    }
}

async fn servicios_guayaquil(client: &ApiClient, sede_id: Option<&str>, moneda: &str) -> Vec<Servicio> {
    let sede_id = sede_id.unwrap_or(GUAYAQUIL_SEDE_ID);
    let now = Utc::now();

    let from_api = match client
        .get_json::<Value, _>("scheduling/services/", &SedeQuery { sede_id })
        .await
    {
        Ok(body) => decode_servicios(body),
        Err(e) => {
            warn!("Loading Guayaquil servicios failed, using the reference list: {}", e);
            return catalogo_guayaquil(moneda, now);
        }
    };
    if from_api.is_empty() {
        info!("Backend has no servicios for {}, using the reference list", sede_id);
        return catalogo_guayaquil(moneda, now);
    }

    let nombres: HashSet<String> = from_api.iter().map(|s| s.nombre.to_lowercase()).collect();
    let mut servicios: Vec<Servicio> = from_api
        .into_iter()
        .map(|api| {
            let codigo = referencia_por_nombre(&api.nombre).map(|r| r.codigo.to_string());
            let mut servicio = Servicio::from_api(api, moneda, Some(sede_id));
            servicio.codigo_referencia = Some(codigo.unwrap_or_default());
            servicio
        })
        .collect();

    let faltantes: Vec<Servicio> = SERVICIOS_GUAYAQUIL
        .iter()
        .filter(|r| !nombres.contains(&r.nombre.to_lowercase()))
        .map(|r| r.to_servicio(moneda, Origen::Faltante { sede_id }, now))
        .collect();
    if !faltantes.is_empty() {
        warn!("{} reference servicios missing from the backend for {}", faltantes.len(), sede_id);
    }
    servicios.extend(faltantes);
    servicios
}

/// Services one professional offers. When the professional cannot be read
/// the full list is returned.
pub async fn servicios_estilista(
    client: &ApiClient,
    session: &SessionConfig,
    profesional_id: &str,
) -> Vec<Servicio> {
    let todos = list_servicios(client, session).await;
    if todos.is_empty() {
        return todos;
    }

    let Some(profesional_id) = path_segment(profesional_id) else {
        warn!("Invalid profesional id {:?}, showing every servicio", profesional_id);
        return todos;
    };
    let path = format!("admin/profesionales/{}", profesional_id);
    let estilista: Estilista = match client.get(&path).await {
        Ok(estilista) => estilista,
        Err(e) => {
            warn!("Could not load profesional {}, showing every servicio: {}", profesional_id, e);
            return todos;
        }
    };

    let excluidos = &estilista.servicios_no_presta;
    todos
        .into_iter()
        .filter(|s| {
            let codigo = s.codigo_referencia.as_deref().unwrap_or_default();
            !excluidos.contains(&s.servicio_id) && !excluidos.iter().any(|e| e == codigo)
        })
        .collect()
}

/// Service whose reference code or service id is `codigo`.
pub async fn servicio_por_codigo(
    client: &ApiClient,
    session: &SessionConfig,
    codigo: &str,
) -> Option<Servicio> {
    list_servicios(client, session).await.into_iter().find(|s| {
        s.codigo_referencia.as_deref() == Some(codigo) || s.servicio_id == codigo
    })
}

fn servicio_path(servicio_id: &str) -> Result<String, CatalogError> {
    if servicio_id.trim().is_empty() {
        return Err(CatalogError::Validation("servicio_id es obligatorio".to_string()));
    }
    let servicio_id = path_segment(servicio_id)
        .ok_or_else(|| CatalogError::Validation("servicio_id inválido".to_string()))?;
    Ok(format!("admin/servicios/{}", servicio_id))
}

/// One service, priced for the session.
pub async fn get_servicio(
    client: &ApiClient,
    session: &SessionConfig,
    servicio_id: &str,
) -> Result<Servicio, CatalogError> {
    let api: ServicioApi = client.get(&servicio_path(servicio_id)?).await?;
    Ok(Servicio::from_api(api, &moneda_sesion(session), None))
}

pub async fn create_servicio(client: &ApiClient, servicio: NuevoServicio) -> Result<Value, CatalogError> {
    let payload = servicio.into_payload().map_err(CatalogError::Validation)?;
    info!("Creating servicio '{}'", payload.nombre);
    Ok(client.post_json("admin/servicios/", &payload).await?)
}

pub async fn update_servicio(
    client: &ApiClient,
    servicio_id: &str,
    cambios: CambiosServicio,
) -> Result<Value, CatalogError> {
    let path = servicio_path(servicio_id)?;
    let cambios = cambios.normalized().map_err(CatalogError::Validation)?;
    Ok(client.put_json(&path, &cambios).await?)
}

pub async fn delete_servicio(client: &ApiClient, servicio_id: &str) -> Result<Value, CatalogError> {
    let path = servicio_path(servicio_id)?;
    info!("Deleting servicio {}", servicio_id);
    Ok(client.delete_json(&path).await?)
}

/// Inventory products priced in `moneda`. A non-list answer means no products.
pub async fn list_productos(client: &ApiClient, moneda: &str) -> Result<Vec<Producto>, CatalogError> {
    let moneda = normalize_currency_code(Some(moneda));
    let body: Value = client
        .get_json("inventary/product/productos/", &MonedaQuery { moneda: &moneda })
        .await?;
    let Value::Array(items) = body else {
        warn!("Product listing is not an array, treating it as empty");
        return Ok(Vec::new());
    };
    Ok(items
        .iter()
        .filter_map(|item| Producto::from_value(item, &moneda))
        .collect())
}
