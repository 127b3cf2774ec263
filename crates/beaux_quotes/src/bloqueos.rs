// --- File: crates/beaux_quotes/src/bloqueos.rs ---
//! Blocked time ranges (bloqueos) for professionals.

use beaux_common::models::{decode_lenient, extract_list, BloqueoRecord};
use beaux_common::{ApiClient, ApiError};
use beaux_format::normalize_agenda_time_value;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

use crate::error::QuotesError;
use crate::logic::require_id;

/// Listing filter. `None` fields are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(IntoParams, ToSchema))]
pub struct BloqueoFiltro {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profesional_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sede_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
}

/// A new block, single-day or recurring.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NuevoBloqueo {
    pub profesional_id: String,
    pub sede_id: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    #[serde(default)]
    pub motivo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrente: Option<bool>,
    /// Weekdays for recurring blocks, 0 = Monday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dias_semana: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<String>,
}

/// Partial update of a block or of its whole series.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CambiosBloqueo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hora_inicio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hora_fin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_fin_regla: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editar_serie: Option<bool>,
}

fn check_range(hora_inicio: &str, hora_fin: &str) -> Result<(), QuotesError> {
    let start = normalize_agenda_time_value(Some(hora_inicio));
    let end = normalize_agenda_time_value(Some(hora_fin));
    if start.is_empty() || end.is_empty() {
        return Err(QuotesError::Validation(
            "Las horas del bloqueo deben tener formato HH:MM".to_string(),
        ));
    }
    // Zero-padded HH:MM compares correctly as text.
    if end <= start {
        return Err(QuotesError::Validation(
            "La hora de fin debe ser posterior a la hora de inicio".to_string(),
        ));
    }
    Ok(())
}

impl NuevoBloqueo {
    pub fn validate(&self) -> Result<(), QuotesError> {
        if self.profesional_id.trim().is_empty() || self.sede_id.trim().is_empty() {
            return Err(QuotesError::Validation(
                "El bloqueo necesita profesional y sede".to_string(),
            ));
        }
        check_range(&self.hora_inicio, &self.hora_fin)?;
        if self.recurrente == Some(true) {
            if self.dias_semana.as_ref().map_or(true, Vec::is_empty) {
                return Err(QuotesError::Validation(
                    "Selecciona al menos un día de la semana".to_string(),
                ));
            }
            if self.dias_semana.iter().flatten().any(|d| *d > 6) {
                return Err(QuotesError::Validation(
                    "Los días de la semana van de 0 a 6".to_string(),
                ));
            }
        } else if self.fecha.as_deref().map_or(true, |f| f.trim().is_empty()) {
            return Err(QuotesError::Validation(
                "Debe indicar la fecha del bloqueo".to_string(),
            ));
        }
        Ok(())
    }
}

fn decode_bloqueos(body: Value) -> Vec<BloqueoRecord> {
    decode_lenient(extract_list(body, "bloqueos"))
}

/// Every block of one professional, across all dates.
pub async fn list_bloqueos_profesional(
    client: &ApiClient,
    profesional_id: &str,
) -> Result<Vec<BloqueoRecord>, QuotesError> {
    let path = format!(
        "scheduling/block/{}",
        require_id(profesional_id, "el profesional")?
    );
    client
        .get::<Value>(&path)
        .await
        .map(decode_bloqueos)
        .map_err(|e| {
            QuotesError::from_api(e, None, "Error al cargar bloqueos del profesional")
        })
}

/// Blocks matching the filter. A professional without a date goes to the
/// per-professional endpoint, which every deployment has.
pub async fn list_bloqueos(
    client: &ApiClient,
    filtro: &BloqueoFiltro,
) -> Result<Vec<BloqueoRecord>, QuotesError> {
    if let (Some(profesional_id), None) = (&filtro.profesional_id, &filtro.fecha) {
        return list_bloqueos_profesional(client, profesional_id).await;
    }
    client
        .get_json::<Value, _>("scheduling/block", filtro)
        .await
        .map(decode_bloqueos)
        .map_err(|e| {
            warn!("Listing bloqueos failed: {}", e);
            QuotesError::from_api(e, None, "Endpoint de bloqueos no disponible")
        })
}

pub async fn crear_bloqueo(client: &ApiClient, bloqueo: &NuevoBloqueo) -> Result<Value, QuotesError> {
    bloqueo.validate()?;
    info!(
        "Creating bloqueo for {} {}-{}",
        bloqueo.profesional_id, bloqueo.hora_inicio, bloqueo.hora_fin
    );
    client
        .post_json::<Value, _>("scheduling/block/", bloqueo)
        .await
        .map_err(|e| QuotesError::from_api(e, bloqueo.fecha.as_deref(), "Error al crear bloqueo"))
}

/// Updates a block with PATCH, falling back to PUT on deployments that
/// answer 405. An empty success body yields `{}`.
pub async fn actualizar_bloqueo(
    client: &ApiClient,
    bloqueo_id: &str,
    cambios: &CambiosBloqueo,
) -> Result<Value, QuotesError> {
    if let (Some(inicio), Some(fin)) = (&cambios.hora_inicio, &cambios.hora_fin) {
        check_range(inicio, fin)?;
    }
    let path = format!("scheduling/block/{}", require_id(bloqueo_id, "el bloqueo")?);
    match client.patch_json::<Value, _>(&path, Some(cambios)).await {
        Err(ApiError::Status { status: 405, .. }) => {
            info!("PATCH not allowed for {}, retrying with PUT", path);
            client.put_json::<Value, _>(&path, cambios).await
        }
        other => other,
    }
    .map_err(|e| QuotesError::from_api(e, None, "Error al actualizar bloqueo"))
}

pub async fn eliminar_bloqueo(client: &ApiClient, bloqueo_id: &str) -> Result<Value, QuotesError> {
    let path = format!("scheduling/block/{}", require_id(bloqueo_id, "el bloqueo")?);
    client
        .delete_json::<Value>(&path)
        .await
        .map_err(|e| QuotesError::from_api(e, None, "Error al eliminar bloqueo"))
}
