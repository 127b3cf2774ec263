// --- File: crates/beaux_quotes/src/logic.rs ---
use beaux_common::models::{extract_list, AppointmentStatus, CitaRecord};
use beaux_common::services::CitaFilter;
use beaux_common::{path_segment, ApiClient};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub use crate::error::{BackendRejection, QuotesError};

/// Listing endpoints for citas, newest first. Deployments differ in which
/// one they expose.
pub const CITAS_ENDPOINTS: &[&str] = &["scheduling/quotes/citas/", "scheduling/quotes/"];

const GIFTCARD_METHOD: &str = "giftcard";
const GIFTCARD_CODE_REQUIRED: &str = "Debes ingresar el codigo de la Gift Card para continuar";

// --- Data Structures ---

/// One service line of a new appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ServicioCita {
    #[serde(default)]
    pub servicio_id: String,
    /// Overrides the catalog price when set.
    #[serde(default)]
    pub precio_personalizado: Option<f64>,
    #[serde(default = "default_cantidad")]
    pub cantidad: u32,
}

fn default_cantidad() -> u32 {
    1
}

/// A new appointment as submitted by the booking form.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NuevaCita {
    pub sede_id: String,
    pub profesional_id: String,
    pub cliente_id: String,
    #[serde(default)]
    pub servicios: Vec<ServicioCita>,
    pub fecha: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    #[serde(default, alias = "metodo_pago")]
    pub metodo_pago_inicial: Option<String>,
    #[serde(default)]
    pub abono: Option<f64>,
    #[serde(default)]
    pub notas: Option<String>,
    #[serde(default)]
    pub codigo_giftcard: Option<String>,
}

/// Body of `POST scheduling/quotes/`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CitaPayload {
    pub sede_id: String,
    pub profesional_id: String,
    pub cliente_id: String,
    pub servicios: Vec<ServicioCita>,
    pub fecha: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    pub metodo_pago_inicial: String,
    pub abono: f64,
    pub notas: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_giftcard: Option<String>,
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl NuevaCita {
    /// Applies defaults and the checks the backend would otherwise reject
    /// with less helpful messages.
    pub fn into_payload(self) -> Result<CitaPayload, QuotesError> {
        let codigo_giftcard = trimmed(self.codigo_giftcard.as_deref());
        let metodo_pago_inicial =
            trimmed(self.metodo_pago_inicial.as_deref()).unwrap_or_else(|| "sin_pago".to_string());

        if metodo_pago_inicial == GIFTCARD_METHOD && codigo_giftcard.is_none() {
            return Err(QuotesError::Validation(GIFTCARD_CODE_REQUIRED.to_string()));
        }
        if self.servicios.is_empty() {
            return Err(QuotesError::Validation(
                "Debe incluir al menos un servicio".to_string(),
            ));
        }
        if self.servicios.iter().any(|s| s.servicio_id.trim().is_empty()) {
            return Err(QuotesError::Validation(
                "Cada servicio debe tener un servicio_id".to_string(),
            ));
        }

        let abono = self.abono.filter(|a| a.is_finite()).unwrap_or(0.0);
        Ok(CitaPayload {
            sede_id: self.sede_id,
            profesional_id: self.profesional_id,
            cliente_id: self.cliente_id,
            servicios: self.servicios,
            fecha: self.fecha,
            hora_inicio: self.hora_inicio,
            hora_fin: self.hora_fin,
            metodo_pago_inicial,
            abono,
            notas: self.notas.unwrap_or_default(),
            codigo_giftcard,
        })
    }
}

/// Status change request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CambioEstado {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "confirmada"))]
    pub nuevo_estado: AppointmentStatus,
}

/// A payment against an appointment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Pago {
    pub monto: f64,
    #[serde(default)]
    pub metodo_pago: Option<String>,
    #[serde(default)]
    pub notas: Option<String>,
    #[serde(default)]
    pub codigo_giftcard: Option<String>,
}

/// Body of `POST scheduling/quotes/citas/{id}/pago`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PagoPayload {
    pub monto: f64,
    pub metodo_pago: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_giftcard: Option<String>,
}

impl Pago {
    pub fn into_payload(self) -> Result<PagoPayload, QuotesError> {
        if !self.monto.is_finite() || self.monto <= 0.0 {
            return Err(QuotesError::Validation(
                "El monto debe ser mayor a 0".to_string(),
            ));
        }
        let metodo_pago =
            trimmed(self.metodo_pago.as_deref()).unwrap_or_else(|| "efectivo".to_string());
        let codigo_giftcard = trimmed(self.codigo_giftcard.as_deref());
        if metodo_pago == GIFTCARD_METHOD && codigo_giftcard.is_none() {
            return Err(QuotesError::Validation(GIFTCARD_CODE_REQUIRED.to_string()));
        }
        Ok(PagoPayload {
            monto: self.monto,
            metodo_pago,
            notas: trimmed(self.notas.as_deref()),
            codigo_giftcard,
        })
    }
}

/// A retail product added to an appointment.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProductoItem {
    pub producto_id: String,
    pub nombre: String,
    #[serde(default = "default_cantidad")]
    pub cantidad: u32,
    pub precio_unitario: f64,
}

/// An id usable as one backend path segment.
pub(crate) fn require_id<'a>(id: &'a str, what: &str) -> Result<&'a str, QuotesError> {
    if id.trim().is_empty() {
        return Err(QuotesError::Validation(format!(
            "Falta el identificador de {}",
            what
        )));
    }
    path_segment(id).ok_or_else(|| {
        QuotesError::Validation(format!("Identificador de {} inválido", what))
    })
}

// --- Core Logic Functions ---

/// Lists citas, trying each known listing endpoint in turn. When all fail
/// the last error is returned.
pub async fn list_citas(
    client: &ApiClient,
    filter: &CitaFilter,
) -> Result<Vec<CitaRecord>, QuotesError> {
    let mut last_error = None;
    for endpoint in CITAS_ENDPOINTS {
        match client.get_json::<Value, _>(endpoint, filter).await {
            Ok(body) => {
                let citas = CitaRecord::from_list(extract_list(body, "citas"));
                info!("Loaded {} citas from {}", citas.len(), endpoint);
                return Ok(citas);
            }
            Err(e) => {
                warn!("Listing citas via {} failed: {}", endpoint, e);
                last_error = Some(e);
            }
        }
    }
    Err(match last_error {
        Some(e) => QuotesError::from_api(e, None, "Error al cargar citas"),
        None => QuotesError::Validation("Error al cargar citas".to_string()),
    })
}

/// Creates an appointment. Backend rejections come back classified.
pub async fn crear_cita(client: &ApiClient, cita: NuevaCita) -> Result<Value, QuotesError> {
    let payload = cita.into_payload()?;
    info!(
        "Creating cita for cliente {} with profesional {} on {} {}-{} ({} servicios)",
        payload.cliente_id,
        payload.profesional_id,
        payload.fecha,
        payload.hora_inicio,
        payload.hora_fin,
        payload.servicios.len()
    );
    client
        .post_json::<Value, _>("scheduling/quotes/", &payload)
        .await
        .map_err(|e| QuotesError::from_api(e, Some(&payload.fecha), "Error al crear cita"))
}

/// Reschedules or edits an appointment. `cambios` is forwarded unchanged.
pub async fn editar_cita(
    client: &ApiClient,
    cita_id: &str,
    cambios: &Value,
) -> Result<Value, QuotesError> {
    let cita_id = require_id(cita_id, "la cita")?;
    if !cambios.is_object() {
        return Err(QuotesError::Validation(
            "Los cambios deben ser un objeto JSON".to_string(),
        ));
    }
    let fecha = cambios.get("fecha").and_then(Value::as_str);
    client
        .put_json::<Value, _>(&format!("scheduling/quotes/{}", cita_id), cambios)
        .await
        .map_err(|e| QuotesError::from_api(e, fecha, "Error al editar cita"))
}

pub async fn cancelar_cita(client: &ApiClient, cita_id: &str) -> Result<Value, QuotesError> {
    let cita_id = require_id(cita_id, "la cita")?;
    info!("Cancelling cita {}", cita_id);
    client
        .patch_json::<Value, Value>(&format!("scheduling/quotes/{}/cancelar", cita_id), None)
        .await
        .map_err(|e| QuotesError::from_api(e, None, "Error al cancelar cita"))
}

pub async fn cambiar_estado(
    client: &ApiClient,
    cita_id: &str,
    estado: &AppointmentStatus,
) -> Result<Value, QuotesError> {
    let cita_id = require_id(cita_id, "la cita")?;
    info!("Setting cita {} to '{}'", cita_id, estado);
    let body = json!({ "nuevo_estado": estado.as_str() });
    client
        .patch_json::<Value, _>(&format!("scheduling/quotes/{}/estado", cita_id), Some(&body))
        .await
        .map_err(|e| QuotesError::from_api(e, None, "Error al cambiar estado de cita"))
}

pub async fn registrar_pago(
    client: &ApiClient,
    cita_id: &str,
    pago: Pago,
) -> Result<Value, QuotesError> {
    let cita_id = require_id(cita_id, "la cita")?;
    let payload = pago.into_payload()?;
    info!(
        "Registering {} payment of {} for cita {}",
        payload.metodo_pago, payload.monto, cita_id
    );
    client
        .post_json::<Value, _>(&format!("scheduling/quotes/citas/{}/pago", cita_id), &payload)
        .await
        .map_err(|e| QuotesError::from_api(e, None, "Error al registrar pago"))
}

pub async fn agregar_productos(
    client: &ApiClient,
    cita_id: &str,
    productos: &[ProductoItem],
) -> Result<Value, QuotesError> {
    let cita_id = require_id(cita_id, "la cita")?;
    if productos.is_empty() {
        return Err(QuotesError::Validation(
            "No hay productos seleccionados para agregar".to_string(),
        ));
    }
    if let Some(bad) = productos
        .iter()
        .find(|p| p.producto_id.trim().is_empty() || p.cantidad == 0)
    {
        return Err(QuotesError::Validation(format!(
            "Producto inválido: '{}'",
            bad.nombre
        )));
    }
    client
        .post_json::<Value, _>(
            &format!("scheduling/quotes/cita/{}/agregar-productos", cita_id),
            productos,
        )
        .await
        .map_err(|e| QuotesError::from_api(e, None, "Error al agregar productos"))
}
