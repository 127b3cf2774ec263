// --- File: crates/beaux_common/src/models.rs ---
//! Records exactly as the salon backend serves them.
//!
//! Unknown fields are ignored and missing optional fields default, so a
//! backend that grows new fields never breaks decoding. Citas keep the full
//! payload they were decoded from.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Pulls the list out of a listing response, which is either a bare array or
/// an envelope such as `{"citas": [...]}`.
pub fn extract_list(value: Value, key: &str) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Decodes every element that fits `T`, dropping the rest.
pub fn decode_lenient<T: for<'de> Deserialize<'de>>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("skipping undecodable record: {}", e);
                None
            }
        })
        .collect()
}

/// An appointment (cita).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CitaRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub sede_id: Option<String>,
    #[serde(default)]
    pub cliente_id: Option<String>,
    #[serde(default)]
    pub cliente_nombre: Option<String>,
    #[serde(default)]
    pub profesional_id: String,
    #[serde(default)]
    pub profesional_nombre: Option<String>,
    #[serde(default)]
    pub servicio_nombre: Option<String>,
    #[serde(default)]
    pub fecha: String,
    #[serde(default)]
    pub hora_inicio: String,
    #[serde(default)]
    pub hora_fin: String,
    #[serde(default)]
    pub estado: Option<String>,
    /// The payload this record was decoded from.
    #[serde(skip)]
    pub raw: Arc<Value>,
}

impl CitaRecord {
    /// Decodes a cita and keeps the payload as its back-reference.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let mut record: CitaRecord = serde_json::from_value(value.clone())?;
        if record.servicio_nombre.is_none() {
            record.servicio_nombre = first_service_name(&value);
        }
        record.raw = Arc::new(value);
        Ok(record)
    }

    /// Decodes every cita in a listing, dropping malformed entries.
    pub fn from_list(items: Vec<Value>) -> Vec<Self> {
        items
            .into_iter()
            .filter_map(|item| match CitaRecord::from_value(item) {
                Ok(c) => Some(c),
                Err(e) => {
                    tracing::warn!("skipping undecodable cita: {}", e);
                    None
                }
            })
            .collect()
    }

    /// `fecha` reduced to `YYYY-MM-DD`.
    pub fn fecha_dia(&self) -> &str {
        date_part(&self.fecha)
    }
}

fn first_service_name(value: &Value) -> Option<String> {
    value
        .get("servicios")?
        .as_array()?
        .iter()
        .filter_map(|s| s.get("nombre").and_then(Value::as_str))
        .map(str::to_string)
        .next()
}

/// The date part of `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM...` or `YYYY-MM-DD HH:MM...`.
pub fn date_part(fecha: &str) -> &str {
    let fecha = fecha.trim();
    fecha
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(fecha)
}

/// A blocked time range for one professional.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BloqueoRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub profesional_id: String,
    #[serde(default)]
    pub sede_id: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub hora_inicio: String,
    #[serde(default)]
    pub hora_fin: String,
    #[serde(default)]
    pub motivo: Option<String>,
    #[serde(default)]
    pub recurrente: Option<bool>,
    #[serde(default)]
    pub serie_id: Option<String>,
    #[serde(default)]
    pub dias_semana: Option<Vec<u8>>,
    #[serde(default)]
    pub fecha_inicio_regla: Option<String>,
    #[serde(default)]
    pub fecha_fin_regla: Option<String>,
    #[serde(default)]
    pub creado_por: Option<String>,
    #[serde(default)]
    pub fecha_creacion: Option<String>,
}

/// A stylist / professional.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Estilista {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub profesional_id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub sede_id: Option<String>,
    #[serde(default)]
    pub servicios_no_presta: Vec<String>,
    #[serde(default)]
    pub activo: Option<bool>,
}

/// A branch (sede).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Sede {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sede_id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub zona_horaria: Option<String>,
    #[serde(default)]
    pub pais: Option<String>,
    #[serde(default)]
    pub moneda: Option<String>,
    #[serde(default)]
    pub es_internacional: Option<bool>,
    #[serde(default)]
    pub activa: Option<bool>,
}

/// Appointment lifecycle state.
///
/// Parsing is case-insensitive and accepts the spellings the backend has
/// used over time; a missing value means `Pendiente`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    Pendiente,
    Confirmada,
    EnProceso,
    Cancelada,
    Completada,
    NoAsistio,
    Desconocido(String),
}

impl AppointmentStatus {
    pub fn parse(value: Option<&str>) -> AppointmentStatus {
        let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return AppointmentStatus::Pendiente;
        };
        let folded = raw.to_lowercase().replace('ó', "o");
        match folded.as_str() {
            "pendiente" | "reservada" | "reservado" => AppointmentStatus::Pendiente,
            "confirmada" | "confirmado" => AppointmentStatus::Confirmada,
            "en proceso" | "en_proceso" | "proceso" => AppointmentStatus::EnProceso,
            "cancelada" | "cancelado" => AppointmentStatus::Cancelada,
            "completada" | "completado" | "finalizada" | "finalizado" => {
                AppointmentStatus::Completada
            }
            "no asistio" | "no_asistio" => AppointmentStatus::NoAsistio,
            _ => AppointmentStatus::Desconocido(raw.to_string()),
        }
    }

    /// Wire value understood by the backend.
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Pendiente => "pendiente",
            AppointmentStatus::Confirmada => "confirmada",
            AppointmentStatus::EnProceso => "en proceso",
            AppointmentStatus::Cancelada => "cancelada",
            AppointmentStatus::Completada => "completada",
            AppointmentStatus::NoAsistio => "no asistio",
            AppointmentStatus::Desconocido(raw) => raw,
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AppointmentStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(AppointmentStatus::parse(raw.as_deref()))
    }
}

#[cfg(feature = "openapi")]
impl utoipa::PartialSchema for AppointmentStatus {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        String::schema()
    }
}

#[cfg(feature = "openapi")]
impl utoipa::ToSchema for AppointmentStatus {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cita_keeps_raw_payload_and_fills_service_name() {
        let payload = json!({
            "_id": "c1",
            "profesional_id": "P1",
            "cliente_id": "CL-9",
            "fecha": "2025-03-10",
            "hora_inicio": "10:00",
            "hora_fin": "10:30",
            "servicios": [{"servicio_id": "S1", "nombre": "CORTE DE PUNTAS"}],
            "notas": "traer referencia"
        });
        let cita = CitaRecord::from_value(payload.clone()).unwrap();
        assert_eq!(cita.id, "c1");
        assert_eq!(cita.servicio_nombre.as_deref(), Some("CORTE DE PUNTAS"));
        assert_eq!(*cita.raw, payload);
    }

    #[test]
    fn listing_accepts_array_or_envelope() {
        let arr = extract_list(json!([{"_id": "a"}]), "citas");
        assert_eq!(arr.len(), 1);
        let env = extract_list(json!({"citas": [{"_id": "a"}, {"_id": "b"}]}), "citas");
        assert_eq!(env.len(), 2);
        assert!(extract_list(json!({"other": []}), "citas").is_empty());
    }

    #[test]
    fn date_part_strips_time() {
        assert_eq!(date_part("2025-03-10"), "2025-03-10");
        assert_eq!(date_part("2025-03-10T08:00:00"), "2025-03-10");
        assert_eq!(date_part("2025-03-10 08:00:00"), "2025-03-10");
    }

    #[test]
    fn status_parses_aliases() {
        assert_eq!(AppointmentStatus::parse(None), AppointmentStatus::Pendiente);
        assert_eq!(
            AppointmentStatus::parse(Some("Reservada")),
            AppointmentStatus::Pendiente
        );
        assert_eq!(
            AppointmentStatus::parse(Some("en_proceso")),
            AppointmentStatus::EnProceso
        );
        assert_eq!(
            AppointmentStatus::parse(Some("finalizada")),
            AppointmentStatus::Completada
        );
        assert_eq!(
            AppointmentStatus::parse(Some("No asistió")),
            AppointmentStatus::NoAsistio
        );
        let odd = AppointmentStatus::parse(Some("reagendada"));
        assert_eq!(odd.as_str(), "reagendada");
        assert_eq!(serde_json::to_value(&odd).unwrap(), json!("reagendada"));
    }

    #[test]
    fn lenient_decode_drops_bad_rows() {
        let sedes: Vec<Sede> = decode_lenient(vec![
            json!({"sede_id": "SD-1", "nombre": "Centro"}),
            json!("not an object"),
        ]);
        assert_eq!(sedes.len(), 1);
    }
}
