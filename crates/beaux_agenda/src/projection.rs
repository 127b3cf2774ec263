// --- File: crates/beaux_agenda/src/projection.rs ---
//! Client-side projections of backend records, shaped for the day grid.

use beaux_common::models::{date_part, AppointmentStatus, BloqueoRecord, CitaRecord, Estilista};
use beaux_format::{extract_agenda_additional_notes, normalize_agenda_time_value, parse_agenda_minutes};
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Row colours, assigned by professional index.
pub const PALETTE: [&str; 8] = [
    "blue", "green", "purple", "amber", "indigo", "teal", "pink", "cyan",
];

fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Colour key and glyph a status is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StatusStyle {
    pub color: &'static str,
    pub icon: &'static str,
}

pub trait StatusPalette {
    fn palette(&self) -> StatusStyle;
}

impl StatusPalette for AppointmentStatus {
    fn palette(&self) -> StatusStyle {
        let (color, icon) = match self {
            AppointmentStatus::Confirmada => ("green", "✓"),
            AppointmentStatus::Pendiente => ("blue", "⏱"),
            AppointmentStatus::EnProceso => ("purple", "⚡"),
            AppointmentStatus::Cancelada => ("red", "✗"),
            AppointmentStatus::Completada => ("gray", "✓"),
            AppointmentStatus::NoAsistio | AppointmentStatus::Desconocido(_) => ("amber", "?"),
        };
        StatusStyle { color, icon }
    }
}

/// Up to two upper-cased initials, one per word.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// A row of the agenda.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Professional {
    pub profesional_id: String,
    pub nombre: String,
    pub initials: String,
    pub sede_id: Option<String>,
    pub color: &'static str,
}

impl Professional {
    pub fn from_estilista(estilista: &Estilista, row: usize) -> Professional {
        Professional {
            profesional_id: estilista.profesional_id.clone(),
            nombre: estilista.nombre.clone(),
            initials: initials(&estilista.nombre),
            sede_id: estilista.sede_id.clone(),
            color: palette_color(row),
        }
    }
}

fn serialize_raw<S: Serializer>(raw: &Arc<Value>, serializer: S) -> Result<S::Ok, S::Error> {
    raw.as_ref().serialize(serializer)
}

/// An appointment as the grid draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Appointment {
    pub id: String,
    pub profesional_id: String,
    pub profesional_nombre: String,
    pub cliente_id: Option<String>,
    pub cliente_nombre: String,
    pub servicio_nombre: String,
    /// `HH:MM`, empty when the backend sent no usable time.
    pub start: String,
    pub end: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub estado: AppointmentStatus,
    pub style: StatusStyle,
    /// Minutes, never negative.
    pub duracion: u32,
    pub color: &'static str,
    pub notas: String,
    /// The backend record this projection was built from.
    #[serde(rename = "rawData", serialize_with = "serialize_raw")]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub raw_data: Arc<Value>,
}

impl Appointment {
    /// Projects a cita. `index` is its position in the listing, used for
    /// the colour when its professional has no row.
    pub fn project(cita: &CitaRecord, index: usize, professionals: &[Professional]) -> Appointment {
        let start = normalize_agenda_time_value(Some(&cita.hora_inicio));
        let end = normalize_agenda_time_value(Some(&cita.hora_fin));
        let duracion = match (parse_agenda_minutes(&start), parse_agenda_minutes(&end)) {
            (Some(s), Some(e)) => e.saturating_sub(s),
            _ => 0,
        };
        let row = professionals
            .iter()
            .position(|p| p.profesional_id == cita.profesional_id);
        let profesional_nombre = cita
            .profesional_nombre
            .clone()
            .or_else(|| row.map(|r| professionals[r].nombre.clone()))
            .unwrap_or_default();
        let cliente_nombre = match (&cita.cliente_nombre, &cita.cliente_id) {
            (Some(nombre), _) if !nombre.trim().is_empty() => nombre.clone(),
            (_, Some(id)) => format!("Cliente {}", id),
            _ => "Cliente".to_string(),
        };
        let estado = AppointmentStatus::parse(cita.estado.as_deref());

        Appointment {
            id: cita.id.clone(),
            profesional_id: cita.profesional_id.clone(),
            profesional_nombre,
            cliente_id: cita.cliente_id.clone(),
            cliente_nombre,
            servicio_nombre: cita.servicio_nombre.clone().unwrap_or_default(),
            start,
            end,
            style: estado.palette(),
            estado,
            duracion,
            color: palette_color(row.unwrap_or(index)),
            notas: extract_agenda_additional_notes(&cita.raw),
            raw_data: Arc::clone(&cita.raw),
        }
    }
}

/// A blocked range as the grid draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Bloqueo {
    pub id: String,
    pub profesional_id: String,
    pub start: String,
    pub end: String,
    pub motivo: String,
    pub recurrente: bool,
}

impl Bloqueo {
    pub fn project(record: &BloqueoRecord) -> Bloqueo {
        Bloqueo {
            id: record.id.clone(),
            profesional_id: record.profesional_id.clone(),
            start: normalize_agenda_time_value(Some(&record.hora_inicio)),
            end: normalize_agenda_time_value(Some(&record.hora_fin)),
            motivo: record.motivo.clone().unwrap_or_default(),
            recurrente: record.recurrente.unwrap_or(false),
        }
    }

    /// Projections of the records that apply on `fecha`.
    pub fn for_date(records: &[BloqueoRecord], fecha: NaiveDate) -> Vec<Bloqueo> {
        records
            .iter()
            .filter(|r| applies_on(r, fecha))
            .map(Bloqueo::project)
            .collect()
    }
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_part(value), "%Y-%m-%d").ok()
}

/// Dated records match their own day. Undated recurring records match the
/// weekdays of their rule (0 = Monday) inside its optional date bounds.
pub fn applies_on(record: &BloqueoRecord, fecha: NaiveDate) -> bool {
    if let Some(day) = record.fecha.as_deref().filter(|f| !f.trim().is_empty()) {
        return parse_day(day) == Some(fecha);
    }
    if record.recurrente != Some(true) {
        return false;
    }
    let weekday = fecha.weekday().num_days_from_monday() as u8;
    let on_weekday = record
        .dias_semana
        .as_ref()
        .is_some_and(|days| days.contains(&weekday));
    let after_start = record
        .fecha_inicio_regla
        .as_deref()
        .and_then(parse_day)
        .map_or(true, |start| fecha >= start);
    let before_end = record
        .fecha_fin_regla
        .as_deref()
        .and_then(parse_day)
        .map_or(true, |end| fecha <= end);
    on_weekday && after_start && before_end
}
