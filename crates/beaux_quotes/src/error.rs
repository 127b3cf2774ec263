// --- File: crates/beaux_quotes/src/error.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use beaux_common::{
    config_error, external_service_error, ApiDetail, ApiError, BeauxError, HttpStatusCode,
};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Why the backend refused a scheduling request.
///
/// The backend attaches a machine-readable `code` on newer endpoints; older
/// endpoints only send Spanish text, which is matched against the phrases
/// they are known to use. Anything unrecognised keeps the backend's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendRejection {
    NoSchedule,
    OutsideWorkingHours,
    SlotTaken,
    SlotBlocked,
    ClientNotFound,
    ServiceNotFound,
    ProfessionalNotFound,
    BranchNotFound,
    /// A request field failed backend validation.
    Field { field: String, message: String },
    Other(String),
}

/// Phrases used by the backend before it sent codes, in match order.
const LEGACY_PHRASES: &[(&str, &str)] = &[
    ("no tiene horario asignado", "NO_SCHEDULE"),
    ("fuera del horario laboral", "OUTSIDE_WORKING_HOURS"),
    ("ya tiene una cita", "SLOT_TAKEN"),
    ("bloqueado", "SLOT_BLOCKED"),
    ("Cliente no encontrado", "CLIENT_NOT_FOUND"),
    ("Servicio no encontrado", "SERVICE_NOT_FOUND"),
    ("Profesional no encontrado", "PROFESSIONAL_NOT_FOUND"),
    ("Sede no encontrada", "BRANCH_NOT_FOUND"),
];

impl BackendRejection {
    /// Maps a backend error code. Unknown codes return `None`.
    pub fn from_code(code: &str) -> Option<BackendRejection> {
        let rejection = match code.trim().to_ascii_uppercase().as_str() {
            "NO_SCHEDULE" => BackendRejection::NoSchedule,
            "OUTSIDE_WORKING_HOURS" => BackendRejection::OutsideWorkingHours,
            "SLOT_TAKEN" => BackendRejection::SlotTaken,
            "SLOT_BLOCKED" => BackendRejection::SlotBlocked,
            "CLIENT_NOT_FOUND" => BackendRejection::ClientNotFound,
            "SERVICE_NOT_FOUND" => BackendRejection::ServiceNotFound,
            "PROFESSIONAL_NOT_FOUND" => BackendRejection::ProfessionalNotFound,
            "BRANCH_NOT_FOUND" => BackendRejection::BranchNotFound,
            _ => return None,
        };
        Some(rejection)
    }

    /// Classifies a free-text message by the legacy phrases.
    pub fn from_message(message: &str) -> BackendRejection {
        LEGACY_PHRASES
            .iter()
            .find(|(phrase, _)| message.contains(phrase))
            .and_then(|(_, code)| BackendRejection::from_code(code))
            .unwrap_or_else(|| BackendRejection::Other(message.to_string()))
    }

    /// Classifies a parsed error body. `fecha_enviada` is quoted back when
    /// the backend rejects the date field.
    pub fn classify(detail: &ApiDetail, fecha_enviada: Option<&str>, fallback: &str) -> Self {
        if let Some(rejection) = detail.code().and_then(BackendRejection::from_code) {
            return rejection;
        }
        if let ApiDetail::Items(items) = detail {
            if let Some(first) = items.first() {
                let field = first.field().unwrap_or("body").to_string();
                let message = match field.as_str() {
                    "servicios" => format!("Error en servicios: {}", first.msg),
                    "fecha" => format!(
                        "Error en la fecha: {}. Fecha enviada: {}",
                        first.msg,
                        fecha_enviada.unwrap_or_default()
                    ),
                    _ => format!("Error en {}: {}", field, first.msg),
                };
                return BackendRejection::Field { field, message };
            }
        }
        BackendRejection::from_message(&detail.describe(fallback))
    }

    /// Stable code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            BackendRejection::NoSchedule => "NO_SCHEDULE",
            BackendRejection::OutsideWorkingHours => "OUTSIDE_WORKING_HOURS",
            BackendRejection::SlotTaken => "SLOT_TAKEN",
            BackendRejection::SlotBlocked => "SLOT_BLOCKED",
            BackendRejection::ClientNotFound => "CLIENT_NOT_FOUND",
            BackendRejection::ServiceNotFound => "SERVICE_NOT_FOUND",
            BackendRejection::ProfessionalNotFound => "PROFESSIONAL_NOT_FOUND",
            BackendRejection::BranchNotFound => "BRANCH_NOT_FOUND",
            BackendRejection::Field { .. } => "INVALID_FIELD",
            BackendRejection::Other(_) => "REJECTED",
        }
    }
}

impl fmt::Display for BackendRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendRejection::NoSchedule => {
                f.write_str("El estilista no tiene horario configurado para este día.")
            }
            BackendRejection::OutsideWorkingHours => {
                f.write_str("La cita está fuera del horario laboral del estilista.")
            }
            BackendRejection::SlotTaken => {
                f.write_str("El estilista ya tiene una cita programada en ese horario.")
            }
            BackendRejection::SlotBlocked => {
                f.write_str("El horario está bloqueado. Selecciona otro horario.")
            }
            BackendRejection::ClientNotFound => f.write_str("El cliente no existe en el sistema."),
            BackendRejection::ServiceNotFound => f.write_str("El servicio no existe."),
            BackendRejection::ProfessionalNotFound => f.write_str("El estilista no existe."),
            BackendRejection::BranchNotFound => f.write_str("La sede no existe."),
            BackendRejection::Field { message, .. } => f.write_str(message),
            BackendRejection::Other(message) => f.write_str(message),
        }
    }
}

/// Quotes-specific error types.
#[derive(Error, Debug)]
pub enum QuotesError {
    /// Request refused before reaching the backend
    #[error("{0}")]
    Validation(String),

    /// The backend answered with an error status
    #[error("{rejection}")]
    Rejected {
        status: u16,
        rejection: BackendRejection,
    },

    /// Transport or decoding failure
    #[error(transparent)]
    Api(ApiError),

    #[error("Quotes service is disabled")]
    Disabled,

    #[error("Backend configuration missing")]
    ConfigMissing,
}

impl QuotesError {
    /// Converts a client error, classifying backend rejections.
    pub fn from_api(err: ApiError, fecha_enviada: Option<&str>, fallback: &str) -> Self {
        match err {
            ApiError::Status { status, detail, .. } => QuotesError::Rejected {
                status,
                rejection: BackendRejection::classify(&detail, fecha_enviada, fallback),
            },
            other => QuotesError::Api(other),
        }
    }
}

impl From<ApiError> for QuotesError {
    fn from(err: ApiError) -> Self {
        QuotesError::from_api(err, None, "Error en la solicitud")
    }
}

/// Convert QuotesError to BeauxError
impl From<QuotesError> for BeauxError {
    fn from(err: QuotesError) -> Self {
        match err {
            QuotesError::Validation(msg) => BeauxError::ValidationError(msg),
            QuotesError::Rejected { status, rejection } => {
                let message = rejection.to_string();
                match rejection {
                    BackendRejection::ClientNotFound
                    | BackendRejection::ServiceNotFound
                    | BackendRejection::ProfessionalNotFound
                    | BackendRejection::BranchNotFound => BeauxError::NotFoundError(message),
                    BackendRejection::SlotTaken | BackendRejection::SlotBlocked => {
                        BeauxError::ConflictError(message)
                    }
                    BackendRejection::NoSchedule
                    | BackendRejection::OutsideWorkingHours
                    | BackendRejection::Field { .. } => BeauxError::ValidationError(message),
                    BackendRejection::Other(_) => match status {
                        401 | 403 => BeauxError::AuthError(message),
                        404 => BeauxError::NotFoundError(message),
                        409 => BeauxError::ConflictError(message),
                        400..=499 => BeauxError::ValidationError(message),
                        _ => external_service_error("salon backend", message),
                    },
                }
            }
            QuotesError::Api(e) => e.into(),
            QuotesError::Disabled => {
                BeauxError::UnavailableError("Quotes service is disabled".to_string())
            }
            QuotesError::ConfigMissing => {
                config_error("Backend configuration missing")
            }
        }
    }
}

impl HttpStatusCode for QuotesError {
    fn status_code(&self) -> u16 {
        match self {
            QuotesError::Validation(_) => 400,
            QuotesError::Rejected { status, rejection } => match rejection {
                BackendRejection::ClientNotFound
                | BackendRejection::ServiceNotFound
                | BackendRejection::ProfessionalNotFound
                | BackendRejection::BranchNotFound => 404,
                BackendRejection::SlotTaken | BackendRejection::SlotBlocked => 409,
                BackendRejection::NoSchedule
                | BackendRejection::OutsideWorkingHours
                | BackendRejection::Field { .. } => 400,
                BackendRejection::Other(_) if (400..500).contains(status) => *status,
                BackendRejection::Other(_) => 502,
            },
            QuotesError::Api(ApiError::Transport { source, .. }) if source.is_timeout() => 504,
            QuotesError::Api(ApiError::Status { status, .. }) => *status,
            QuotesError::Api(ApiError::Url(_)) => 500,
            QuotesError::Api(_) => 502,
            QuotesError::Disabled => 503,
            QuotesError::ConfigMissing => 500,
        }
    }
}

/// Same envelope as `BeauxError`, plus a `reason` code callers can branch on.
impl IntoResponse for QuotesError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let reason = match &self {
            QuotesError::Validation(_) => Some("VALIDATION"),
            QuotesError::Rejected { rejection, .. } => Some(rejection.code()),
            _ => None,
        };
        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status.as_u16(),
                "reason": reason,
            }
        }));
        (status, body).into_response()
    }
}
