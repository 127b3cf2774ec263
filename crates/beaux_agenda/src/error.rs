// --- File: crates/beaux_agenda/src/error.rs ---
use axum::response::{IntoResponse, Response};
use beaux_common::{config_error, ApiError, BeauxError, HttpStatusCode};
use beaux_quotes::QuotesError;
use thiserror::Error;

/// Agenda-specific error types.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Grid bounds or step in the agenda config are unusable
    #[error("Invalid time grid: {0}")]
    InvalidGrid(String),

    #[error("Unknown calendar scope '{0}'")]
    InvalidScope(String),

    #[error("sede_id is required")]
    MissingSede,

    #[error("Query parameter '{0}' is required")]
    MissingParam(&'static str),

    /// A backend call made through the quotes operations failed
    #[error(transparent)]
    Backend(#[from] QuotesError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Agenda service is disabled")]
    Disabled,

    #[error("Backend configuration missing")]
    ConfigMissing,
}

/// Convert AgendaError to BeauxError
impl From<AgendaError> for BeauxError {
    fn from(err: AgendaError) -> Self {
        match err {
            AgendaError::InvalidDate(_)
            | AgendaError::InvalidScope(_)
            | AgendaError::MissingSede
            | AgendaError::MissingParam(_) => BeauxError::ValidationError(err.to_string()),
            AgendaError::InvalidGrid(msg) => BeauxError::ConfigError(msg),
            AgendaError::Backend(e) => e.into(),
            AgendaError::Api(e) => e.into(),
            AgendaError::Disabled => {
                BeauxError::UnavailableError("Agenda service is disabled".to_string())
            }
            AgendaError::ConfigMissing => {
                config_error("Backend configuration missing")
            }
        }
    }
}

impl HttpStatusCode for AgendaError {
    fn status_code(&self) -> u16 {
        match self {
            AgendaError::InvalidDate(_)
            | AgendaError::InvalidScope(_)
            | AgendaError::MissingSede
            | AgendaError::MissingParam(_) => 400,
            AgendaError::InvalidGrid(_) | AgendaError::ConfigMissing => 500,
            AgendaError::Backend(e) => e.status_code(),
            AgendaError::Api(_) => 502,
            AgendaError::Disabled => 503,
        }
    }
}

impl IntoResponse for AgendaError {
    fn into_response(self) -> Response {
        match self {
            AgendaError::Backend(e) => e.into_response(),
            other => BeauxError::from(other).into_response(),
        }
    }
}
