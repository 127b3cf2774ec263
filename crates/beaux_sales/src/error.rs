// --- File: crates/beaux_sales/src/error.rs ---
use axum::response::{IntoResponse, Response};
use beaux_common::{config_error, validation_error, ApiError, BeauxError, HttpStatusCode};
use thiserror::Error;

/// Sales-specific error types.
#[derive(Error, Debug)]
pub enum SalesError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Sales service is disabled")]
    Disabled,

    #[error("Backend configuration missing")]
    ConfigMissing,
}

impl From<SalesError> for BeauxError {
    fn from(err: SalesError) -> Self {
        match err {
            SalesError::Validation(msg) => validation_error(msg),
            SalesError::Api(e) => e.into(),
            SalesError::Disabled => {
                BeauxError::UnavailableError("Sales service is disabled".to_string())
            }
            SalesError::ConfigMissing => {
                config_error("Backend configuration missing")
            }
        }
    }
}

impl HttpStatusCode for SalesError {
    fn status_code(&self) -> u16 {
        match self {
            SalesError::Validation(_) => 400,
            SalesError::Api(ApiError::Status { status, .. }) if (400..500).contains(status) => {
                *status
            }
            SalesError::Api(ApiError::Url(_)) | SalesError::ConfigMissing => 500,
            SalesError::Api(_) => 502,
            SalesError::Disabled => 503,
        }
    }
}

impl IntoResponse for SalesError {
    fn into_response(self) -> Response {
        BeauxError::from(self).into_response()
    }
}
