// --- File: crates/beaux_catalog/src/error.rs ---
use axum::response::{IntoResponse, Response};
use beaux_common::{config_error, not_found, validation_error, ApiError, BeauxError, HttpStatusCode};
use thiserror::Error;

/// Catalog-specific error types.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Catalog service is disabled")]
    Disabled,

    #[error("Backend configuration missing")]
    ConfigMissing,
}

/// Convert CatalogError to BeauxError
impl From<CatalogError> for BeauxError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => validation_error(msg),
            CatalogError::NotFound(msg) => not_found(msg),
            CatalogError::Api(e) => e.into(),
            CatalogError::Disabled => {
                BeauxError::UnavailableError("Catalog service is disabled".to_string())
            }
            CatalogError::ConfigMissing => {
                config_error("Backend configuration missing")
            }
        }
    }
}

impl HttpStatusCode for CatalogError {
    fn status_code(&self) -> u16 {
        match self {
            CatalogError::Validation(_) => 400,
            CatalogError::NotFound(_) => 404,
            CatalogError::Api(ApiError::Status { status, .. }) if (400..500).contains(status) => {
                *status
            }
            CatalogError::Api(ApiError::Url(_)) | CatalogError::ConfigMissing => 500,
            CatalogError::Api(_) => 502,
            CatalogError::Disabled => 503,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        BeauxError::from(self).into_response()
    }
}
