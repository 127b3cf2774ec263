// --- File: crates/beaux_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

use crate::http::client::ApiError;

/// The base error type shared by every Beaux crate.
///
/// Feature crates keep their own error enums and convert into this one with
/// `From<SpecificError> for BeauxError`.
#[derive(Error, Debug)]
pub enum BeauxError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The salon backend answered with an error
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    #[error("Conflict: {0}")]
    ConflictError(String),

    #[error("Not found: {0}")]
    NotFoundError(String),

    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// A runtime feature flag is off
    #[error("Service unavailable: {0}")]
    UnavailableError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BeauxError {
    fn status_code(&self) -> u16 {
        match self {
            BeauxError::HttpError(_) => 502,
            BeauxError::ParseError(_) => 400,
            BeauxError::ConfigError(_) => 500,
            BeauxError::AuthError(_) => 401,
            BeauxError::ValidationError(_) => 400,
            BeauxError::ExternalServiceError { .. } => 502,
            BeauxError::ConflictError(_) => 409,
            BeauxError::NotFoundError(_) => 404,
            BeauxError::TimeoutError(_) => 504,
            BeauxError::UnavailableError(_) => 503,
            BeauxError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for BeauxError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BeauxError::TimeoutError(err.to_string())
        } else {
            BeauxError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BeauxError {
    fn from(err: serde_json::Error) -> Self {
        BeauxError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for BeauxError {
    fn from(err: std::io::Error) -> Self {
        BeauxError::InternalError(err.to_string())
    }
}

impl From<ApiError> for BeauxError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport { source, .. } => source.into(),
            ApiError::Status {
                status, detail, ..
            } => {
                let message = detail.describe(&format!("Error {}", status));
                match status {
                    401 | 403 => BeauxError::AuthError(message),
                    404 => BeauxError::NotFoundError(message),
                    409 => BeauxError::ConflictError(message),
                    400..=499 => BeauxError::ValidationError(message),
                    _ => external_service_error("salon backend", message),
                }
            }
            ApiError::Decode { path, message } => {
                BeauxError::ParseError(format!("{}: {}", path, message))
            }
            ApiError::Url(message) => BeauxError::ConfigError(message),
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BeauxError {
    BeauxError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> BeauxError {
    BeauxError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> BeauxError {
    BeauxError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> BeauxError {
    BeauxError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::detail::ApiDetail;

    #[test]
    fn status_codes_follow_variant() {
        assert_eq!(validation_error("x").status_code(), 400);
        assert_eq!(not_found("x").status_code(), 404);
        assert_eq!(external_service_error("svc", "x").status_code(), 502);
        assert_eq!(
            BeauxError::UnavailableError("off".into()).status_code(),
            503
        );
    }

    #[test]
    fn api_status_errors_map_by_code() {
        let err: BeauxError = ApiError::Status {
            path: "scheduling/quotes/".into(),
            status: 404,
            detail: ApiDetail::parse(r#"{"detail":"Cita no encontrada"}"#),
        }
        .into();
        assert!(matches!(err, BeauxError::NotFoundError(ref m) if m == "Cita no encontrada"));

        let err: BeauxError = ApiError::Status {
            path: "scheduling/quotes/".into(),
            status: 500,
            detail: ApiDetail::parse(""),
        }
        .into();
        assert_eq!(err.status_code(), 502);
        assert!(err.to_string().contains("Error 500"));
    }
}
