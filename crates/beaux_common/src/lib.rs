// --- File: crates/beaux_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Feature flag handling
pub mod http; // HTTP utilities and the backend client
pub mod logging; // Logging utilities
pub mod models; // Backend wire records
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, not_found, validation_error,
    BeauxError, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, ApiClient, ApiError, HTTP_CLIENT},
    detail::{ApiDetail, DetailItem},
    bearer_token, path_segment,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_file, init_with_level, log_error};

pub use features::FeatureFlags;
