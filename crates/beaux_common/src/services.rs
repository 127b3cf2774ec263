// --- File: crates/beaux_common/src/services.rs ---
//! Service abstractions over the salon backend.
//!
//! The agenda only needs read access to a handful of listings. Putting them
//! behind a trait lets the layout code run against an in-memory source in
//! tests and against the HTTP backend in production.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

use crate::models::{BloqueoRecord, CitaRecord, Estilista, Sede};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Query for listing citas. `None` fields are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CitaFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sede_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profesional_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Read side of the salon backend used to assemble a day view.
pub trait AgendaSource: Send + Sync {
    /// Error type returned by the source.
    type Error: std::error::Error + Send + Sync + 'static;

    /// All branches.
    fn list_sedes(&self) -> BoxFuture<'_, Vec<Sede>, Self::Error>;

    /// Professionals, optionally restricted to a branch by the backend.
    fn list_estilistas(&self, sede_id: Option<&str>) -> BoxFuture<'_, Vec<Estilista>, Self::Error>;

    /// Appointments matching the filter.
    fn list_citas(&self, filter: &CitaFilter) -> BoxFuture<'_, Vec<CitaRecord>, Self::Error>;

    /// Every block belonging to one professional, all dates.
    fn list_bloqueos_profesional(
        &self,
        profesional_id: &str,
    ) -> BoxFuture<'_, Vec<BloqueoRecord>, Self::Error>;
}
