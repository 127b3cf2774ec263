// --- File: crates/beaux_agenda/src/lib.rs ---
pub mod clock;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod projection;
#[cfg(test)]
mod projection_test;
pub mod routes;
pub mod scope;
pub mod service;

pub use error::AgendaError;

/// The agenda source handlers work with.
pub type DynAgendaSource = dyn beaux_common::services::AgendaSource<Error = AgendaError>;
