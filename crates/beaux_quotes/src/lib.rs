// --- File: crates/beaux_quotes/src/lib.rs ---
pub mod bloqueos;
#[cfg(test)]
mod bloqueos_test;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod routes;

pub use error::{BackendRejection, QuotesError};
