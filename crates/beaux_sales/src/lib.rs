// --- File: crates/beaux_sales/src/lib.rs ---
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
#[cfg(test)]
mod logic_test;
pub mod models;
pub mod payment_summary;
pub mod routes;

pub use error::SalesError;
