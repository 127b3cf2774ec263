// --- File: crates/beaux_catalog/src/lib.rs ---
pub mod doc;
pub mod error;
pub mod fallback;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod routes;

pub use error::CatalogError;
