// --- File: crates/beaux_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Marker value replaced at load time by the matching environment variable.
pub const SECRET_MARKER: &str = "secret_from_env";

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Salon Backend Config ---
// The REST service that owns citas, servicios, pagos and analytics.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    pub base_url: String, // e.g. BEAUX__BACKEND__BASE_URL
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_true")]
    pub follow_redirects: bool,
    // Loaded via "secret_from_env" -> BACKEND_ACCESS_TOKEN
    #[serde(default)]
    pub access_token: Option<String>,
}

impl BackendConfig {
    /// The service token, ignoring an unresolved env marker.
    pub fn bearer_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && *t != SECRET_MARKER)
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

// --- Session Context ---
// What the browser kept under beaux-sede_id / beaux-nombre_local /
// beaux-moneda / beaux-pais. Handed explicitly to every call that needs it.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SessionConfig {
    #[serde(default)]
    pub sede_id: Option<String>,
    #[serde(default)]
    pub nombre_local: Option<String>,
    #[serde(default)]
    pub moneda: Option<String>,
    #[serde(default)]
    pub pais: Option<String>,
    #[serde(default)]
    pub es_internacional: Option<bool>,
    #[serde(default)]
    pub zona_horaria: Option<String>,
}

impl SessionConfig {
    /// Returns a copy with the request-level values laid over the configured ones.
    pub fn overlay(&self, other: &SessionConfig) -> SessionConfig {
        SessionConfig {
            sede_id: other.sede_id.clone().or_else(|| self.sede_id.clone()),
            nombre_local: other
                .nombre_local
                .clone()
                .or_else(|| self.nombre_local.clone()),
            moneda: other.moneda.clone().or_else(|| self.moneda.clone()),
            pais: other.pais.clone().or_else(|| self.pais.clone()),
            es_internacional: other.es_internacional.or(self.es_internacional),
            zona_horaria: other
                .zona_horaria
                .clone()
                .or_else(|| self.zona_horaria.clone()),
        }
    }
}

// --- Agenda Grid Geometry ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AgendaConfig {
    #[serde(default = "default_cell_height")]
    pub cell_height: i32,
    #[serde(default = "default_cell_width")]
    pub cell_width: i32,
    #[serde(default = "default_header_height")]
    pub header_height: i32,
    #[serde(default = "default_label_column_width")]
    pub label_column_width: i32,
    /// Hand-tuned vertical offset applied to every overlay.
    #[serde(default = "default_top_adjust")]
    pub top_adjust: i32,
    #[serde(default = "default_height_padding")]
    pub height_padding: i32,
    #[serde(default = "default_min_height")]
    pub min_height: i32,
    #[serde(default = "default_first_slot")]
    pub first_slot: String,
    #[serde(default = "default_last_slot")]
    pub last_slot: String,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            cell_height: default_cell_height(),
            cell_width: default_cell_width(),
            header_height: default_header_height(),
            label_column_width: default_label_column_width(),
            top_adjust: default_top_adjust(),
            height_padding: default_height_padding(),
            min_height: default_min_height(),
            first_slot: default_first_slot(),
            last_slot: default_last_slot(),
            slot_minutes: default_slot_minutes(),
        }
    }
}

fn default_cell_height() -> i32 {
    32
}
fn default_cell_width() -> i32 {
    96
}
fn default_header_height() -> i32 {
    40
}
fn default_label_column_width() -> i32 {
    64
}
fn default_top_adjust() -> i32 {
    -33
}
fn default_height_padding() -> i32 {
    4
}
fn default_min_height() -> i32 {
    20
}
fn default_first_slot() -> String {
    "05:00".to_string()
}
fn default_last_slot() -> String {
    "19:00".to_string()
}
fn default_slot_minutes() -> u32 {
    30
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_agenda: bool,
    #[serde(default)]
    pub use_quotes: bool,
    #[serde(default)]
    pub use_catalog: bool,
    #[serde(default)]
    pub use_sales: bool,

    #[serde(default)]
    pub backend: Option<BackendConfig>,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub agenda: AgendaConfig,
}
