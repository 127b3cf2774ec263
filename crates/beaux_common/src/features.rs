//! Feature flag handling.
//!
//! ## Available Features
//!
//! - `openapi`: Enables OpenAPI documentation generation
//! - `agenda`: Day calendar layout (grid, occupancy, overlay geometry)
//! - `quotes`: Appointment, block and payment operations
//! - `catalog`: Service and product catalog
//! - `sales`: Sales dashboard and client analytics
//!
//! Each feature is gated twice: at compile time through cargo features and at
//! runtime through the `use_*` flags in `AppConfig`.

use beaux_config::AppConfig;
use serde::Serialize;

/// Features that are both compiled in and switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    pub agenda: bool,
    pub quotes: bool,
    pub catalog: bool,
    pub sales: bool,
}

impl FeatureFlags {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            agenda: cfg!(feature = "agenda") && config.use_agenda,
            quotes: cfg!(feature = "quotes") && config.use_quotes,
            catalog: cfg!(feature = "catalog") && config.use_catalog,
            sales: cfg!(feature = "sales") && config.use_sales,
        }
    }

    /// Names of the live features, for the startup log.
    pub fn enabled(&self) -> Vec<&'static str> {
        [
            ("agenda", self.agenda),
            ("quotes", self.quotes),
            ("catalog", self.catalog),
            ("sales", self.sales),
        ]
        .into_iter()
        .filter(|(_, on)| *on)
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_lists_live_features_in_order() {
        let flags = FeatureFlags {
            agenda: true,
            quotes: false,
            catalog: true,
            sales: true,
        };
        assert_eq!(flags.enabled(), vec!["agenda", "catalog", "sales"]);
    }

    #[test]
    fn nothing_enabled_is_empty() {
        let flags = FeatureFlags {
            agenda: false,
            quotes: false,
            catalog: false,
            sales: false,
        };
        assert!(flags.enabled().is_empty());
    }
}
