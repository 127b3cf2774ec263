//! Environment variable naming for the Beaux configuration.
//!
//! Configuration paths map onto `BEAUX__SECTION__KEY` for the layered loader
//! and onto `BEAUX_SECRET_SECTION_KEY` for secrets that should never live in
//! a config file.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "BEAUX";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "BEAUX_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `"backend.base_url"` becomes `"BEAUX__BACKEND__BASE_URL"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `"backend.access_token"` becomes `"BEAUX_SECRET_BACKEND_ACCESS_TOKEN"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Paths mentioning a token, secret, key or password are treated as secrets.
pub fn is_secret_path(path: &str) -> bool {
    let path_lower = path.to_lowercase();
    path_lower.contains("secret")
        || path_lower.contains("token")
        || path_lower.contains("key")
        || path_lower.contains("password")
}

/// Look up the environment value for a configuration or secret path.
pub fn get_env_var(path: &str) -> Option<String> {
    let name = if is_secret_path(path) {
        secret_path_to_env_var(path)
    } else {
        config_path_to_env_var(path)
    };
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Environment value for `path`, or `default` when unset or blank.
pub fn get_env_or_default(path: &str, default: &str) -> String {
    get_env_var(path).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_to_env_var() {
        assert_eq!(
            config_path_to_env_var("backend.base_url"),
            "BEAUX__BACKEND__BASE_URL"
        );
        assert_eq!(
            config_path_to_env_var("session.sede_id"),
            "BEAUX__SESSION__SEDE_ID"
        );
    }

    #[test]
    fn test_secret_path_to_env_var() {
        assert_eq!(
            secret_path_to_env_var("backend.access_token"),
            "BEAUX_SECRET_BACKEND_ACCESS_TOKEN"
        );
    }

    #[test]
    fn test_is_secret_path() {
        assert!(is_secret_path("backend.access_token"));
        assert!(!is_secret_path("backend.base_url"));
        assert!(!is_secret_path("session.moneda"));
    }

    #[test]
    fn test_get_env_or_default() {
        assert_eq!(
            get_env_or_default("session.unlikely_to_exist_key_xyz", "fallback"),
            "fallback"
        );
    }
}
