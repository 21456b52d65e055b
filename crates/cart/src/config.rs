//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_NAMESPACE` - Storage key namespace (default: @GoMarketplace)
//! - `CART_STORAGE_PATH` - File used by the file-backed store (default: cart-storage.json)
//! - `CART_PERSIST_NOOP_WRITES` - Write the cart even when an operation changed
//!   nothing (default: false)

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::keys;

const DEFAULT_NAMESPACE: &str = "@GoMarketplace";
const DEFAULT_STORAGE_PATH: &str = "cart-storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Application namespace prefixed to every storage key
    pub namespace: String,
    /// Backing file for the file store
    pub storage_path: PathBuf,
    /// Persist the unchanged cart after an increment/decrement of an unknown ID
    pub persist_noop_writes: bool,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            persist_noop_writes: false,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let namespace = get_env_or_default("CART_NAMESPACE", DEFAULT_NAMESPACE);
        validate_namespace(&namespace, "CART_NAMESPACE")?;
        let storage_path = PathBuf::from(get_env_or_default(
            "CART_STORAGE_PATH",
            DEFAULT_STORAGE_PATH,
        ));
        let persist_noop_writes = parse_bool(
            &get_env_or_default("CART_PERSIST_NOOP_WRITES", "false"),
            "CART_PERSIST_NOOP_WRITES",
        )?;

        Ok(Self {
            namespace,
            storage_path,
            persist_noop_writes,
        })
    }

    /// Default configuration with a different namespace.
    #[must_use]
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// The storage key holding the cart snapshot, e.g. `@GoMarketplace:products`.
    #[must_use]
    pub fn storage_key(&self) -> String {
        keys::namespaced(&self.namespace, keys::PRODUCTS)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean flag, accepting the usual spellings.
fn parse_bool(value: &str, var_name: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

/// A namespace must be non-empty and must not contain the key separator.
fn validate_namespace(namespace: &str, var_name: &str) -> Result<(), ConfigError> {
    if namespace.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }
    if namespace.contains(keys::SEPARATOR) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must not contain '{}'", keys::SEPARATOR),
        ));
    }
    Ok(())
}
