//! Process-wide catalog configuration, read once at startup.

use serde::Serialize;
use thiserror::Error;

pub const BASE_PATH_VAR: &str = "CATALOG_BASE_PATH";
pub const STORE_BUFFER_VAR: &str = "CATALOG_STORE_BUFFER";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogConfig {
    /// Path prefix every course route is mounted under, e.g. `/courses`.
    pub base_path: String,
    /// Capacity of the store actor's request queue.
    pub store_buffer: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_path: "/courses".to_string(),
            store_buffer: 32,
        }
    }
}

impl CatalogConfig {
    /// Reads overrides from `CATALOG_BASE_PATH` and `CATALOG_STORE_BUFFER`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`CatalogConfig::from_env`] with a caller-supplied variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(BASE_PATH_VAR) {
            config.base_path = normalize_base_path(&path);
        }
        if let Some(value) = lookup(STORE_BUFFER_VAR) {
            config.store_buffer = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidNumber {
                    var: STORE_BUFFER_VAR,
                    value,
                })?;
        }

        Ok(config)
    }
}

/// Leading slash, no trailing slash; an empty path mounts at the root.
fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
