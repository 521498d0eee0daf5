//! Configuration Module
//!
//! Handles loading server configuration from environment variables and exposes
//! it as the static fallback table consulted for keys with no persisted setting.

use std::env;

use crate::repository::StaticConfig;
use crate::settings::{Scalar, SettingValue};

/// Prefix for environment variables exported into the fallback table.
pub const FALLBACK_ENV_PREFIX: &str = "CONFIG_";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// SQLite database file, `None` keeps settings in memory
    pub database_path: Option<String>,
    /// Site name served as a config fallback
    pub site_name: String,
    /// Extra fallback entries collected from `CONFIG_*` variables
    pub extra: Vec<(String, String)>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_PATH` - SQLite file (default: unset, in-memory repository)
    /// - `SITE_NAME` - Site name (default: "My Site")
    /// - `CONFIG_<NAME>` - Exported as fallback key `<name>` (lowercased)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            database_path: env::var("DATABASE_PATH").ok().filter(|v| !v.is_empty()),
            site_name: env::var("SITE_NAME").unwrap_or(defaults.site_name),
            extra: collect_prefixed(env::vars()),
        }
    }

    /// Builds the static fallback table from this configuration.
    pub fn fallback(&self) -> StaticConfig {
        let mut table = StaticConfig::new()
            .with_entry("server_port", Scalar::Int(i64::from(self.server_port)))
            .with_entry("site_name", Scalar::String(self.site_name.clone()));

        if let Some(path) = &self.database_path {
            table = table.with_entry("database_path", Scalar::String(path.clone()));
        }

        for (key, value) in &self.extra {
            table = table.with_entry(key.clone(), SettingValue::from(value.as_str()));
        }

        table
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_path: None,
            site_name: "My Site".to_string(),
            extra: Vec::new(),
        }
    }
}

/// Keeps `CONFIG_*` variables, keyed by their lowercased suffix.
fn collect_prefixed(vars: impl Iterator<Item = (String, String)>) -> Vec<(String, String)> {
    let mut extra: Vec<(String, String)> = vars
        .filter_map(|(name, value)| {
            name.strip_prefix(FALLBACK_ENV_PREFIX)
                .filter(|suffix| !suffix.is_empty())
                .map(|suffix| (suffix.to_lowercase(), value))
        })
        .collect();
    extra.sort();
    extra
}
