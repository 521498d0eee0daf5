//! Response DTOs for the settings API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::settings::{CacheStats, SelectOption, SettingType, SettingValue, Source};

/// Response body for GET /settings/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The resolved value
    pub value: SettingValue,
    /// Tier the value was resolved from
    pub source: Option<Source>,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: SettingValue, source: Option<Source>) -> Self {
        Self {
            key: key.into(),
            value,
            source,
        }
    }
}

/// Response body for GET /settings
#[derive(Debug, Clone, Serialize)]
pub struct AllResponse {
    /// Cached values by slug
    pub settings: BTreeMap<String, SettingValue>,
    /// Number of settings returned
    pub count: usize,
}

impl AllResponse {
    pub fn new(settings: BTreeMap<String, SettingValue>) -> Self {
        Self {
            count: settings.len(),
            settings,
        }
    }
}

/// Response body for PUT /settings/:key
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
    /// Whether the value is a scalar the repository can store. A key with
    /// no persisted row is still only cached.
    pub persistable: bool,
}

impl SetResponse {
    pub fn new(key: impl Into<String>, persistable: bool) -> Self {
        let key = key.into();
        Self {
            message: format!("Setting '{}' updated successfully", key),
            key,
            persistable,
        }
    }
}

/// Response body for PUT /settings/:key/temp
#[derive(Debug, Clone, Serialize)]
pub struct TempResponse {
    /// Success message
    pub message: String,
    /// The key that was overridden
    pub key: String,
}

impl TempResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Setting '{}' overridden until restart", key),
            key,
        }
    }
}

/// Response body for POST /settings
#[derive(Debug, Clone, Serialize)]
pub struct AddResponse {
    /// Generated identifier
    pub id: i64,
    /// Slug of the new setting
    pub slug: String,
}

/// Response body for DELETE /settings/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Result message
    pub message: String,
    /// The key that was deleted
    pub key: String,
    /// Whether a persisted row was removed
    pub deleted: bool,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>, deleted: bool) -> Self {
        let key = key.into();
        let message = if deleted {
            format!("Setting '{}' deleted successfully", key)
        } else {
            format!("Setting '{}' was not persisted", key)
        };
        Self {
            message,
            key,
            deleted,
        }
    }
}

/// Response body for DELETE /cache and DELETE /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Invalidated key, `None` when the whole cache was cleared
    pub key: Option<String>,
    /// Number of entries dropped
    pub removed: usize,
}

/// Response body for GET /settings/:key/options
#[derive(Debug, Clone, Serialize)]
pub struct OptionsResponse {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: SettingType,
    pub options: Vec<SelectOption>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads served from the cache
    pub hits: u64,
    /// Reads resolved through the repository
    pub misses: u64,
    /// Repository reads
    pub repository_reads: u64,
    /// Writes sent to the repository
    pub persisted_writes: u64,
    /// Structured writes kept in the cache only
    pub skipped_writes: u64,
    /// Current number of cached settings
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            repository_reads: stats.repository_reads,
            persisted_writes: stats.persisted_writes,
            skipped_writes: stats.skipped_writes,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
