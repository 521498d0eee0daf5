//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and where their value came from.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::settings::SettingValue;

// == Source ==
/// Resolution tier that produced a cached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Persisted `value` column
    Persisted,
    /// Persisted `default` column (value was unset)
    Default,
    /// Static configuration fallback
    Fallback,
    /// Written by `set` or `temp`
    Override,
}

// == Cache Entry ==
/// Represents a single resolved setting held by the cache.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The resolved value
    pub value: SettingValue,
    /// Tier the value was resolved from
    pub source: Source,
    /// When the entry was written
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(value: SettingValue, source: Source) -> Self {
        Self {
            value,
            source,
            cached_at: Utc::now(),
        }
    }

    // == Is Override ==
    /// Returns true if the value came from `set` or `temp` rather than a lookup.
    pub fn is_override(&self) -> bool {
        self.source == Source::Override
    }
}
