//! Static configuration fallback table.

use std::collections::HashMap;

use crate::repository::FallbackSource;
use crate::settings::SettingValue;

/// Process-wide key/value table consulted when a key has no persisted setting.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    entries: HashMap<String, SettingValue>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, replacing any previous value for the key.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FallbackSource for StaticConfig {
    fn lookup(&self, key: &str) -> Option<SettingValue> {
        self.entries.get(key).cloned()
    }
}
