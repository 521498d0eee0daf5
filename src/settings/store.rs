//! Settings Store Module
//!
//! Main settings engine: a cache of resolved values in front of the setting
//! repository, falling back to static configuration for unknown keys.
//!
//! # Resolution Order
//! 1. Cached value (including `set`/`temp` overrides)
//! 2. Persisted `value`, or the persisted `default` when the value is unset
//! 3. Static configuration fallback
//!
//! Cached entries are never dropped implicitly: deleting a setting, or
//! writing to the repository behind the store's back, leaves the cached
//! value in place until [`SettingsStore::invalidate`] or
//! [`SettingsStore::clear`] is called.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::Result;
use crate::repository::{FallbackSource, SettingRepository};
use crate::settings::{CacheEntry, CacheStats, NewSetting, Setting, SettingValue, Source};

// == Settings Store ==
/// Cache-backed settings accessor.
pub struct SettingsStore {
    /// Resolved values by slug
    cache: HashMap<String, CacheEntry>,
    /// Persisted settings
    repository: Arc<dyn SettingRepository>,
    /// Static configuration consulted when no setting exists
    fallback: Arc<dyn FallbackSource>,
    /// Performance statistics
    stats: CacheStats,
}

impl SettingsStore {
    // == Constructor ==
    /// Creates an empty store over the given repository and fallback source.
    pub fn new(
        repository: Arc<dyn SettingRepository>,
        fallback: Arc<dyn FallbackSource>,
    ) -> Self {
        Self {
            cache: HashMap::new(),
            repository,
            fallback,
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Returns the value for `key`, resolving and caching it on first access.
    ///
    /// Unknown keys are not an error: when neither the repository nor the
    /// fallback source knows the key, `Ok(None)` is returned and nothing is
    /// cached, so a later call will look again.
    pub fn get(&mut self, key: &str) -> Result<Option<SettingValue>> {
        if let Some(entry) = self.cache.get(key) {
            self.stats.record_hit();
            return Ok(Some(entry.value.clone()));
        }

        self.stats.record_miss();
        self.stats.record_repository_read();

        let resolved = match self.repository.get(key)? {
            Some(setting) => Some(resolve_setting(&setting)),
            None => self
                .fallback
                .lookup(key)
                .map(|value| (value, Source::Fallback)),
        };

        match resolved {
            Some((value, source)) => {
                debug!("Resolved setting '{}' from {:?}", key, source);
                self.store(key.to_string(), value.clone(), source);
                Ok(Some(value))
            }
            None => {
                debug!("No value for setting '{}'", key);
                Ok(None)
            }
        }
    }

    // == Set ==
    /// Sets `key` to `value` in the cache, persisting scalar values.
    ///
    /// Returns `Ok(false)` without writing anything when `key` is empty.
    /// Structured values are cached but never reach the repository; the call
    /// still succeeds. An update that matches no row is not an error.
    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) -> Result<bool> {
        if key.is_empty() {
            return Ok(false);
        }

        let value = value.into();
        match value.as_scalar() {
            Some(scalar) => {
                let updated = self.repository.update(key, scalar)?;
                self.stats.record_persisted_write();
                if !updated {
                    debug!("Setting '{}' has no persisted row, cached only", key);
                }
            }
            None => {
                self.stats.record_skipped_write();
                debug!("Setting '{}' is structured, skipping persistence", key);
            }
        }

        self.store(key.to_string(), value, Source::Override);
        Ok(true)
    }

    // == Temp ==
    /// Overrides `key` in the cache without touching the repository.
    ///
    /// The override lasts as long as the store does.
    pub fn temp(&mut self, key: &str, value: impl Into<SettingValue>) {
        self.store(key.to_string(), value.into(), Source::Override);
    }

    // == Get All ==
    /// Returns every cached value, loading all persisted settings first if
    /// the cache is empty.
    ///
    /// A non-empty cache is returned as it stands, even when it only holds
    /// the keys read so far. Fallback keys are never bulk loaded.
    pub fn get_all(&mut self) -> Result<BTreeMap<String, SettingValue>> {
        if self.cache.is_empty() {
            self.stats.record_repository_read();
            let settings = self.repository.get_all()?;
            info!("Loaded {} settings from repository", settings.len());

            for setting in &settings {
                let (value, source) = resolve_setting(setting);
                self.cache
                    .insert(setting.slug.clone(), CacheEntry::new(value, source));
            }
            self.stats.set_total_entries(self.cache.len());
        }

        Ok(self
            .cache
            .iter()
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect())
    }

    // == Add ==
    /// Validates and inserts a new setting, returning its id.
    ///
    /// Field names outside the settings columns reject the whole record with
    /// `InvalidFormat`. The cache is left untouched.
    pub fn add(&mut self, fields: Map<String, Value>) -> Result<i64> {
        let new = NewSetting::from_fields(fields)?;
        let slug = new.slug.clone();
        let id = self.repository.insert(new)?;
        info!("Added setting '{}' with id {}", slug, id);
        Ok(id)
    }

    // == Delete ==
    /// Deletes the persisted setting. Any cached value for it is kept.
    pub fn delete(&mut self, slug: &str) -> Result<bool> {
        let deleted = self.repository.delete(slug)?;
        if deleted {
            info!("Deleted setting '{}'", slug);
        }
        Ok(deleted)
    }

    /// Fetches the full persisted record, bypassing the cache.
    pub fn record(&self, slug: &str) -> Result<Option<Setting>> {
        self.repository.get(slug)
    }

    // == Invalidate ==
    /// Drops the cached value for `key`. Returns true if one was cached.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.cache.remove(key).is_some();
        self.stats.set_total_entries(self.cache.len());
        removed
    }

    // == Clear ==
    /// Drops every cached value, including overrides.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.stats.set_total_entries(0);
    }

    /// Returns the cache entry for `key`, if any.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.cache.get(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.cache.len());
        stats
    }

    // == Length ==
    /// Returns the current number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn store(&mut self, key: String, value: SettingValue, source: Source) {
        self.cache.insert(key, CacheEntry::new(value, source));
        self.stats.set_total_entries(self.cache.len());
    }
}

/// Applies the value/default rule to a persisted setting.
fn resolve_setting(setting: &Setting) -> (SettingValue, Source) {
    match &setting.value {
        Some(value) => (SettingValue::Scalar(value.clone()), Source::Persisted),
        None => (SettingValue::Scalar(setting.default.clone()), Source::Default),
    }
}
