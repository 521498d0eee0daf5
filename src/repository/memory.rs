//! In-memory setting repository.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::{Result, SettingsError};
use crate::repository::SettingRepository;
use crate::settings::{NewSetting, Scalar, Setting};

#[derive(Debug, Default)]
struct Rows {
    by_slug: BTreeMap<String, Setting>,
    next_id: i64,
}

/// Keeps setting rows in process memory. Rows do not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    rows: RwLock<Rows>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with the given rows.
    pub fn with_settings(settings: impl IntoIterator<Item = NewSetting>) -> Result<Self> {
        let repo = Self::new();
        for setting in settings {
            repo.insert(setting)?;
        }
        Ok(repo)
    }

    pub fn len(&self) -> usize {
        self.rows.read().by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().by_slug.is_empty()
    }
}

impl SettingRepository for MemoryRepository {
    fn get(&self, slug: &str) -> Result<Option<Setting>> {
        Ok(self.rows.read().by_slug.get(slug).cloned())
    }

    fn update(&self, slug: &str, value: &Scalar) -> Result<bool> {
        let mut rows = self.rows.write();
        match rows.by_slug.get_mut(slug) {
            Some(setting) => {
                setting.value = Some(value.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn get_all(&self) -> Result<Vec<Setting>> {
        let rows = self.rows.read();
        let mut settings: Vec<Setting> = rows.by_slug.values().cloned().collect();
        settings.sort_by_key(|s| s.order);
        Ok(settings)
    }

    fn insert(&self, setting: NewSetting) -> Result<i64> {
        let mut rows = self.rows.write();
        if rows.by_slug.contains_key(&setting.slug) {
            return Err(SettingsError::Repository(format!(
                "slug '{}' already exists",
                setting.slug
            )));
        }

        rows.next_id += 1;
        let id = rows.next_id;
        debug!("Inserting setting '{}' with id {}", setting.slug, id);
        rows.by_slug
            .insert(setting.slug.clone(), Setting::from_new(id, setting));
        Ok(id)
    }

    fn delete(&self, slug: &str) -> Result<bool> {
        Ok(self.rows.write().by_slug.remove(slug).is_some())
    }
}
