//! Repository Module
//!
//! Contracts for the collaborators the settings store reads from, plus the
//! adapters shipped with the server.
//!
//! # Adapters
//! - [`MemoryRepository`] - In-process rows, used when no database is configured
//! - [`SqliteRepository`] - `settings` table in a SQLite file
//! - [`StaticConfig`] - Key/value fallback table built from configuration

mod fallback;
mod memory;
mod sqlite;

pub use fallback::StaticConfig;
pub use memory::MemoryRepository;
pub use sqlite::SqliteRepository;

use crate::error::Result;
use crate::settings::{NewSetting, Scalar, Setting, SettingValue};

/// CRUD over persisted settings, keyed by slug.
///
/// Calls are synchronous; errors are passed through the store unmodified.
pub trait SettingRepository: Send + Sync {
    /// Fetches the setting with the given slug.
    fn get(&self, slug: &str) -> Result<Option<Setting>>;

    /// Writes the `value` column. Returns false when no row matched.
    fn update(&self, slug: &str, value: &Scalar) -> Result<bool>;

    /// Fetches every setting.
    fn get_all(&self) -> Result<Vec<Setting>>;

    /// Inserts a setting and returns its generated id.
    fn insert(&self, setting: NewSetting) -> Result<i64>;

    /// Deletes a setting. Returns false when no row matched.
    fn delete(&self, slug: &str) -> Result<bool>;
}

/// Static configuration consulted for keys with no persisted setting.
pub trait FallbackSource: Send + Sync {
    /// Returns the configured value, or `None` when the key is unknown.
    fn lookup(&self, key: &str) -> Option<SettingValue>;
}
