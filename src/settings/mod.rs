//! Settings Module
//!
//! Provides the cache-backed settings store, the setting entity and its value types.

mod entry;
mod options;
mod record;
mod stats;
mod store;
mod value;


// Re-export public types
pub use entry::{CacheEntry, Source};
pub use options::{
    OptionsProvider, OptionsRegistry, OptionsSpec, SelectOption, DYNAMIC_PREFIX,
    SELECT_NONE_LABEL,
};
pub use record::{check_format, NewSetting, Setting, SettingType, ALLOWED_COLUMNS};
pub use stats::CacheStats;
pub use store::SettingsStore;
pub use value::{Scalar, SettingValue};
