//! Site Settings - A cache-backed settings store
//!
//! Resolves settings through an in-process cache, persisted setting rows and
//! static configuration, with cache-only overrides for the lifetime of the process.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod settings;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, SettingsError};
pub use settings::{Scalar, SettingValue, SettingsStore};
