//! Request DTOs for the settings API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::settings::SettingValue;

/// Request body for PUT /settings/:key and PUT /settings/:key/temp
///
/// # Fields
/// - `value`: Any JSON value except `null`. Arrays and objects are cached
///   but not persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueRequest {
    /// The value to store
    #[serde(default)]
    pub value: Value,
}

impl ValueRequest {
    /// Converts the request into a setting value.
    ///
    /// Returns an error message if the value is missing or `null`.
    pub fn into_value(self) -> Result<SettingValue, String> {
        SettingValue::from_json(self.value).ok_or_else(|| "Value cannot be null".to_string())
    }
}
