//! Setting Record Module
//!
//! The persisted setting entity and the column check applied before inserts.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SettingsError};
use crate::settings::Scalar;

/// Columns a new setting may carry. Any other field name rejects the record.
pub const ALLOWED_COLUMNS: [&str; 11] = [
    "slug",
    "title",
    "description",
    "type",
    "default",
    "value",
    "options",
    "is_required",
    "is_gui",
    "module",
    "order",
];

// == Setting Type ==
/// How a form should render the setting. Not used by resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum SettingType {
    #[default]
    Text,
    Textarea,
    Password,
    Select,
    SelectMultiple,
    Checkbox,
    Radio,
}

impl SettingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingType::Text => "text",
            SettingType::Textarea => "textarea",
            SettingType::Password => "password",
            SettingType::Select => "select",
            SettingType::SelectMultiple => "select-multiple",
            SettingType::Checkbox => "checkbox",
            SettingType::Radio => "radio",
        }
    }

    /// Parses a type tag; unknown tags render as plain text.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "textarea" => SettingType::Textarea,
            "password" => SettingType::Password,
            "select" => SettingType::Select,
            "select-multiple" => SettingType::SelectMultiple,
            "checkbox" => SettingType::Checkbox,
            "radio" => SettingType::Radio,
            _ => SettingType::Text,
        }
    }
}

impl From<String> for SettingType {
    fn from(tag: String) -> Self {
        SettingType::parse(&tag)
    }
}

// == Setting ==
/// A persisted setting row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    /// Repository-generated identifier
    pub id: i64,
    /// Unique identifier, immutable once created
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: SettingType,
    /// Used when `value` is unset
    pub default: Scalar,
    /// Current persisted value
    pub value: Option<Scalar>,
    /// Raw options string, kept untouched for the rendering layer
    pub options: Option<String>,
    pub is_required: bool,
    pub is_gui: bool,
    pub module: String,
    pub order: i64,
}

impl Setting {
    /// Builds a setting from its insert payload and generated id.
    pub fn from_new(id: i64, new: NewSetting) -> Self {
        Self {
            id,
            slug: new.slug,
            title: new.title,
            description: new.description,
            kind: new.kind,
            default: new.default,
            value: new.value,
            options: new.options,
            is_required: new.is_required,
            is_gui: new.is_gui,
            module: new.module,
            order: new.order,
        }
    }
}

// == New Setting ==
/// Insert payload for a setting. Everything except `slug` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewSetting {
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: SettingType,
    #[serde(default = "empty_scalar", deserialize_with = "default_scalar")]
    pub default: Scalar,
    #[serde(default)]
    pub value: Option<Scalar>,
    #[serde(default)]
    pub options: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_required: bool,
    #[serde(default, deserialize_with = "flag")]
    pub is_gui: bool,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub order: i64,
}

impl NewSetting {
    /// Creates a payload with only a slug and empty defaults.
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: String::new(),
            description: String::new(),
            kind: SettingType::Text,
            default: empty_scalar(),
            value: None,
            options: None,
            is_required: false,
            is_gui: false,
            module: String::new(),
            order: 0,
        }
    }

    /// Validates a raw field map and converts it into a typed payload.
    ///
    /// Fails with `InvalidFormat` on any field outside [`ALLOWED_COLUMNS`],
    /// an empty map, a missing or empty slug, or ill-typed field values.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self> {
        check_format(&fields)?;

        let new: NewSetting = serde_json::from_value(Value::Object(fields))
            .map_err(|e| SettingsError::InvalidFormat(e.to_string()))?;

        if new.slug.is_empty() {
            return Err(SettingsError::InvalidFormat(
                "slug cannot be empty".to_string(),
            ));
        }

        Ok(new)
    }
}

/// Checks that every field name belongs to the settings table.
pub fn check_format(fields: &Map<String, Value>) -> Result<()> {
    if fields.is_empty() {
        return Err(SettingsError::InvalidFormat(
            "setting has no fields".to_string(),
        ));
    }

    match fields.keys().find(|key| !ALLOWED_COLUMNS.contains(&key.as_str())) {
        Some(key) => Err(SettingsError::InvalidFormat(format!(
            "unknown field '{}'",
            key
        ))),
        None => Ok(()),
    }
}

fn empty_scalar() -> Scalar {
    Scalar::String(String::new())
}

/// Treats a null default as empty.
fn default_scalar<'de, D>(deserializer: D) -> std::result::Result<Scalar, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.unwrap_or_else(empty_scalar))
}

/// Accepts `true`/`false` as well as the `0`/`1` integers settings tables use.
fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_i64().is_some_and(|i| i != 0)),
        Value::String(s) => Ok(s == "1" || s.eq_ignore_ascii_case("true")),
        Value::Null => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a flag, got {}",
            other
        ))),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_check_format_accepts_known_columns() {
        let map = fields(json!({"slug": "site_name", "title": "Site Name", "order": 3}));
        assert!(check_format(&map).is_ok());
    }

    #[test]
    fn test_check_format_rejects_unknown_column() {
        let map = fields(json!({"slug": "x", "bogus_field": 1}));
        let err = check_format(&map).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidFormat(msg) if msg.contains("bogus_field")));
    }

    #[test]
    fn test_check_format_rejects_empty() {
        assert!(matches!(
            check_format(&Map::new()),
            Err(SettingsError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_from_fields_full_record() {
        let map = fields(json!({
            "slug": "frontend_enabled",
            "title": "Site Status",
            "type": "radio",
            "default": true,
            "value": "",
            "options": "1=Open|0=Closed",
            "is_required": 1,
            "is_gui": true,
            "module": "",
            "order": 960
        }));

        let new = NewSetting::from_fields(map).unwrap();
        assert_eq!(new.slug, "frontend_enabled");
        assert_eq!(new.kind, SettingType::Radio);
        assert_eq!(new.default, Scalar::Bool(true));
        assert_eq!(new.value, Some(Scalar::from("")));
        assert!(new.is_required);
        assert_eq!(new.options.as_deref(), Some("1=Open|0=Closed"));
        assert_eq!(new.order, 960);
    }

    #[test]
    fn test_from_fields_minimal_record() {
        let new = NewSetting::from_fields(fields(json!({"slug": "x", "title": "T"}))).unwrap();
        assert_eq!(new.title, "T");
        assert_eq!(new.kind, SettingType::Text);
        assert_eq!(new.default, Scalar::from(""));
        assert!(new.value.is_none());
    }

    #[test]
    fn test_from_fields_requires_slug() {
        let err = NewSetting::from_fields(fields(json!({"title": "T"}))).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidFormat(_)));

        let err = NewSetting::from_fields(fields(json!({"slug": ""}))).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidFormat(_)));
    }

    #[test]
    fn test_from_fields_null_default_is_empty() {
        let new = NewSetting::from_fields(fields(json!({
            "slug": "x",
            "title": "T",
            "default": null
        })))
        .unwrap();
        assert_eq!(new.default, Scalar::from(""));
    }

    #[test]
    fn test_from_fields_rejects_structured_default() {
        let err = NewSetting::from_fields(fields(json!({"slug": "x", "default": [1, 2]})))
            .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidFormat(_)));
    }

    #[test]
    fn test_unknown_type_falls_back_to_text() {
        let new = NewSetting::from_fields(fields(json!({"slug": "x", "type": "wysiwyg"}))).unwrap();
        assert_eq!(new.kind, SettingType::Text);
    }

    #[test]
    fn test_setting_type_serializes_kebab_case() {
        let json = serde_json::to_string(&SettingType::SelectMultiple).unwrap();
        assert_eq!(json, "\"select-multiple\"");
        assert_eq!(SettingType::SelectMultiple.as_str(), "select-multiple");
    }
}
