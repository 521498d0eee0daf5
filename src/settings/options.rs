//! Setting Options Module
//!
//! Interprets the raw `options` string of a setting. A value is either a
//! literal `value=label|value=label` list or a `func:` reference naming a
//! provider registered in an [`OptionsRegistry`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::settings::Setting;

/// Marker that turns an options string into a provider reference.
pub const DYNAMIC_PREFIX: &str = "func:";

/// Label of the single option returned for an unresolved provider.
pub const SELECT_NONE_LABEL: &str = "none";

/// Callable producing options at render time.
pub type OptionsProvider = Arc<dyn Fn() -> Vec<SelectOption> + Send + Sync>;

// == Select Option ==
/// One `value=label` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

// == Options Spec ==
/// Parsed form of an options string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsSpec {
    /// Pipe-delimited literal list
    Literal(Vec<SelectOption>),
    /// `func:[helper/]name` reference
    Dynamic { helper: Option<String>, name: String },
}

impl OptionsSpec {
    /// Parses a raw options string.
    pub fn parse(raw: &str) -> Self {
        if let Some(reference) = raw.strip_prefix(DYNAMIC_PREFIX) {
            return match reference.rsplit_once('/') {
                Some((helper, name)) => OptionsSpec::Dynamic {
                    helper: (!helper.is_empty()).then(|| helper.to_string()),
                    name: name.to_string(),
                },
                None => OptionsSpec::Dynamic {
                    helper: None,
                    name: reference.to_string(),
                },
            };
        }

        let options = raw
            .split('|')
            .filter(|item| !item.is_empty())
            .map(|item| {
                let mut parts = item.split('=');
                let value = parts.next().unwrap_or_default();
                // Anything after a second '=' is dropped
                let label = parts.next().unwrap_or(value);
                SelectOption::new(value, label)
            })
            .collect();

        OptionsSpec::Literal(options)
    }
}

// == Options Registry ==
/// Named option providers referenced by `func:` options strings.
#[derive(Default, Clone)]
pub struct OptionsRegistry {
    providers: HashMap<String, OptionsProvider>,
}

impl OptionsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under `name`, which may be helper-qualified
    /// (`"themes/theme_list"`).
    pub fn register<F>(&mut self, name: impl Into<String>, provider: F)
    where
        F: Fn() -> Vec<SelectOption> + Send + Sync + 'static,
    {
        self.providers.insert(name.into(), Arc::new(provider));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, name: impl Into<String>, provider: F) -> Self
    where
        F: Fn() -> Vec<SelectOption> + Send + Sync + 'static,
    {
        self.register(name, provider);
        self
    }

    /// Looks up a provider, trying the qualified name before the bare one.
    pub fn provider(&self, helper: Option<&str>, name: &str) -> Option<&OptionsProvider> {
        helper
            .and_then(|helper| self.providers.get(&format!("{}/{}", helper, name)))
            .or_else(|| self.providers.get(name))
    }

    /// Parses and evaluates an options string.
    pub fn resolve(&self, raw: &str) -> Vec<SelectOption> {
        match OptionsSpec::parse(raw) {
            OptionsSpec::Literal(options) => options,
            OptionsSpec::Dynamic { helper, name } => {
                match self.provider(helper.as_deref(), &name) {
                    Some(provider) => provider(),
                    None => {
                        warn!("No options provider registered for '{}'", raw);
                        vec![SelectOption::new("", SELECT_NONE_LABEL)]
                    }
                }
            }
        }
    }
}

impl fmt::Debug for OptionsRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.providers.keys().collect();
        names.sort();
        f.debug_struct("OptionsRegistry")
            .field("providers", &names)
            .finish()
    }
}

impl Setting {
    /// Resolves the options of this setting; empty when it has none.
    pub fn select_options(&self, registry: &OptionsRegistry) -> Vec<SelectOption> {
        match self.options.as_deref() {
            Some(raw) if !raw.is_empty() => registry.resolve(raw),
            _ => Vec::new(),
        }
    }
}
