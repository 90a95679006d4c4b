//! Loader configuration
//!
//! A flat map of option name to scalar value. Only two keys are interpreted by
//! the loader itself (`debug` and `dataAttributesPrefix`); any other key a host
//! passes to `init` is carried along untouched and shows up in debug traces.
//!
//! Nested objects are not interpreted. Merging is shallow: a key present in
//! the overrides replaces the whole value.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::coerce::{is_truthy, scalar_text};

/// Key of the debug flag
pub const DEBUG_KEY: &str = "debug";

/// Key of the `data-*` attribute prefix
pub const PREFIX_KEY: &str = "dataAttributesPrefix";

/// Default attribute prefix (no leading or trailing `-`)
pub const DEFAULT_PREFIX: &str = "ty";

/// Resolved loader configuration
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Configuration {
    values: Map<String, Value>,
}

impl Default for Configuration {
    fn default() -> Self {
        let mut values = Map::new();
        values.insert(DEBUG_KEY.into(), Value::Bool(false));
        values.insert(PREFIX_KEY.into(), Value::String(DEFAULT_PREFIX.into()));
        Self { values }
    }
}

impl Configuration {
    /// Shallow merge: keys in `overrides` win, everything else is kept.
    ///
    /// Anything other than a JSON object (including `None`) merges nothing.
    pub fn merge(&self, overrides: Option<&Value>) -> Self {
        let mut values = self.values.clone();
        if let Some(Value::Object(map)) = overrides {
            for (key, value) in map {
                values.insert(key.clone(), value.clone());
            }
        }
        Self { values }
    }

    /// Whether debug tracing is on (JavaScript truthiness of `debug`)
    pub fn debug(&self) -> bool {
        self.values.get(DEBUG_KEY).is_some_and(is_truthy)
    }

    /// The `data-*` attribute prefix.
    ///
    /// Falls back to [`DEFAULT_PREFIX`] when unset or not a scalar.
    pub fn data_attributes_prefix(&self) -> String {
        self.values
            .get(PREFIX_KEY)
            .and_then(scalar_text)
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string())
    }

    /// Raw value of any option
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The full configuration as a JSON object string
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.values).unwrap_or_else(|_| "{}".to_string())
    }
}
