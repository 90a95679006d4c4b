//! Value coercions shared by configuration and render resolution
//!
//! Host pages hand us loosely typed values (data attributes are always text,
//! programmatic options may be strings, numbers or booleans). These helpers
//! pin down exactly how such values are read.

use serde_json::Value;

/// Lenient string-to-boolean used for `autoResize`.
///
/// `"false"`, `"undefined"`, `"null"`, `"0"` and the empty string are false.
/// Every other string is true, including arbitrary tokens like `"yes"` or `"off"`.
pub fn str_to_bool(s: &str) -> bool {
    !matches!(s, "false" | "undefined" | "null" | "0" | "")
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a scalar value; `None` for null, arrays and objects.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
