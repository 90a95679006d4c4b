//! iframe-resizer options encoding
//!
//! iframe-resizer expects size bounds as numbers. Bounds that parse as numbers
//! are sent as JSON numbers, anything else is passed through as a string and
//! left for the library to interpret.

use serde_json::{Map, Number, Value};
use tyforms_host::ResizeOptions;

/// Options object for `iFrameResize(options, selector)`
pub(crate) fn options_json(options: &ResizeOptions) -> Value {
    let mut map = Map::new();
    map.insert("log".into(), Value::Bool(options.log));
    map.insert("autoResize".into(), Value::Bool(options.auto_resize));
    for (key, bound) in options.bounds() {
        if let Some(bound) = bound {
            map.insert(key.into(), bound_value(bound));
        }
    }
    Value::Object(map)
}

fn bound_value(bound: &str) -> Value {
    bound
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(bound.to_string()))
}
