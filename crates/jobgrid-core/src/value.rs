//! Plain-text rendering of parameter values.
//!
//! Worker processes receive parameters as `name=value` tokens, so every
//! value needs a canonical textual form. Strings pass through verbatim,
//! booleans render as `True`/`False`, and numbers use the shortest
//! representation that parses back to the same value. Floats always keep
//! a decimal point (or exponent) so they stay distinguishable from
//! integers on the wire.

use serde_json::Value;

/// Renders a parameter value as plain text.
///
/// Anything that is not a string, boolean or number falls back to its
/// compact JSON form.
pub fn plain_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// Returns a short name for the value's type, as shown in diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_i64() || number.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "str",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
