use serde_json::{Number as JsonNumber, Value as JsonValue};

/// JavaScript truthiness for JSON values; an absent value is falsy.
pub fn is_truthy(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) => false,
        Some(JsonValue::Bool(flag)) => *flag,
        Some(JsonValue::Number(number)) => number
            .as_f64()
            .map(|n| n != 0.0 && !n.is_nan())
            .unwrap_or(true),
        Some(JsonValue::String(text)) => !text.is_empty(),
        Some(JsonValue::Array(_)) | Some(JsonValue::Object(_)) => true,
    }
}

/// DOMString conversion as performed by native setters. `null` becomes the
/// empty string, matching `[LegacyNullToEmptyString]` on form controls.
pub fn to_dom_string(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::Bool(flag) => flag.to_string(),
        JsonValue::Number(number) => number_to_dom_string(number),
        JsonValue::String(text) => text.clone(),
        JsonValue::Array(items) => items
            .iter()
            .map(to_dom_string)
            .collect::<Vec<_>>()
            .join(","),
        JsonValue::Object(_) => "[object Object]".to_string(),
    }
}

/// `Number::toString` for the values JSON can carry: integral floats lose
/// their fractional part and negative zero prints as `0`.
fn number_to_dom_string(number: &JsonNumber) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() && value == 0.0 => "0".to_string(),
        Some(value) if number.is_f64() && value.fract() == 0.0 && value.abs() < 1e21 => {
            format!("{value:.0}")
        }
        _ => number.to_string(),
    }
}
