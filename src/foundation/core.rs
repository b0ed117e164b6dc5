use crate::foundation::error::{WavyteError, WavyteResult};

pub use kurbo::Size;

/// Structured props handed to a mounted view.
///
/// Both a composition's default props and the externally supplied input props are JSON
/// objects; anything else is rejected at the boundary by [`props_from_value`].
pub type Props = serde_json::Map<String, serde_json::Value>;

/// Shallow merge: `input` keys override `defaults` keys one by one.
///
/// Nested objects are replaced wholesale, never merged recursively.
pub fn merge_props(defaults: &Props, input: &Props) -> Props {
    let mut out = defaults.clone();
    for (k, v) in input {
        out.insert(k.clone(), v.clone());
    }
    out
}

/// Interpret a JSON value as a props object. `null` is treated as empty props.
pub fn props_from_value(value: serde_json::Value) -> WavyteResult<Props> {
    match value {
        serde_json::Value::Object(map) => Ok(map),
        serde_json::Value::Null => Ok(Props::new()),
        other => Err(WavyteError::serde(format!(
            "props must be a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Parse a props object from JSON text.
pub fn props_from_str(s: &str) -> WavyteResult<Props> {
    let value: serde_json::Value =
        serde_json::from_str(s).map_err(|e| WavyteError::serde(format!("parse props JSON: {e}")))?;
    props_from_value(value)
}

fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
