use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// Serialize `input` and drop every null field, so unset CLI options do not
/// shadow values from lower-priority config sources.
pub fn strip_nulls<T: Serialize>(input: T) -> Result<Value> {
    let mut value = serde_json::to_value(input).context("Failed to serialize CLI overrides")?;
    strip_nulls_recursive(&mut value);
    Ok(value)
}

fn strip_nulls_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            for (_, v) in map.iter_mut() {
                strip_nulls_recursive(v);
            }
            // Sections left empty carry no overrides
            map.retain(|_, v| !matches!(v, Value::Object(inner) if inner.is_empty()));
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                strip_nulls_recursive(item);
            }
        }
        _ => {}
    }
}
