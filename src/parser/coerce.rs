//! `deserialize_with` helpers that coerce loosely typed model output.
//!
//! Each helper accepts any JSON value. Values that convert unambiguously are
//! kept; everything else is treated as absent rather than as a parse error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Non-negative integer counts; numeric strings and integral floats convert.
pub fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_count))
}

/// Like [`count`], but keeps a present key distinct from a missing one.
///
/// Pair with `#[serde(default)]`: a missing key stays `None`, while a key
/// that is present (even as `null`) becomes `Some(..)`.
pub fn stated_count<'de, D>(deserializer: D) -> Result<Option<Option<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    count(deserializer).map(Some)
}

pub fn value_to_count(value: &Value) -> Option<u32> {
    let wide = match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && *float >= 0.0)
                .map(|float| float as u64)
        }),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u32::try_from(wide).ok()
}

/// Strings, with scalars stringified and anything else mapped to `""`.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_string).unwrap_or_default())
}

/// Like [`string`] but blank values become `None`.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_string))
}

fn value_to_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Booleans; `"true"`/`"yes"` style strings convert, anything else is `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(flag)) => flag,
        Some(Value::String(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "valid" | "1"
        ),
        Some(Value::Number(number)) => number.as_u64() == Some(1),
        _ => false,
    })
}

/// Lists of strings; a lone string becomes a single-element list and
/// non-scalar elements are dropped.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(value_to_string).collect(),
        Some(other) => value_to_string(&other).into_iter().collect(),
        None => Vec::new(),
    })
}

/// Lists of structured entries; elements that do not fit `T` are skipped.
pub fn entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<T>(item).ok())
            .collect(),
        Some(object @ Value::Object(_)) => serde_json::from_value::<T>(object).into_iter().collect(),
        _ => Vec::new(),
    })
}
