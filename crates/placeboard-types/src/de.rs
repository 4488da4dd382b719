//! Lenient field decoders for backend payloads.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes an explicit `null` as the type's default.
///
/// `#[serde(default)]` only covers an absent key; the backend also sends
/// `null` for fields nobody filled in.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a JSON string or number and keeps its textual form.
///
/// Durations and round numbers arrive as either, depending on who filled the form.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
