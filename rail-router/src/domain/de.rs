//! Lenient deserializers for loosely typed upstream payloads.
//!
//! The upstream services are backed by schemaless document stores, so the
//! same field may arrive as a JSON string in one record and as a number in
//! the next.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    fn into_string(self) -> String {
        match self {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }
    }

    fn into_f64(self) -> Option<f64> {
        let value = match self {
            TextOrNumber::Text(s) => s.trim().parse::<f64>().ok()?,
            TextOrNumber::Number(n) => n.as_f64()?,
        };
        value.is_finite().then_some(value)
    }
}

/// A string field that may be sent as a number.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(TextOrNumber::into_string)
}

/// An optional string field that may be sent as a number or `null`.
pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(TextOrNumber::into_string))
}

/// An optional coordinate sent as a number or numeric text.
///
/// Unparsable or non-finite values are treated as absent.
pub(crate) fn opt_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    // Accept any JSON value so that garbage text degrades to `None`
    // instead of failing the whole directory payload.
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => TextOrNumber::Text(s).into_f64(),
        serde_json::Value::Number(n) => TextOrNumber::Number(n).into_f64(),
        _ => None,
    }))
}
