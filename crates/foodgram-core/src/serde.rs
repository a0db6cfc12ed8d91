// Module name shadows the `serde` crate; use `::serde` for the external crate.
use ::serde::{Deserialize, Deserializer};

/// Parse a query-string boolean the way HTML forms send them.
///
/// Accepts `1`/`true`/`yes`/`on` and `0`/`false`/`no`/`off` in any case.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `deserialize_with` adapter for optional query-string flags.
///
/// Missing or empty values deserialize to `None`; unknown words are an error.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_flag(v)
            .map(Some)
            .ok_or_else(|| ::serde::de::Error::custom(format!("invalid boolean flag: {v}"))),
    }
}
