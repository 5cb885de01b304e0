//! `humantime` strings (`"30s"`, `"1m 30s"`) for `Duration` settings.

/// Use with `#[serde(with = "duration_serde::duration")]`
pub mod duration {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(text.trim())
            .map_err(|e| de::Error::custom(format!("invalid duration '{text}': {e}")))
    }
}
