//! Datetime serialization/deserialization helpers.
//!
//! - Serialization: `DateTime<Utc>` -> RFC3339 string with millisecond precision
//! - Deserialization: RFC3339 string or epoch milliseconds (as produced by `Date.now()`)

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Serializes `DateTime<Utc>` as an RFC3339 string.
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Deserializes `DateTime<Utc>` from RFC3339 or epoch milliseconds.
#[allow(clippy::cast_possible_truncation)]
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MillisOrString {
        String(String),
        Millis(i64),
        // Browser clocks hand out fractional milliseconds.
        Float(f64),
    }

    match MillisOrString::deserialize(deserializer)? {
        MillisOrString::String(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp: {e}"))),
        MillisOrString::Millis(ms) => {
            DateTime::from_timestamp_millis(ms).ok_or_else(|| Error::custom("Invalid timestamp"))
        }
        MillisOrString::Float(ms) => DateTime::from_timestamp_millis(ms.trunc() as i64)
            .ok_or_else(|| Error::custom("Invalid timestamp")),
    }
}
