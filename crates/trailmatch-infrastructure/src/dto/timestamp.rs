//! Fixed-width timestamp encoding for `#[serde(with = "...")]`.
//!
//! chrono's default encoding drops trailing zero digits from the fraction,
//! so `...00.120Z` sorts after `...00.120001Z`. Writing every timestamp
//! with nine fractional digits keeps string order equal to time order.
//! Reads accept any RFC 3339 value.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Nanos, true))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
