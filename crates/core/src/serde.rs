//! Serde helper functions for CMS payloads.
//!
//! Prismic publishes timestamps as `2021-03-25T19:25:28+0000`, which is not
//! valid RFC 3339 (the offset lacks a colon). These helpers accept both
//! shapes and treat `null` or empty strings as `None`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serializer};

const PRISMIC_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Parse a CMS timestamp, accepting RFC 3339 and the Prismic `+0000` offset form.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, PRISMIC_TIMESTAMP_FORMAT))
}

/// Deserialize an optional timestamp, treating `null` and empty strings as None.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_timestamp(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Serialize an optional timestamp back into the Prismic wire format.
pub fn serialize_optional_timestamp<S>(
    value: &Option<DateTime<FixedOffset>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(timestamp) => {
            serializer.serialize_some(&timestamp.format(PRISMIC_TIMESTAMP_FORMAT).to_string())
        }
        None => serializer.serialize_none(),
    }
}
