//! Date serialization/deserialization helpers.
//!
//! Provides custom Serde support for optional calendar dates:
//! - Serialization: `Option<NaiveDate>` -> `YYYY-MM-DD` or `null`
//! - Deserialization: `YYYY-MM-DD`, an RFC3339 timestamp, or `null`

use chrono::{DateTime, NaiveDate};

use crate::types::DATE_FORMAT;

/// Parses a calendar date from `YYYY-MM-DD` or the date part of an RFC3339 timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// `Option<NaiveDate>` serializer/deserializer helpers.
pub mod option {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::parse_date;
    use crate::types::DATE_FORMAT;

    /// Serializes `Option<NaiveDate>` as `YYYY-MM-DD` or `null`.
    #[allow(clippy::ref_option)]
    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_some(&d.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes `Option<NaiveDate>`; empty strings count as `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse_date(&s)
                .map(Some)
                .ok_or_else(|| Error::custom(format!("Invalid date: {s}"))),
        }
    }
}
