//! Serde adapters for the server's loose wire conventions.
//!
//! Two quirks need smoothing on decode:
//!
//! - numeric fields may arrive either as JSON numbers or as quoted
//!   numeric strings ("17"), and must be coerced to integers;
//! - timestamps are strings in `%Y-%m-%d %H:%M:%S` (dates `%Y-%m-%d`).
//!
//! Absent optional numerics decode to `None`, never to a default zero
//! that could be mistaken for a real value.

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::CoreError;

/// Timestamp format used by the server, e.g. `2026-08-08 19:30:00`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format used by the server, e.g. `2026-08-08`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a server timestamp string.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, CoreError> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|e| {
        CoreError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Parse a server date string.
pub fn parse_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| CoreError::InvalidTimestamp {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Format a timestamp the way the server expects it.
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Integer or quoted-integer wire value.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawInt {
    Int(i64),
    Str(String),
}

fn coerce_u32<E: serde::de::Error>(raw: RawInt) -> Result<u32, E> {
    match raw {
        RawInt::Int(n) => {
            u32::try_from(n).map_err(|_| E::custom(format!("integer out of range: {n}")))
        }
        RawInt::Str(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| E::custom(format!("expected an integer, got {s:?}"))),
    }
}

/// Deserialize a required integer that may be quoted.
pub fn u32_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    coerce_u32(RawInt::deserialize(deserializer)?)
}

/// Deserialize an optional integer that may be quoted or absent.
pub fn opt_u32_lenient<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    match Option::<RawInt>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => coerce_u32(raw).map(Some),
    }
}

/// Deserialize a required `%Y-%m-%d %H:%M:%S` timestamp.
pub fn datetime<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_datetime(&raw).map_err(D::Error::custom)
}

/// Deserialize an optional `%Y-%m-%d %H:%M:%S` timestamp.
///
/// Absent and empty both decode to `None`; a present but malformed value
/// is an error.
pub fn opt_datetime<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => parse_datetime(&raw).map(Some).map_err(D::Error::custom),
    }
}

/// Deserialize an optional `%Y-%m-%d` date.
pub fn opt_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => parse_date(&raw).map(Some).map_err(D::Error::custom),
    }
}

/// Serialize a timestamp back to the server's string format.
pub fn ser_datetime<S: Serializer>(
    value: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_datetime(value))
}

/// Serialize an optional timestamp; `None` becomes JSON null.
pub fn ser_opt_datetime<S: Serializer>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(dt) => ser_datetime(dt, serializer),
        None => serializer.serialize_none(),
    }
}

/// Serialize an optional date; `None` becomes JSON null.
pub fn ser_opt_date<S: Serializer>(
    value: &Option<NaiveDate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Quoted {
        #[serde(deserialize_with = "u32_lenient")]
        id: u32,
        #[serde(default, deserialize_with = "opt_u32_lenient")]
        count: Option<u32>,
    }

    #[test]
    fn test_quoted_integer_coerced() {
        let parsed: Quoted = serde_json::from_str(r#"{"id": "17"}"#).unwrap();
        assert_eq!(parsed.id, 17);
        assert_eq!(parsed.count, None);
    }

    #[test]
    fn test_bare_integer_accepted() {
        let parsed: Quoted = serde_json::from_str(r#"{"id": 17, "count": 3}"#).unwrap();
        assert_eq!(parsed.id, 17);
        assert_eq!(parsed.count, Some(3));
    }

    #[test]
    fn test_absent_optional_is_none_not_zero() {
        let parsed: Quoted = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_ne!(parsed.count, Some(0));
        assert_eq!(parsed.count, None);
    }

    #[test]
    fn test_garbage_integer_rejected() {
        assert!(serde_json::from_str::<Quoted>(r#"{"id": "seventeen"}"#).is_err());
        assert!(serde_json::from_str::<Quoted>(r#"{"id": -3}"#).is_err());
    }

    #[test]
    fn test_parse_datetime() {
        let dt = parse_datetime("2026-08-08 19:30:00").unwrap();
        assert_eq!(format_datetime(&dt), "2026-08-08 19:30:00");
        assert!(parse_datetime("2026-08-08T19:30:00Z").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2026-08-08").is_ok());
        assert!(parse_date("08/08/2026").is_err());
    }
}
