//! Fixed, sortable timestamp text format
//!
//! Timestamps are written as `%Y-%m-%dT%H:%M:%S%.6f` in UTC. Parsing also
//! accepts a missing, shorter or longer fractional part; digits past the
//! sixth are dropped so a parsed value always formats back to itself.

use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use crate::errors::HbnbError;

/// Format used when writing
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Current instant truncated to what the text format can represent
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// # Errors
///
/// `InvalidTimestamp` when `text` does not follow the format.
pub fn parse(text: &str) -> Result<DateTime<Utc>, HbnbError> {
    NaiveDateTime::parse_from_str(text, PARSE_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive).trunc_subsecs(6))
        .map_err(|_| HbnbError::InvalidTimestamp {
            value: text.to_string(),
        })
}

pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_fixed_width() {
        let ts = Utc.with_ymd_and_hms(2017, 9, 28, 21, 3, 54).unwrap();
        assert_eq!(format(&ts), "2017-09-28T21:03:54.000000");
    }

    #[test]
    fn test_round_trip_keeps_microseconds() {
        let ts = now();
        assert_eq!(parse(&format(&ts)).unwrap(), ts);
    }

    #[test]
    fn test_parse_without_fraction() {
        let ts = parse("2017-06-14T22:31:03").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2017, 6, 14, 22, 31, 3).unwrap());
    }

    #[test]
    fn test_parse_drops_sub_microsecond_digits() {
        let ts = parse("2017-06-14T22:31:03.285259731").unwrap();
        assert_eq!(format(&ts), "2017-06-14T22:31:03.285259");
        assert_eq!(parse(&format(&ts)).unwrap(), ts);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse("yesterday"),
            Err(HbnbError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_text_sorts_chronologically() {
        let early = parse("2017-06-14T22:31:03.285259").unwrap();
        let late = parse("2023-01-02T00:00:00.000001").unwrap();
        assert!(format(&early) < format(&late));
    }
}
