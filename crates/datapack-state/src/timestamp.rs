//! Timestamps on content records.
//!
//! Older metadata stores wrote `date_added` without a timezone suffix. Those
//! values are read as UTC so the epoch milliseconds used in pack file names
//! stay stable no matter where the record was written.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::{Result, StateError};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| StateError::InvalidTimestamp(raw.to_string()))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_with_offset() {
        let ts = parse_timestamp("2021-03-04T05:06:07.890+02:00").unwrap();
        assert_eq!(ts.timestamp_millis(), 1614827167890);
    }

    #[test]
    fn test_missing_suffix_is_utc() {
        let naive = parse_timestamp("2021-03-04T03:06:07.890").unwrap();
        let zulu = parse_timestamp("2021-03-04T03:06:07.890Z").unwrap();
        assert_eq!(naive, zulu);

        let spaced = parse_timestamp("2021-03-04 03:06:07.890").unwrap();
        assert_eq!(spaced, zulu);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(StateError::InvalidTimestamp(_))
        ));
    }
}
