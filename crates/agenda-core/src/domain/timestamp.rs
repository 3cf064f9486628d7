//! Absolute timestamps carried by homework records.
//!
//! Clients send dates the way a browser `Date` would accept them, usually with a
//! compact offset (`2021-09-09T11:59:00-0400`). The offset is kept so a record
//! serializes back the way it came in, but equality and hashing look at the
//! instant only.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::AgendaError;

/// Format used on the wire (and as the record-set key).
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Accepted inputs with an explicit offset, tried in order after RFC 3339.
const OFFSET_FORMATS: [&str; 3] = [
    WIRE_FORMAT,
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
];

const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    pub fn new(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime)
    }

    /// Parse a client-supplied timestamp.
    ///
    /// A bare date (`2021-09-09`) is read as midnight UTC.
    pub fn parse(input: &str) -> Result<Self, AgendaError> {
        let input = input.trim();
        if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self(datetime));
        }
        for format in OFFSET_FORMATS {
            if let Ok(datetime) = DateTime::parse_from_str(input, format) {
                return Ok(Self(datetime));
            }
        }
        if let Some(midnight) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Ok(Self(midnight.and_utc().fixed_offset()));
        }
        Err(AgendaError::Validation(format!(
            "unrecognized timestamp {input:?}"
        )))
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    /// Whole days from `earlier` to `self`, floored.
    ///
    /// Negative when `self` is before `earlier`: 1 hour before is -1, not 0.
    pub fn days_since(&self, earlier: &Timestamp) -> i64 {
        let millis = (self.0 - earlier.0).num_milliseconds();
        millis.div_euclid(MILLIS_PER_DAY)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[rstest]
    #[case::compact_offset("2021-09-09T11:59:00-0400")]
    #[case::rfc3339("2021-09-09T11:59:00-04:00")]
    #[case::fractional("2021-09-09T11:59:00.000-0400")]
    #[case::no_seconds("2021-09-09T11:59-0400")]
    fn accepts_offset_forms(#[case] input: &str) {
        assert_eq!(ts(input), ts("2021-09-09T15:59:00Z"));
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        assert_eq!(ts("2021-09-09"), ts("2021-09-09T00:00:00+00:00"));
    }

    #[rstest]
    #[case::empty("")]
    #[case::garbage("next tuesday")]
    #[case::bad_month("2021-13-09T11:59:00-0400")]
    #[case::legacy_seed_key("0")]
    fn rejects_malformed_input(#[case] input: &str) {
        let err = Timestamp::parse(input).unwrap_err();
        assert!(matches!(err, AgendaError::Validation(_)));
    }

    #[test]
    fn display_keeps_parsed_offset() {
        assert_eq!(
            ts("2021-09-09T11:59:00-04:00").to_string(),
            "2021-09-09T11:59:00-0400"
        );
    }

    #[test]
    fn equality_is_by_instant() {
        assert_eq!(ts("2021-09-09T11:59:00-0400"), ts("2021-09-09T08:59:00-0700"));
    }

    #[test]
    fn days_since_floors() {
        let due = ts("2021-09-09T11:59:00-0400");
        assert_eq!(due.days_since(&ts("2021-09-08T11:59:00-0400")), 1);
        assert_eq!(due.days_since(&ts("2021-09-08T12:00:00-0400")), 0);
        assert_eq!(due.days_since(&ts("2021-09-09T12:59:00-0400")), -1);
    }

    #[test]
    fn serde_uses_wire_format() {
        let json = serde_json::to_string(&ts("2021-09-09T11:59:00-04:00")).unwrap();
        assert_eq!(json, "\"2021-09-09T11:59:00-0400\"");

        let err = serde_json::from_str::<Timestamp>("\"tomorrow\"").unwrap_err();
        assert!(err.to_string().contains("unrecognized timestamp"));
    }
}
