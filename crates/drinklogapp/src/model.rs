//! # Domain Model
//!
//! This module defines the two persisted shapes of drinklog: [`DrinkRecord`] and
//! [`FavoriteDrink`].
//!
//! ## Normalized Storage
//!
//! A record's `volume` is always milliliters and its `abv` always a percentage.
//! Unit conversion happens once, when the entry is resolved (see [`crate::entry`]),
//! never at read time.
//!
//! ## Timestamps
//!
//! `occurred_at` is kept in UTC and serialized under the `date` key as ISO-8601
//! with millisecond precision and a `Z` suffix (`2025-01-01T18:30:00.000Z`).
//! New records are truncated to whole milliseconds on creation so that an export
//! followed by an import reproduces them exactly.
//!
//! Incoming dates (imports, persisted files written by older versions) are read by
//! [`parse_timestamp`], which accepts:
//!
//! - RFC 3339 with any offset (`2025-01-01T18:30:00+02:00`)
//! - a naive date-time, taken as local time (`2025-01-01 18:30:00`)
//! - a bare date, taken as UTC midnight (`2025-01-01`)

use chrono::{
    DateTime, Duration, Local, NaiveDate, NaiveDateTime, Offset, SecondsFormat, SubsecRound, TimeZone,
    Utc,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::alcohol::pure_alcohol_ml;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkRecord {
    pub id: i64,
    pub name: String,
    /// Milliliters.
    pub volume: f64,
    /// Percent alcohol by volume.
    pub abv: f64,
    #[serde(rename = "date", with = "iso_millis")]
    pub occurred_at: DateTime<Utc>,
}

impl DrinkRecord {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        volume: f64,
        abv: f64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            volume,
            abv,
            occurred_at: occurred_at.trunc_subsecs(3),
        }
    }

    pub fn pure_alcohol_ml(&self) -> f64 {
        pure_alcohol_ml(self.volume, self.abv)
    }
}

impl fmt::Display for DrinkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.2} ml @ {}% ({:.2} ml pure alcohol)",
            self.name,
            self.volume,
            self.abv,
            self.pure_alcohol_ml()
        )
    }
}

/// A reusable preset. Two favorites are the same favorite when all three fields match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteDrink {
    pub name: String,
    pub volume: f64,
    pub abv: f64,
}

impl FavoriteDrink {
    pub fn new(name: impl Into<String>, volume: f64, abv: f64) -> Self {
        Self {
            name: name.into(),
            volume,
            abv,
        }
    }

    /// Instantiate the template as a concrete record.
    pub fn to_record(&self, id: i64, occurred_at: DateTime<Utc>) -> DrinkRecord {
        DrinkRecord::new(id, self.name.clone(), self.volume, self.abv, occurred_at)
    }
}

impl From<&DrinkRecord> for FavoriteDrink {
    fn from(record: &DrinkRecord) -> Self {
        Self::new(record.name.clone(), record.volume, record.abv)
    }
}

/// Format a timestamp the way it is persisted and exported.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    parse_timestamp_in(raw, &Local)
}

/// [`parse_timestamp`] with naive date-times read in `tz`.
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(local_to_utc(&naive, tz));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn local_to_utc<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    if let Some(at) = tz.from_local_datetime(naive).earliest() {
        return at.with_timezone(&Utc);
    }
    // Skipped by a forward clock change: read with the offset in force a day earlier
    let before = tz.offset_from_utc_datetime(&(*naive - Duration::days(1))).fix();
    Utc.from_utc_datetime(&(*naive - Duration::seconds(i64::from(before.local_minus_utc()))))
}

mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult};

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn new_record_truncates_to_milliseconds() {
        let precise = at("2025-01-01T18:30:00.123456789Z");
        let record = DrinkRecord::new(1, "Beer", 500.0, 5.0, precise);
        assert_eq!(record.occurred_at, at("2025-01-01T18:30:00.123Z"));
    }

    #[test]
    fn record_serializes_date_key_with_millis() {
        let record = DrinkRecord::new(7, "Wine", 200.0, 12.0, at("2025-01-02T20:00:00Z"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Wine");
        assert_eq!(json["date"], "2025-01-02T20:00:00.000Z");
        assert!(json.get("occurred_at").is_none());
    }

    #[test]
    fn record_reads_offset_dates() {
        let json = r#"{"id":1,"name":"Cider","volume":330,"abv":4.5,"date":"2025-03-01T10:00:00+02:00"}"#;
        let record: DrinkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.occurred_at, at("2025-03-01T08:00:00Z"));
        assert_eq!(record.volume, 330.0);
    }

    #[test]
    fn record_rejects_garbage_dates() {
        let json = r#"{"id":1,"name":"Cider","volume":330,"abv":4.5,"date":"yesterday-ish"}"#;
        assert!(serde_json::from_str::<DrinkRecord>(json).is_err());
    }

    #[test]
    fn bare_dates_are_utc_midnight() {
        assert_eq!(
            parse_timestamp("2025-01-05"),
            Some(at("2025-01-05T00:00:00Z"))
        );
        assert_eq!(parse_timestamp("not a date"), None);
    }

    /// +01:00, jumping to +02:00 at 2025-03-30T01:00Z (local 02:00 becomes 03:00).
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn jump_utc() -> NaiveDateTime {
            at("2025-03-30T01:00:00Z").naive_utc()
        }

        fn offset(hours: i32) -> FixedOffset {
            FixedOffset::east_opt(hours * 3600).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, _: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::Single(Self::offset(1))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap_start = Self::jump_utc() + Duration::hours(1);
            if *local < gap_start {
                LocalResult::Single(Self::offset(1))
            } else if *local < gap_start + Duration::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::offset(2))
            }
        }

        fn offset_from_utc_date(&self, _: &NaiveDate) -> FixedOffset {
            Self::offset(1)
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::jump_utc() {
                Self::offset(1)
            } else {
                Self::offset(2)
            }
        }
    }

    #[test]
    fn naive_times_use_the_given_zone() {
        assert_eq!(
            parse_timestamp_in("2025-03-30T01:30:00", &SpringForward),
            Some(at("2025-03-30T00:30:00Z"))
        );
        assert_eq!(
            parse_timestamp_in("2025-03-30 04:00:00", &SpringForward),
            Some(at("2025-03-30T02:00:00Z"))
        );
    }

    #[test]
    fn naive_time_in_clock_gap_is_kept() {
        assert_eq!(
            parse_timestamp_in("2025-03-30T02:30:00", &SpringForward),
            Some(at("2025-03-30T01:30:00Z"))
        );
    }

    #[test]
    fn pure_alcohol_uses_record_fields() {
        let record = DrinkRecord::new(1, "Beer", 500.0, 5.0, Utc::now());
        assert_eq!(record.pure_alcohol_ml(), 25.0);
    }

    #[test]
    fn favorite_equality_is_structural() {
        let a = FavoriteDrink::new("IPA", 330.0, 6.5);
        let b = FavoriteDrink::new("IPA", 330.0, 6.5);
        let c = FavoriteDrink::new("IPA", 500.0, 6.5);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn favorite_to_record_copies_template() {
        let fav = FavoriteDrink::new("Stout", 440.0, 4.2);
        let record = fav.to_record(42, at("2025-02-01T21:00:00Z"));
        assert_eq!(record.id, 42);
        assert_eq!(record.name, "Stout");
        assert_eq!(record.volume, 440.0);
        assert_eq!(record.abv, 4.2);
        assert_eq!(FavoriteDrink::from(&record), fav);
    }

    #[test]
    fn display_shows_pure_alcohol() {
        let record = DrinkRecord::new(1, "Wine", 200.0, 12.0, Utc::now());
        assert_eq!(
            record.to_string(),
            "Wine 200.00 ml @ 12% (24.00 ml pure alcohol)"
        );
    }
}
