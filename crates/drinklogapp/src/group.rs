//! # Temporal Grouper
//!
//! Partitions drink records into calendar buckets. Every record lands in exactly
//! one bucket, chosen by formatting its `occurred_at` in the caller's timezone,
//! and records keep their input order inside a bucket.
//!
//! | Period  | Key format   | Example      |
//! |---------|--------------|--------------|
//! | `Day`   | `YYYY-MM-DD` | `2025-01-31` |
//! | `Week`  | `YYYY-Www`   | `2025-W05`   |
//! | `Month` | `YYYY-MM`    | `2025-01`    |
//!
//! Weeks are ISO weeks and use the ISO week-numbering year, so the last days of
//! December can belong to week 1 of the following year.
//!
//! Two flavours exist:
//!
//! - [`group_by`] yields string keys for any period.
//! - [`group_daily`] yields real [`NaiveDate`] keys. The aggregation engine
//!   builds on this one so that range filtering compares dates, not strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::model::DrinkRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl Period {
    fn pattern(&self) -> &'static str {
        match self {
            Period::Day => "%Y-%m-%d",
            Period::Week => "%G-W%V",
            Period::Month => "%Y-%m",
        }
    }

    pub fn key<Tz: TimeZone>(&self, at: &DateTime<Utc>, tz: &Tz) -> String {
        local_time(at, tz).format(self.pattern()).to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Day => write!(f, "day"),
            Period::Week => write!(f, "week"),
            Period::Month => write!(f, "month"),
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "daily" => Ok(Period::Day),
            "week" | "weekly" => Ok(Period::Week),
            "month" | "monthly" => Ok(Period::Month),
            _ => Err(format!(
                "Invalid period '{}'. Valid periods: day, week, month",
                s
            )),
        }
    }
}

/// Period key to the records falling in it.
pub type DateBucketMap<'a> = BTreeMap<String, Vec<&'a DrinkRecord>>;

fn local_time<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> NaiveDateTime {
    at.with_timezone(tz).naive_local()
}

/// Calendar date of `at` as seen in `tz`.
pub fn local_date<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    local_time(at, tz).date()
}

pub fn group_by<'a, Tz: TimeZone>(
    records: &'a [DrinkRecord],
    period: Period,
    tz: &Tz,
) -> DateBucketMap<'a> {
    let mut grouped = DateBucketMap::new();
    for record in records {
        grouped
            .entry(period.key(&record.occurred_at, tz))
            .or_default()
            .push(record);
    }
    grouped
}

pub fn group_daily<'a, Tz: TimeZone>(
    records: &'a [DrinkRecord],
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<&'a DrinkRecord>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&'a DrinkRecord>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(local_date(&record.occurred_at, tz))
            .or_default()
            .push(record);
    }
    grouped
}
