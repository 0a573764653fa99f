//! # Aggregation Engine
//!
//! Derived views over the drink log, all built on the daily grouping from
//! [`crate::group::group_daily`]:
//!
//! - [`daily_total`]: today's records and their pure-alcohol total.
//! - [`range_totals`]: one [`DayTotal`] per day inside a [`DateRange`], plus a grand total.
//! - [`stacked_by_drink_name`]: a wide table (date × drink name) for stacked charts.
//! - [`period_totals`]: per day / week / month totals for summaries.
//!
//! ## Range Filtering
//!
//! A [`DateRange`] is inclusive at both ends and either end may be open. Bounds are
//! real [`NaiveDate`]s, so filtering never depends on how keys are formatted.
//! Days outside the range are dropped entirely, including from the grand total.
//!
//! ## Empty Input
//!
//! An empty log yields zero totals and an empty dataset. Callers that need to tell
//! "no data at all" from "nothing in this range" check the collection itself.

use chrono::{NaiveDate, TimeZone};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::alcohol::total_pure_alcohol_ml;
use crate::group::{group_by, group_daily, local_date, Period};
use crate::model::DrinkRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub drinks: Vec<DrinkRecord>,
    pub pure_alcohol_ml: f64,
}

impl DayTotal {
    fn from_bucket(date: NaiveDate, bucket: &[&DrinkRecord]) -> Self {
        Self {
            date,
            drinks: bucket.iter().map(|r| (*r).clone()).collect(),
            pure_alcohol_ml: total_pure_alcohol_ml(bucket.iter().copied()),
        }
    }

    /// An empty day reads as "no drinks logged", distinct from a day whose drinks add up to zero.
    pub fn has_records(&self) -> bool {
        !self.drinks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RangeReport {
    pub days: Vec<DayTotal>,
    pub grand_total_ml: f64,
}

/// One row of the stacked chart: a date and the pure alcohol per drink name.
///
/// Every name of the dataset is present on every row, with `0.0` when the drink
/// was not had that day. Serializes flat, as `{"date": "...", "<name>": ml, ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub date: NaiveDate,
    pub values: Vec<(String, f64)>,
}

impl ChartRow {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ml)| *ml)
    }

    pub fn total(&self) -> f64 {
        self.values.iter().map(|(_, ml)| ml).sum()
    }
}

impl Serialize for ChartRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("date", &self.date)?;
        for (name, ml) in &self.values {
            map.serialize_entry(name, ml)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartDataset {
    /// Distinct drink names in first-seen order.
    pub drink_names: Vec<String>,
    pub rows: Vec<ChartRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotal {
    pub key: String,
    pub drink_count: usize,
    pub pure_alcohol_ml: f64,
}

pub fn daily_total<Tz: TimeZone>(records: &[DrinkRecord], today: NaiveDate, tz: &Tz) -> DayTotal {
    let grouped = group_daily(records, tz);
    match grouped.get(&today) {
        Some(bucket) => DayTotal::from_bucket(today, bucket),
        None => DayTotal {
            date: today,
            drinks: Vec::new(),
            pure_alcohol_ml: 0.0,
        },
    }
}

pub fn range_totals<Tz: TimeZone>(records: &[DrinkRecord], range: DateRange, tz: &Tz) -> RangeReport {
    let days: Vec<DayTotal> = group_daily(records, tz)
        .iter()
        .filter(|(date, _)| range.contains(**date))
        .map(|(date, bucket)| DayTotal::from_bucket(*date, bucket))
        .collect();
    let grand_total_ml = days.iter().map(|d| d.pure_alcohol_ml).sum();
    RangeReport {
        days,
        grand_total_ml,
    }
}

/// Distinct names over all `records`, in the order they first appear.
pub fn distinct_names(records: &[DrinkRecord]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for record in records {
        if !names.iter().any(|n| n == &record.name) {
            names.push(record.name.clone());
        }
    }
    names
}

/// Build the stacked dataset, then keep only rows inside `range`.
///
/// `drink_names` covers the whole log, so the series stay stable while the range moves.
pub fn stacked_by_drink_name<Tz: TimeZone>(
    records: &[DrinkRecord],
    range: DateRange,
    tz: &Tz,
) -> ChartDataset {
    let drink_names = distinct_names(records);

    let rows = group_daily(records, tz)
        .into_iter()
        .map(|(date, bucket)| {
            let mut values: Vec<(String, f64)> =
                drink_names.iter().map(|n| (n.clone(), 0.0)).collect();
            for record in bucket {
                if let Some(slot) = values.iter_mut().find(|(n, _)| n == &record.name) {
                    slot.1 += record.pure_alcohol_ml();
                }
            }
            ChartRow { date, values }
        })
        .filter(|row| range.contains(row.date))
        .collect();

    ChartDataset { drink_names, rows }
}

pub fn period_totals<Tz: TimeZone>(
    records: &[DrinkRecord],
    period: Period,
    range: DateRange,
    tz: &Tz,
) -> Vec<PeriodTotal> {
    let in_range: Vec<DrinkRecord> = records
        .iter()
        .filter(|r| range.contains(local_date(&r.occurred_at, tz)))
        .cloned()
        .collect();

    group_by(&in_range, period, tz)
        .into_iter()
        .map(|(key, bucket)| PeriodTotal {
            drink_count: bucket.len(),
            pure_alcohol_ml: total_pure_alcohol_ml(bucket),
            key,
        })
        .collect()
}
