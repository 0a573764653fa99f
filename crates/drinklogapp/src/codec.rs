//! # Import / Export Codec
//!
//! Moves a drink collection in and out of the two transfer formats.
//!
//! ## JSON
//!
//! A pretty-printed array of records, with the same shape as the persisted file:
//!
//! ```json
//! [
//!   { "id": 1735754400000, "name": "Beer", "volume": 500.0, "abv": 5.0, "date": "2025-01-01T18:00:00.000Z" }
//! ]
//! ```
//!
//! [`decode_json`] requires a top-level array. Elements that do not form a valid
//! record are skipped and counted, so one bad entry does not sink the whole file.
//!
//! ## CSV
//!
//! Header `id,name,volume(ml),abv,date` followed by one row per record. Fields are
//! quoted the RFC 4180 way when they contain a comma, a quote or a newline.
//!
//! On import the first line is always treated as the header and never validated.
//! Blank lines are ignored. A row is kept only when it has five columns and:
//!
//! - `id` parses as an integer
//! - `name` is non-empty
//! - `volume` and `abv` parse as finite numbers
//! - `date` is readable by [`crate::model::parse_timestamp`]
//!
//! Rejected rows are counted in [`Decoded::skipped`] and logged at debug level.

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde_json::Value;
use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{DrinkLogError, Result};
use crate::model::{format_timestamp, parse_timestamp, DrinkRecord};

pub const CSV_HEADER: [&str; 5] = ["id", "name", "volume(ml)", "abv", "date"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferFormat {
    #[default]
    Json,
    Csv,
}

impl TransferFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TransferFormat::Json => "json",
            TransferFormat::Csv => "csv",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl fmt::Display for TransferFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for TransferFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(TransferFormat::Json),
            "csv" => Ok(TransferFormat::Csv),
            _ => Err(format!("Invalid format '{}'. Valid formats: json, csv", s)),
        }
    }
}

/// Outcome of reading an import file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decoded {
    pub records: Vec<DrinkRecord>,
    /// Entries or rows present in the input but rejected.
    pub skipped: usize,
}

impl Decoded {
    /// Nothing was usable although the input had entries.
    pub fn all_rejected(&self) -> bool {
        self.records.is_empty() && self.skipped > 0
    }
}

pub fn export(records: &[DrinkRecord], format: TransferFormat) -> Result<String> {
    match format {
        TransferFormat::Json => export_json(records),
        TransferFormat::Csv => export_csv(records),
    }
}

pub fn decode(text: &str, format: TransferFormat) -> Result<Decoded> {
    match format {
        TransferFormat::Json => decode_json(text),
        TransferFormat::Csv => Ok(decode_csv(text)),
    }
}

pub fn export_json(records: &[DrinkRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Strict on the outer shape, lenient per element.
pub fn decode_json(text: &str) -> Result<Decoded> {
    let items: Vec<Value> = serde_json::from_str(text)?;
    let mut decoded = Decoded::default();
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<DrinkRecord>(item) {
            Ok(record) => decoded.records.push(record),
            Err(e) => {
                debug!(index = idx, error = %e, "skipping json entry");
                decoded.skipped += 1;
            }
        }
    }
    Ok(decoded)
}

/// Records from a JSON document, or an empty list when it cannot be read at all.
pub fn parse_json(text: &str) -> Vec<DrinkRecord> {
    match decode_json(text) {
        Ok(decoded) => decoded.records,
        Err(e) => {
            warn!(error = %e, "json import is not a readable array");
            Vec::new()
        }
    }
}

pub fn export_csv(records: &[DrinkRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([
            record.id.to_string(),
            record.name.clone(),
            record.volume.to_string(),
            record.abv.to_string(),
            format_timestamp(&record.occurred_at),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| DrinkLogError::Io(io::Error::new(e.error().kind(), e.error().to_string())))?;
    String::from_utf8(bytes).map_err(|e| DrinkLogError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

fn csv_row(row: &StringRecord) -> Option<DrinkRecord> {
    if row.len() != CSV_HEADER.len() {
        return None;
    }
    let id = row[0].parse::<i64>().ok()?;
    let name = &row[1];
    if name.is_empty() {
        return None;
    }
    let volume = row[2].parse::<f64>().ok().filter(|v| v.is_finite())?;
    let abv = row[3].parse::<f64>().ok().filter(|v| v.is_finite())?;
    let occurred_at = parse_timestamp(&row[4])?;
    Some(DrinkRecord::new(id, name, volume, abv, occurred_at))
}

pub fn decode_csv(text: &str) -> Decoded {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut decoded = Decoded::default();
    for (row_idx, result) in reader.records().enumerate() {
        // 1-based, after the header line
        let row_num = row_idx + 2;
        match result.ok().as_ref().and_then(csv_row) {
            Some(record) => decoded.records.push(record),
            None => {
                debug!(row = row_num, "skipping csv row");
                decoded.skipped += 1;
            }
        }
    }
    if decoded.skipped > 0 {
        warn!(
            skipped = decoded.skipped,
            kept = decoded.records.len(),
            "csv import dropped rows"
        );
    }
    decoded
}

/// Valid records from a CSV document; invalid rows are dropped.
pub fn parse_csv(text: &str) -> Vec<DrinkRecord> {
    decode_csv(text).records
}
