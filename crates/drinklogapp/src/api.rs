//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the aggregation
//! engine. It is the single entry point for all drinklog operations, whatever the
//! UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** mutations to `commands/*.rs`
//! - **Supplies the clock and timezone**: records are stamped with `Utc::now()`
//!   and every calendar view is computed in the local timezone
//! - **Returns structured types**: `CmdResult` for mutations, report structs for views
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs` and the pure modules
//! - **Terminal output**: No stdout, stderr, or formatting
//!
//! ## Generic Over StorageBackend
//!
//! `DrinkLogApi<B: StorageBackend>` wraps a `DrinkLogStore<B>`:
//! - Production: `DrinkLogApi<FsBackend>` (see [`crate::init`])
//! - Testing: `DrinkLogApi<MemBackend>`

use chrono::{DateTime, Local, NaiveDate, Utc};
use std::path::Path;
use std::rc::Rc;

use crate::aggregate::{self, ChartDataset, DateRange, DayTotal, PeriodTotal, RangeReport};
use crate::codec::TransferFormat;
use crate::commands;
use crate::entry::DrinkEntry;
use crate::error::Result;
use crate::group::Period;
use crate::model::DrinkRecord;
use crate::store::{DrinkLogStore, StorageBackend};

/// The main API facade for drinklog operations.
pub struct DrinkLogApi<B: StorageBackend> {
    store: DrinkLogStore<B>,
}

impl<B: StorageBackend> DrinkLogApi<B> {
    pub fn new(store: DrinkLogStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DrinkLogStore<B> {
        &self.store
    }

    /// Direct store access, for subscribing observers.
    pub fn store_mut(&mut self) -> &mut DrinkLogStore<B> {
        &mut self.store
    }

    pub fn drinks(&self) -> Rc<Vec<DrinkRecord>> {
        self.store.current()
    }

    pub fn log_drink(&mut self, entry: DrinkEntry) -> Result<commands::CmdResult> {
        self.log_drink_at(entry, Utc::now())
    }

    pub fn log_drink_at(
        &mut self,
        entry: DrinkEntry,
        occurred_at: DateTime<Utc>,
    ) -> Result<commands::CmdResult> {
        commands::log::run(&mut self.store, entry, occurred_at)
    }

    pub fn delete_drinks(&mut self, ids: &[i64]) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, ids)
    }

    pub fn save_favorite(&mut self, entry: DrinkEntry) -> Result<commands::CmdResult> {
        commands::favorites::save(&mut self.store, entry)
    }

    pub fn save_favorite_from_drink(&mut self, id: i64) -> Result<commands::CmdResult> {
        commands::favorites::save_from_drink(&mut self.store, id)
    }

    pub fn list_favorites(&self) -> commands::CmdResult {
        commands::favorites::list(&self.store)
    }

    pub fn log_favorite(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::favorites::log(&mut self.store, name, Utc::now())
    }

    pub fn today(&self) -> DayTotal {
        self.daily_total(Local::now().date_naive())
    }

    pub fn daily_total(&self, day: NaiveDate) -> DayTotal {
        aggregate::daily_total(&self.store.current(), day, &Local)
    }

    pub fn range_totals(&self, range: DateRange) -> RangeReport {
        aggregate::range_totals(&self.store.current(), range, &Local)
    }

    pub fn chart(&self, range: DateRange) -> ChartDataset {
        aggregate::stacked_by_drink_name(&self.store.current(), range, &Local)
    }

    pub fn summary(&self, period: Period, range: DateRange) -> Vec<PeriodTotal> {
        aggregate::period_totals(&self.store.current(), period, range, &Local)
    }

    pub fn export(&self, format: TransferFormat) -> Result<String> {
        commands::export::render(&self.store, format)
    }

    pub fn export_to_file(&self, format: TransferFormat, path: &Path) -> Result<commands::CmdResult> {
        commands::export::to_file(&self.store, format, path)
    }

    pub fn import(&mut self, text: &str, format: TransferFormat) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, text, format)
    }

    pub fn import_file(
        &mut self,
        path: &Path,
        format: Option<TransferFormat>,
    ) -> Result<commands::CmdResult> {
        commands::import::from_file(&mut self.store, path, format)
    }
}
