//! # Drink Entry
//!
//! Turns raw user input into a validated [`DrinkRecord`]. This is the only place
//! where units exist: once [`DrinkEntry::into_record`] succeeds the volume is in
//! milliliters for good.
//!
//! Two shapes of input are accepted:
//!
//! - [`Measure::Direct`]: a volume in some unit plus an ABV.
//! - [`Measure::Mixed`]: a base liquor and a total volume, resolved through
//!   [`crate::mixed::resolve`].
//!
//! Validation rules:
//!
//! | Check                       | Error                        |
//! |-----------------------------|------------------------------|
//! | name empty after trimming   | [`EntryError::EmptyName`]    |
//! | direct volume not > 0       | [`EntryError::InvalidVolume`]|
//! | direct ABV < 0 or not finite| [`EntryError::InvalidAbv`]   |
//! | unknown unit                | [`EntryError::Conversion`]   |
//! | mixed input incomplete      | [`EntryError::MixedNotReady`]|
//!
//! A direct ABV of exactly 0 is allowed so alcohol-free drinks can be logged.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::warn;

use crate::mixed::{resolve, MixedDrink};
use crate::model::{DrinkRecord, FavoriteDrink};
use crate::units::{normalize, ConversionError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryError {
    #[error("Drink name cannot be empty")]
    EmptyName,

    #[error("Volume must be greater than zero (got {0})")]
    InvalidVolume(f64),

    #[error("ABV must be zero or more (got {0})")]
    InvalidAbv(f64),

    #[error("Mixed drink is incomplete or invalid")]
    MixedNotReady,

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Measure {
    Direct { volume: f64, unit: String, abv: f64 },
    Mixed(MixedDrink),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrinkEntry {
    pub name: String,
    pub measure: Measure,
}

impl DrinkEntry {
    pub fn direct(name: impl Into<String>, volume: f64, unit: impl Into<String>, abv: f64) -> Self {
        Self {
            name: name.into(),
            measure: Measure::Direct {
                volume,
                unit: unit.into(),
                abv,
            },
        }
    }

    pub fn mixed(name: impl Into<String>, mixed: MixedDrink) -> Self {
        Self {
            name: name.into(),
            measure: Measure::Mixed(mixed),
        }
    }

    /// Validate and normalize, returning `(name, volume_ml, abv)`.
    pub fn resolve(&self) -> Result<(String, f64, f64), EntryError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EntryError::EmptyName);
        }

        let (volume, abv) = match &self.measure {
            Measure::Direct { volume, unit, abv } => {
                if !(volume.is_finite() && *volume > 0.0) {
                    return Err(EntryError::InvalidVolume(*volume));
                }
                if !(abv.is_finite() && *abv >= 0.0) {
                    return Err(EntryError::InvalidAbv(*abv));
                }
                let volume_ml = normalize(*volume, unit).inspect_err(|e| {
                    warn!(error = %e, unit = %unit, "volume conversion failed");
                })?;
                if volume_ml <= 0.0 {
                    return Err(EntryError::InvalidVolume(volume_ml));
                }
                (volume_ml, *abv)
            }
            Measure::Mixed(mixed) => {
                let resolved = resolve(mixed);
                if !resolved.is_ready() {
                    return Err(EntryError::MixedNotReady);
                }
                (resolved.volume, resolved.abv)
            }
        };

        // Infinite values would not survive a save and reload
        if !volume.is_finite() {
            return Err(EntryError::InvalidVolume(volume));
        }
        if !abv.is_finite() {
            return Err(EntryError::InvalidAbv(abv));
        }

        Ok((name.to_string(), volume, abv))
    }

    pub fn into_record(self, id: i64, occurred_at: DateTime<Utc>) -> Result<DrinkRecord, EntryError> {
        let (name, volume, abv) = self.resolve()?;
        Ok(DrinkRecord::new(id, name, volume, abv, occurred_at))
    }

    pub fn into_favorite(self) -> Result<FavoriteDrink, EntryError> {
        let (name, volume, abv) = self.resolve()?;
        Ok(FavoriteDrink::new(name, volume, abv))
    }
}
