//! # Mixed-Drink Resolver
//!
//! A cocktail is described by its base liquor (volume, unit, ABV) and the total
//! volume of the finished drink. [`resolve`] folds that into a single
//! `(volume, abv)` pair that can be logged like any other drink:
//!
//! ```text
//! pure      = base_ml * base_abv / 100
//! final_abv = pure / total_ml * 100
//! volume    = total_ml
//! ```
//!
//! Incomplete or invalid input never raises. It resolves to
//! [`ResolvedDrink::NOT_READY`] (zero volume, zero ABV), which callers must read
//! as "not ready to submit" rather than as a zero-content drink.

use tracing::warn;

use crate::alcohol::pure_alcohol_ml;
use crate::units::normalize;

#[derive(Debug, Clone, PartialEq)]
pub struct MixedDrink {
    pub base_volume: Option<f64>,
    pub base_unit: String,
    pub base_abv: Option<f64>,
    pub total_volume: Option<f64>,
    pub total_unit: String,
}

impl Default for MixedDrink {
    fn default() -> Self {
        Self {
            base_volume: None,
            base_unit: "ml".to_string(),
            base_abv: None,
            total_volume: None,
            total_unit: "ml".to_string(),
        }
    }
}

impl MixedDrink {
    pub fn new(
        base_volume: f64,
        base_unit: impl Into<String>,
        base_abv: f64,
        total_volume: f64,
        total_unit: impl Into<String>,
    ) -> Self {
        Self {
            base_volume: Some(base_volume),
            base_unit: base_unit.into(),
            base_abv: Some(base_abv),
            total_volume: Some(total_volume),
            total_unit: total_unit.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDrink {
    /// Milliliters.
    pub volume: f64,
    pub abv: f64,
}

impl ResolvedDrink {
    pub const NOT_READY: ResolvedDrink = ResolvedDrink {
        volume: 0.0,
        abv: 0.0,
    };

    pub fn is_ready(&self) -> bool {
        self.volume.is_finite() && self.abv.is_finite() && self.volume > 0.0 && self.abv > 0.0
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

pub fn resolve(mixed: &MixedDrink) -> ResolvedDrink {
    let (Some(base_volume), Some(base_abv), Some(total_volume)) = (
        positive(mixed.base_volume),
        positive(mixed.base_abv),
        positive(mixed.total_volume),
    ) else {
        return ResolvedDrink::NOT_READY;
    };

    let converted = normalize(base_volume, &mixed.base_unit)
        .and_then(|base_ml| normalize(total_volume, &mixed.total_unit).map(|total| (base_ml, total)));

    match converted {
        Ok((base_ml, total_ml)) => {
            let pure = pure_alcohol_ml(base_ml, base_abv);
            ResolvedDrink {
                volume: total_ml,
                abv: pure / total_ml * 100.0,
            }
        }
        Err(e) => {
            warn!(error = %e, "mixed drink conversion failed");
            ResolvedDrink::NOT_READY
        }
    }
}
