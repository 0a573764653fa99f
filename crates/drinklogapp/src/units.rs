//! # Unit Normalizer
//!
//! Volumes are entered in whatever unit the user has at hand (a can in `fl-oz`,
//! a shot in `cl`, a splash in `tsp`) but every [`DrinkRecord`](crate::model::DrinkRecord)
//! stores milliliters. Conversion happens exactly once, at entry time, through
//! [`normalize`]. Nothing downstream ever looks at a unit again.
//!
//! ## Unit Catalogue
//!
//! Two measuring systems are supported, each with its own anchor:
//!
//! - **Metric** units are defined directly in milliliters.
//! - **Imperial** units are defined in US fluid ounces and bridged to the
//!   metric system at `33.8140226 fl-oz` per liter.
//!
//! Abbreviations follow the usual volume unit tables (`ml`, `cl`, `l`, `tsp`,
//! `Tbs`, `fl-oz`, `cup`, `pnt`, `qt`, `gal`, ...), including the Swedish
//! kitchen measures (`krm`, `tsk`, `msk`, `kkp`, `glas`, `kanna`). Matching is
//! case-insensitive and `oz` is accepted as an alias for `fl-oz`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const FL_OZ_PER_LITER: f64 = 33.8140226;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Unknown volume unit: {0}")]
    UnknownUnit(String),

    #[error("Value {0} cannot be converted")]
    NotConvertible(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeUnit {
    CubicMillimeter,
    CubicCentimeter,
    Milliliter,
    Centiliter,
    Deciliter,
    Liter,
    Kiloliter,
    CubicMeter,
    CubicKilometer,
    Kryddmatt,
    Tesked,
    Matsked,
    Kaffekopp,
    Glas,
    Kanna,
    Teaspoon,
    Tablespoon,
    CubicInch,
    FluidOunce,
    Cup,
    Pint,
    Quart,
    Gallon,
    CubicFoot,
    CubicYard,
}

enum Anchor {
    Milliliters(f64),
    FluidOunces(f64),
}

impl VolumeUnit {
    pub const ALL: [VolumeUnit; 25] = [
        VolumeUnit::CubicMillimeter,
        VolumeUnit::CubicCentimeter,
        VolumeUnit::Milliliter,
        VolumeUnit::Centiliter,
        VolumeUnit::Deciliter,
        VolumeUnit::Liter,
        VolumeUnit::Kiloliter,
        VolumeUnit::CubicMeter,
        VolumeUnit::CubicKilometer,
        VolumeUnit::Kryddmatt,
        VolumeUnit::Tesked,
        VolumeUnit::Matsked,
        VolumeUnit::Kaffekopp,
        VolumeUnit::Glas,
        VolumeUnit::Kanna,
        VolumeUnit::Teaspoon,
        VolumeUnit::Tablespoon,
        VolumeUnit::CubicInch,
        VolumeUnit::FluidOunce,
        VolumeUnit::Cup,
        VolumeUnit::Pint,
        VolumeUnit::Quart,
        VolumeUnit::Gallon,
        VolumeUnit::CubicFoot,
        VolumeUnit::CubicYard,
    ];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            VolumeUnit::CubicMillimeter => "mm3",
            VolumeUnit::CubicCentimeter => "cm3",
            VolumeUnit::Milliliter => "ml",
            VolumeUnit::Centiliter => "cl",
            VolumeUnit::Deciliter => "dl",
            VolumeUnit::Liter => "l",
            VolumeUnit::Kiloliter => "kl",
            VolumeUnit::CubicMeter => "m3",
            VolumeUnit::CubicKilometer => "km3",
            VolumeUnit::Kryddmatt => "krm",
            VolumeUnit::Tesked => "tsk",
            VolumeUnit::Matsked => "msk",
            VolumeUnit::Kaffekopp => "kkp",
            VolumeUnit::Glas => "glas",
            VolumeUnit::Kanna => "kanna",
            VolumeUnit::Teaspoon => "tsp",
            VolumeUnit::Tablespoon => "Tbs",
            VolumeUnit::CubicInch => "in3",
            VolumeUnit::FluidOunce => "fl-oz",
            VolumeUnit::Cup => "cup",
            VolumeUnit::Pint => "pnt",
            VolumeUnit::Quart => "qt",
            VolumeUnit::Gallon => "gal",
            VolumeUnit::CubicFoot => "ft3",
            VolumeUnit::CubicYard => "yd3",
        }
    }

    fn anchor(&self) -> Anchor {
        match self {
            VolumeUnit::CubicMillimeter => Anchor::Milliliters(0.001),
            VolumeUnit::CubicCentimeter => Anchor::Milliliters(1.0),
            VolumeUnit::Milliliter => Anchor::Milliliters(1.0),
            VolumeUnit::Centiliter => Anchor::Milliliters(10.0),
            VolumeUnit::Deciliter => Anchor::Milliliters(100.0),
            VolumeUnit::Liter => Anchor::Milliliters(1_000.0),
            VolumeUnit::Kiloliter => Anchor::Milliliters(1_000_000.0),
            VolumeUnit::CubicMeter => Anchor::Milliliters(1_000_000.0),
            VolumeUnit::CubicKilometer => Anchor::Milliliters(1e15),
            VolumeUnit::Kryddmatt => Anchor::Milliliters(1.0),
            VolumeUnit::Tesked => Anchor::Milliliters(5.0),
            VolumeUnit::Matsked => Anchor::Milliliters(15.0),
            VolumeUnit::Kaffekopp => Anchor::Milliliters(150.0),
            VolumeUnit::Glas => Anchor::Milliliters(200.0),
            VolumeUnit::Kanna => Anchor::Milliliters(2_617.0),
            VolumeUnit::Teaspoon => Anchor::FluidOunces(1.0 / 6.0),
            VolumeUnit::Tablespoon => Anchor::FluidOunces(0.5),
            VolumeUnit::CubicInch => Anchor::FluidOunces(0.55411),
            VolumeUnit::FluidOunce => Anchor::FluidOunces(1.0),
            VolumeUnit::Cup => Anchor::FluidOunces(8.0),
            VolumeUnit::Pint => Anchor::FluidOunces(16.0),
            VolumeUnit::Quart => Anchor::FluidOunces(32.0),
            VolumeUnit::Gallon => Anchor::FluidOunces(128.0),
            VolumeUnit::CubicFoot => Anchor::FluidOunces(957.506),
            VolumeUnit::CubicYard => Anchor::FluidOunces(25_852.7),
        }
    }

    /// Milliliters in one of this unit.
    pub fn ml_factor(&self) -> f64 {
        match self.anchor() {
            Anchor::Milliliters(ml) => ml,
            Anchor::FluidOunces(oz) => oz / FL_OZ_PER_LITER * 1_000.0,
        }
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for VolumeUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("oz") {
            return Ok(VolumeUnit::FluidOunce);
        }
        VolumeUnit::ALL
            .iter()
            .find(|unit| unit.abbreviation().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| ConversionError::UnknownUnit(s.to_string()))
    }
}

/// Convert `raw_value` expressed in `unit` into milliliters.
pub fn normalize(raw_value: f64, unit: &str) -> Result<f64, ConversionError> {
    let unit: VolumeUnit = unit.parse()?;
    let ml = raw_value * unit.ml_factor();
    if !ml.is_finite() {
        return Err(ConversionError::NotConvertible(raw_value));
    }
    Ok(ml)
}

/// All accepted unit abbreviations, sorted alphabetically ignoring case.
pub fn possibilities() -> Vec<&'static str> {
    let mut units: Vec<&'static str> = VolumeUnit::ALL.iter().map(|u| u.abbreviation()).collect();
    units.sort_by_key(|u| u.to_lowercase());
    units
}
