use crate::model::DrinkRecord;

/// Milliliters of pure ethanol in `volume_ml` of a drink at `abv_percent`.
///
/// No input is rejected here: entry validation keeps non-positive volumes and
/// negative ABVs out of the log before this is ever called.
pub fn pure_alcohol_ml(volume_ml: f64, abv_percent: f64) -> f64 {
    volume_ml * abv_percent / 100.0
}

/// Sum of pure alcohol over a set of records.
pub fn total_pure_alcohol_ml<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a DrinkRecord>,
{
    records.into_iter().map(DrinkRecord::pure_alcohol_ml).sum()
}
