use chrono::NaiveDate;

use crate::models::price::WeightedAsset;
use crate::models::settings::GapPolicy;

/// Establishes the canonical date axis and maps assets onto it.
///
/// The axis is taken from the first asset that has history, not from a union
/// or intersection of all calendars. Other assets are looked up by exact date;
/// nothing is interpolated. Assets on a different trading calendar (crypto vs
/// equities) will have gaps, which the aggregator fills per `GapPolicy`.
pub struct DateAligner {
    gap_policy: GapPolicy,
}

impl DateAligner {
    pub fn new(gap_policy: GapPolicy) -> Self {
        Self { gap_policy }
    }

    pub fn gap_policy(&self) -> GapPolicy {
        self.gap_policy
    }

    /// The most recent `target_days` dates of the first asset with history.
    /// Shorter when that asset has fewer points; empty when no asset has any.
    pub fn canonical_dates(&self, assets: &[WeightedAsset], target_days: usize) -> Vec<NaiveDate> {
        let Some(source) = assets.iter().find(|a| !a.history.is_empty()) else {
            return Vec::new();
        };
        let dates = source.dates();
        let skip = dates.len().saturating_sub(target_days);
        dates[skip..].to_vec()
    }

    /// Price of `asset` on canonical `date`, or `None` if it must fall back flat.
    pub fn price_for(&self, asset: &WeightedAsset, date: NaiveDate) -> Option<f64> {
        match self.gap_policy {
            GapPolicy::Flat => asset.price_on(date),
            GapPolicy::PreviousClose => asset.price_on_or_before(date),
        }
    }
}

impl Default for DateAligner {
    fn default() -> Self {
        Self::new(GapPolicy::Flat)
    }
}
