use chrono::NaiveDate;

use crate::models::price::WeightedAsset;
use crate::services::date_aligner::DateAligner;

/// Combines per-asset historical prices into one portfolio value per date.
///
/// Each asset contributes today's dollar value scaled by its own historical
/// price ratio: `weight × total × (price_on_date / latest_price)`. When the
/// ratio is unavailable (no price on that date, or an unusable latest price)
/// the asset contributes `weight × total` unchanged.
///
/// Per-date sums are independent of asset order up to float rounding.
pub struct WeightedAggregator;

impl WeightedAggregator {
    pub fn new() -> Self {
        Self
    }

    /// One rounded, non-negative value per canonical date.
    pub fn aggregate(
        &self,
        aligner: &DateAligner,
        dates: &[NaiveDate],
        assets: &[WeightedAsset],
        total_value: f64,
    ) -> Vec<f64> {
        dates
            .iter()
            .map(|&date| self.value_on(aligner, date, assets, total_value))
            .collect()
    }

    /// Portfolio value on a single date, rounded to a whole currency unit.
    pub fn value_on(
        &self,
        aligner: &DateAligner,
        date: NaiveDate,
        assets: &[WeightedAsset],
        total_value: f64,
    ) -> f64 {
        let sum: f64 = assets
            .iter()
            .map(|asset| Self::historical_asset_value(aligner, asset, date, total_value))
            .sum();
        sum.round().max(0.0)
    }

    fn historical_asset_value(
        aligner: &DateAligner,
        asset: &WeightedAsset,
        date: NaiveDate,
        total_value: f64,
    ) -> f64 {
        let current_value = asset.weight * total_value;
        if !asset.has_valid_latest_price() {
            return current_value;
        }
        match aligner.price_for(asset, date) {
            Some(price) => current_value * (price / asset.latest_price),
            None => current_value,
        }
    }
}

impl Default for WeightedAggregator {
    fn default() -> Self {
        Self::new()
    }
}
