use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::asset::Holding;

/// A single historical price for one asset (date → closing price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetHistoryPoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl AssetHistoryPoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// A selected holding paired with its fetched price history and its share
/// of the total portfolio value.
///
/// Weights are not required to sum to 1: cash and holdings outside the
/// selection are simply not represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedAsset {
    pub symbol: String,

    /// `quantity × current_price / total_portfolio_value`
    pub weight: f64,

    /// Price history sorted ascending by date, one point per date
    pub history: Vec<AssetHistoryPoint>,

    /// Price the weight was computed with; historical prices are scaled
    /// relative to it.
    pub latest_price: f64,
}

impl WeightedAsset {
    /// Build a weighted asset from a holding and its (already sanitised) history.
    /// `total_value` must be positive; the caller checks this once up front.
    pub fn from_holding(
        holding: &Holding,
        total_value: f64,
        history: Vec<AssetHistoryPoint>,
    ) -> Self {
        Self {
            symbol: holding.symbol.clone(),
            weight: holding.market_value() / total_value,
            history,
            latest_price: holding.current_price,
        }
    }

    /// Exact-date lookup. Uses binary search (O(log n)) over the sorted history.
    pub fn price_on(&self, date: NaiveDate) -> Option<f64> {
        self.history
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| self.history[idx].price)
    }

    /// Price on `date`, or on the closest earlier date the asset traded.
    pub fn price_on_or_before(&self, date: NaiveDate) -> Option<f64> {
        match self.history.binary_search_by_key(&date, |p| p.date) {
            Ok(idx) => Some(self.history[idx].price),
            Err(0) => None,
            Err(pos) => Some(self.history[pos - 1].price),
        }
    }

    /// Whether `latest_price` can be used as a ratio denominator.
    pub fn has_valid_latest_price(&self) -> bool {
        self.latest_price.is_finite() && self.latest_price > 0.0
    }

    /// Dates present in this asset's history, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.history.iter().map(|p| p.date).collect()
    }
}

/// Sort points ascending by date, drop invalid prices, and collapse duplicate
/// dates (the later entry in the input wins).
///
/// Providers are expected to return clean, ordered data; this is applied to
/// every response anyway so the aligner can rely on binary search.
pub fn sanitize_history(mut points: Vec<AssetHistoryPoint>) -> Vec<AssetHistoryPoint> {
    points.retain(|p| p.price.is_finite() && p.price > 0.0);
    // Stable sort keeps input order among equal dates.
    points.sort_by_key(|p| p.date);

    let mut cleaned: Vec<AssetHistoryPoint> = Vec::with_capacity(points.len());
    for point in points {
        match cleaned.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => cleaned.push(point),
        }
    }
    cleaned
}
