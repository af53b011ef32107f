use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::price::AssetHistoryPoint;
use crate::models::time_range::TimeRange;

/// Trait abstraction for market-data backends that serve price histories.
///
/// Each backend (the dashboard's own market API, Yahoo Finance, test mocks)
/// implements this trait; the history fetcher only ever sees the trait.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Daily closing prices for `symbol` over the window implied by `range`.
    ///
    /// Implementations should return points ascending by date, but callers
    /// do not rely on it. An empty result is treated as a failure.
    async fn fetch_history(
        &self,
        symbol: &str,
        range: TimeRange,
    ) -> Result<Vec<AssetHistoryPoint>, CoreError>;
}
