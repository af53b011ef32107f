use futures::future::join_all;
use tracing::{debug, error, warn};

use crate::errors::CoreError;
use crate::models::asset::Holding;
use crate::models::price::{sanitize_history, AssetHistoryPoint};
use crate::models::time_range::TimeRange;
use crate::providers::registry::HistoryProviderRegistry;

/// A selected holding together with its sanitised price history.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedHistory {
    pub holding: Holding,
    pub history: Vec<AssetHistoryPoint>,
}

/// Fetches price histories for a batch of holdings concurrently.
///
/// Every request is issued at once and the batch is joined only when all of
/// them have settled. A failing asset never fails the batch: it is logged
/// and left out of the result.
pub struct HistoryFetcher {
    registry: HistoryProviderRegistry,
}

impl HistoryFetcher {
    pub fn new(registry: HistoryProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HistoryProviderRegistry {
        &self.registry
    }

    /// Fetch histories for all `holdings`. Successful assets are returned in
    /// the same order as `holdings`; failed ones are dropped.
    pub async fn fetch_all(&self, holdings: &[Holding], range: TimeRange) -> Vec<FetchedHistory> {
        let requests = holdings.iter().map(|holding| async move {
            let result = self.fetch_one(&holding.symbol, range).await;
            (holding, result)
        });

        let results = join_all(requests).await;

        let mut fetched = Vec::with_capacity(results.len());
        for (holding, result) in results {
            match result {
                Ok(history) => {
                    debug!(symbol = %holding.symbol, points = history.len(), "history fetched");
                    fetched.push(FetchedHistory {
                        holding: holding.clone(),
                        history,
                    });
                }
                Err(e) if e.is_provider_error() => {
                    warn!(symbol = %holding.symbol, range = %range, error = %e, "dropping asset without usable history");
                }
                Err(e) => {
                    error!(symbol = %holding.symbol, range = %range, error = %e, "unexpected history error, dropping asset");
                }
            }
        }
        fetched
    }

    /// Fetch one asset, trying providers in priority order.
    ///
    /// A provider "succeeds" only if something usable is left after
    /// sanitising; otherwise the next provider is tried.
    async fn fetch_one(
        &self,
        symbol: &str,
        range: TimeRange,
    ) -> Result<Vec<AssetHistoryPoint>, CoreError> {
        let providers = self.registry.providers();
        if providers.is_empty() {
            return Err(CoreError::NoProvider(symbol.to_string()));
        }

        let mut last_error = None;
        for provider in &providers {
            match provider.fetch_history(symbol, range).await {
                Ok(points) => {
                    let history = sanitize_history(points);
                    if history.is_empty() {
                        last_error = Some(CoreError::EmptyHistory(symbol.to_string()));
                        continue;
                    }
                    return Ok(history);
                }
                Err(e) => {
                    debug!(provider = provider.name(), symbol, error = %e, "provider failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::NoProvider(symbol.to_string())))
    }
}
