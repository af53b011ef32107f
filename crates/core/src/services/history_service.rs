use tracing::{debug, info, instrument, warn};

use crate::models::asset::Holding;
use crate::models::chart::{HistorySummary, PortfolioHistory};
use crate::models::price::WeightedAsset;
use crate::models::settings::EngineSettings;
use crate::models::time_range::TimeRange;
use crate::providers::registry::HistoryProviderRegistry;
use crate::services::asset_selector::AssetSelector;
use crate::services::date_aligner::DateAligner;
use crate::services::history_fetcher::HistoryFetcher;
use crate::services::label_sampler::LabelSampler;
use crate::services::weighted_aggregator::WeightedAggregator;

/// Reconstructs the portfolio's historical value series.
///
/// The pipeline is a function of its inputs only: it holds no state between
/// calls and knows nothing about which request is the latest. Supersession is
/// handled one level up by `PortfolioHistoryEngine`.
pub struct HistoryService {
    selector: AssetSelector,
    fetcher: HistoryFetcher,
    aligner: DateAligner,
    aggregator: WeightedAggregator,
    sampler: LabelSampler,
}

impl HistoryService {
    pub fn new(settings: &EngineSettings, registry: HistoryProviderRegistry) -> Self {
        Self {
            selector: AssetSelector::new(settings.top_assets),
            fetcher: HistoryFetcher::new(registry),
            aligner: DateAligner::new(settings.gap_policy),
            aggregator: WeightedAggregator::new(),
            sampler: LabelSampler::new(),
        }
    }

    pub fn fetcher(&self) -> &HistoryFetcher {
        &self.fetcher
    }

    /// Build the value series for `range`.
    ///
    /// Returns `None` when there is nothing honest to chart: a non-positive
    /// or non-finite `total_value`, no eligible holdings, or no asset with
    /// usable history.
    #[instrument(skip(self, holdings), fields(holdings = holdings.len()))]
    pub async fn compute_history(
        &self,
        holdings: &[Holding],
        total_value: f64,
        range: TimeRange,
    ) -> Option<PortfolioHistory> {
        if !total_value.is_finite() || total_value <= 0.0 {
            warn!(total_value, "portfolio total is not positive, skipping history");
            return None;
        }

        let selected = self.selector.select(holdings);
        if selected.is_empty() {
            debug!("no eligible holdings");
            return None;
        }

        let fetched = self.fetcher.fetch_all(&selected, range).await;
        if fetched.is_empty() {
            info!(requested = selected.len(), "no asset returned usable history");
            return None;
        }

        let assets: Vec<WeightedAsset> = fetched
            .into_iter()
            .map(|f| WeightedAsset::from_holding(&f.holding, total_value, f.history))
            .collect();

        let dates = self.aligner.canonical_dates(&assets, range.target_days());
        if dates.is_empty() {
            return None;
        }

        let values = self
            .aggregator
            .aggregate(&self.aligner, &dates, &assets, total_value);
        let labels = self.sampler.labels(&dates, range.label_bucket());
        let summary = HistorySummary::from_values(&values);

        debug!(points = dates.len(), assets = assets.len(), "history reconstructed");

        Some(PortfolioHistory {
            range,
            dates,
            labels,
            values,
            summary,
        })
    }
}
