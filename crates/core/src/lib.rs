pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tracing::debug;

use errors::CoreError;
use models::{
    asset::Holding,
    chart::{ChartState, ChartUpdate, PortfolioHistory},
    settings::EngineSettings,
    time_range::TimeRange,
};
use providers::registry::HistoryProviderRegistry;
use services::history_service::HistoryService;

/// Main entry point for the portfolio-history core library.
///
/// Owns the chart state for one dashboard view. Each period selection gets a
/// new generation; a computation may only write its result back while its
/// generation is still the latest, so a slow older request can never
/// overwrite a newer one.
#[must_use]
pub struct PortfolioHistoryEngine {
    settings: EngineSettings,
    history_service: HistoryService,
    /// Last generation handed out. Generation 0 means "never selected".
    generation: AtomicU64,
    state: Mutex<ChartState>,
}

impl std::fmt::Debug for PortfolioHistoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioHistoryEngine")
            .field("settings", &self.settings)
            .field(
                "providers",
                &self.history_service.fetcher().registry().provider_names(),
            )
            .field("generation", &self.current_generation())
            .finish()
    }
}

impl PortfolioHistoryEngine {
    /// Create an engine with the default providers for `settings`.
    ///
    /// Fails with `CoreError::Config` when `settings` are out of range.
    pub fn new(settings: EngineSettings) -> Result<Self, CoreError> {
        settings.validate()?;
        let registry = HistoryProviderRegistry::new_with_defaults(&settings);
        Self::with_registry(settings, registry)
    }

    /// Create an engine with a caller-supplied provider registry.
    pub fn with_registry(
        settings: EngineSettings,
        registry: HistoryProviderRegistry,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self {
            history_service: HistoryService::new(&settings, registry),
            settings,
            generation: AtomicU64::new(0),
            state: Mutex::new(ChartState::Idle),
        })
    }

    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Compute a history without touching the chart state.
    ///
    /// `None` means "no usable data"; the caller shows a waiting state.
    pub async fn compute_history(
        &self,
        holdings: &[Holding],
        total_value: f64,
        range: TimeRange,
    ) -> Option<PortfolioHistory> {
        self.history_service
            .compute_history(holdings, total_value, range)
            .await
    }

    /// Handle a period selection: move to `Fetching`, compute, and commit
    /// the result only if no newer selection was made in the meantime.
    pub async fn select_period(
        &self,
        holdings: &[Holding],
        total_value: f64,
        range: TimeRange,
    ) -> ChartUpdate {
        let generation = {
            let mut state = self.lock_state();
            // Issue under the state lock so `Fetching` always names the newest generation.
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = ChartState::Fetching { generation, range };
            generation
        };
        debug!(generation, range = %range, "period selected");

        let result = self
            .history_service
            .compute_history(holdings, total_value, range)
            .await;

        let mut state = self.lock_state();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding superseded history result");
            return ChartUpdate::Superseded { generation };
        }

        *state = match result {
            Some(history) => ChartState::Ready {
                generation,
                history,
            },
            None => ChartState::NoData { generation, range },
        };
        ChartUpdate::Applied(state.clone())
    }

    /// Snapshot of the current chart state.
    #[must_use]
    pub fn state(&self) -> ChartState {
        self.lock_state().clone()
    }

    /// The latest generation issued (0 before the first selection).
    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ChartState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
