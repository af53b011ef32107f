use tracing::warn;

use crate::models::settings::EngineSettings;

use super::dashboard_api::DashboardApiProvider;
use super::traits::HistoryProvider;
use super::yahoo_finance::YahooFinanceProvider;

/// Registry of history providers, in priority order.
///
/// The fetcher tries providers front to back for each asset and stops at the
/// first one that returns usable data.
pub struct HistoryProviderRegistry {
    providers: Vec<Box<dyn HistoryProvider>>,
}

impl HistoryProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with the default providers for `settings`.
    pub fn new_with_defaults(settings: &EngineSettings) -> Self {
        let mut registry = Self::new();

        // Dashboard backend: primary when configured
        if let Some(base_url) = &settings.api_base_url {
            registry.register(Box::new(DashboardApiProvider::new(
                base_url.clone(),
                settings.request_timeout_secs,
            )));
        }

        // Yahoo Finance: no API key needed
        match YahooFinanceProvider::new() {
            Ok(yahoo) => registry.register(Box::new(yahoo)),
            Err(e) => warn!(error = %e, "Yahoo Finance provider unavailable"),
        }

        registry
    }

    /// Register a provider at the lowest priority.
    pub fn register(&mut self, provider: Box<dyn HistoryProvider>) {
        self.providers.push(provider);
    }

    /// All providers, ordered by registration priority.
    pub fn providers(&self) -> Vec<&dyn HistoryProvider> {
        self.providers.iter().map(|p| p.as_ref()).collect()
    }

    /// Provider names in priority order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for HistoryProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
