use thiserror::Error;

/// Unified error type for the entire portfolio-history-core library.
///
/// Per-asset provider failures are reported with these variants but are
/// recovered inside the history fetcher; they never escape the engine.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("No usable history returned for {0}")]
    EmptyHistory(String),

    #[error("No history provider registered for {0}")]
    NoProvider(String),

    // ── Input / Configuration ───────────────────────────────────────
    #[error("Unknown time range: {0} (expected 1M, 3M or 1Y)")]
    InvalidTimeRange(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// True for failures that come from a market-data provider for a single
    /// asset. The history fetcher drops these with a warning; any other error
    /// still only drops its asset but is logged at error level.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            CoreError::Api { .. }
                | CoreError::Network(_)
                | CoreError::Deserialization(_)
                | CoreError::EmptyHistory(_)
                | CoreError::NoProvider(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(e: toml::de::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters so API keys in URLs never reach logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
