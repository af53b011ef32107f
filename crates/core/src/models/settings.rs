use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::CoreError;

/// How a selected asset is valued on a canonical date it has no price for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Use the asset's current weighted value unchanged.
    #[default]
    Flat,
    /// Use the closest earlier price in the asset's own history;
    /// flat when the asset has no earlier price.
    PreviousClose,
}

/// Engine configuration.
///
/// Every field has a default, so an empty TOML document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Number of largest holdings whose history is fetched.
    pub top_assets: usize,

    /// Gap handling for dates missing from an asset's history.
    pub gap_policy: GapPolicy,

    /// Base URL of the dashboard backend (e.g. "http://localhost:5000/api").
    /// When unset, only Yahoo Finance is used.
    pub api_base_url: Option<String>,

    /// Per-request timeout for HTTP providers, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            top_assets: 3,
            gap_policy: GapPolicy::Flat,
            api_base_url: None,
            request_timeout_secs: 30,
        }
    }
}

impl EngineSettings {
    pub fn from_toml_str(s: &str) -> Result<Self, CoreError> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub(crate) fn validate(&self) -> Result<(), CoreError> {
        if self.top_assets == 0 {
            return Err(CoreError::Config("top_assets must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
