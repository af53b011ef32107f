use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::price::AssetHistoryPoint;
use crate::models::time_range::TimeRange;
use super::traits::HistoryProvider;

const PROVIDER_NAME: &str = "Dashboard API";

/// History provider backed by the dashboard's own market-data endpoint.
///
/// - **Endpoint**: `GET {base}/market/history/{symbol}?period={1mo|3mo|1y}`
/// - **Response**: `{ "success": bool, "data": [{ "date": "YYYY-MM-DD", "price": f64, ... }] }`
///
/// The backend proxies Yahoo Finance and already returns daily closes, so no
/// resampling is done here.
pub struct DashboardApiProvider {
    client: Client,
    base_url: String,
}

impl DashboardApiProvider {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn history_url(&self, symbol: &str) -> String {
        format!("{}/market/history/{}", self.base_url, symbol)
    }
}

// ── Dashboard API response types ────────────────────────────────────

#[derive(Deserialize)]
struct HistoryResponse {
    success: bool,
    #[serde(default)]
    data: Vec<RawHistoryPoint>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct RawHistoryPoint {
    date: String,
    #[serde(default)]
    price: Option<f64>,
}

/// Parse a `/market/history` response body.
///
/// `success: false` and an empty `data` array are both errors. Points with an
/// unparseable date or no price are skipped; what remains is returned in
/// response order.
pub fn parse_history_response(
    symbol: &str,
    body: &str,
) -> Result<Vec<AssetHistoryPoint>, CoreError> {
    let resp: HistoryResponse = serde_json::from_str(body)?;

    if !resp.success {
        let reason = resp
            .error
            .or(resp.message)
            .unwrap_or_else(|| "request was not successful".into());
        return Err(CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("{symbol}: {reason}"),
        });
    }

    let points: Vec<AssetHistoryPoint> = resp
        .data
        .into_iter()
        .filter_map(|raw| {
            // Accept full ISO timestamps as well as plain dates.
            let date_part = raw.date.get(..10).unwrap_or(raw.date.as_str());
            match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
                Ok(date) => Some(AssetHistoryPoint::new(date, raw.price?)),
                Err(_) => {
                    debug!(symbol, date = %raw.date, "skipping point with unparseable date");
                    None
                }
            }
        })
        .collect();

    if points.is_empty() {
        return Err(CoreError::EmptyHistory(symbol.to_string()));
    }

    Ok(points)
}

#[async_trait]
impl HistoryProvider for DashboardApiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        range: TimeRange,
    ) -> Result<Vec<AssetHistoryPoint>, CoreError> {
        let url = self.history_url(symbol);

        let body = self
            .client
            .get(&url)
            .query(&[("period", range.provider_period())])
            .send()
            .await?
            .text()
            .await?;

        parse_history_response(symbol, &body)
    }
}
