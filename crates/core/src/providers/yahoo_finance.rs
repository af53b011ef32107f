use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use time::OffsetDateTime;

use crate::errors::CoreError;
use crate::models::price::AssetHistoryPoint;
use crate::models::time_range::TimeRange;
use super::traits::HistoryProvider;

/// Yahoo Finance API provider for daily price histories.
///
/// - **Free**: No API key required.
/// - **Coverage**: Global equities, ETFs, indices, crypto pairs (e.g. "BTC-USD").
///
/// Uses the `yahoo_finance_api` crate, which wraps Yahoo Finance's public
/// endpoints. Closing prices are returned in the instrument's native currency.
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new()
            .map_err(|e| CoreError::Api {
                provider: "Yahoo Finance".into(),
                message: format!("Failed to create connector: {e}"),
            })?;
        Ok(Self { connector })
    }

    /// Convert a `chrono::NaiveDate` to `time::OffsetDateTime` (midnight UTC).
    fn to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, CoreError> {
        let month = time::Month::try_from(date.month() as u8).map_err(|e| CoreError::Api {
            provider: "Yahoo Finance".into(),
            message: format!("Invalid month in {date}: {e}"),
        })?;

        let odt = time::Date::from_calendar_date(date.year(), month, date.day() as u8)
            .map_err(|e| CoreError::Api {
                provider: "Yahoo Finance".into(),
                message: format!("Invalid date {date}: {e}"),
            })?
            .midnight()
            .assume_utc();
        Ok(odt)
    }

}

/// Trading date of a bar stamped `ts` (unix seconds) on an exchange that is
/// `gmtoffset_secs` ahead of UTC.
///
/// Daily bars are stamped at the local market open, which lands on the
/// previous UTC day for exchanges far enough east (e.g. ASX in summer).
pub fn exchange_date(ts: i64, gmtoffset_secs: i64) -> Option<NaiveDate> {
    chrono::DateTime::from_timestamp(ts.checked_add(gmtoffset_secs)?, 0).map(|dt| dt.date_naive())
}

#[async_trait]
impl HistoryProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        range: TimeRange,
    ) -> Result<Vec<AssetHistoryPoint>, CoreError> {
        let today = chrono::Utc::now().date_naive();
        let start = Self::to_offset_datetime(range.start_date(today))?;
        let end = Self::to_offset_datetime(today + chrono::Duration::days(1))?; // inclusive end

        let resp = self
            .connector
            .get_quote_history(symbol, start, end)
            .await
            .map_err(|e| CoreError::Api {
                provider: "Yahoo Finance".into(),
                message: format!("Failed to fetch {} history for {symbol}: {e}", range.code()),
            })?;

        let quotes = resp.quotes().map_err(|e| CoreError::Api {
            provider: "Yahoo Finance".into(),
            message: format!("Failed to parse quotes for {symbol}: {e}"),
        })?;

        // Missing metadata only costs the local-date shift
        let gmtoffset = resp
            .metadata()
            .map(|meta| i64::from(meta.gmtoffset))
            .unwrap_or(0);

        let points: Vec<AssetHistoryPoint> = quotes
            .iter()
            .filter_map(|q| {
                let date = exchange_date(q.timestamp, gmtoffset)?;
                Some(AssetHistoryPoint::new(date, q.close))
            })
            .collect();

        if points.is_empty() {
            return Err(CoreError::EmptyHistory(symbol.to_string()));
        }

        Ok(points)
    }
}
