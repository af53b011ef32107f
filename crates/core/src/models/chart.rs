use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time_range::TimeRange;

/// A single point of the reconstructed portfolio series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuePoint {
    pub date: NaiveDate,

    /// Axis label; empty when this date is not labelled
    pub label: String,

    /// Portfolio value on this date, rounded to a whole currency unit
    pub value: f64,
}

/// Reconstructed portfolio value series, ready for a line chart.
///
/// `dates`, `labels` and `values` always have the same length, in ascending
/// date order. The frontend only needs `labels` and `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHistory {
    pub range: TimeRange,
    pub dates: Vec<NaiveDate>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub summary: HistorySummary,
}

impl PortfolioHistory {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Zip the parallel vectors into per-date points.
    pub fn points(&self) -> Vec<PortfolioValuePoint> {
        self.dates
            .iter()
            .zip(&self.labels)
            .zip(&self.values)
            .map(|((date, label), value)| PortfolioValuePoint {
                date: *date,
                label: label.clone(),
                value: *value,
            })
            .collect()
    }
}

/// Headline numbers shown next to the chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Value on the first date of the window
    pub start_value: f64,

    /// Value on the last date of the window
    pub end_value: f64,

    /// end_value - start_value
    pub change: f64,

    /// (change / start_value) * 100, or 0 when the window starts at zero
    pub change_pct: f64,

    pub max_value: f64,
    pub min_value: f64,

    /// Percent change between consecutive points; one entry per step.
    /// A step from a non-positive value counts as 0.
    pub daily_returns: Vec<f64>,
}

impl HistorySummary {
    pub fn from_values(values: &[f64]) -> Self {
        let (Some(&start_value), Some(&end_value)) = (values.first(), values.last()) else {
            return Self::default();
        };
        let change = end_value - start_value;
        let change_pct = if start_value > 0.0 {
            change / start_value * 100.0
        } else {
            0.0
        };
        Self {
            start_value,
            end_value,
            change,
            change_pct,
            max_value: values.iter().copied().fold(f64::MIN, f64::max),
            min_value: values.iter().copied().fold(f64::MAX, f64::min),
            daily_returns: Self::daily_returns(values),
        }
    }

    fn daily_returns(values: &[f64]) -> Vec<f64> {
        values
            .windows(2)
            .map(|w| {
                if w[0] > 0.0 {
                    (w[1] - w[0]) / w[0] * 100.0
                } else {
                    0.0
                }
            })
            .collect()
    }
}

/// Where the chart is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    /// Nothing requested yet
    Idle,

    /// A computation for `range` is in flight
    Fetching { generation: u64, range: TimeRange },

    /// The latest computation produced a series
    Ready {
        generation: u64,
        history: PortfolioHistory,
    },

    /// The latest computation found no usable data; the UI shows a waiting state
    NoData { generation: u64, range: TimeRange },
}

impl ChartState {
    pub fn generation(&self) -> Option<u64> {
        match self {
            ChartState::Idle => None,
            ChartState::Fetching { generation, .. }
            | ChartState::Ready { generation, .. }
            | ChartState::NoData { generation, .. } => Some(*generation),
        }
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self, ChartState::Fetching { .. })
    }

    pub fn history(&self) -> Option<&PortfolioHistory> {
        match self {
            ChartState::Ready { history, .. } => Some(history),
            _ => None,
        }
    }
}

/// Result of a period selection on the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartUpdate {
    /// This computation was the latest; the state was updated to the given value.
    Applied(ChartState),

    /// A newer selection was made while this one was in flight; its result was dropped.
    Superseded { generation: u64 },
}

impl ChartUpdate {
    pub fn is_superseded(&self) -> bool {
        matches!(self, ChartUpdate::Superseded { .. })
    }
}
