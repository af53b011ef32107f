use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Look-back window selectable on the performance chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "1Y")]
    OneYear,
}

/// Label density tier for the chart's date axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelBucket {
    Daily,
    Coarse,
    Monthly,
}

impl LabelBucket {
    /// Pick the bucket for a window of `target_days`.
    pub fn for_target_days(target_days: usize) -> Self {
        match target_days {
            0..=30 => LabelBucket::Daily,
            31..=90 => LabelBucket::Coarse,
            _ => LabelBucket::Monthly,
        }
    }

    /// Roughly how many labels the axis should carry.
    pub fn target_label_count(&self) -> usize {
        match self {
            LabelBucket::Daily => 6,
            LabelBucket::Coarse => 8,
            LabelBucket::Monthly => 12,
        }
    }

    /// `chrono` format string: "Jan 5" for daily/coarse, "Jan 25" (month + year) for monthly.
    pub fn date_format(&self) -> &'static str {
        match self {
            LabelBucket::Daily | LabelBucket::Coarse => "%b %-d",
            LabelBucket::Monthly => "%b %y",
        }
    }
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::OneMonth, TimeRange::ThreeMonths, TimeRange::OneYear];

    /// Code shown on the chart's range selector.
    pub fn code(&self) -> &'static str {
        match self {
            TimeRange::OneMonth => "1M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::OneYear => "1Y",
        }
    }

    /// Maximum number of points on the canonical date axis.
    pub fn target_days(&self) -> usize {
        match self {
            TimeRange::OneMonth => 30,
            TimeRange::ThreeMonths => 90,
            TimeRange::OneYear => 365,
        }
    }

    /// Period string understood by the market-data backend.
    pub fn provider_period(&self) -> &'static str {
        match self {
            TimeRange::OneMonth => "1mo",
            TimeRange::ThreeMonths => "3mo",
            TimeRange::OneYear => "1y",
        }
    }

    pub fn label_bucket(&self) -> LabelBucket {
        LabelBucket::for_target_days(self.target_days())
    }

    /// First calendar date of the provider window ending at `today`.
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        let months = match self {
            TimeRange::OneMonth => 1,
            TimeRange::ThreeMonths => 3,
            TimeRange::OneYear => 12,
        };
        today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for TimeRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1M" | "1MO" => Ok(TimeRange::OneMonth),
            "3M" | "3MO" => Ok(TimeRange::ThreeMonths),
            "1Y" => Ok(TimeRange::OneYear),
            _ => Err(CoreError::InvalidTimeRange(s.to_string())),
        }
    }
}
