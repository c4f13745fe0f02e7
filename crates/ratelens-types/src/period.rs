//! Resampling period definitions.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::PeriodParseError;

/// Resampling granularity.
///
/// Weekly partitions run Monday to Sunday and are represented by their
/// Sunday. Monthly partitions are represented by the last day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Period {
    /// One observation per day (no resampling).
    #[default]
    #[serde(rename = "1d")]
    Daily,
    /// Last observation of each Monday-to-Sunday week.
    #[serde(rename = "1wk")]
    Weekly,
    /// Last observation of each calendar month.
    #[serde(rename = "1mo")]
    Monthly,
}

impl Period {
    /// Returns the representative date of the partition containing `date`.
    #[must_use]
    pub fn period_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => date,
            Self::Weekly => week_end(date),
            Self::Monthly => month_end(date),
        }
    }

    /// Returns true if this is the identity period.
    #[must_use]
    pub const fn is_daily(&self) -> bool {
        matches!(self, Self::Daily)
    }

    /// Returns the period as its wire token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "1d",
            Self::Weekly => "1wk",
            Self::Monthly => "1mo",
        }
    }

    /// Returns all available periods.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Daily, Self::Weekly, Self::Monthly]
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1d" | "d" | "day" | "daily" => Ok(Self::Daily),
            "1wk" | "1w" | "w" | "week" | "weekly" => Ok(Self::Weekly),
            "1mo" | "1m" | "m" | "month" | "monthly" => Ok(Self::Monthly),
            _ => Err(PeriodParseError(s.to_string())),
        }
    }
}

/// Sunday closing the week that contains `date`, or `date` itself when that
/// Sunday is past the last representable day.
fn week_end(date: NaiveDate) -> NaiveDate {
    let days_left = 6 - date.weekday().num_days_from_monday();
    date.checked_add_days(Days::new(u64::from(days_left))).unwrap_or(date)
}

/// Last calendar day of the month that contains `date`.
fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}
