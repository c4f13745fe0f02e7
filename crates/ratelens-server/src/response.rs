//! Wire shapes of analysis responses.

use ratelens_aggregate::{AnalysisStatus, SeriesStatistics, Summary};
use ratelens_types::DATE_FORMAT;
use serde::{Deserialize, Serialize};

/// Statistics of one currency as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyData {
    /// Currency code.
    pub currency: String,
    /// Observation dates, `YYYY-MM-DD`.
    pub dates: Vec<String>,
    /// Observed rates, aligned with `dates`.
    pub rates: Vec<f64>,
    /// First rate.
    pub start_rate: f64,
    /// Last rate.
    pub end_rate: f64,
    /// Percent change from first to last rate.
    pub percentage_change: f64,
    /// Minimum rate.
    pub min_rate: f64,
    /// Maximum rate.
    pub max_rate: f64,
}

impl From<SeriesStatistics> for CurrencyData {
    fn from(stats: SeriesStatistics) -> Self {
        let (dates, rates) = stats
            .points
            .iter()
            .map(|(date, rate)| (date.format(DATE_FORMAT).to_string(), *rate))
            .unzip();
        Self {
            currency: stats.currency,
            dates,
            rates,
            start_rate: stats.start,
            end_rate: stats.end,
            percentage_change: stats.percent_change,
            min_rate: stats.min,
            max_rate: stats.max,
        }
    }
}

/// Body of `/exchange-rates` and `/analyze-csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyResponse {
    /// One entry per successful currency, in request order.
    pub data: Vec<CurrencyData>,
    /// Overall outcome.
    pub status: AnalysisStatus,
    /// Human-readable summary.
    pub message: Option<String>,
    /// Failure labels; `null` when nothing failed.
    pub errors: Option<Vec<String>>,
}

impl CurrencyResponse {
    /// Builds an `error` response carrying no data.
    #[must_use]
    pub fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            data: Vec::new(),
            status: AnalysisStatus::Error,
            message: Some(message.into()),
            errors: (!errors.is_empty()).then_some(errors),
        }
    }
}

impl From<Summary> for CurrencyResponse {
    fn from(summary: Summary) -> Self {
        let status = summary.status();
        let message = Some(summary.message());
        let labels = summary.error_labels();
        Self {
            data: summary.successes.into_iter().map(CurrencyData::from).collect(),
            status,
            message,
            errors: (!labels.is_empty()).then_some(labels),
        }
    }
}
