//! Per-series summary statistics.

use chrono::NaiveDate;
use ratelens_types::SeriesTable;
use serde::Serialize;

/// Why a requested series produced no statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The table has no column for the series.
    NotAvailable,
    /// The column holds no value.
    EmptyDataset,
    /// The first value is zero, or so close to it that percent change
    /// overflows.
    DivisionByZero,
}

impl FailureReason {
    /// Returns the human-readable reason.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotAvailable => "not available in data",
            Self::EmptyDataset => "empty dataset",
            Self::DivisionByZero => "division by zero",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStatistics {
    /// Series id.
    pub currency: String,
    /// Observations actually present, ascending by date.
    pub points: Vec<(NaiveDate, f64)>,
    /// First value.
    pub start: f64,
    /// Last value.
    pub end: f64,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// `(end - start) / start * 100`, rounded to two decimals.
    pub percent_change: f64,
}

impl SeriesStatistics {
    /// Computes statistics for one series of `table`.
    ///
    /// # Errors
    ///
    /// Returns the [`FailureReason`] when the series is missing, empty, or
    /// starts at a value that leaves percent change non-finite.
    pub fn compute(table: &SeriesTable, currency: &str) -> Result<Self, FailureReason> {
        let column = table.column(currency).ok_or(FailureReason::NotAvailable)?;
        let points: Vec<(NaiveDate, f64)> = column.iter().map(|(d, v)| (*d, *v)).collect();

        let (&(_, start), &(_, end)) = points
            .first()
            .zip(points.last())
            .ok_or(FailureReason::EmptyDataset)?;

        let change = (end - start) / start * 100.0;
        if !change.is_finite() {
            return Err(FailureReason::DivisionByZero);
        }

        let (min, max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, v)| {
                (lo.min(v), hi.max(v))
            });

        Ok(Self {
            currency: currency.to_string(),
            points,
            start,
            end,
            min,
            max,
            percent_change: round2(change),
        })
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the observation dates.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|(d, _)| *d)
    }

    /// Returns the observed values.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, v)| *v)
    }
}

/// Result of aggregating one requested series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesOutcome {
    /// Requested series id.
    pub currency: String,
    /// Statistics, or the reason they could not be computed.
    pub result: Result<SeriesStatistics, FailureReason>,
}

impl SeriesOutcome {
    /// Returns the `"EUR (not available in data)"` label of a failure.
    #[must_use]
    pub fn failure_label(&self) -> Option<String> {
        self.result
            .as_ref()
            .err()
            .map(|reason| format!("{} ({reason})", self.currency))
    }
}

/// Aggregates every requested series, in request order.
///
/// Duplicate ids are processed once per occurrence.
pub fn aggregate<I, S>(table: &SeriesTable, currencies: I) -> Vec<SeriesOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    currencies
        .into_iter()
        .map(|currency| {
            let currency = currency.as_ref();
            let result = SeriesStatistics::compute(table, currency);
            match &result {
                Ok(stats) => {
                    tracing::debug!(currency, points = stats.len(), "Aggregated series");
                }
                Err(reason) => tracing::debug!(currency, %reason, "Series skipped"),
            }
            SeriesOutcome {
                currency: currency.to_string(),
                result,
            }
        })
        .collect()
}

/// Rounds to two decimals on the exact binary value, ties to even.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
