//! Folding per-series outcomes into one analysis result.

use ratelens_types::{Period, SeriesTable};
use serde::{Deserialize, Serialize};

use crate::{FailureReason, SeriesOutcome, SeriesStatistics, aggregate, resample};

/// Overall status of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    /// Every requested series succeeded.
    Success,
    /// Some requested series succeeded.
    Partial,
    /// No requested series succeeded.
    Error,
}

impl AnalysisStatus {
    /// Returns the status as its wire token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested series that produced no statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesFailure {
    /// Requested series id.
    pub currency: String,
    /// Why it failed.
    pub reason: FailureReason,
}

impl std::fmt::Display for SeriesFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.currency, self.reason)
    }
}

/// Successes and failures of one analysis, in request order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    /// Series with statistics.
    pub successes: Vec<SeriesStatistics>,
    /// Series without statistics.
    pub failures: Vec<SeriesFailure>,
}

impl Summary {
    /// Partitions outcomes into successes and failures.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = SeriesOutcome>,
    {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome.result {
                Ok(stats) => summary.successes.push(stats),
                Err(reason) => summary.failures.push(SeriesFailure {
                    currency: outcome.currency,
                    reason,
                }),
            }
        }
        summary
    }

    /// Resamples `table` to `period` and aggregates the requested series.
    pub fn analyze<I, S>(table: &SeriesTable, currencies: I, period: Period) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resampled = resample(table, period);
        Self::from_outcomes(aggregate(&resampled, currencies))
    }

    /// Returns the number of series requested.
    #[must_use]
    pub fn requested(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Returns the overall status.
    #[must_use]
    pub fn status(&self) -> AnalysisStatus {
        match (self.successes.is_empty(), self.failures.is_empty()) {
            (true, _) => AnalysisStatus::Error,
            (false, true) => AnalysisStatus::Success,
            (false, false) => AnalysisStatus::Partial,
        }
    }

    /// Returns the human-readable outcome message.
    #[must_use]
    pub fn message(&self) -> String {
        if self.successes.is_empty() {
            "No data found for any of the specified currencies".to_string()
        } else {
            format!(
                "Successfully retrieved data for {} out of {} currencies",
                self.successes.len(),
                self.requested()
            )
        }
    }

    /// Returns one label per failure, e.g. `"EUR (not available in data)"`.
    #[must_use]
    pub fn error_labels(&self) -> Vec<String> {
        self.failures.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratelens_types::RateRecord;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn sample() -> SeriesTable {
        SeriesTable::from_records(vec![
            RateRecord::new(date(1, 1), "EUR", 0.90),
            RateRecord::new(date(1, 2), "EUR", 0.92),
            RateRecord::new(date(1, 1), "ZZZ", 0.0),
        ])
    }

    #[test]
    fn test_all_success() {
        let summary = Summary::analyze(&sample(), ["EUR"], Period::Daily);

        assert_eq!(summary.status(), AnalysisStatus::Success);
        assert_eq!(summary.message(), "Successfully retrieved data for 1 out of 1 currencies");
        assert!(summary.error_labels().is_empty());
    }

    #[test]
    fn test_partial() {
        let summary = Summary::analyze(&sample(), ["EUR", "XYZ"], Period::Daily);

        assert_eq!(summary.status(), AnalysisStatus::Partial);
        assert_eq!(summary.successes.len(), 1);
        assert_eq!(summary.error_labels(), vec!["XYZ (not available in data)"]);
        assert_eq!(summary.message(), "Successfully retrieved data for 1 out of 2 currencies");
    }

    #[test]
    fn test_all_failed() {
        let summary = Summary::analyze(&sample(), ["ZZZ", "XYZ"], Period::Daily);

        assert_eq!(summary.status(), AnalysisStatus::Error);
        assert_eq!(
            summary.error_labels(),
            vec!["ZZZ (division by zero)", "XYZ (not available in data)"]
        );
        assert_eq!(summary.message(), "No data found for any of the specified currencies");
    }

    #[test]
    fn test_nothing_requested_is_error() {
        let summary = Summary::analyze::<_, &str>(&sample(), [], Period::Daily);
        assert_eq!(summary.status(), AnalysisStatus::Error);
    }

    #[test]
    fn test_analyze_resamples_first() {
        let summary = Summary::analyze(&sample(), ["EUR"], Period::Monthly);
        let stats = &summary.successes[0];

        assert_eq!(stats.points, vec![(date(1, 31), 0.92)]);
    }

    #[test]
    fn test_status_tokens() {
        assert_eq!(AnalysisStatus::Partial.to_string(), "partial");
        assert_eq!(
            serde_json::to_string(&AnalysisStatus::Success).ok().as_deref(),
            Some("\"success\"")
        );
    }
}
