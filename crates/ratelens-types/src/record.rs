//! Long-format rate observations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single `(date, currency, rate)` observation.
///
/// Rates are quoted as units of `currency` per one unit of the pivot base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    /// Observation date.
    pub date: NaiveDate,
    /// Currency code identifying the series.
    pub currency: String,
    /// Observed rate.
    pub rate: f64,
}

impl RateRecord {
    /// Creates a new record, normalizing the currency code.
    #[must_use]
    pub fn new(date: NaiveDate, currency: impl AsRef<str>, rate: f64) -> Self {
        Self {
            date,
            currency: normalize_code(currency.as_ref()),
            rate,
        }
    }
}

/// Normalizes a currency code: trims whitespace and upper-cases ASCII letters.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_normalizes_code() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let record = RateRecord::new(date, " eur ", 0.9);
        assert_eq!(record.currency, "EUR");
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("gbp"), "GBP");
        assert_eq!(normalize_code("\tJPY\n"), "JPY");
        assert_eq!(normalize_code(""), "");
    }
}
