//! Synthetic data for ratelens benchmarks.

use chrono::{Days, NaiveDate};
use ratelens_lib::RateRecord;
use std::fmt::Write;

/// Currencies used by the synthetic data sets.
pub const CURRENCIES: [&str; 8] = ["AUD", "CAD", "CHF", "EUR", "GBP", "JPY", "NZD", "SEK"];

/// First date of every synthetic series.
pub fn first_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}

/// Generates `days` consecutive daily observations for each of the first
/// `currencies` entries of [`CURRENCIES`].
///
/// Rates follow a deterministic saw-tooth so runs are comparable.
pub fn synthetic_records(currencies: usize, days: u64) -> Vec<RateRecord> {
    let start = first_date();
    let mut records = Vec::with_capacity(currencies * days as usize);
    for day in 0..days {
        let date = start + Days::new(day);
        for (i, code) in CURRENCIES.iter().take(currencies).enumerate() {
            let base = 0.5 + i as f64 * 0.25;
            let wobble = (day % 17) as f64 * 0.001;
            records.push(RateRecord::new(date, *code, base + wobble));
        }
    }
    records
}

/// Renders records as an upload file.
pub fn synthetic_csv(records: &[RateRecord]) -> String {
    let mut csv = String::from("Date,Currency,Rate\n");
    for record in records {
        let _ = writeln!(csv, "{},{},{}", record.date, record.currency, record.rate);
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_records() {
        let records = synthetic_records(3, 10);
        assert_eq!(records.len(), 30);
        assert_eq!(records[0].currency, "AUD");
        assert_eq!(records[29].date, first_date() + Days::new(9));
    }

    #[test]
    fn test_synthetic_csv() {
        let csv = synthetic_csv(&synthetic_records(1, 2));
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.starts_with("Date,Currency,Rate\n2020-01-01,AUD,0.5\n"));
    }
}
