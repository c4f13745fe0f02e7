//! Downloadable CSV template.

use chrono::NaiveDate;
use ratelens_types::RateRecord;

use crate::{CsvFormatter, FormatError, Formatter};

/// File name offered for the template download.
pub const TEMPLATE_FILENAME: &str = "exchange_rates_template.csv";

/// MIME type of the template.
pub const TEMPLATE_CONTENT_TYPE: &str = "text/csv";

const SAMPLE_ROWS: [(u32, &str, f64); 6] = [
    (1, "EUR", 0.92),
    (1, "GBP", 0.78),
    (1, "JPY", 140.50),
    (2, "EUR", 0.93),
    (2, "GBP", 0.79),
    (2, "JPY", 141.20),
];

/// Returns the sample records shown in the template.
#[must_use]
pub fn template_records() -> Vec<RateRecord> {
    SAMPLE_ROWS
        .iter()
        .filter_map(|&(day, currency, rate)| {
            NaiveDate::from_ymd_opt(2024, 1, day).map(|date| RateRecord::new(date, currency, rate))
        })
        .collect()
}

/// Renders the template as CSV text.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub async fn template_csv() -> Result<String, FormatError> {
    let mut out = Vec::new();
    CsvFormatter::new()
        .write_records(&template_records(), &mut out)
        .await?;
    String::from_utf8(out).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_upload_bytes;

    #[tokio::test]
    async fn test_template_rows() {
        let csv = template_csv().await.unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Date,Currency,Rate");
        assert_eq!(lines[1], "2024-01-01,EUR,0.92");
        assert_eq!(lines[3], "2024-01-01,JPY,140.5");
    }

    #[tokio::test]
    async fn test_template_reads_back() {
        let csv = template_csv().await.unwrap();
        let upload = read_upload_bytes(csv.as_bytes()).await.unwrap();

        assert_eq!(upload.records(), template_records().as_slice());
        assert_eq!(upload.currencies(), vec!["EUR", "GBP", "JPY"]);
    }
}
