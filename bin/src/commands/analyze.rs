//! Analyze command implementation.
//!
//! Runs the upload pipeline on a local CSV file: filter, pivot, resample and
//! summarize, then print the report or the resampled rates.

use crate::display::{Format, open_output, write_rates, write_report};
use anyhow::{Context, Result};
use ratelens_lib::{
    CsvFormatter, CurrencyResponse, EMPTY_UPLOAD, NdjsonFormatter, Period, PreparedUpload,
    SeriesTable, UploadSelection, analyze_table, parse_date, prepare_upload, read_upload,
    resample,
};
use std::path::Path;

/// Analyze a `Date, Currency, Rate` CSV file.
pub(crate) async fn analyze(
    file: &Path,
    currencies: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    interval: &str,
    format: Format,
    output: Option<&Path>,
) -> Result<()> {
    let period: Period = interval.parse()?;
    let mut selection = UploadSelection {
        start: start
            .map(parse_date)
            .transpose()
            .context("Invalid start date")?,
        end: end.map(parse_date).transpose().context("Invalid end date")?,
        ..UploadSelection::default()
    };
    if let Some(list) = currencies {
        selection = selection.with_currency_list(list);
    }

    let input = tokio::fs::File::open(file)
        .await
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let upload = read_upload(input)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    tracing::info!(file = %file.display(), rows = upload.len(), "CSV loaded");

    let prepared = prepare_upload(upload, &selection)?;
    let writer = open_output(output)?;

    match (format, prepared) {
        (Format::Json, Some(prepared)) => {
            let response = analyze_table(&prepared.table, &prepared.currencies, period);
            write_report(&response, writer)
        }
        (Format::Json, None) => {
            let response = CurrencyResponse::failure(
                EMPTY_UPLOAD,
                vec!["Failed to process CSV data".to_string()],
            );
            write_report(&response, writer)
        }
        (Format::Csv, prepared) => {
            write_rates(&resampled(prepared, period), &CsvFormatter::new(), writer).await
        }
        (Format::Ndjson, prepared) => {
            write_rates(&resampled(prepared, period), &NdjsonFormatter::new(), writer).await
        }
    }
}

fn resampled(prepared: Option<PreparedUpload>, period: Period) -> SeriesTable {
    match prepared {
        Some(prepared) => resample(&prepared.table, period),
        None => {
            tracing::warn!("{EMPTY_UPLOAD}");
            SeriesTable::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "Date,Currency,Rate\n\
                       2024-01-01,EUR,0.90\n\
                       2024-01-03,EUR,0.91\n\
                       2024-01-10,EUR,0.93\n\
                       2024-01-10,GBP,0.79\n";

    fn input() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_analyze_report() {
        let input = input();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("report.json");

        analyze(input.path(), Some("EUR,JPY"), None, None, "1d", Format::Json, Some(output.as_path()))
            .await
            .unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(report["status"], "partial");
        assert_eq!(report["data"][0]["percentage_change"], 3.33);
        assert_eq!(report["errors"][0], "JPY (not available in data)");
    }

    #[tokio::test]
    async fn test_analyze_weekly_csv() {
        let input = input();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("weekly.csv");

        analyze(input.path(), None, None, None, "1wk", Format::Csv, Some(output.as_path()))
            .await
            .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![
                "Date,Currency,Rate",
                "2024-01-07,EUR,0.91",
                "2024-01-14,EUR,0.93",
                "2024-01-14,GBP,0.79",
            ]
        );
    }

    #[tokio::test]
    async fn test_analyze_monthly_ndjson() {
        let input = input();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("monthly.ndjson");

        analyze(input.path(), Some("GBP"), None, None, "1mo", Format::Ndjson, Some(output.as_path()))
            .await
            .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![r#"{"date":"2024-01-31","currency":"GBP","rate":0.79}"#]
        );
    }

    #[tokio::test]
    async fn test_analyze_csv_nothing_selected() {
        let input = input();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("empty.csv");

        analyze(input.path(), Some("JPY"), None, None, "1d", Format::Csv, Some(output.as_path()))
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "Date,Currency,Rate\n");
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_interval() {
        let input = input();
        let result = analyze(input.path(), None, None, None, "1y", Format::Json, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_analyze_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let err = analyze(&missing, None, None, None, "1d", Format::Json, None)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to open"));
    }
}
