//! Analysis pipeline shared by the HTTP handlers and the command line.
//!
//! Uploaded rows are filtered and pivoted by [`prepare_upload`], then
//! [`analyze_table`] resamples the table and summarizes each currency.

use chrono::NaiveDate;
use ratelens_aggregate::{Summary, aggregate, resample};
use ratelens_format::Upload;
use ratelens_types::{DateRange, Period, RatelensError, RecordFilter, SeriesTable, normalize_code};

use crate::CurrencyResponse;

/// Message returned when resampling leaves no observation.
pub const EMPTY_AFTER_RESAMPLE: &str = "No data available after resampling";

/// Message returned when an upload holds no row matching the selection.
pub const EMPTY_UPLOAD: &str = "No data found in CSV for the specified criteria";

/// Subset of an upload to analyze. Unset fields default to the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSelection {
    /// Currencies to analyze, in response order.
    pub currencies: Option<Vec<String>>,
    /// First date to keep.
    pub start: Option<NaiveDate>,
    /// Last date to keep.
    pub end: Option<NaiveDate>,
}

impl UploadSelection {
    /// Sets the currencies from a comma-separated list. Blank entries are
    /// dropped and an all-blank list selects every currency.
    #[must_use]
    pub fn with_currency_list(mut self, list: &str) -> Self {
        let codes: Vec<String> = list
            .split(',')
            .map(normalize_code)
            .filter(|code| !code.is_empty())
            .collect();
        self.currencies = (!codes.is_empty()).then_some(codes);
        self
    }
}

/// An upload narrowed to the selection and pivoted.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedUpload {
    /// Currencies to report on, in response order.
    pub currencies: Vec<String>,
    /// Effective date window.
    pub range: DateRange,
    /// Filtered daily table.
    pub table: SeriesTable,
}

/// Applies `selection` to `upload` and pivots what remains.
///
/// Returns `Ok(None)` when the file has no rows or nothing survives the
/// filter.
///
/// # Errors
///
/// Returns [`RatelensError::DateRange`] when the effective start is after
/// the effective end.
pub fn prepare_upload(
    upload: Upload,
    selection: &UploadSelection,
) -> Result<Option<PreparedUpload>, RatelensError> {
    let Some(span) = upload.date_span() else {
        return Ok(None);
    };
    let currencies = selection
        .currencies
        .clone()
        .unwrap_or_else(|| upload.currencies());
    let range = DateRange::new(
        selection.start.unwrap_or(span.start),
        selection.end.unwrap_or(span.end),
    )?;

    let filter = RecordFilter::new()
        .with_range(range)
        .with_currencies(&currencies);
    let rows = upload.len();
    let table = upload.into_table(&filter);
    tracing::debug!(rows, cells = table.cell_count(), %range, "Upload filtered");

    if table.is_empty() {
        return Ok(None);
    }
    Ok(Some(PreparedUpload {
        currencies,
        range,
        table,
    }))
}

/// Resamples `table` to `period` and summarizes the requested currencies.
#[must_use]
pub fn analyze_table(table: &SeriesTable, currencies: &[String], period: Period) -> CurrencyResponse {
    let resampled = resample(table, period);
    if resampled.is_empty() {
        return CurrencyResponse::failure(
            EMPTY_AFTER_RESAMPLE,
            vec!["Data is empty after applying the selected interval".to_string()],
        );
    }

    let summary = Summary::from_outcomes(aggregate(&resampled, currencies));
    tracing::info!(
        status = %summary.status(),
        succeeded = summary.successes.len(),
        failed = summary.failures.len(),
        %period,
        "Analysis complete"
    );
    summary.into()
}
