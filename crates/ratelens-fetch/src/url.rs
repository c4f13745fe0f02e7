//! Upstream rate source URL construction.

use ratelens_types::DateRange;

/// Default base URL of the upstream rate source.
pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

/// Builds the URL of the time-series endpoint for a date range.
///
/// URL format: `{base}/{START}..{END}` with ISO dates.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use ratelens_fetch::url::timeseries_url;
/// use ratelens_types::DateRange;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
/// )
/// .unwrap();
/// let url = timeseries_url("https://api.frankfurter.app", &range);
/// assert_eq!(url, "https://api.frankfurter.app/2024-01-01..2024-01-31");
/// ```
#[must_use]
pub fn timeseries_url(base: &str, range: &DateRange) -> String {
    format!(
        "{}/{}..{}",
        base.trim_end_matches('/'),
        range.start.format("%Y-%m-%d"),
        range.end.format("%Y-%m-%d")
    )
}

/// Builds the URL of the currency listing endpoint.
#[must_use]
pub fn currencies_url(base: &str) -> String {
    format!("{}/currencies", base.trim_end_matches('/'))
}

/// Joins currency codes into the comma-separated `to` parameter.
#[must_use]
pub fn symbols_param<S: AsRef<str>>(currencies: &[S]) -> String {
    currencies
        .iter()
        .map(|c| c.as_ref().trim().to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(",")
}
