//! Parsing of upstream time-series payloads.

use chrono::NaiveDate;
use ratelens_types::RateRecord;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur while parsing an upstream payload.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Body is not the expected JSON document.
    #[error("Malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload carries no `rates` field.
    #[error("Payload has no 'rates' field")]
    MissingRates,

    /// A date key could not be parsed.
    #[error("Invalid date key '{0}' in payload")]
    InvalidDate(String),
}

/// Time-series payload as served by the upstream source.
#[derive(Debug, Deserialize)]
struct TimeSeriesPayload {
    #[serde(default)]
    rates: Option<BTreeMap<String, BTreeMap<String, f64>>>,
}

/// Parses a time-series payload into long-format records.
///
/// The payload maps ISO dates to `currency -> rate` objects. Records come
/// back sorted by date, then currency. A payload with an empty `rates`
/// object yields no records.
///
/// # Errors
///
/// Returns an error if the body is not JSON, lacks the `rates` field, or
/// carries a date key that is not `YYYY-MM-DD`.
pub fn parse_rates(body: &[u8]) -> Result<Vec<RateRecord>, ParseError> {
    let payload: TimeSeriesPayload = serde_json::from_slice(body)?;
    let rates = payload.rates.ok_or(ParseError::MissingRates)?;

    let mut records = Vec::with_capacity(rates.values().map(BTreeMap::len).sum());
    for (day, quotes) in rates {
        let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d")
            .map_err(|_| ParseError::InvalidDate(day.clone()))?;
        records.extend(
            quotes
                .into_iter()
                .map(|(currency, rate)| RateRecord::new(date, currency, rate)),
        );
    }

    records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.currency.cmp(&b.currency)));
    Ok(records)
}

/// Parses the currency listing: a JSON object of `code -> name`.
///
/// # Errors
///
/// Returns an error if the body is not such an object.
pub fn parse_currencies(body: &[u8]) -> Result<BTreeMap<String, String>, ParseError> {
    Ok(serde_json::from_slice(body)?)
}
