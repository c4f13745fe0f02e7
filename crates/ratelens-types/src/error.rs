//! Error types for ratelens.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for ratelens operations.
pub type Result<T> = std::result::Result<T, RatelensError>;

/// Errors that can occur while importing, fetching and analyzing rates.
#[derive(Error, Debug)]
pub enum RatelensError {
    /// Long-format input could not be reshaped.
    #[error(transparent)]
    Reshape(#[from] ReshapeError),

    /// Invalid date range.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    /// Invalid resampling period.
    #[error(transparent)]
    Period(#[from] PeriodParseError),

    /// The request did not name any currency.
    #[error("At least one currency must be requested")]
    NoCurrencies,

    /// The upstream rate source is unreachable or returned a malformed payload.
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    /// Writing to durable storage failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while turning long-format rows into records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReshapeError {
    /// Required columns are absent from the input header.
    #[error("Input must contain columns: Date, Currency, Rate (missing: {})", .missing.join(", "))]
    Schema {
        /// Names of the missing columns.
        missing: Vec<&'static str>,
    },

    /// A date or numeric token could not be parsed.
    #[error("Invalid {column} value '{token}' on line {line}")]
    Parse {
        /// One-based line number of the offending record (header is line 1).
        line: u64,
        /// Column holding the bad token.
        column: &'static str,
        /// The token as read.
        token: String,
    },
}

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },

    /// Start date is not strictly before the end date.
    #[error("Start date must be before end date")]
    NotIncreasing {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },

    /// End date lies after today.
    #[error("End date cannot be in the future")]
    EndInFuture {
        /// The end date.
        end: NaiveDate,
    },

    /// Start date precedes the earliest date served by the rate source.
    #[error("Start date must be {earliest} or later")]
    BeforeEarliest {
        /// The start date.
        start: NaiveDate,
        /// Earliest supported date.
        earliest: NaiveDate,
    },

    /// A date token is not in `YYYY-MM-DD` form.
    #[error("Invalid date format: '{0}' (expected YYYY-MM-DD)")]
    InvalidFormat(String),
}

/// Error returned when parsing an invalid period string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid interval '{0}'. Must be one of: 1d, 1wk, 1mo")]
pub struct PeriodParseError(pub String);
