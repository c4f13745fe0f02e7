//! Core types for the ratelens exchange-rate service.
//!
//! This crate provides the data model shared by every other ratelens crate:
//!
//! - [`RateRecord`] - A long-format `(date, currency, rate)` observation
//! - [`SeriesTable`] - Date-indexed, currency-columned rate table
//! - [`reshape`] - Schema checks, row parsing, filtering and pivoting
//! - [`Period`] - Resampling granularity
//! - [`DateRange`] - Date range with request window validation
//! - [`Currency`] - Currency code with display name

#![doc(issue_tracker_base_url = "https://github.com/ratelens/ratelens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod currency;
mod date_range;
mod error;
mod period;
mod record;
pub mod reshape;
mod table;

pub use currency::{BASE_CURRENCY, Currency};
pub use date_range::{DATE_FORMAT, DateRange, EARLIEST_DATE, parse_date};
pub use error::{DateRangeError, PeriodParseError, RatelensError, ReshapeError, Result};
pub use period::Period;
pub use record::{RateRecord, normalize_code};
pub use reshape::{ColumnIndex, RecordFilter, from_long_format, to_long_format};
pub use table::{Column, SeriesTable};
