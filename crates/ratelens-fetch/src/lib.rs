//! HTTP client for the upstream rate source of ratelens.
//!
//! This crate provides the upstream side of the service:
//!
//! - [`url::timeseries_url`] - Constructs time-series URLs
//! - [`RatesClient`] - HTTP client with bounded timeouts
//! - [`parse::parse_rates`] - Time-series payload parsing

#![doc(issue_tracker_base_url = "https://github.com/ratelens/ratelens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
pub mod parse;
pub mod url;

pub use client::{ClientConfig, FetchError, RatesClient};
pub use parse::{ParseError, parse_currencies, parse_rates};
