//! CSV reading and writing for ratelens.
//!
//! This crate reads uploaded rate files and writes rate data:
//!
//! - [`read_upload`] - Async `Date, Currency, Rate` CSV reader
//! - [`CsvFormatter`] - Long-format CSV, quoted where needed
//! - [`NdjsonFormatter`] - Newline-delimited JSON
//! - [`template_csv`] - The downloadable CSV template

#![doc(issue_tracker_base_url = "https://github.com/ratelens/ratelens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod template;
mod upload;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter};
pub use json::NdjsonFormatter;
pub use template::{TEMPLATE_CONTENT_TYPE, TEMPLATE_FILENAME, template_csv, template_records};
pub use upload::{Upload, read_upload, read_upload_bytes};
