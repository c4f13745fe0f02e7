//! Resampling and series statistics for ratelens.
//!
//! This crate turns a [`SeriesTable`](ratelens_types::SeriesTable) into
//! per-currency results:
//!
//! - [`Resampler`] - Last-value resampling to weekly or monthly periods
//! - [`SeriesStatistics`] - First/last/min/max and percent change
//! - [`Summary`] - Success and failure partition with overall status

#![doc(issue_tracker_base_url = "https://github.com/ratelens/ratelens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod resample;
mod stats;
mod summary;

pub use resample::{Resampler, resample};
pub use stats::{FailureReason, SeriesOutcome, SeriesStatistics, aggregate};
pub use summary::{AnalysisStatus, SeriesFailure, Summary};
