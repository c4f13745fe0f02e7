//! PostgreSQL persistence for ratelens.
//!
//! Imported rate tables are upserted into `exchange_rates` keyed by
//! `(date, currency)`, and every import appends one row to `csv_uploads`.
//! Both writes share one transaction.
//!
//! - [`RateRepository`] - Storage contract used by the service
//! - [`PgRateStore`] - Pooled PostgreSQL implementation with embedded migrations
//! - [`ImportAudit`] - Audit row describing one import

#![doc(issue_tracker_base_url = "https://github.com/ratelens/ratelens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod audit;
mod error;
mod models;
mod pg;
mod repository;
mod schema;

#[cfg(any(test, feature = "memory"))]
mod memory;

pub use audit::{ImportAudit, MAX_SOURCE_LEN};
pub use error::{Result, StoreError};
pub use pg::{DEFAULT_POOL_SIZE, PgRateStore};
pub use repository::{RECENT_UPLOADS, RateRepository, StoreStats, StoredSpan, UploadSummary};

#[cfg(any(test, feature = "memory"))]
pub use memory::InMemoryRateStore;
