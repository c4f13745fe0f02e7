//! Storage contract for imported rates.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use ratelens_types::SeriesTable;
use serde::Serialize;

use crate::{ImportAudit, Result};

/// Number of audit rows reported by [`RateRepository::stats`].
pub const RECENT_UPLOADS: usize = 5;

/// Earliest and latest stored dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoredSpan {
    /// Earliest stored date.
    pub start: Option<NaiveDate>,
    /// Latest stored date.
    pub end: Option<NaiveDate>,
}

/// Summary of one recorded import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    /// Source name.
    pub filename: String,
    /// Import time.
    pub upload_date: NaiveDateTime,
    /// Cells written.
    pub records_count: i64,
}

impl From<&ImportAudit> for UploadSummary {
    fn from(audit: &ImportAudit) -> Self {
        Self {
            filename: audit.source.clone(),
            upload_date: audit.imported_at,
            records_count: i64::try_from(audit.record_count).unwrap_or(i64::MAX),
        }
    }
}

/// Aggregate figures about the stored data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of stored `(date, currency)` rows.
    pub total_records: i64,
    /// Number of distinct currencies.
    pub unique_currencies: i64,
    /// Stored date span.
    pub date_range: StoredSpan,
    /// Most recent imports, newest first.
    pub recent_uploads: Vec<UploadSummary>,
}

/// Durable storage for imported rate tables.
#[async_trait]
pub trait RateRepository: Send + Sync {
    /// Upserts every cell of `table` keyed by `(date, currency)` and appends
    /// one audit row, atomically.
    ///
    /// Returns `Ok(None)` without writing anything when `table` is empty.
    async fn save_import(&self, source: &str, table: &SeriesTable) -> Result<Option<ImportAudit>>;

    /// Returns aggregate figures about the stored data.
    async fn stats(&self) -> Result<StoreStats>;
}
