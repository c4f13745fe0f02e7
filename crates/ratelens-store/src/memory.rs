//! In-process rate store.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use ratelens_types::SeriesTable;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use crate::{
    ImportAudit, RECENT_UPLOADS, RateRepository, Result, StoreStats, StoredSpan, UploadSummary,
};

#[derive(Debug, Default)]
struct State {
    rates: BTreeMap<(NaiveDate, String), f64>,
    uploads: Vec<ImportAudit>,
}

/// Rate store kept in memory, with the same upsert and audit semantics as
/// the PostgreSQL store.
#[derive(Debug, Default)]
pub struct InMemoryRateStore {
    state: RwLock<State>,
}

impl InMemoryRateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored rate for a `(date, currency)` key.
    pub async fn rate(&self, date: NaiveDate, currency: &str) -> Option<f64> {
        self.state
            .read()
            .await
            .rates
            .get(&(date, currency.to_string()))
            .copied()
    }

    /// Returns every audit row, oldest first.
    pub async fn uploads(&self) -> Vec<ImportAudit> {
        self.state.read().await.uploads.clone()
    }
}

#[async_trait]
impl RateRepository for InMemoryRateStore {
    async fn save_import(&self, source: &str, table: &SeriesTable) -> Result<Option<ImportAudit>> {
        let Some(audit) = ImportAudit::from_table(source, table, Utc::now().naive_utc()) else {
            return Ok(None);
        };

        let mut state = self.state.write().await;
        for record in table.to_records() {
            state.rates.insert((record.date, record.currency), record.rate);
        }
        state.uploads.push(audit.clone());
        Ok(Some(audit))
    }

    async fn stats(&self) -> Result<StoreStats> {
        let state = self.state.read().await;
        let currencies: BTreeSet<&str> = state.rates.keys().map(|(_, c)| c.as_str()).collect();
        let start = state.rates.keys().map(|(d, _)| *d).min();
        let end = state.rates.keys().map(|(d, _)| *d).max();

        Ok(StoreStats {
            total_records: i64::try_from(state.rates.len()).unwrap_or(i64::MAX),
            unique_currencies: i64::try_from(currencies.len()).unwrap_or(i64::MAX),
            date_range: StoredSpan { start, end },
            recent_uploads: state
                .uploads
                .iter()
                .rev()
                .take(RECENT_UPLOADS)
                .map(UploadSummary::from)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratelens_types::RateRecord;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn table(rows: &[(u32, &str, f64)]) -> SeriesTable {
        SeriesTable::from_records(rows.iter().map(|(d, c, r)| RateRecord::new(date(*d), c, *r)))
    }

    #[tokio::test]
    async fn test_upsert_overwrites_rate() {
        let store = InMemoryRateStore::new();

        store
            .save_import("first.csv", &table(&[(1, "EUR", 0.90), (1, "GBP", 0.78)]))
            .await
            .unwrap();
        store
            .save_import("second.csv", &table(&[(1, "EUR", 0.95)]))
            .await
            .unwrap();

        assert_eq!(store.rate(date(1), "EUR").await, Some(0.95));
        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_records, 2);
        assert_eq!(stats.unique_currencies, 2);
    }

    #[tokio::test]
    async fn test_audit_per_import() {
        let store = InMemoryRateStore::new();
        let audit = store
            .save_import("rates.csv", &table(&[(2, "EUR", 0.9), (4, "EUR", 0.91)]))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(audit.record_count, 2);
        assert_eq!((audit.start, audit.end), (date(2), date(4)));
        assert_eq!(store.uploads().await, vec![audit]);
    }

    #[tokio::test]
    async fn test_empty_import_writes_nothing() {
        let store = InMemoryRateStore::new();
        let audit = store.save_import("empty.csv", &SeriesTable::new()).await.unwrap();

        assert!(audit.is_none());
        assert!(store.uploads().await.is_empty());
        assert_eq!(store.stats().await.unwrap(), StoreStats::default());
    }

    #[tokio::test]
    async fn test_recent_uploads_newest_first() {
        let store = InMemoryRateStore::new();
        for i in 1..=7 {
            store
                .save_import(&format!("upload-{i}.csv"), &table(&[(i, "EUR", 0.9)]))
                .await
                .unwrap();
        }

        let stats = store.stats().await.unwrap();
        let names: Vec<_> = stats.recent_uploads.iter().map(|u| u.filename.as_str()).collect();

        assert_eq!(names.len(), RECENT_UPLOADS);
        assert_eq!(names[0], "upload-7.csv");
        assert_eq!(stats.date_range, StoredSpan { start: Some(date(1)), end: Some(date(7)) });
    }
}
