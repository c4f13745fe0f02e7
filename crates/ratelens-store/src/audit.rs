//! Import audit records.

use chrono::{NaiveDate, NaiveDateTime};
use ratelens_types::SeriesTable;
use serde::Serialize;

/// Longest source name the audit table accepts.
pub const MAX_SOURCE_LEN: usize = 255;

/// One row of the append-only import log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportAudit {
    /// Name of the imported file or source.
    pub source: String,
    /// When the import was committed.
    pub imported_at: NaiveDateTime,
    /// Number of cells written.
    pub record_count: usize,
    /// Earliest imported date.
    pub start: NaiveDate,
    /// Latest imported date.
    pub end: NaiveDate,
}

impl ImportAudit {
    /// Describes the import of `table`, or `None` when it holds no cell.
    ///
    /// Source names longer than [`MAX_SOURCE_LEN`] characters are truncated.
    #[must_use]
    pub fn from_table(source: &str, table: &SeriesTable, imported_at: NaiveDateTime) -> Option<Self> {
        let (start, end) = table.date_span()?;
        Some(Self {
            source: source.chars().take(MAX_SOURCE_LEN).collect(),
            imported_at,
            record_count: table.cell_count(),
            start,
            end,
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

    fn now() -> NaiveDateTime {
        date(10).and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_from_table() {
        let table = SeriesTable::from_records(vec![
            RateRecord::new(date(3), "EUR", 0.91),
            RateRecord::new(date(1), "GBP", 0.78),
            RateRecord::new(date(2), "EUR", 0.90),
        ]);

        let audit = ImportAudit::from_table("rates.csv", &table, now()).unwrap();

        assert_eq!(audit.source, "rates.csv");
        assert_eq!(audit.record_count, 3);
        assert_eq!((audit.start, audit.end), (date(1), date(3)));
    }

    #[test]
    fn test_empty_table_has_no_audit() {
        assert!(ImportAudit::from_table("x.csv", &SeriesTable::new(), now()).is_none());
    }

    #[test]
    fn test_long_source_truncated() {
        let table = SeriesTable::from_records(vec![RateRecord::new(date(1), "EUR", 0.9)]);
        let name = "a".repeat(300);
        let audit = ImportAudit::from_table(&name, &table, now()).unwrap();
        assert_eq!(audit.source.len(), MAX_SOURCE_LEN);
    }
}
