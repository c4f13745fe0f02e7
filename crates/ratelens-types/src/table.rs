//! Date-indexed, currency-columned rate table.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use crate::RateRecord;

/// Observations of one series, keyed by date.
pub type Column = BTreeMap<NaiveDate, f64>;

/// Sparse wide-format table of rates.
///
/// Stored column-wise: each series id maps to its own ordered `(date, value)`
/// sequence. A missing observation is an absent key, never a zero. Every
/// date reported by [`SeriesTable::dates`] carries at least one value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesTable {
    columns: BTreeMap<String, Column>,
}

impl SeriesTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: BTreeMap::new(),
        }
    }

    /// Builds a table from long-format records.
    ///
    /// When a `(date, currency)` pair repeats, the record appearing later in
    /// the input wins.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RateRecord>,
    {
        let mut table = Self::new();
        for record in records {
            table.insert(record.date, record.currency, record.rate);
        }
        table
    }

    /// Sets the value of a cell, replacing any previous value.
    pub fn insert(&mut self, date: NaiveDate, series_id: impl Into<String>, value: f64) {
        self.columns
            .entry(series_id.into())
            .or_default()
            .insert(date, value);
    }

    /// Returns long-format records ordered by date, then series id.
    #[must_use]
    pub fn to_records(&self) -> Vec<RateRecord> {
        let mut records: Vec<RateRecord> = self
            .columns
            .iter()
            .flat_map(|(id, column)| {
                column.iter().map(|(date, rate)| RateRecord {
                    date: *date,
                    currency: id.clone(),
                    rate: *rate,
                })
            })
            .collect();
        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.currency.cmp(&b.currency)));
        records
    }

    /// Returns the date axis: strictly ascending, deduplicated.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        let dates: BTreeSet<NaiveDate> = self
            .columns
            .values()
            .flat_map(|column| column.keys().copied())
            .collect();
        dates.into_iter().collect()
    }

    /// Returns the series ids in ascending order.
    pub fn series_ids(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Returns the observations of one series.
    #[must_use]
    pub fn column(&self, series_id: &str) -> Option<&Column> {
        self.columns.get(series_id)
    }

    /// Iterates over all columns.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(id, column)| (id.as_str(), column))
    }

    /// Returns the value of a single cell.
    #[must_use]
    pub fn get(&self, date: NaiveDate, series_id: &str) -> Option<f64> {
        self.columns.get(series_id)?.get(&date).copied()
    }

    /// Returns true if the table has a column for the series id.
    #[must_use]
    pub fn contains_series(&self, series_id: &str) -> bool {
        self.columns.contains_key(series_id)
    }

    /// Returns true if the table holds no observation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.values().all(BTreeMap::is_empty)
    }

    /// Returns the number of distinct dates.
    #[must_use]
    pub fn date_count(&self) -> usize {
        self.dates().len()
    }

    /// Returns the number of non-missing cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.columns.values().map(BTreeMap::len).sum()
    }

    /// Returns the earliest and latest dates holding a value.
    #[must_use]
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self
            .columns
            .values()
            .filter_map(|column| column.keys().next())
            .min()?;
        let last = self
            .columns
            .values()
            .filter_map(|column| column.keys().next_back())
            .max()?;
        Some((*first, *last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_later_record_wins() {
        let table = SeriesTable::from_records(vec![
            RateRecord::new(date(1), "EUR", 0.90),
            RateRecord::new(date(1), "EUR", 0.95),
        ]);

        assert_eq!(table.get(date(1), "EUR"), Some(0.95));
        assert_eq!(table.cell_count(), 1);
    }

    #[test]
    fn test_dates_sorted_and_deduplicated() {
        let table = SeriesTable::from_records(vec![
            RateRecord::new(date(3), "EUR", 0.91),
            RateRecord::new(date(1), "GBP", 0.78),
            RateRecord::new(date(1), "EUR", 0.90),
            RateRecord::new(date(2), "GBP", 0.79),
        ]);

        assert_eq!(table.dates(), vec![date(1), date(2), date(3)]);
        assert_eq!(table.series_ids().collect::<Vec<_>>(), vec!["EUR", "GBP"]);
        assert_eq!(table.date_span(), Some((date(1), date(3))));
    }

    #[test]
    fn test_missing_cell_is_absent() {
        let table = SeriesTable::from_records(vec![
            RateRecord::new(date(1), "EUR", 0.90),
            RateRecord::new(date(2), "GBP", 0.79),
        ]);

        assert_eq!(table.get(date(2), "EUR"), None);
        assert!(table.contains_series("GBP"));
        assert!(!table.contains_series("JPY"));
    }

    #[test]
    fn test_to_records_order() {
        let table = SeriesTable::from_records(vec![
            RateRecord::new(date(2), "GBP", 0.79),
            RateRecord::new(date(2), "EUR", 0.91),
            RateRecord::new(date(1), "GBP", 0.78),
        ]);

        let records = table.to_records();
        let keys: Vec<_> = records
            .iter()
            .map(|r| (r.date, r.currency.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![(date(1), "GBP"), (date(2), "EUR"), (date(2), "GBP")]
        );
    }

    #[test]
    fn test_empty_table() {
        let table = SeriesTable::new();
        assert!(table.is_empty());
        assert_eq!(table.date_count(), 0);
        assert_eq!(table.date_span(), None);
    }
}
