//! Conversion between long-format rows and [`SeriesTable`].
//!
//! Rows are validated against the `Date`, `Currency`, `Rate` schema, parsed
//! into [`RateRecord`]s, filtered, and only then pivoted.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;

use crate::{DateRange, RateRecord, ReshapeError, SeriesTable, normalize_code};

/// Header of the date column.
pub const DATE_COLUMN: &str = "Date";
/// Header of the currency column.
pub const CURRENCY_COLUMN: &str = "Currency";
/// Header of the rate column.
pub const RATE_COLUMN: &str = "Rate";
/// Required columns in canonical order.
pub const REQUIRED_COLUMNS: [&str; 3] = [DATE_COLUMN, CURRENCY_COLUMN, RATE_COLUMN];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    date: usize,
    currency: usize,
    rate: usize,
}

impl ColumnIndex {
    /// Locates the required columns by name, in any order.
    ///
    /// # Errors
    ///
    /// Returns [`ReshapeError::Schema`] naming every missing column.
    pub fn locate<S: AsRef<str>>(headers: &[S]) -> Result<Self, ReshapeError> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.as_ref().trim_start_matches('\u{feff}').trim() == name)
        };

        let date = position(DATE_COLUMN);
        let currency = position(CURRENCY_COLUMN);
        let rate = position(RATE_COLUMN);

        match (date, currency, rate) {
            (Some(date), Some(currency), Some(rate)) => Ok(Self {
                date,
                currency,
                rate,
            }),
            _ => {
                let missing = REQUIRED_COLUMNS
                    .iter()
                    .zip([date, currency, rate])
                    .filter(|(_, found)| found.is_none())
                    .map(|(name, _)| *name)
                    .collect();
                Err(ReshapeError::Schema { missing })
            }
        }
    }

    /// Parses one data row into a record.
    ///
    /// `line` is the one-based line number used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ReshapeError::Parse`] for an unparseable date, an empty
    /// currency, or a rate that is not a finite number.
    pub fn parse_row<S: AsRef<str>>(&self, line: u64, fields: &[S]) -> Result<RateRecord, ReshapeError> {
        let field = |index: usize| fields.get(index).map_or("", |f| f.as_ref().trim());
        let invalid = |column: &'static str, token: &str| ReshapeError::Parse {
            line,
            column,
            token: token.to_string(),
        };

        let date_token = field(self.date);
        let date = parse_date_token(date_token).ok_or_else(|| invalid(DATE_COLUMN, date_token))?;

        let currency = normalize_code(field(self.currency));
        if currency.is_empty() {
            return Err(invalid(CURRENCY_COLUMN, ""));
        }

        let rate_token = field(self.rate);
        let rate = parse_rate_token(rate_token).ok_or_else(|| invalid(RATE_COLUMN, rate_token))?;

        Ok(RateRecord {
            date,
            currency,
            rate,
        })
    }
}

/// Parses a calendar date in any of the accepted layouts.
#[must_use]
pub fn parse_date_token(token: &str) -> Option<NaiveDate> {
    let token = token.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(token, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(token)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Parses a finite decimal rate.
#[must_use]
pub fn parse_rate_token(token: &str) -> Option<f64> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|rate| rate.is_finite())
}

/// Selection applied to records before pivoting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    range: Option<DateRange>,
    currencies: Option<BTreeSet<String>>,
}

impl RecordFilter {
    /// Creates a filter that keeps every record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            range: None,
            currencies: None,
        }
    }

    /// Keeps only records dated inside `range`.
    #[must_use]
    pub const fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Keeps only records whose currency is in `currencies`.
    #[must_use]
    pub fn with_currencies<I, S>(mut self, currencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.currencies = Some(
            currencies
                .into_iter()
                .map(|c| normalize_code(c.as_ref()))
                .collect(),
        );
        self
    }

    /// Returns true if the record passes the filter.
    #[must_use]
    pub fn allows(&self, record: &RateRecord) -> bool {
        self.range.is_none_or(|range| range.contains(record.date))
            && self
                .currencies
                .as_ref()
                .is_none_or(|set| set.contains(&record.currency))
    }
}

/// Filters long-format records and pivots the survivors into a table.
///
/// Records rejected by `filter` are dropped silently. Duplicate
/// `(date, currency)` pairs resolve to the later record.
pub fn from_long_format<I>(records: I, filter: &RecordFilter) -> SeriesTable
where
    I: IntoIterator<Item = RateRecord>,
{
    SeriesTable::from_records(records.into_iter().filter(|r| filter.allows(r)))
}

/// Unpivots a table into long-format records ordered by date, then currency.
#[must_use]
pub fn to_long_format(table: &SeriesTable) -> Vec<RateRecord> {
    table.to_records()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_locate_any_order() {
        let index = ColumnIndex::locate(&["Rate", "Date", "Extra", "Currency"]).unwrap();
        let record = index
            .parse_row(2, &["0.92", "2024-01-01", "x", "eur"])
            .unwrap();

        assert_eq!(record, RateRecord::new(date(1), "EUR", 0.92));
    }

    #[test]
    fn test_locate_strips_bom() {
        assert!(ColumnIndex::locate(&["\u{feff}Date", "Currency", " Rate "]).is_ok());
    }

    #[test]
    fn test_locate_names_missing_columns() {
        let err = ColumnIndex::locate(&["Date", "Value"]).unwrap_err();
        assert_eq!(
            err,
            ReshapeError::Schema {
                missing: vec!["Currency", "Rate"]
            }
        );
        assert!(err.to_string().contains("missing: Currency, Rate"));
    }

    #[test]
    fn test_parse_row_bad_date() {
        let index = ColumnIndex::locate(&["Date", "Currency", "Rate"]).unwrap();
        let err = index.parse_row(3, &["yesterday", "EUR", "0.9"]).unwrap_err();

        assert_eq!(
            err,
            ReshapeError::Parse {
                line: 3,
                column: "Date",
                token: "yesterday".to_string()
            }
        );
    }

    #[test]
    fn test_parse_row_bad_rate() {
        let index = ColumnIndex::locate(&["Date", "Currency", "Rate"]).unwrap();

        for token in ["abc", "", "NaN", "inf"] {
            let err = index.parse_row(4, &["2024-01-01", "EUR", token]).unwrap_err();
            assert!(matches!(err, ReshapeError::Parse { column: "Rate", .. }));
        }
    }

    #[test]
    fn test_parse_row_short_row() {
        let index = ColumnIndex::locate(&["Date", "Currency", "Rate"]).unwrap();
        let err = index.parse_row(5, &["2024-01-01", "EUR"]).unwrap_err();
        assert!(matches!(err, ReshapeError::Parse { line: 5, .. }));
    }

    #[test]
    fn test_parse_date_layouts() {
        let expected = Some(date(15));
        assert_eq!(parse_date_token("2024-01-15"), expected);
        assert_eq!(parse_date_token("2024/01/15"), expected);
        assert_eq!(parse_date_token("01/15/2024"), expected);
        assert_eq!(parse_date_token("2024-01-15 10:30:00"), expected);
        assert_eq!(parse_date_token("2024-01-15T10:30:00+02:00"), expected);
        assert_eq!(parse_date_token("15.01.2024"), None);
    }

    #[test]
    fn test_filter_then_pivot() {
        let records = vec![
            RateRecord::new(date(1), "EUR", 0.90),
            RateRecord::new(date(2), "GBP", 0.79),
            RateRecord::new(date(5), "EUR", 0.93),
            RateRecord::new(date(2), "EUR", 0.91),
        ];
        let filter = RecordFilter::new()
            .with_range(DateRange::new(date(1), date(3)).unwrap())
            .with_currencies(["eur"]);

        let table = from_long_format(records, &filter);

        assert_eq!(table.series_ids().collect::<Vec<_>>(), vec!["EUR"]);
        assert_eq!(table.dates(), vec![date(1), date(2)]);
    }

    #[test]
    fn test_duplicates_last_write_wins() {
        let records = vec![
            RateRecord::new(date(1), "EUR", 0.90),
            RateRecord::new(date(1), "GBP", 0.78),
            RateRecord::new(date(1), "EUR", 0.88),
        ];

        let table = from_long_format(records, &RecordFilter::new());
        assert_eq!(table.get(date(1), "EUR"), Some(0.88));
    }

    #[test]
    fn test_long_format_inverse_without_duplicates() {
        let records = vec![
            RateRecord::new(date(2), "GBP", 0.79),
            RateRecord::new(date(1), "EUR", 0.90),
            RateRecord::new(date(1), "GBP", 0.78),
        ];

        let table = from_long_format(records.clone(), &RecordFilter::new());
        let mut back = to_long_format(&table);
        let mut expected = records;
        let key = |r: &RateRecord| (r.date, r.currency.clone());
        back.sort_by_key(key);
        expected.sort_by_key(key);

        assert_eq!(back, expected);
    }
}
