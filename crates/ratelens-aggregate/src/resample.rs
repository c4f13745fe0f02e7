//! Period resampling with last-value semantics.

use chrono::NaiveDate;
use ratelens_types::{Column, Period, SeriesTable};

/// Resamples a [`SeriesTable`] to a coarser period.
///
/// Each series is resampled on its own: within every partition the value at
/// the latest date carrying a value wins, and the output is keyed by the
/// partition's representative date ([`Period::period_end`]). A partition with
/// no value for a series produces no entry for that series.
#[derive(Debug, Clone, Copy)]
pub struct Resampler {
    period: Period,
}

impl Resampler {
    /// Creates a new resampler for the given period.
    #[must_use]
    pub const fn new(period: Period) -> Self {
        Self { period }
    }

    /// Returns the period being resampled to.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Resamples every series of `table`.
    ///
    /// Daily resampling returns an identical table.
    #[must_use]
    pub fn resample(&self, table: &SeriesTable) -> SeriesTable {
        if self.period.is_daily() {
            return table.clone();
        }

        let mut out = SeriesTable::new();
        for (id, column) in table.columns() {
            for (date, value) in self.resample_column(column) {
                out.insert(date, id, value);
            }
        }
        out
    }

    /// Resamples one column, yielding `(period_end, last_value)` pairs in
    /// ascending order.
    fn resample_column(&self, column: &Column) -> Vec<(NaiveDate, f64)> {
        let mut out = Vec::new();
        let mut current: Option<Bucket> = None;

        for (&date, &value) in column {
            let key = self.period.period_end(date);
            match current.take() {
                Some(mut bucket) if bucket.key == key => {
                    bucket.last = value;
                    current = Some(bucket);
                }
                Some(bucket) => {
                    out.push(bucket.finish());
                    current = Some(Bucket { key, last: value });
                }
                None => current = Some(Bucket { key, last: value }),
            }
        }

        out.extend(current.map(Bucket::finish));
        out
    }
}

/// Partition being filled.
#[derive(Debug)]
struct Bucket {
    key: NaiveDate,
    last: f64,
}

impl Bucket {
    const fn finish(self) -> (NaiveDate, f64) {
        (self.key, self.last)
    }
}

/// Resamples `table` to `period`.
#[must_use]
pub fn resample(table: &SeriesTable, period: Period) -> SeriesTable {
    Resampler::new(period).resample(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratelens_types::RateRecord;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn table(rows: &[(NaiveDate, &str, f64)]) -> SeriesTable {
        SeriesTable::from_records(rows.iter().map(|(d, c, r)| RateRecord::new(*d, c, *r)))
    }

    #[test]
    fn test_daily_is_identity() {
        let input = table(&[(date(1, 1), "EUR", 0.90), (date(1, 3), "EUR", 0.92)]);
        assert_eq!(resample(&input, Period::Daily), input);
    }

    #[test]
    fn test_weekly_last_value() {
        // 2024-01-01 is a Monday; the week closes on Sunday the 7th.
        let input = table(&[
            (date(1, 1), "EUR", 0.90),
            (date(1, 3), "EUR", 0.91),
            (date(1, 5), "EUR", 0.92),
            (date(1, 8), "EUR", 0.93),
        ]);

        let out = resample(&input, Period::Weekly);

        assert_eq!(out.dates(), vec![date(1, 7), date(1, 14)]);
        assert_eq!(out.get(date(1, 7), "EUR"), Some(0.92));
        assert_eq!(out.get(date(1, 14), "EUR"), Some(0.93));
    }

    #[test]
    fn test_monthly_last_value() {
        let input = table(&[
            (date(1, 15), "GBP", 0.78),
            (date(1, 31), "GBP", 0.79),
            (date(2, 1), "GBP", 0.80),
            (date(2, 20), "GBP", 0.81),
        ]);

        let out = resample(&input, Period::Monthly);

        assert_eq!(out.dates(), vec![date(1, 31), date(2, 29)]);
        assert_eq!(out.get(date(1, 31), "GBP"), Some(0.79));
        assert_eq!(out.get(date(2, 29), "GBP"), Some(0.81));
    }

    #[test]
    fn test_series_resampled_independently() {
        // GBP has no value in February; EUR keeps its February entry.
        let input = table(&[
            (date(1, 10), "EUR", 0.90),
            (date(1, 12), "GBP", 0.78),
            (date(2, 10), "EUR", 0.91),
        ]);

        let out = resample(&input, Period::Monthly);

        assert_eq!(out.get(date(2, 29), "EUR"), Some(0.91));
        assert_eq!(out.get(date(2, 29), "GBP"), None);
        assert_eq!(out.get(date(1, 31), "GBP"), Some(0.78));
    }

    #[test]
    fn test_empty_partitions_absent() {
        let input = table(&[(date(1, 2), "EUR", 0.90), (date(3, 4), "EUR", 0.95)]);
        let out = resample(&input, Period::Monthly);
        assert_eq!(out.dates(), vec![date(1, 31), date(3, 31)]);
    }

    #[test]
    fn test_empty_table() {
        assert!(resample(&SeriesTable::new(), Period::Weekly).is_empty());
    }

    #[test]
    fn test_weekly_at_last_representable_day() {
        let last = NaiveDate::MAX;
        let input = table(&[(last, "EUR", 0.90)]);

        let out = resample(&input, Period::Weekly);

        assert_eq!(out.get(last, "EUR"), Some(0.90));
    }
}
