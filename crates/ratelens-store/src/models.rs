//! Row types mapped onto the database schema.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use num_traits::FromPrimitive;
use ratelens_types::SeriesTable;

use crate::schema::{csv_uploads, exchange_rates};
use crate::{ImportAudit, StoreError, UploadSummary};

/// Scale of the `rate` column.
const RATE_SCALE: i64 = 6;

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exchange_rates)]
pub(crate) struct NewRate {
    pub(crate) date: NaiveDate,
    pub(crate) currency: String,
    pub(crate) rate: BigDecimal,
}

impl NewRate {
    /// Flattens every cell of `table` into insertable rows.
    pub(crate) fn from_table(table: &SeriesTable) -> Result<Vec<Self>, StoreError> {
        table
            .columns()
            .flat_map(|(currency, column)| column.iter().map(move |(date, rate)| (currency, *date, *rate)))
            .map(|(currency, date, rate)| {
                let rate = BigDecimal::from_f64(rate)
                    .ok_or_else(|| StoreError::Conversion {
                        subject: currency.to_string(),
                        value: rate,
                        reason: "not a finite number",
                    })?
                    .round(RATE_SCALE);
                Ok(Self {
                    date,
                    currency: currency.to_string(),
                    rate,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = csv_uploads)]
pub(crate) struct NewUpload {
    pub(crate) filename: String,
    pub(crate) upload_date: NaiveDateTime,
    pub(crate) records_count: i32,
    pub(crate) date_range_start: NaiveDate,
    pub(crate) date_range_end: NaiveDate,
}

impl TryFrom<&ImportAudit> for NewUpload {
    type Error = StoreError;

    fn try_from(audit: &ImportAudit) -> Result<Self, Self::Error> {
        let records_count = i32::try_from(audit.record_count).map_err(|_| StoreError::Conversion {
            subject: audit.source.clone(),
            value: audit.record_count as f64,
            reason: "record count exceeds column range",
        })?;
        Ok(Self {
            filename: audit.source.clone(),
            upload_date: audit.imported_at,
            records_count,
            date_range_start: audit.start,
            date_range_end: audit.end,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = csv_uploads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UploadRow {
    pub(crate) filename: String,
    pub(crate) upload_date: NaiveDateTime,
    pub(crate) records_count: i32,
}

impl From<UploadRow> for UploadSummary {
    fn from(row: UploadRow) -> Self {
        Self {
            filename: row.filename,
            upload_date: row.upload_date,
            records_count: i64::from(row.records_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratelens_types::RateRecord;
    use std::str::FromStr;

    #[test]
    fn test_rates_rounded_to_column_scale() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = SeriesTable::from_records(vec![
            RateRecord::new(date, "EUR", 0.123_456_789),
            RateRecord::new(date, "JPY", 140.5),
        ]);

        let rows = NewRate::from_table(&table).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].currency, "EUR");
        assert_eq!(rows[0].rate, BigDecimal::from_str("0.123457").unwrap());
        assert_eq!(rows[1].rate, BigDecimal::from_str("140.5").unwrap());
    }

    #[test]
    fn test_upload_row_from_audit() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let audit = ImportAudit {
            source: "rates.csv".to_string(),
            imported_at: date.and_hms_opt(9, 30, 0).unwrap(),
            record_count: 42,
            start: date,
            end: date,
        };

        let row = NewUpload::try_from(&audit).unwrap();
        assert_eq!(row.records_count, 42);
        assert_eq!(row.filename, "rates.csv");
    }
}
