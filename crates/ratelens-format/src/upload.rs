//! Reading uploaded `Date, Currency, Rate` files.

use csv_async::{AsyncReaderBuilder, Trim};
use futures::StreamExt;
use ratelens_types::{ColumnIndex, DateRange, RateRecord, RecordFilter, SeriesTable, from_long_format};
use tokio::io::AsyncRead;

use crate::FormatError;

/// Parsed contents of an uploaded file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Upload {
    records: Vec<RateRecord>,
}

impl Upload {
    /// Wraps already parsed records.
    #[must_use]
    pub const fn new(records: Vec<RateRecord>) -> Self {
        Self { records }
    }

    /// Returns the parsed records in file order.
    #[must_use]
    pub fn records(&self) -> &[RateRecord] {
        &self.records
    }

    /// Returns the number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the file had no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the distinct currencies in order of first appearance.
    #[must_use]
    pub fn currencies(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.currency.as_str()))
            .map(|r| r.currency.clone())
            .collect()
    }

    /// Returns the range from the earliest to the latest date in the file.
    #[must_use]
    pub fn date_span(&self) -> Option<DateRange> {
        let first = self.records.iter().map(|r| r.date).min()?;
        let last = self.records.iter().map(|r| r.date).max()?;
        DateRange::new(first, last).ok()
    }

    /// Filters the records and pivots the survivors into a table.
    #[must_use]
    pub fn into_table(self, filter: &RecordFilter) -> SeriesTable {
        from_long_format(self.records, filter)
    }
}

/// Reads a `Date, Currency, Rate` CSV stream.
///
/// Columns may appear in any order and extra columns are ignored.
///
/// # Errors
///
/// Returns [`FormatError::Reshape`] when a required column is missing or a
/// row holds an unparseable token, and [`FormatError::Csv`] when the input
/// is not valid UTF-8 CSV.
pub async fn read_upload<R>(input: R) -> Result<Upload, FormatError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut reader = AsyncReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .create_reader(input);

    let headers = reader.headers().await?.clone();
    let header_fields: Vec<&str> = headers.iter().collect();
    let index = ColumnIndex::locate(&header_fields)?;

    let mut records = Vec::new();
    let mut rows = reader.records();
    while let Some(row) = rows.next().await {
        let row = row?;
        if row.iter().all(str::is_empty) {
            continue;
        }
        let line = row.position().map_or(0, csv_async::Position::line);
        let fields: Vec<&str> = row.iter().collect();
        records.push(index.parse_row(line, &fields)?);
    }

    Ok(Upload::new(records))
}

/// Reads an in-memory upload.
///
/// # Errors
///
/// See [`read_upload`].
pub async fn read_upload_bytes(bytes: &[u8]) -> Result<Upload, FormatError> {
    read_upload(bytes).await
}
