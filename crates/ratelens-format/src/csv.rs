//! CSV output format.

use async_trait::async_trait;
use csv_async::{AsyncWriterBuilder, Terminator};
use ratelens_types::reshape::{CURRENCY_COLUMN, DATE_COLUMN, RATE_COLUMN};
use ratelens_types::{DATE_FORMAT, RateRecord};
use tokio::io::AsyncWrite;

use crate::{FormatError, Formatter};

/// Long-format `Date,Currency,Rate` CSV formatter.
///
/// Fields holding a delimiter, a quote or a line break are quoted, so
/// anything [`read_upload`](crate::read_upload) accepts is written back
/// unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    /// Creates a new CSV formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Formatter for CsvFormatter {
    async fn write_records<W>(
        &self,
        records: &[RateRecord],
        writer: W,
    ) -> Result<(), FormatError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let mut csv = AsyncWriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .create_writer(writer);

        csv.write_record([DATE_COLUMN, CURRENCY_COLUMN, RATE_COLUMN])
            .await?;
        for record in records {
            let date = record.date.format(DATE_FORMAT).to_string();
            let rate = record.rate.to_string();
            csv.write_record([date.as_str(), record.currency.as_str(), rate.as_str()])
                .await?;
        }

        csv.flush().await?;
        Ok(())
    }
}
