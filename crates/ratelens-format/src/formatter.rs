//! Output format abstraction.

use async_trait::async_trait;
use ratelens_types::{RateRecord, ReshapeError, SeriesTable};
use thiserror::Error;
use tokio::io::AsyncWrite;

/// Errors that can occur while reading or writing rate data.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Input does not match the `Date, Currency, Rate` schema or has a bad token.
    #[error(transparent)]
    Reshape(#[from] ReshapeError),

    /// CSV could not be decoded or encoded.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv_async::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for output formatters.
#[async_trait]
pub trait Formatter: Send + Sync {
    /// Writes long-format records to the output and flushes it.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    async fn write_records<W>(
        &self,
        records: &[RateRecord],
        writer: W,
    ) -> Result<(), FormatError>
    where
        W: AsyncWrite + Unpin + Send;

    /// Writes a table to the output in long format.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    async fn write_table<W>(&self, table: &SeriesTable, writer: W) -> Result<(), FormatError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let records = table.to_records();
        self.write_records(&records, writer).await
    }
}
