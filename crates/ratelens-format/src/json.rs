//! Newline-delimited JSON output format.

use async_trait::async_trait;
use ratelens_types::RateRecord;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::{FormatError, Formatter};

/// NDJSON formatter: one `{"date", "currency", "rate"}` object per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NdjsonFormatter;

impl NdjsonFormatter {
    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Formatter for NdjsonFormatter {
    async fn write_records<W>(
        &self,
        records: &[RateRecord],
        mut writer: W,
    ) -> Result<(), FormatError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let mut line = Vec::new();
        for record in records {
            line.clear();
            serde_json::to_writer(&mut line, record)?;
            line.push(b'\n');
            writer.write_all(&line).await?;
        }
        writer.flush().await?;
        Ok(())
    }
}
