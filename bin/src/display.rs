//! Output helpers for the ratelens CLI.

use anyhow::Result;
use clap::ValueEnum;
use ratelens_lib::{CurrencyResponse, Formatter, SeriesTable};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output of the `analyze` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Analysis report as pretty JSON.
    Json,
    /// Resampled rates as `Date,Currency,Rate` CSV.
    Csv,
    /// Resampled rates as newline-delimited JSON.
    Ndjson,
}

/// Opens the output file, or stdout when no path is given.
pub(crate) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout()),
    })
}

/// Writes the analysis report as pretty JSON.
pub(crate) fn write_report(response: &CurrencyResponse, mut writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, response)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes a resampled table in long format with `formatter`.
pub(crate) async fn write_rates<F: Formatter>(
    table: &SeriesTable,
    formatter: &F,
    mut writer: impl Write,
) -> Result<()> {
    let mut rendered = Vec::new();
    formatter.write_table(table, &mut rendered).await?;
    writer.write_all(&rendered)?;
    writer.flush()?;
    Ok(())
}
