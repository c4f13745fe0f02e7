//! Template command implementation.

use crate::display::open_output;
use anyhow::Result;
use ratelens_lib::template_csv;
use std::io::Write;
use std::path::Path;

/// Write the CSV upload template to a file or stdout.
pub(crate) async fn write_template(output: Option<&Path>) -> Result<()> {
    let csv = template_csv().await?;
    let mut writer = open_output(output)?;
    writer.write_all(csv.as_bytes())?;
    writer.flush()?;

    if let Some(path) = output {
        tracing::info!(path = %path.display(), "Template written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.csv");

        write_template(Some(path.as_path())).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Date,Currency,Rate\n"));
        assert_eq!(text.lines().count(), 7);
    }
}
