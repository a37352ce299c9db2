// ============================================================
// CSV WRITER
// ============================================================
// Render record tables to CSV and replace the destination in one step

use std::fs;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::debug;

use crate::domain::dataset::RecordTable;
use crate::domain::error::{AppError, Result};

pub struct CsvWriter {
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the table as CSV text, header first
    pub fn render(&self, table: &RecordTable) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        if table.width() > 0 {
            writer.write_record(table.headers())?;
            for row in table.rows() {
                writer.write_record(row.iter().map(|cell| cell.render().into_owned()))?;
            }
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::CsvFormat(format!("Failed to flush CSV output: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::CsvFormat(format!("CSV output is not UTF-8: {}", e)))
    }

    /// Write the table to `path`.
    ///
    /// The content goes to a sibling temporary file first and is renamed over
    /// `path`, so a failure never leaves a half-written destination.
    pub fn write_file(&self, table: &RecordTable, path: &Path) -> Result<()> {
        let content = self.render(table)?;

        if let Some(parent) = path.parent() {
            ensure_dir(parent).map_err(|e| AppError::not_writable(path, e))?;
        }

        let staging = staging_path(path);
        fs::write(&staging, content.as_bytes()).map_err(|e| AppError::not_writable(path, e))?;
        if let Err(e) = fs::rename(&staging, path) {
            let _ = fs::remove_file(&staging);
            return Err(AppError::not_writable(path, e));
        }

        debug!(path = %path.display(), rows = table.len(), "Wrote CSV file");
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::Cell;

    #[test]
    fn test_render_quotes_only_when_needed() {
        let table = RecordTable::from_rows(
            vec!["question".to_string(), "feature1".to_string()],
            vec![
                vec![Cell::text("Is it, though?"), Cell::list(["a", "b"])],
                vec![Cell::text("plain"), Cell::text("[]")],
            ],
        )
        .unwrap();

        let rendered = CsvWriter::new().render(&table).unwrap();
        assert_eq!(
            rendered,
            "question,feature1\n\"Is it, though?\",\"['a', 'b']\"\nplain,[]\n"
        );
    }

    #[test]
    fn test_render_header_only() {
        let table = RecordTable::new(vec!["language".to_string()]);
        assert_eq!(CsvWriter::new().render(&table).unwrap(), "language\n");
    }

    #[test]
    fn test_staging_path_is_sibling() {
        assert_eq!(
            staging_path(Path::new("data/out.csv")),
            PathBuf::from("data/out.csv.tmp")
        );
    }
}
