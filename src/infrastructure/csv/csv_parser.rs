// ============================================================
// CSV PARSER
// ============================================================
// Parse UTF-8 CSV files into record tables

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::domain::dataset::{Cell, RecordTable};
use crate::domain::error::{AppError, Result};

/// CSV parser with strict UTF-8 decoding
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a CSV file into a table
    pub fn parse_file(&self, path: &Path) -> Result<RecordTable> {
        let content = Self::read_utf8(path)?;
        let table = self.parse_content(&content)?;
        debug!(
            path = %path.display(),
            rows = table.len(),
            columns = table.width(),
            "Parsed CSV file"
        );
        Ok(table)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<RecordTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(false)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::CsvFormat(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut table = RecordTable::new(headers);
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::CsvFormat(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            table.push_row(Self::parse_row(&record))?;
        }

        Ok(table)
    }

    /// Read the whole file as UTF-8, dropping a leading BOM
    fn read_utf8(path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| AppError::not_readable(path, e))?;

        let (content, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);
        if had_errors {
            return Err(AppError::not_readable(path, "file is not valid UTF-8"));
        }

        Ok(content.into_owned())
    }

    fn parse_row(record: &StringRecord) -> Vec<Cell> {
        record.iter().map(Cell::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let content = "question,language\nHow?,go\nWhy?,rust";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.headers(), &["question", "language"]);
        assert_eq!(table.rows()[1][1], Cell::text("rust"));
    }

    #[test]
    fn test_quoted_list_cells_survive_verbatim() {
        let content = "id,feature1\n1,\"['a', 'b']\"\n2, []\n";
        let table = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(table.rows()[0][1], Cell::text("['a', 'b']"));
        assert_eq!(table.rows()[1][1], Cell::text(" []"));
    }

    #[test]
    fn test_ragged_row_is_format_error() {
        let err = CsvParser::new()
            .parse_content("a,b\n1,2\n3\n")
            .unwrap_err();
        assert!(matches!(err, AppError::CsvFormat(_)));
    }

    #[test]
    fn test_missing_file_is_not_readable() {
        let err = CsvParser::new()
            .parse_file(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, AppError::FileNotReadable { .. }));
    }

    #[test]
    fn test_bom_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        std::fs::write(&path, "\u{feff}feature1,feature2\n['a'],[]\n").unwrap();

        let table = CsvParser::new().parse_file(&path).unwrap();
        assert_eq!(table.headers(), &["feature1", "feature2"]);
        assert_eq!(table.require_column("feature1").unwrap(), 0);
    }

    #[test]
    fn test_invalid_utf8_is_not_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.csv");
        std::fs::write(&path, b"question\n\xff\xfe caf\xe9\n").unwrap();

        let err = CsvParser::new().parse_file(&path).unwrap_err();
        match err {
            AppError::FileNotReadable { path: reported, reason } => {
                assert_eq!(reported, path.display().to_string());
                assert_eq!(reason, "file is not valid UTF-8");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
