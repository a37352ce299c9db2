// ============================================================
// RECORD TABLE
// ============================================================
// Ordered rows over a fixed header; every row has one cell per header

use super::Cell;
use crate::domain::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RecordTable {
    /// Create an empty table with the given headers
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Build a table, checking every row against the header width
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut table = Self::new(headers);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.headers.len() {
            return Err(AppError::CsvFormat(format!(
                "row {} has {} fields, expected {}",
                self.rows.len(),
                row.len(),
                self.headers.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Index of the first header equal to `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like `column_index`, but a missing column is an error
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| AppError::MissingColumn(name.to_string()))
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().map(move |row| &row[index])
    }

    /// Append a column; `values` must hold exactly one cell per row
    pub fn append_column(&mut self, name: String, values: Vec<Cell>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(AppError::CsvFormat(format!(
                "column '{}' has {} values, table has {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }
        self.headers.push(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// New table with the rows at `indices`, in that order
    pub fn select_rows(&self, indices: &[usize]) -> RecordTable {
        RecordTable {
            headers: self.headers.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordTable {
        RecordTable::from_rows(
            vec!["id".to_string(), "language".to_string()],
            vec![
                vec![Cell::text("1"), Cell::text("go")],
                vec![Cell::text("2"), Cell::text("rust")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let mut table = sample();
        let err = table.push_row(vec![Cell::text("3")]).unwrap_err();
        assert_eq!(
            err,
            AppError::CsvFormat("row 2 has 1 fields, expected 2".to_string())
        );
    }

    #[test]
    fn test_require_column() {
        let table = sample();
        assert_eq!(table.require_column("language").unwrap(), 1);
        assert_eq!(
            table.require_column("feature1").unwrap_err(),
            AppError::MissingColumn("feature1".to_string())
        );
    }

    #[test]
    fn test_append_column_checks_length() {
        let mut table = sample();
        assert!(table
            .append_column("f1_a".to_string(), vec![Cell::text("1")])
            .is_err());
        table
            .append_column("f1_a".to_string(), vec![Cell::text("1"), Cell::text("0")])
            .unwrap();
        assert_eq!(table.width(), 3);
        assert_eq!(table.rows()[1][2], Cell::text("0"));
    }

    #[test]
    fn test_select_rows_keeps_order_and_headers() {
        let table = sample();
        let picked = table.select_rows(&[1, 0, 1]);
        assert_eq!(picked.headers(), table.headers());
        let ids: Vec<_> = picked.column(0).map(|c| c.render().into_owned()).collect();
        assert_eq!(ids, vec!["2", "1", "2"]);
    }
}
