// ============================================================
// MULTI-LABEL ENCODER USE CASE
// ============================================================
// Normalize list columns, build vocabularies, append one-hot blocks

use std::path::Path;

use tracing::{info, warn};

use crate::domain::dataset::{
    parse_list_literal, Cell, EncodedBlock, EncodingReport, RecordTable, Vocabulary,
};
use crate::domain::error::{AppError, Result};
use crate::domain::prep_config::{EncoderConfig, ListColumn};
use crate::infrastructure::csv::{CsvParser, CsvWriter};

/// Encoded table together with its run summary
#[derive(Debug, Clone)]
pub struct EncodedTable {
    pub table: RecordTable,
    pub report: EncodingReport,
}

pub struct MultiLabelEncoder {
    columns: Vec<ListColumn>,
}

impl MultiLabelEncoder {
    pub fn new(columns: Vec<ListColumn>) -> Self {
        Self { columns }
    }

    pub fn from_config(config: &EncoderConfig) -> Self {
        Self::new(config.columns.clone())
    }

    /// Append one indicator block per list column.
    ///
    /// Every column is checked and every cell parsed before anything is
    /// appended, so an error leaves no partially encoded table behind.
    pub fn encode(&self, mut table: RecordTable) -> Result<EncodedTable> {
        let indices = self
            .columns
            .iter()
            .map(|column| table.require_column(&column.name))
            .collect::<Result<Vec<_>>>()?;

        let mut blocks = Vec::with_capacity(self.columns.len());
        let mut appended: Vec<(String, Vec<Cell>)> = Vec::new();

        for (column, &index) in self.columns.iter().zip(&indices) {
            let tag_lists = table
                .column(index)
                .enumerate()
                .map(|(row, cell)| normalize_cell(cell, &column.name, row))
                .collect::<Result<Vec<_>>>()?;

            let vocabulary = Vocabulary::from_tag_lists(&tag_lists);
            let mut tag_counts = vec![0usize; vocabulary.len()];
            let mut bit_columns: Vec<Vec<Cell>> =
                vec![Vec::with_capacity(tag_lists.len()); vocabulary.len()];

            for tags in &tag_lists {
                for (i, present) in vocabulary.indicators(tags).into_iter().enumerate() {
                    if present {
                        tag_counts[i] += 1;
                    }
                    bit_columns[i].push(Cell::text(if present { "1" } else { "0" }));
                }
            }

            let block = EncodedBlock {
                column: column.name.clone(),
                prefix: column.prefix.clone(),
                vocabulary,
                tag_counts,
            };
            info!(
                column = %block.column,
                prefix = %block.prefix,
                vocabulary = block.vocabulary.len(),
                "Built label vocabulary"
            );

            appended.extend(block.column_names().into_iter().zip(bit_columns));
            blocks.push(block);
        }

        let columns_before = table.width();
        for (name, values) in appended {
            if table.column_index(&name).is_some() {
                warn!(column = %name, "Encoded column name repeats an existing header");
            }
            table.append_column(name, values)?;
        }

        let report = EncodingReport {
            row_count: table.len(),
            columns_before,
            columns_after: table.width(),
            blocks,
        };

        Ok(EncodedTable { table, report })
    }

    /// Read `input`, encode, write `output`. Nothing is written on error.
    pub fn encode_file(&self, input: &Path, output: &Path) -> Result<EncodedTable> {
        let table = CsvParser::new().parse_file(input)?;
        info!(
            path = %input.display(),
            rows = table.len(),
            "Loaded table for encoding"
        );

        let encoded = self.encode(table)?;
        CsvWriter::new().write_file(&encoded.table, output)?;
        info!(
            path = %output.display(),
            columns = encoded.report.columns_after,
            "Encoded data saved"
        );
        Ok(encoded)
    }
}

/// Tags of one list cell; a blank text cell counts as no tags
fn normalize_cell(cell: &Cell, column: &str, row: usize) -> Result<Vec<String>> {
    match cell {
        Cell::List(tags) => Ok(tags.clone()),
        Cell::Text(text) if text.trim().is_empty() => Ok(Vec::new()),
        Cell::Text(text) => {
            parse_list_literal(text).map_err(|e| AppError::MalformedListLiteral {
                column: column.to_string(),
                row,
                reason: e.to_string(),
            })
        }
    }
}
