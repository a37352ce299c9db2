//! Human-readable run summaries for the console

use std::fmt::Write;
use std::path::Path;

use crate::application::EncodedTable;
use crate::domain::dataset::{distribution, BalanceReport, GroupCount, RecordTable};
use crate::domain::prep_config::EncoderConfig;

const MAX_CELL_WIDTH: usize = 24;

pub fn encoding_summary(encoded: &EncodedTable, config: &EncoderConfig) -> String {
    let mut out = String::new();
    let report = &encoded.report;

    let _ = writeln!(out, "Encoded data saved to: {}", config.output_path.display());
    let _ = writeln!(out);
    out.push_str(&head(&encoded.table, config.preview_rows));

    let _ = writeln!(out, "\nNew Columns:");
    let _ = writeln!(out, "{}", report.new_columns().join(", "));

    let _ = writeln!(out, "\nNumber of Columns:");
    let _ = writeln!(out, "{}", report.columns_after);

    for name in &config.preview_columns {
        let _ = writeln!(out, "\nValue counts for {}:", name);
        match encoded.table.column_index(name) {
            Some(index) => {
                let values: Vec<_> = encoded.table.column(index).map(|c| c.render()).collect();
                out.push_str(&counts_table(&distribution(values.iter().map(|v| &**v))));
            }
            None => {
                let _ = writeln!(out, "(column not present)");
            }
        }
    }

    out
}

pub fn balance_summary(report: &BalanceReport, output: &Path) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\nOriginal Dataset Statistics:");
    let _ = writeln!(out, "Total examples: {}", report.original_total);
    let _ = writeln!(out, "\nDistribution of '{}' in original:", report.group_column);
    out.push_str(&counts_table(&report.original_counts));

    let _ = writeln!(out, "\nSampled Dataset Statistics:");
    let _ = writeln!(out, "Total examples: {}", report.sampled_total);
    let _ = writeln!(out, "\nDistribution of '{}' in sample:", report.group_column);
    out.push_str(&counts_table(&report.sampled_counts));

    let _ = writeln!(out, "\nSampled dataset saved to {}", output.display());
    out
}

/// One `group  count` line per entry, counts right-aligned
fn counts_table(counts: &[GroupCount]) -> String {
    let key_width = counts.iter().map(|c| display_width(&c.group)).max().unwrap_or(0);
    let count_width = counts
        .iter()
        .map(|c| c.count.to_string().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in counts {
        let padding = key_width - display_width(&entry.group);
        let _ = writeln!(
            out,
            "{}{}  {:>width$}",
            entry.group,
            " ".repeat(padding),
            entry.count,
            width = count_width
        );
    }
    out
}

/// First `rows` rows as an aligned text grid
fn head(table: &RecordTable, rows: usize) -> String {
    let shown = rows.min(table.len());
    let mut grid: Vec<Vec<String>> = Vec::with_capacity(shown + 1);
    grid.push(table.headers().iter().map(|h| clip(h)).collect());
    for row in &table.rows()[..shown] {
        grid.push(row.iter().map(|cell| clip(&cell.render())).collect());
    }

    let mut widths = vec![0usize; table.width()];
    for line in &grid {
        for (i, value) in line.iter().enumerate() {
            widths[i] = widths[i].max(display_width(value));
        }
    }

    let mut out = String::new();
    for line in &grid {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(value, &width)| {
                format!("{}{}", value, " ".repeat(width - display_width(value)))
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
    let _ = writeln!(out, "[{} of {} rows]", shown, table.len());
    out
}

fn clip(value: &str) -> String {
    let single_line = value.replace(['\n', '\r'], " ");
    if display_width(&single_line) <= MAX_CELL_WIDTH {
        return single_line;
    }
    let kept: String = single_line.chars().take(MAX_CELL_WIDTH - 3).collect();
    format!("{}...", kept)
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::MultiLabelEncoder;
    use crate::domain::dataset::Cell;
    use crate::domain::prep_config::ListColumn;
    use std::path::PathBuf;

    #[test]
    fn test_counts_table_alignment() {
        let counts = vec![
            GroupCount {
                group: "python".to_string(),
                count: 120,
            },
            GroupCount {
                group: "go".to_string(),
                count: 7,
            },
        ];
        assert_eq!(counts_table(&counts), "python  120\ngo        7\n");
    }

    #[test]
    fn test_clip_long_values() {
        let long = "x".repeat(40);
        let clipped = clip(&long);
        assert_eq!(clipped.chars().count(), MAX_CELL_WIDTH);
        assert!(clipped.ends_with("..."));
        assert_eq!(clip("two\nlines"), "two lines");
    }

    #[test]
    fn test_balance_summary_lists_both_distributions() {
        let report = BalanceReport {
            group_column: "language".to_string(),
            original_total: 18,
            original_counts: vec![
                GroupCount {
                    group: "go".to_string(),
                    count: 10,
                },
                GroupCount {
                    group: "rust".to_string(),
                    count: 8,
                },
            ],
            sampled_total: 16,
            sampled_counts: vec![
                GroupCount {
                    group: "go".to_string(),
                    count: 8,
                },
                GroupCount {
                    group: "rust".to_string(),
                    count: 8,
                },
            ],
        };
        let text = balance_summary(&report, Path::new("out.csv"));
        assert!(text.contains("Total examples: 18"));
        assert!(text.contains("Distribution of 'language' in sample:\ngo    8\nrust  8\n"));
        assert!(text.ends_with("Sampled dataset saved to out.csv\n"));
    }

    #[test]
    fn test_encoding_summary_previews() {
        let table = RecordTable::from_rows(
            vec!["feature1".to_string()],
            vec![
                vec![Cell::text("['modality']")],
                vec![Cell::text("[]")],
                vec![Cell::text("['modality', 'wh']")],
            ],
        )
        .unwrap();
        let encoded = MultiLabelEncoder::new(vec![ListColumn::new("feature1", "f1")])
            .encode(table)
            .unwrap();
        let config = EncoderConfig {
            output_path: PathBuf::from("encoded.csv"),
            columns: vec![ListColumn::new("feature1", "f1")],
            preview_columns: vec!["f1_modality".to_string(), "f2_polar".to_string()],
            preview_rows: 2,
            ..Default::default()
        };

        let text = encoding_summary(&encoded, &config);
        assert!(text.starts_with("Encoded data saved to: encoded.csv\n"));
        assert!(text.contains("[2 of 3 rows]"));
        assert!(text.contains("New Columns:\nf1_modality, f1_wh\n"));
        assert!(text.contains("Number of Columns:\n3\n"));
        assert!(text.contains("Value counts for f1_modality:\n1  2\n0  1\n"));
        assert!(text.contains("Value counts for f2_polar:\n(column not present)\n"));
    }
}
