// ============================================================
// TRANSFORM REPORTS
// ============================================================
// Summaries printed after a run; not part of the written data

use serde::Serialize;

use super::{GroupCount, Vocabulary};

/// One appended block of indicator columns
#[derive(Debug, Clone, Serialize)]
pub struct EncodedBlock {
    /// Source list column
    pub column: String,

    pub prefix: String,

    pub vocabulary: Vocabulary,

    /// Rows carrying each tag, aligned with `vocabulary`
    pub tag_counts: Vec<usize>,
}

impl EncodedBlock {
    pub fn column_names(&self) -> Vec<String> {
        self.vocabulary.column_names(&self.prefix)
    }
}

/// Outcome of a multi-label encoding run
#[derive(Debug, Clone, Serialize)]
pub struct EncodingReport {
    pub row_count: usize,
    pub columns_before: usize,
    pub columns_after: usize,
    pub blocks: Vec<EncodedBlock>,
}

impl EncodingReport {
    /// Names of all appended columns, block by block
    pub fn new_columns(&self) -> Vec<String> {
        self.blocks.iter().flat_map(|b| b.column_names()).collect()
    }
}

/// Outcome of a balancing run
#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport {
    pub group_column: String,
    pub original_total: usize,
    pub original_counts: Vec<GroupCount>,
    pub sampled_total: usize,
    pub sampled_counts: Vec<GroupCount>,
}
