// ============================================================
// DATASET DOMAIN LAYER
// ============================================================
// Core types and value objects for tabular preprocessing
// No I/O, no randomness

mod cell;
mod group_index;
mod list_literal;
mod record_table;
mod report;
mod vocabulary;

pub use cell::Cell;
pub use group_index::{distribution, rank_counts, Group, GroupCount, GroupIndex};
pub use list_literal::{parse_list_literal, render_list_literal, ListLiteralError};
pub use record_table::RecordTable;
pub use report::{BalanceReport, EncodedBlock, EncodingReport};
pub use vocabulary::Vocabulary;
