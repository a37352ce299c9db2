// ============================================================
// CELL VALUE
// ============================================================

use std::borrow::Cow;

use super::render_list_literal;

/// A single value in a record table.
///
/// Cells loaded from CSV are always `Text`. Tables assembled in memory may
/// carry tag lists directly as `List`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    Text(String),
    List(Vec<String>),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn list<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Cell::List(tags.into_iter().map(Into::into).collect())
    }

    /// Text form used when writing the cell back to CSV.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Cell::Text(value) => Cow::Borrowed(value.as_str()),
            Cell::List(tags) => Cow::Owned(render_list_literal(tags)),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}
