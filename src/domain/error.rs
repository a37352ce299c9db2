use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    MalformedListLiteral {
        column: String,
        row: usize,
        reason: String,
    },
    MissingColumn(String),
    InsufficientGroupSize {
        group: String,
        requested: usize,
        available: usize,
    },
    FileNotReadable {
        path: String,
        reason: String,
    },
    FileNotWritable {
        path: String,
        reason: String,
    },
    CsvFormat(String),
    InvalidConfig(String),
    Internal(String),
}

impl AppError {
    pub fn not_readable(path: &Path, reason: impl fmt::Display) -> Self {
        AppError::FileNotReadable {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn not_writable(path: &Path, reason: impl fmt::Display) -> Self {
        AppError::FileNotWritable {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MalformedListLiteral {
                column,
                row,
                reason,
            } => write!(
                f,
                "Malformed list literal in column '{}' at row {}: {}",
                column, row, reason
            ),
            AppError::MissingColumn(column) => write!(f, "Missing column: {}", column),
            AppError::InsufficientGroupSize {
                group,
                requested,
                available,
            } => write!(
                f,
                "Insufficient group size for '{}': requested {} rows, only {} available",
                group, requested, available
            ),
            AppError::FileNotReadable { path, reason } => {
                write!(f, "File not readable: {}: {}", path, reason)
            }
            AppError::FileNotWritable { path, reason } => {
                write!(f, "File not writable: {}: {}", path, reason)
            }
            AppError::CsvFormat(msg) => write!(f, "CSV format error: {}", msg),
            AppError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::CsvFormat(err.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::InvalidConfig(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
