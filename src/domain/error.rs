//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid distance data or tree text.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("no labels given")]
    EmptyLabels,

    #[error("{labels} labels but {rows} matrix rows")]
    ShapeMismatch { labels: usize, rows: usize },

    #[error("matrix row {row} has {found} entries, expected at least {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("label {index} is empty")]
    EmptyLabel { index: usize },

    #[error("label contains a line break: {label:?}")]
    InvalidLabel { label: String },

    #[error("duplicate label within the first 10 characters: {label:?}")]
    DuplicateLabel { label: String },

    #[error("distance ({row}, {column}) must be finite and non-negative, got {value}")]
    InvalidDistance { row: usize, column: usize, value: f64 },

    #[error("tree description is empty")]
    EmptyTree,

    #[error("invalid distance document at line {line}: {message}")]
    Parse { line: usize, message: String },
}
