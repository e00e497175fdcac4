//! Dataset handle for the selection pipeline

pub mod names;
pub mod table;

use arrow::error::ArrowError;
use thiserror::Error;

// Re-exports
pub use names::{ColumnNames, RowNames};
pub use table::Table;

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("Row index {index} out of bounds ({rows} rows)")]
    RowOutOfBounds { index: usize, rows: usize },

    #[error("Column index {index} out of bounds ({columns} columns)")]
    ColumnOutOfBounds { index: usize, columns: usize },

    #[error("Expected {expected} row names, got {found}")]
    RowNameCount { expected: usize, found: usize },
}
