//! Error types for metplot

use thiserror::Error;

/// metplot error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or missing input data
    #[error("Data error: {0}")]
    Data(String),

    /// Column alignment violation between event columns
    #[error("Column '{column}' has {got} entries, expected {expected}")]
    ColumnMismatch {
        /// Offending column name.
        column: String,
        /// Entry count found.
        got: usize,
        /// Entry count shared by the other columns.
        expected: usize,
    },

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
