//! Defines the error types for table construction and resolution.

use tablekit_format::FormatError;
use tablekit_style::StyleParseError;
use thiserror::Error;

/// A selector could not be resolved against the table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("Column '{0}' does not exist")]
    UnknownColumn(String),
    #[error("Row index {index} is out of range for a table with {n_rows} rows")]
    RowOutOfRange { index: usize, n_rows: usize },
    #[error("Invalid column pattern: {0}")]
    InvalidPattern(String),
    #[error("Row group '{0}' does not exist")]
    UnknownGroup(String),
    #[error("Spanner '{0}' does not exist")]
    UnknownSpanner(String),
}

/// The main error enum for all table operations.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
    #[error("Format error at row {row}, column '{column}': {source}")]
    CellFormat {
        row: usize,
        column: String,
        #[source]
        source: FormatError,
    },
    #[error("Color domain error: {0}")]
    Domain(String),
    #[error("Style error: {0}")]
    Style(#[from] StyleParseError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Rendering error: {0}")]
    Render(String),
}
