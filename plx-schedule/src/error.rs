//! Error types for plx-schedule
//!
//! Malformed credit strings are never errors; they are tolerated by the
//! credit parser. Everything here is fatal for the file being processed.

use plx_common::ColumnField;
use std::path::PathBuf;
use thiserror::Error;

/// Schedule building error
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Workbook could not be opened or its first worksheet read
    #[error("Failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Input file extension is not a known spreadsheet format
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A mapped column lies outside a row of the source file
    #[error(
        "{source_name}: row {row} has {width} columns, {field} is mapped to column index {index}"
    )]
    ColumnOutOfRange {
        source_name: String,
        row: usize,
        field: ColumnField,
        index: usize,
        width: usize,
    },

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook writing error
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// plx-common error
    #[error("Common error: {0}")]
    Common(#[from] plx_common::Error),
}

/// Result type for schedule operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;
