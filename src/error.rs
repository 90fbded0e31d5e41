use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Error type returned by loading, writing and workspace operations.
///
/// A single enum is shared by the CSV and Excel code paths so callers can show any failure to
/// the user through its [`std::fmt::Display`] message.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Underlying I/O error (permission denied, disk full, ...).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Workbook could not be opened or read (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[cfg(feature = "excel")]
    /// Workbook could not be written (feature-gated behind `excel`).
    #[error("xlsx write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    /// CSV read or write error, including malformed bodies (e.g. ragged rows).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is not one of the accepted dataset formats.
    #[error("unsupported file format '{extension}': only .csv and .xlsx files are accepted")]
    UnsupportedFormat { extension: String },

    /// The dataset file does not exist at operation time.
    #[error("file '{}' not found", .path.display())]
    FileNotFound { path: PathBuf },

    /// The file body does not match its declared format.
    #[error("failed to parse dataset: {message}")]
    ParseFailure { message: String },

    /// A cleaning option was not recognised.
    #[error("invalid cleaning option '{value}' (expected none, mean, median, mode or drop)")]
    ConfigInvalid { value: String },

    /// A dataset name is not a plain file name inside the storage root.
    #[error("invalid dataset name '{name}'")]
    InvalidFilename { name: String },
}
