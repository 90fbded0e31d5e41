//! Unified loading entrypoint.
//!
//! Most callers should use [`load_dataset`], which loads a file into an in-memory
//! [`crate::types::DataSet`] with inferred column types.
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the file extension.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, DatasetResult};
use crate::types::DataSet;

use super::csv;
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Accepted dataset formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetFormat {
    /// Comma-separated values (`.csv`).
    Csv,
    /// Spreadsheet workbook (`.xlsx`, feature-gated behind `excel`).
    Excel,
}

impl DatasetFormat {
    /// Parse a format from a file extension (case-insensitive, with or without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Format of a path or file name, from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| DatasetError::UnsupportedFormat {
            extension: ext.to_string(),
        })
    }

    /// Canonical file extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xlsx",
        }
    }
}

/// Options controlling unified loading behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, detect the format from the file extension.
    pub format: Option<DatasetFormat>,
    /// Worksheet to read from a workbook; `None` reads the first sheet.
    pub sheet: Option<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("sheet", &self.sheet)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheet: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Load `path` as the format named by `declared_extension` (`"csv"` or `"xlsx"`).
///
/// Any other extension yields [`DatasetError::UnsupportedFormat`].
pub fn load(path: impl AsRef<Path>, declared_extension: &str) -> DatasetResult<DataSet> {
    let format = DatasetFormat::from_extension(declared_extension).ok_or_else(|| {
        DatasetError::UnsupportedFormat {
            extension: declared_extension.to_string(),
        }
    })?;
    let options = LoadOptions {
        format: Some(format),
        ..Default::default()
    };
    load_dataset(path, &options)
}

/// Unified load entry point for path-based sources.
///
/// Failure modes:
///
/// - extension not accepted -> [`DatasetError::UnsupportedFormat`]
/// - path does not exist -> [`DatasetError::FileNotFound`]
/// - malformed body -> [`DatasetError::Csv`] / [`DatasetError::Excel`] /
///   [`DatasetError::ParseFailure`]
///
/// When an observer is configured, this function reports `on_success` with row/column counts,
/// `on_failure` with a computed severity, and `on_alert` when that severity is
/// `>= options.alert_at_or_above`.
///
/// ```no_run
/// use tabular_insight::ingestion::{load_dataset, LoadOptions};
///
/// # fn main() -> Result<(), tabular_insight::DatasetError> {
/// let ds = load_dataset("datasets/data.csv", &LoadOptions::default())?;
/// println!("shape={:?}", ds.shape());
/// # Ok(())
/// # }
/// ```
pub fn load_dataset(path: impl AsRef<Path>, options: &LoadOptions) -> DatasetResult<DataSet> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => Ok(f),
        None => DatasetFormat::from_path(path),
    };

    let ctx = IngestionContext {
        path: path.to_path_buf(),
        format: format.as_ref().ok().copied(),
    };

    let result = format.and_then(|fmt| {
        if !path.is_file() {
            return Err(DatasetError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        match fmt {
            DatasetFormat::Csv => csv::load_csv_from_path(path),
            DatasetFormat::Excel => load_excel_dispatch(path, options.sheet.as_deref()),
        }
    });

    match &result {
        Ok(ds) => tracing::debug!(path = %path.display(), shape = ?ds.shape(), "loaded dataset"),
        Err(e) => tracing::debug!(path = %path.display(), error = %e, "failed to load dataset"),
    }

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: ds.row_count(),
                    columns: ds.column_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &DatasetError) -> IngestionSeverity {
    match e {
        DatasetError::Io(_) | DatasetError::FileNotFound { .. } => IngestionSeverity::Critical,
        DatasetError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        #[cfg(feature = "excel")]
        DatasetError::Excel(calamine::Error::Io(_)) => IngestionSeverity::Critical,
        _ => IngestionSeverity::Error,
    }
}

fn load_excel_dispatch(path: &Path, sheet: Option<&str>) -> DatasetResult<DataSet> {
    // Avoid unused warnings when the feature is off.
    let _ = (path, sheet);

    #[cfg(feature = "excel")]
    {
        super::excel::load_excel_from_path(path, sheet)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(DatasetError::UnsupportedFormat {
            extension: "xlsx (excel support not enabled; enable cargo feature 'excel')".to_string(),
        })
    }
}
