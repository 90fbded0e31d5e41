//! Writing datasets back to disk.
//!
//! [`write_dataset`] derives the output name from the original upload ([`cleaned_filename`])
//! and keeps the original's format family. Format-specific writers live under:
//! - [`csv`]
//! - `excel` (feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;

use std::path::Path;

use crate::error::DatasetResult;
use crate::ingestion::DatasetFormat;
use crate::types::DataSet;

/// Prefix marking a derived (cleaned) dataset.
pub const CLEANED_PREFIX: &str = "cleaned_";

/// Name of the cleaned counterpart of `original`. Already-prefixed names are returned as is.
pub fn cleaned_filename(original: &str) -> String {
    if original.starts_with(CLEANED_PREFIX) {
        original.to_string()
    } else {
        format!("{CLEANED_PREFIX}{original}")
    }
}

/// Write `dataset` into `dir` under [`cleaned_filename`]`(original_filename)`, in the format of
/// the original's extension. Overwrites any existing file and returns the new file name.
pub fn write_dataset(
    dataset: &DataSet,
    dir: impl AsRef<Path>,
    original_filename: &str,
) -> DatasetResult<String> {
    let format = DatasetFormat::from_path(original_filename)?;
    let filename = cleaned_filename(original_filename);
    let path = dir.as_ref().join(&filename);
    write_dataset_to_path(dataset, &path, format)?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "wrote dataset"
    );
    Ok(filename)
}

/// Serialise `dataset` to `path` as `format`, replacing the file if it exists.
pub fn write_dataset_to_path(
    dataset: &DataSet,
    path: impl AsRef<Path>,
    format: DatasetFormat,
) -> DatasetResult<()> {
    let path = path.as_ref();
    match format {
        DatasetFormat::Csv => csv::write_csv_to_path(dataset, path),
        DatasetFormat::Excel => write_excel_dispatch(dataset, path),
    }
}

fn write_excel_dispatch(dataset: &DataSet, path: &Path) -> DatasetResult<()> {
    let _ = (dataset, path);

    #[cfg(feature = "excel")]
    {
        excel::write_excel_to_path(dataset, path)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(crate::error::DatasetError::UnsupportedFormat {
            extension: "xlsx (excel support not enabled; enable cargo feature 'excel')".to_string(),
        })
    }
}
