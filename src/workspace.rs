//! Dataset storage root and the operations exposed to callers (CLI, embedding applications).
//!
//! Datasets are addressed by plain file name inside [`WorkspaceConfig::root`]. Nothing is cached:
//! every operation reloads the file from disk.
//!
//! ```no_run
//! use tabular_insight::cleaning::{CleaningConfig, MissingStrategy};
//! use tabular_insight::workspace::{Workspace, WorkspaceConfig};
//!
//! # fn main() -> Result<(), tabular_insight::DatasetError> {
//! let ws = Workspace::new(WorkspaceConfig::default())?;
//! let name = ws.store("uploads/data.csv")?;
//! let cleaned = ws.clean(
//!     &name,
//!     &CleaningConfig { strategy: MissingStrategy::Mean, remove_duplicates: true },
//! )?;
//! let inspection = ws.inspect(&cleaned)?;
//! println!("{:?}", inspection.report.shape);
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::charts::{summarize, ChartSpec};
use crate::cleaning::{self, CleaningConfig, MissingStrategy};
use crate::error::{DatasetError, DatasetResult};
use crate::export::write_dataset;
use crate::ingestion::{load_dataset, DatasetFormat, IngestionObserver, LoadOptions};
use crate::profiling::{profile, ProfileReport};
use crate::render::InspectionView;
use crate::types::DataSet;

/// Default storage directory, relative to the working directory.
pub const DEFAULT_ROOT: &str = "datasets";

/// Where datasets are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub root: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
        }
    }
}

/// Everything shown for one dataset.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub filename: String,
    pub report: ProfileReport,
    pub charts: Vec<ChartSpec>,
    pub view: InspectionView,
}

/// A storage root holding uploaded and cleaned datasets.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    load_options: LoadOptions,
}

impl Workspace {
    /// Open the workspace, creating the storage root if it does not exist.
    pub fn new(config: WorkspaceConfig) -> DatasetResult<Self> {
        fs::create_dir_all(&config.root)?;
        Ok(Self {
            root: config.root,
            load_options: LoadOptions::default(),
        })
    }

    /// Report every load to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn IngestionObserver>) -> Self {
        self.load_options.observer = Some(observer);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copy the file at `source` into the storage root under its own file name.
    ///
    /// Only `.csv` and `.xlsx` files are accepted. An existing dataset with the same name is
    /// replaced.
    pub fn store(&self, source: impl AsRef<Path>) -> DatasetResult<String> {
        let source = source.as_ref();
        let filename = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DatasetError::InvalidFilename {
                name: source.display().to_string(),
            })?
            .to_string();
        DatasetFormat::from_path(&filename)?;
        check_plain_name(&filename)?;
        if !source.is_file() {
            return Err(DatasetError::FileNotFound {
                path: source.to_path_buf(),
            });
        }

        let target = self.root.join(&filename);
        if !is_same_file(source, &target) {
            fs::copy(source, &target)?;
        }
        tracing::info!(filename = %filename, root = %self.root.display(), "stored dataset");
        Ok(filename)
    }

    /// Path of a stored dataset.
    pub fn resolve(&self, filename: &str) -> DatasetResult<PathBuf> {
        check_plain_name(filename)?;
        let path = self.root.join(filename);
        if path.is_file() {
            Ok(path)
        } else {
            Err(DatasetError::FileNotFound { path })
        }
    }

    pub fn load(&self, filename: &str) -> DatasetResult<DataSet> {
        let path = self.resolve(filename)?;
        load_dataset(path, &self.load_options)
    }

    /// Load, profile, chart and render a stored dataset.
    pub fn inspect(&self, filename: &str) -> DatasetResult<Inspection> {
        let dataset = self.load(filename)?;
        let report = profile(&dataset);
        let charts = summarize(&dataset);
        let view = InspectionView::new(&dataset, &report, &charts);
        Ok(Inspection {
            filename: filename.to_string(),
            report,
            charts,
            view,
        })
    }

    /// Clean a stored dataset and write the result next to it. Returns the cleaned file name.
    pub fn clean(&self, filename: &str, config: &CleaningConfig) -> DatasetResult<String> {
        let dataset = self.load(filename)?;
        let cleaned = cleaning::clean(&dataset, config);
        tracing::debug!(
            filename,
            strategy = %config.strategy,
            remove_duplicates = config.remove_duplicates,
            before = ?dataset.shape(),
            after = ?cleaned.shape(),
            "cleaned dataset"
        );
        write_dataset(&cleaned, &self.root, filename)
    }

    /// [`Self::clean`] driven by submitted form fields.
    ///
    /// An absent or unrecognised `missing_option` means no missing-value handling. Duplicates
    /// are removed when the `remove_duplicates` field was present at all.
    pub fn clean_form(
        &self,
        filename: &str,
        missing_option: Option<&str>,
        remove_duplicates_present: bool,
    ) -> DatasetResult<String> {
        let config = CleaningConfig {
            strategy: missing_option.map_or(MissingStrategy::None, MissingStrategy::from_form_value),
            remove_duplicates: remove_duplicates_present,
        };
        self.clean(filename, &config)
    }

    /// Raw bytes of a stored dataset.
    pub fn download(&self, filename: &str) -> DatasetResult<Vec<u8>> {
        let path = self.resolve(filename)?;
        Ok(fs::read(path)?)
    }

    /// Stored dataset file names (accepted extensions only), sorted.
    pub fn list(&self) -> DatasetResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if DatasetFormat::from_path(name).is_ok() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

fn check_plain_name(name: &str) -> DatasetResult<()> {
    let path = Path::new(name);
    let plain = !name.is_empty()
        && path.file_name().and_then(|n| n.to_str()) == Some(name)
        && !name.contains(['/', '\\']);
    if plain {
        Ok(())
    } else {
        Err(DatasetError::InvalidFilename {
            name: name.to_string(),
        })
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
