//! Dataset loading.
//!
//! Most callers should use [`load_dataset`] (from [`unified`]) which:
//!
//! - detects the format by file extension (or you can force one via [`LoadOptions`])
//! - loads the file into an in-memory [`crate::types::DataSet`], inferring column types
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod infer;
pub mod observability;
pub mod unified;

pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver,
};
pub use unified::{load, load_dataset, DatasetFormat, LoadOptions};
