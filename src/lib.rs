//! `tabular-insight` loads tabular datasets (`.csv`, `.xlsx`) into an in-memory
//! [`types::DataSet`], profiles them, summarises them as charts, renders HTML report fragments,
//! and applies simple cleaning operations whose result is written back next to the original.
//!
//! ## Pipeline
//!
//! - **Inspection**: [`ingestion::load_dataset`] -> [`profiling::profile`],
//!   [`charts::summarize`] -> [`render::InspectionView`]
//! - **Cleaning**: [`ingestion::load_dataset`] -> [`cleaning::clean`] ->
//!   [`export::write_dataset`]
//!
//! [`workspace::Workspace`] wraps both pipelines around a storage directory and is what the
//! `tabular-insight` binary drives.
//!
//! ## Loading
//!
//! Column types are inferred, never declared. Each column gets the narrowest of
//! [`types::DataType::Int64`], [`types::DataType::Float64`], [`types::DataType::Bool`] and
//! [`types::DataType::Utf8`] that fits every present value. Empty cells and the usual null
//! tokens (`NA`, `NaN`, `null`, ...) become [`types::Value::Null`].
//!
//! ```no_run
//! use tabular_insight::ingestion::{load_dataset, LoadOptions};
//!
//! # fn main() -> Result<(), tabular_insight::DatasetError> {
//! let ds = load_dataset("datasets/data.csv", &LoadOptions::default())?;
//! for field in &ds.schema.fields {
//!     println!("{}: {}", field.name, field.data_type);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Profiling and cleaning
//!
//! ```rust
//! use tabular_insight::cleaning::{clean, CleaningConfig, MissingStrategy};
//! use tabular_insight::profiling::profile;
//! use tabular_insight::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("age", DataType::Int64),
//!     Field::new("city", DataType::Utf8),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(25), Value::Utf8("NY".to_string())],
//!         vec![Value::Null, Value::Utf8("NY".to_string())],
//!         vec![Value::Int64(30), Value::Utf8("LA".to_string())],
//!     ],
//! );
//! assert_eq!(profile(&ds).missing_count("age"), Some(1));
//!
//! let cleaned = clean(
//!     &ds,
//!     &CleaningConfig { strategy: MissingStrategy::Mean, remove_duplicates: false },
//! );
//! assert_eq!(cleaned.rows[1][0], Value::Float64(27.5));
//! assert_eq!(profile(&cleaned).missing_count("age"), Some(0));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: format detection, CSV/xlsx loaders, type inference, load observers
//! - [`types`]: schema + in-memory dataset types
//! - [`processing`]: column reductions and value frequencies
//! - [`profiling`]: statistics and data-quality report
//! - [`charts`]: Vega-Lite chart specs
//! - [`cleaning`]: missing-value strategies and duplicate removal
//! - [`export`]: CSV/xlsx writers
//! - [`render`]: HTML fragments
//! - [`workspace`]: storage root and the user-facing operations
//! - [`error`]: the shared error type

pub mod charts;
pub mod cleaning;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod processing;
pub mod profiling;
pub mod render;
pub mod types;
pub mod workspace;

pub use error::{DatasetError, DatasetResult};
