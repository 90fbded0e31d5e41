//! In-memory column arithmetic.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by loading.
//! Row filtering and mapping live on [`crate::types::DataSet`] itself
//! ([`crate::types::DataSet::filter_rows`], [`crate::types::DataSet::map_rows`]).
//!
//! ## Example
//!
//! ```rust
//! use tabular_insight::processing::{reduce, ReduceOp};
//! use tabular_insight::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![Field::new("age", DataType::Int64)]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![vec![Value::Int64(25)], vec![Value::Null], vec![Value::Int64(30)]],
//! );
//!
//! assert_eq!(reduce(&ds, 0, ReduceOp::Mean), Some(27.5));
//! assert_eq!(reduce(&ds, 0, ReduceOp::Median), Some(27.5));
//! ```

pub mod frequency;
pub mod reduce;

pub use frequency::{most_frequent, ranked_value_counts, value_counts};
pub use reduce::{reduce, ReduceOp};
