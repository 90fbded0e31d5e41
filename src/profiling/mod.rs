//! Dataset profiling.
//!
//! [`profile`] takes a read-only snapshot of a [`DataSet`]: shape, column types, descriptive
//! statistics, missing values, duplicate rows and numeric type issues.
//!
//! ```rust
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
//!
//! let report = profile(&ds);
//! assert_eq!(report.shape, (3, 2));
//! assert_eq!(report.missing_count("age"), Some(1));
//! assert_eq!(report.duplicate_rows, 0);
//! ```

pub mod describe;
pub mod quality;

use serde::Serialize;

use crate::error::DatasetResult;
use crate::types::{DataSet, DataType};

pub use describe::{describe, CategoricalSummary, ColumnStats, NumericSummary, Summary};
pub use quality::{duplicate_row_count, missing_counts, type_issues, ColumnCount};

/// Declared type of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDType {
    pub column: String,
    pub dtype: DataType,
}

/// Read-only profile of a dataset at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    /// `(rows, columns)`.
    pub shape: (usize, usize),
    pub dtypes: Vec<ColumnDType>,
    pub statistics: Vec<ColumnStats>,
    /// Missing-value count for every column.
    pub missing: Vec<ColumnCount>,
    pub duplicate_rows: usize,
    /// Numeric columns with coercion failures only; empty when there are no issues.
    pub type_issues: Vec<ColumnCount>,
}

impl ProfileReport {
    /// Missing-value count of `column`, if the column exists.
    pub fn missing_count(&self, column: &str) -> Option<usize> {
        find_count(&self.missing, column)
    }

    /// Coercion-failure count of `column`, if it was reported.
    pub fn type_issue_count(&self, column: &str) -> Option<usize> {
        find_count(&self.type_issues, column)
    }

    /// `true` if any numeric column has coercion failures.
    pub fn has_type_issues(&self) -> bool {
        !self.type_issues.is_empty()
    }

    /// Pretty-printed JSON form of the report.
    pub fn to_json(&self) -> DatasetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn find_count(counts: &[ColumnCount], column: &str) -> Option<usize> {
    counts.iter().find(|c| c.column == column).map(|c| c.count)
}

/// Profile a dataset.
pub fn profile(dataset: &DataSet) -> ProfileReport {
    let report = ProfileReport {
        shape: dataset.shape(),
        dtypes: dataset
            .schema
            .fields
            .iter()
            .map(|f| ColumnDType {
                column: f.name.clone(),
                dtype: f.data_type,
            })
            .collect(),
        statistics: describe(dataset),
        missing: missing_counts(dataset),
        duplicate_rows: duplicate_row_count(dataset),
        type_issues: type_issues(dataset),
    };
    tracing::debug!(
        shape = ?report.shape,
        duplicate_rows = report.duplicate_rows,
        type_issue_columns = report.type_issues.len(),
        "profiled dataset"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, Schema, Value};

    #[test]
    fn shape_matches_dataset_dimensions() {
        let schema = Schema::new(vec![
            Field::new("a", DataType::Int64),
            Field::new("b", DataType::Float64),
            Field::new("c", DataType::Utf8),
        ]);
        let rows = (0..7)
            .map(|i| vec![Value::Int64(i), Value::Float64(i as f64), Value::Utf8(i.to_string())])
            .collect();
        let report = profile(&DataSet::new(schema, rows));
        assert_eq!(report.shape, (7, 3));
        assert_eq!(report.statistics.len(), 3);
        assert_eq!(report.dtypes[2].dtype, DataType::Utf8);
    }

    #[test]
    fn report_serializes_to_json() {
        let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Float64(1.0)], vec![Value::Null]]);
        let json = profile(&ds).to_json().unwrap();
        assert!(json.contains("\"shape\""));
        assert!(json.contains("\"25%\""));
        assert!(json.contains("\"dtype\": \"Float64\""));
    }

    #[test]
    fn empty_dataset_profiles_cleanly() {
        let report = profile(&DataSet::default());
        assert_eq!(report.shape, (0, 0));
        assert!(!report.has_type_issues());
        assert_eq!(report.missing_count("anything"), None);
    }
}
