//! Data-quality checks: missing values, duplicate rows, numeric coercion failures.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{row_key, DataSet, Value};

/// A per-column count (missing values, coercion failures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnCount {
    pub column: String,
    pub count: usize,
}

/// Number of [`Value::Null`] entries per column, for every column in order (zeros included).
pub fn missing_counts(dataset: &DataSet) -> Vec<ColumnCount> {
    dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| ColumnCount {
            column: field.name.clone(),
            count: dataset.column(idx).filter(|v| v.is_null()).count(),
        })
        .collect()
}

/// Rows that repeat an earlier row exactly; a row present `k` times contributes `k - 1`.
pub fn duplicate_row_count(dataset: &DataSet) -> usize {
    let mut seen = HashSet::with_capacity(dataset.row_count());
    dataset
        .rows
        .iter()
        .filter(|row| !seen.insert(row_key(row)))
        .count()
}

/// Re-coerce every value of each numeric column; report columns with failures.
///
/// A value fails when it does not yield a number: a null or a NaN float. Infinities are
/// numbers and pass.
/// Only columns declared `Int64`/`Float64` are checked, and columns without failures are
/// omitted. An empty result means no issues.
pub fn type_issues(dataset: &DataSet) -> Vec<ColumnCount> {
    dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.data_type.is_numeric())
        .map(|(idx, field)| ColumnCount {
            column: field.name.clone(),
            count: dataset.column(idx).filter(|v| !coerces_to_number(v)).count(),
        })
        .filter(|c| c.count > 0)
        .collect()
}

fn coerces_to_number(value: &Value) -> bool {
    value.as_f64().is_some_and(|f| !f.is_nan())
}
