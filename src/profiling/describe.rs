//! Descriptive statistics for every column.
//!
//! Numeric columns get a count/mean/std/min/quartiles/max summary; text and boolean columns
//! get count/unique/top/freq.

use serde::Serialize;

use crate::processing::reduce::{mean, numeric_values, quantile, sample_std, sort_floats};
use crate::processing::{most_frequent, value_counts};
use crate::types::{DataSet, DataType};

/// Statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: String,
    pub dtype: DataType,
    pub summary: Summary,
}

/// Type-dependent part of [`ColumnStats`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Summary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

impl Summary {
    /// Number of non-null values.
    pub fn count(&self) -> usize {
        match self {
            Self::Numeric(s) => s.count,
            Self::Categorical(s) => s.count,
        }
    }
}

/// Five-number summary plus mean and standard deviation. Every field is `None` when the
/// column has no values; `std` is also `None` with a single value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub q50: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Frequency summary of a text or boolean column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: Option<usize>,
}

/// Summarise every column, in column order.
pub fn describe(dataset: &DataSet) -> Vec<ColumnStats> {
    dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let summary = if field.data_type.is_numeric() {
                Summary::Numeric(describe_numeric(dataset, idx))
            } else {
                Summary::Categorical(describe_categorical(dataset, idx))
            };
            ColumnStats {
                column: field.name.clone(),
                dtype: field.data_type,
                summary,
            }
        })
        .collect()
}

fn describe_numeric(dataset: &DataSet, idx: usize) -> NumericSummary {
    let mut values = numeric_values(dataset, idx);
    let mean = mean(&values);
    let std = sample_std(&values);
    sort_floats(&mut values);
    NumericSummary {
        count: values.len(),
        mean,
        std,
        min: values.first().copied(),
        q25: quantile(&values, 0.25),
        q50: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values.last().copied(),
    }
}

fn describe_categorical(dataset: &DataSet, idx: usize) -> CategoricalSummary {
    let counts = value_counts(dataset, idx);
    let top = most_frequent(dataset, idx);
    CategoricalSummary {
        count: counts.iter().map(|(_, n)| n).sum(),
        unique: counts.len(),
        top: top.map(|(v, _)| v.to_string()),
        freq: top.map(|(_, n)| n),
    }
}
