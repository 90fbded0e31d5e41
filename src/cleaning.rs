//! Dataset cleaning: missing-value handling followed by optional duplicate removal.
//!
//! ```rust
//! use tabular_insight::cleaning::{clean, CleaningConfig, MissingStrategy};
//! use tabular_insight::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![Field::new("age", DataType::Int64)]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![vec![Value::Int64(25)], vec![Value::Null], vec![Value::Int64(30)]],
//! );
//!
//! let config = CleaningConfig { strategy: MissingStrategy::Mean, remove_duplicates: false };
//! let cleaned = clean(&ds, &config);
//! assert_eq!(cleaned.rows[1], vec![Value::Float64(27.5)]);
//! assert_eq!(cleaned.schema.fields[0].data_type, DataType::Float64);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;
use crate::processing::{most_frequent, reduce, ReduceOp};
use crate::types::{row_key, DataSet, DataType, Field, Schema, Value};

/// How missing values are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingStrategy {
    /// Leave missing values in place.
    #[default]
    None,
    /// Fill numeric columns with the column mean.
    Mean,
    /// Fill numeric columns with the column median.
    Median,
    /// Fill every column with its most frequent value.
    Mode,
    /// Remove rows containing any missing value.
    Drop,
}

impl MissingStrategy {
    pub const ALL: [Self; 5] = [Self::None, Self::Mean, Self::Median, Self::Mode, Self::Drop];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::Drop => "drop",
        }
    }

    /// Lenient parse for submitted form values: anything unrecognised means [`Self::None`].
    pub fn from_form_value(value: &str) -> Self {
        value.parse().unwrap_or_else(|err: DatasetError| {
            tracing::warn!(value, error = %err, "ignoring unrecognised missing-value option");
            Self::None
        })
    }
}

impl fmt::Display for MissingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingStrategy {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DatasetError::ConfigInvalid {
                value: s.to_string(),
            })
    }
}

/// Options for [`clean`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CleaningConfig {
    pub strategy: MissingStrategy,
    /// Drop repeated rows after missing-value handling, keeping the first occurrence.
    pub remove_duplicates: bool,
}

/// Produce a cleaned copy of `dataset`.
///
/// Column names and order are preserved. Column types are preserved, except that `Int64`
/// columns filled with a non-integral mean or median become `Float64`.
pub fn clean(dataset: &DataSet, config: &CleaningConfig) -> DataSet {
    let handled = match config.strategy {
        MissingStrategy::None => dataset.clone(),
        MissingStrategy::Mean => fill_numeric(dataset, ReduceOp::Mean),
        MissingStrategy::Median => fill_numeric(dataset, ReduceOp::Median),
        MissingStrategy::Mode => fill_mode(dataset),
        MissingStrategy::Drop => drop_incomplete_rows(dataset),
    };

    if config.remove_duplicates {
        remove_duplicate_rows(&handled)
    } else {
        handled
    }
}

/// Replacement for the nulls of one column.
struct ColumnFill {
    value: Value,
    /// Widen the column's integers to floats.
    promote: bool,
}

fn fill_numeric(dataset: &DataSet, op: ReduceOp) -> DataSet {
    let plan = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            if !field.data_type.is_numeric() || !has_nulls(dataset, idx) {
                return None;
            }
            let fill = reduce(dataset, idx, op)?;
            Some(match field.data_type {
                DataType::Int64 if is_whole(fill) => ColumnFill {
                    value: Value::Int64(fill as i64),
                    promote: false,
                },
                DataType::Int64 => ColumnFill {
                    value: Value::Float64(fill),
                    promote: true,
                },
                _ => ColumnFill {
                    value: Value::Float64(fill),
                    promote: false,
                },
            })
        })
        .collect();
    apply_fills(dataset, plan, op.as_str())
}

fn fill_mode(dataset: &DataSet) -> DataSet {
    let plan = (0..dataset.column_count())
        .map(|idx| {
            if !has_nulls(dataset, idx) {
                return None;
            }
            most_frequent(dataset, idx).map(|(value, _)| ColumnFill {
                value: value.clone(),
                promote: false,
            })
        })
        .collect();
    apply_fills(dataset, plan, "mode")
}

fn apply_fills(dataset: &DataSet, plan: Vec<Option<ColumnFill>>, step: &str) -> DataSet {
    let schema = Schema::new(
        dataset
            .schema
            .fields
            .iter()
            .zip(&plan)
            .map(|(field, fill)| match fill {
                Some(fill) if fill.promote => Field::new(field.name.clone(), DataType::Float64),
                _ => field.clone(),
            })
            .collect(),
    );

    let mut filled = 0usize;
    let cleaned = dataset.map_rows(schema, |row| {
        row.iter()
            .zip(&plan)
            .map(|(value, fill)| match (value, fill) {
                (Value::Null, Some(fill)) => {
                    filled += 1;
                    fill.value.clone()
                }
                (Value::Int64(i), Some(fill)) if fill.promote => Value::Float64(*i as f64),
                _ => value.clone(),
            })
            .collect()
    });
    tracing::debug!(step, cells_filled = filled, "filled missing values");
    cleaned
}

fn drop_incomplete_rows(dataset: &DataSet) -> DataSet {
    let cleaned = dataset.filter_rows(|row| !row.iter().any(Value::is_null));
    tracing::debug!(
        rows_removed = dataset.row_count() - cleaned.row_count(),
        "dropped rows with missing values"
    );
    cleaned
}

fn remove_duplicate_rows(dataset: &DataSet) -> DataSet {
    let mut seen = HashSet::with_capacity(dataset.row_count());
    let rows: Vec<Vec<Value>> = dataset
        .rows
        .iter()
        .filter(|row| seen.insert(row_key(row)))
        .cloned()
        .collect();
    tracing::debug!(
        rows_removed = dataset.row_count() - rows.len(),
        "removed duplicate rows"
    );
    DataSet::new(dataset.schema.clone(), rows)
}

fn has_nulls(dataset: &DataSet, idx: usize) -> bool {
    dataset.column(idx).any(Value::is_null)
}

fn is_whole(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(strategy: MissingStrategy, remove_duplicates: bool) -> CleaningConfig {
        CleaningConfig {
            strategy,
            remove_duplicates,
        }
    }

    fn age_city(rows: &[(Option<i64>, Option<&str>)]) -> DataSet {
        let schema = Schema::new(vec![
            Field::new("age", DataType::Int64),
            Field::new("city", DataType::Utf8),
        ]);
        let rows = rows
            .iter()
            .map(|(age, city)| {
                vec![
                    age.map_or(Value::Null, Value::Int64),
                    city.map_or(Value::Null, |c| Value::Utf8(c.to_string())),
                ]
            })
            .collect();
        DataSet::new(schema, rows)
    }

    #[test]
    fn mean_fill_keeps_integral_int_columns() {
        let ds = age_city(&[(Some(1), Some("a")), (None, Some("b")), (Some(3), Some("c"))]);
        let cleaned = clean(&ds, &config(MissingStrategy::Mean, false));
        assert_eq!(cleaned.schema.fields[0].data_type, DataType::Int64);
        let ages: Vec<&Value> = cleaned.column(0).collect();
        assert_eq!(ages, vec![&Value::Int64(1), &Value::Int64(2), &Value::Int64(3)]);
    }

    #[test]
    fn mean_fill_promotes_when_fractional() {
        let ds = age_city(&[(Some(25), Some("NY")), (None, Some("NY")), (Some(30), Some("LA"))]);
        let cleaned = clean(&ds, &config(MissingStrategy::Mean, false));
        assert_eq!(cleaned.schema.fields[0].data_type, DataType::Float64);
        let ages: Vec<&Value> = cleaned.column(0).collect();
        assert_eq!(
            ages,
            vec![&Value::Float64(25.0), &Value::Float64(27.5), &Value::Float64(30.0)]
        );
        assert_eq!(cleaned.schema.fields[1], ds.schema.fields[1]);
    }

    #[test]
    fn median_fill_ignores_text_columns() {
        let ds = age_city(&[(Some(1), None), (None, Some("x")), (Some(5), Some("y")), (Some(2), None)]);
        let cleaned = clean(&ds, &config(MissingStrategy::Median, false));
        assert_eq!(cleaned.rows[1][0], Value::Int64(2));
        assert_eq!(cleaned.rows[0][1], Value::Null);
    }

    #[test]
    fn numeric_fill_uses_each_column_of_a_repeated_name() {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Int64),
            Field::new("x", DataType::Int64),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Int64(10), Value::Int64(1)],
                vec![Value::Int64(20), Value::Null],
                vec![Value::Int64(30), Value::Int64(3)],
            ],
        );
        for strategy in [MissingStrategy::Mean, MissingStrategy::Median] {
            let cleaned = clean(&ds, &config(strategy, false));
            assert_eq!(cleaned.rows[1], vec![Value::Int64(20), Value::Int64(2)], "{strategy}");
        }
    }

    #[test]
    fn numeric_fill_skips_text_column_sharing_the_name() {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Utf8),
            Field::new("x", DataType::Int64),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Utf8("a".to_string()), Value::Int64(1)],
                vec![Value::Utf8("b".to_string()), Value::Null],
                vec![Value::Utf8("c".to_string()), Value::Int64(3)],
            ],
        );
        let cleaned = clean(&ds, &config(MissingStrategy::Mean, false));
        assert_eq!(cleaned.rows[1], vec![Value::Utf8("b".to_string()), Value::Int64(2)]);
    }

    #[test]
    fn mode_fill_uses_most_frequent_value() {
        let ds = age_city(&[(Some(1), Some("a")), (Some(1), Some("b")), (None, None), (Some(2), Some("b"))]);
        let cleaned = clean(&ds, &config(MissingStrategy::Mode, false));
        assert_eq!(cleaned.rows[2], vec![Value::Int64(1), Value::Utf8("b".to_string())]);
    }

    #[test]
    fn mode_fill_on_distinct_values_takes_the_first() {
        let ds = age_city(&[(Some(7), Some("x")), (None, Some("y")), (Some(9), None)]);
        let cleaned = clean(&ds, &config(MissingStrategy::Mode, false));
        assert_eq!(cleaned.rows[1][0], Value::Int64(7));
        assert_eq!(cleaned.rows[2][1], Value::Utf8("x".to_string()));
    }

    #[test]
    fn all_null_columns_are_left_alone() {
        let ds = age_city(&[(None, Some("a")), (None, Some("b"))]);
        for strategy in [MissingStrategy::Mean, MissingStrategy::Median, MissingStrategy::Mode] {
            let cleaned = clean(&ds, &config(strategy, false));
            assert_eq!(cleaned, ds, "{strategy}");
        }
    }

    #[test]
    fn drop_removes_rows_with_any_null() {
        let ds = age_city(&[(Some(25), Some("NY")), (None, Some("NY")), (Some(30), None)]);
        let cleaned = clean(&ds, &config(MissingStrategy::Drop, false));
        assert_eq!(cleaned.shape(), (1, 2));
        assert_eq!(cleaned.rows[0][0], Value::Int64(25));
    }

    #[test]
    fn dedup_keeps_first_occurrence_after_filling() {
        let ds = age_city(&[(Some(1), Some("a")), (None, Some("a")), (Some(1), Some("a")), (Some(2), Some("b"))]);
        // Mode fills the null with 1, which creates another duplicate of row 0.
        let cleaned = clean(&ds, &config(MissingStrategy::Mode, true));
        assert_eq!(cleaned, age_city(&[(Some(1), Some("a")), (Some(2), Some("b"))]));
    }

    #[test]
    fn none_without_dedup_is_identity() {
        let ds = age_city(&[(Some(1), None), (Some(1), None)]);
        assert_eq!(clean(&ds, &CleaningConfig::default()), ds);
    }

    #[test]
    fn strategy_parsing() {
        assert_eq!("median".parse::<MissingStrategy>().unwrap(), MissingStrategy::Median);
        assert_eq!(" Drop ".parse::<MissingStrategy>().unwrap(), MissingStrategy::Drop);
        assert!(matches!(
            "bogus".parse::<MissingStrategy>(),
            Err(DatasetError::ConfigInvalid { value }) if value == "bogus"
        ));
        assert_eq!(MissingStrategy::from_form_value("bogus"), MissingStrategy::None);
        assert_eq!(MissingStrategy::from_form_value("mode"), MissingStrategy::Mode);
    }
}
