//! Column reductions for [`crate::types::DataSet`].
//!
//! [`reduce`] is the typed entry point; the free functions over `&[f64]` are shared with the
//! profiler and the cleaner so both see the same arithmetic.

use crate::types::{DataSet, Value};

/// Reductions used to fill missing numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Arithmetic mean of numeric values, ignoring nulls.
    Mean,
    /// Median of numeric values, ignoring nulls.
    Median,
}

impl ReduceOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
        }
    }
}

/// Reduce column `idx` using a built-in [`ReduceOp`].
///
/// Columns are addressed by position because header names may repeat. Returns `None` when
/// `idx` is out of range, the column is not numeric, or it has no non-null values.
pub fn reduce(dataset: &DataSet, idx: usize, op: ReduceOp) -> Option<f64> {
    let field = dataset.schema.fields.get(idx)?;
    if !field.data_type.is_numeric() {
        return None;
    }
    let values = numeric_values(dataset, idx);
    match op {
        ReduceOp::Mean => mean(&values),
        ReduceOp::Median => median(values),
    }
}

/// Non-null numeric values of column `idx`, widened to `f64`, in row order.
pub fn numeric_values(dataset: &DataSet, idx: usize) -> Vec<f64> {
    dataset.column(idx).filter_map(Value::as_f64).collect()
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation; `None` with fewer than two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Median; `None` for an empty input.
pub fn median(mut values: Vec<f64>) -> Option<f64> {
    sort_floats(&mut values);
    quantile(&values, 0.5)
}

/// Sort ascending with a total order (infinities at the ends).
pub fn sort_floats(values: &mut [f64]) {
    values.sort_by(f64::total_cmp);
}

/// Quantile `q` (0..=1) of an ascending-sorted slice, by linear interpolation between the
/// closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let (a, b) = (sorted[lo], sorted[hi]);
    if lo == hi || a == b {
        Some(a)
    } else {
        Some(a + (b - a) * (pos - lo as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema};

    fn numeric_dataset_with_nulls() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("score", DataType::Float64),
            Field::new("name", DataType::Utf8),
        ]);

        let rows = vec![
            vec![Value::Int64(1), Value::Float64(10.0), Value::Utf8("a".to_string())],
            vec![Value::Int64(2), Value::Null, Value::Null],
            vec![Value::Int64(3), Value::Float64(5.5), Value::Utf8("c".to_string())],
        ];

        DataSet::new(schema, rows)
    }

    #[test]
    fn reduce_mean_and_median_ignore_nulls() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, 0, ReduceOp::Mean), Some(2.0));
        assert_eq!(reduce(&ds, 1, ReduceOp::Mean), Some(7.75));
        assert_eq!(reduce(&ds, 1, ReduceOp::Median), Some(7.75));
    }

    #[test]
    fn reduce_on_text_or_missing_column_is_none() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, 2, ReduceOp::Mean), None);
        assert_eq!(reduce(&ds, 3, ReduceOp::Median), None);
    }

    #[test]
    fn reduce_addresses_repeated_names_by_position() {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Int64),
            Field::new("x", DataType::Int64),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Int64(10), Value::Int64(1)],
                vec![Value::Int64(20), Value::Int64(3)],
            ],
        );
        assert_eq!(reduce(&ds, 0, ReduceOp::Mean), Some(15.0));
        assert_eq!(reduce(&ds, 1, ReduceOp::Mean), Some(2.0));
    }

    #[test]
    fn reduce_returns_none_if_all_values_null() {
        let schema = Schema::new(vec![Field::new("score", DataType::Float64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Null], vec![Value::Null]]);
        assert_eq!(reduce(&ds, 0, ReduceOp::Mean), None);
        assert_eq!(reduce(&ds, 0, ReduceOp::Median), None);
    }

    #[test]
    fn quantiles_interpolate_between_ranks() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&sorted, 0.75), Some(3.25));
        assert_eq!(quantile(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn std_needs_two_values() {
        assert_eq!(sample_std(&[4.0]), None);
        assert_eq!(sample_std(&[2.0, 4.0]), Some(2.0_f64.sqrt()));
    }

    #[test]
    fn median_of_odd_count_is_middle_value() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), Some(2.0));
    }
}
