//! Value frequency counts.

use std::collections::HashMap;

use crate::types::{DataSet, Value, ValueKey};

/// Distinct non-null values of column `idx` with their counts, in first-encountered order.
pub fn value_counts(dataset: &DataSet, idx: usize) -> Vec<(&Value, usize)> {
    let mut positions: HashMap<ValueKey<'_>, usize> = HashMap::new();
    let mut counts: Vec<(&Value, usize)> = Vec::new();
    for value in dataset.column(idx).filter(|v| !v.is_null()) {
        match positions.get(&value.key()) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(value.key(), counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts
}

/// [`value_counts`] sorted by descending count; equal counts keep first-encountered order.
pub fn ranked_value_counts(dataset: &DataSet, idx: usize) -> Vec<(&Value, usize)> {
    let mut counts = value_counts(dataset, idx);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Most frequent non-null value of column `idx` and its count.
///
/// Ties (including a column of all-distinct values) resolve to the value encountered first.
pub fn most_frequent(dataset: &DataSet, idx: usize) -> Option<(&Value, usize)> {
    ranked_value_counts(dataset, idx).into_iter().next()
}
