//! Column type inference.
//!
//! Both loaders hand over columns of [`RawCell`]s; inference picks the narrowest
//! [`DataType`] every present cell fits and converts the cells to [`Value`]s.
//!
//! Lattice, per column: all integers -> `Int64`; all numbers -> `Float64`; all booleans ->
//! `Bool`; anything else -> `Utf8`. A column with no present cells is `Float64`.

use crate::types::{format_float, DataSet, DataType, Field, Schema, Value};

/// Tokens that mark a missing value in delimited text (matched after trimming).
pub const NULL_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// A cell as read from the source file, before the column type is known.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl RawCell {
    /// Build a cell from delimited text, mapping null tokens to [`RawCell::Empty`].
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if NULL_TOKENS.contains(&trimmed) {
            Self::Empty
        } else {
            Self::Text(trimmed.to_owned())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Int,
    Float,
    Bool,
    Text,
}

impl Kind {
    fn widen(self, other: Kind) -> Kind {
        match (self, other) {
            (a, b) if a == b => a,
            (Kind::Int, Kind::Float) | (Kind::Float, Kind::Int) => Kind::Float,
            _ => Kind::Text,
        }
    }
}

/// Infer a column type and convert its cells.
///
/// With `parse_text`, text cells are parsed as numbers/booleans (delimited text has no cell
/// types of its own). Without it, text cells always force `Utf8` (workbook text cells).
pub fn infer_column(cells: Vec<RawCell>, parse_text: bool) -> (DataType, Vec<Value>) {
    let kind = cells
        .iter()
        .filter_map(|c| cell_kind(c, parse_text))
        .reduce(Kind::widen);

    let data_type = match kind {
        None | Some(Kind::Float) => DataType::Float64,
        Some(Kind::Int) => DataType::Int64,
        Some(Kind::Bool) => DataType::Bool,
        Some(Kind::Text) => DataType::Utf8,
    };

    let values = cells
        .into_iter()
        .map(|c| convert_cell(c, data_type))
        .collect();
    (data_type, values)
}

/// Turn per-column raw cells into a typed, row-major [`DataSet`].
pub(crate) fn assemble(headers: Vec<String>, columns: Vec<Vec<RawCell>>, parse_text: bool) -> DataSet {
    let row_count = columns.first().map_or(0, Vec::len);

    let mut fields = Vec::with_capacity(headers.len());
    let mut typed_columns = Vec::with_capacity(headers.len());
    for (name, cells) in headers.into_iter().zip(columns) {
        let (data_type, values) = infer_column(cells, parse_text);
        fields.push(Field::new(name, data_type));
        typed_columns.push(values.into_iter());
    }

    let rows = (0..row_count)
        .map(|_| {
            typed_columns
                .iter_mut()
                .map(|col| col.next().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    DataSet::new(Schema::new(fields), rows)
}

fn cell_kind(cell: &RawCell, parse_text: bool) -> Option<Kind> {
    match cell {
        RawCell::Empty => None,
        RawCell::Int(_) => Some(Kind::Int),
        RawCell::Float(f) if is_integral(*f) => Some(Kind::Int),
        RawCell::Float(_) => Some(Kind::Float),
        RawCell::Bool(_) => Some(Kind::Bool),
        RawCell::Text(s) if parse_text => Some(text_kind(s)),
        RawCell::Text(_) => Some(Kind::Text),
    }
}

fn text_kind(s: &str) -> Kind {
    if s.parse::<i64>().is_ok() {
        Kind::Int
    } else if s.parse::<f64>().is_ok() {
        Kind::Float
    } else if parse_bool(s).is_some() {
        Kind::Bool
    } else {
        Kind::Text
    }
}

fn convert_cell(cell: RawCell, data_type: DataType) -> Value {
    match (cell, data_type) {
        (RawCell::Empty, _) => Value::Null,

        (RawCell::Int(i), DataType::Int64) => Value::Int64(i),
        (RawCell::Float(f), DataType::Int64) => Value::Int64(f as i64),
        (RawCell::Text(s), DataType::Int64) => s.parse().map(Value::Int64).unwrap_or(Value::Null),

        (RawCell::Int(i), DataType::Float64) => Value::Float64(i as f64),
        (RawCell::Float(f), DataType::Float64) => Value::Float64(f),
        (RawCell::Text(s), DataType::Float64) => s.parse().map(Value::Float64).unwrap_or(Value::Null),

        (RawCell::Bool(b), DataType::Bool) => Value::Bool(b),
        (RawCell::Text(s), DataType::Bool) => parse_bool(&s).map(Value::Bool).unwrap_or(Value::Null),

        (RawCell::Text(s), _) => Value::Utf8(s),
        (RawCell::Int(i), _) => Value::Utf8(i.to_string()),
        (RawCell::Float(f), _) if is_integral(f) => Value::Utf8((f as i64).to_string()),
        (RawCell::Float(f), _) => Value::Utf8(format_float(f)),
        (RawCell::Bool(b), _) => Value::Utf8(b.to_string()),
    }
}

fn is_integral(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_cells(raw: &[&str]) -> Vec<RawCell> {
        raw.iter().map(|s| RawCell::from_text(s)).collect()
    }

    #[test]
    fn integers_with_gaps_stay_integers() {
        let (dt, values) = infer_column(text_cells(&["25", "", "30"]), true);
        assert_eq!(dt, DataType::Int64);
        assert_eq!(values, vec![Value::Int64(25), Value::Null, Value::Int64(30)]);
    }

    #[test]
    fn mixed_integers_and_decimals_widen_to_float() {
        let (dt, values) = infer_column(text_cells(&["1", "2.5"]), true);
        assert_eq!(dt, DataType::Float64);
        assert_eq!(values, vec![Value::Float64(1.0), Value::Float64(2.5)]);
    }

    #[test]
    fn booleans_are_case_insensitive() {
        let (dt, values) = infer_column(text_cells(&["True", "false", "NA"]), true);
        assert_eq!(dt, DataType::Bool);
        assert_eq!(values, vec![Value::Bool(true), Value::Bool(false), Value::Null]);
    }

    #[test]
    fn any_non_numeric_text_forces_utf8_and_keeps_original_text() {
        let (dt, values) = infer_column(text_cells(&["1", "x", " 2.50 "]), true);
        assert_eq!(dt, DataType::Utf8);
        assert_eq!(
            values,
            vec![
                Value::Utf8("1".to_string()),
                Value::Utf8("x".to_string()),
                Value::Utf8("2.50".to_string()),
            ]
        );
    }

    #[test]
    fn null_tokens_become_null() {
        for token in NULL_TOKENS {
            assert_eq!(RawCell::from_text(token), RawCell::Empty, "token {token:?}");
        }
        assert_eq!(RawCell::from_text("   "), RawCell::Empty);
    }

    #[test]
    fn all_missing_column_is_float() {
        let (dt, values) = infer_column(text_cells(&["", "NaN"]), true);
        assert_eq!(dt, DataType::Float64);
        assert_eq!(values, vec![Value::Null, Value::Null]);
    }

    #[test]
    fn infinity_text_parses_as_float() {
        let (dt, values) = infer_column(text_cells(&["1.5", "inf"]), true);
        assert_eq!(dt, DataType::Float64);
        assert_eq!(values[1], Value::Float64(f64::INFINITY));
    }

    #[test]
    fn workbook_text_cells_are_not_reparsed() {
        let cells = vec![RawCell::Float(1.0), RawCell::Text("2".to_string())];
        let (dt, values) = infer_column(cells, false);
        assert_eq!(dt, DataType::Utf8);
        assert_eq!(
            values,
            vec![Value::Utf8("1".to_string()), Value::Utf8("2".to_string())]
        );
    }

    #[test]
    fn workbook_integral_floats_are_integers() {
        let cells = vec![RawCell::Float(3.0), RawCell::Empty, RawCell::Int(4)];
        let (dt, values) = infer_column(cells, false);
        assert_eq!(dt, DataType::Int64);
        assert_eq!(values, vec![Value::Int64(3), Value::Null, Value::Int64(4)]);
    }
}
