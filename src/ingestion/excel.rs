#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{DatasetError, DatasetResult};
use crate::types::DataSet;

use super::infer::{assemble, RawCell};

/// Load one worksheet of a workbook (`.xlsx`) into an in-memory `DataSet`.
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row; its width sets the column count
/// - Reads remaining rows; cells beyond the header width are ignored
/// - Column types come from the cell types (text cells are never re-parsed as numbers)
pub fn load_excel_from_path(path: impl AsRef<Path>, sheet_name: Option<&str>) -> DatasetResult<DataSet> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| DatasetError::ParseFailure {
                message: "workbook has no sheets".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    Ok(load_sheet_range(&range))
}

fn load_sheet_range(range: &calamine::Range<Data>) -> DataSet {
    let mut rows = range.rows().skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));

    let headers: Vec<String> = match rows.next() {
        Some(header) => trim_trailing_empty(header).iter().map(cell_to_header_string).collect(),
        None => return DataSet::default(),
    };

    let mut columns: Vec<Vec<RawCell>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(convert_cell(row.get(idx).unwrap_or(&Data::Empty)));
        }
    }

    assemble(headers, columns, false)
}

fn trim_trailing_empty(row: &[Data]) -> &[Data] {
    let width = row
        .iter()
        .rposition(|c| !matches!(c, Data::Empty))
        .map_or(0, |last| last + 1);
    &row[..width]
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn convert_cell(c: &Data) -> RawCell {
    match c {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::Int(i) => RawCell::Int(*i),
        Data::Float(f) => RawCell::Float(*f),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::String(s) if s.trim().is_empty() => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.trim().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
        other => RawCell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_empty_header_cells_are_dropped() {
        let row = vec![
            Data::String("a".to_string()),
            Data::Empty,
            Data::String("c".to_string()),
            Data::Empty,
        ];
        assert_eq!(trim_trailing_empty(&row).len(), 3);
    }

    #[test]
    fn error_cells_are_missing() {
        assert_eq!(
            convert_cell(&Data::Error(calamine::CellErrorType::Div0)),
            RawCell::Empty
        );
    }
}
