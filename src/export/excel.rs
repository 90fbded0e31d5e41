#![cfg(feature = "excel")]

use std::path::Path;

use rust_xlsxwriter::{ColNum, RowNum, Workbook, Worksheet, XlsxError};

use crate::error::DatasetResult;
use crate::types::{format_float, DataSet, Value};

/// Write `dataset` as a single-sheet `.xlsx` workbook.
///
/// Row 0 holds the column names. Cells are typed: integers and floats as numbers, booleans as
/// booleans, text as strings. Missing values and `NaN` are left blank; infinities are written as
/// text since workbooks cannot store them as numbers.
pub fn write_excel_to_path(dataset: &DataSet, path: impl AsRef<Path>) -> DatasetResult<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in dataset.schema.field_names().enumerate() {
        sheet.write_string(0, col_num(col)?, name)?;
    }
    for (r, row) in dataset.rows.iter().enumerate() {
        let row_num = row_num(r + 1)?;
        for (c, value) in row.iter().enumerate() {
            write_cell(sheet, row_num, col_num(c)?, value)?;
        }
    }

    workbook.save(path.as_ref())?;
    Ok(())
}

fn write_cell(sheet: &mut Worksheet, row: RowNum, col: ColNum, value: &Value) -> Result<(), XlsxError> {
    match value {
        Value::Null => {}
        Value::Int64(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        Value::Float64(f) if f.is_nan() => {}
        Value::Float64(f) if f.is_infinite() => {
            sheet.write_string(row, col, format_float(*f))?;
        }
        Value::Float64(f) => {
            sheet.write_number(row, col, *f)?;
        }
        Value::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Value::Utf8(s) => {
            sheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

fn row_num(idx: usize) -> Result<RowNum, XlsxError> {
    RowNum::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_num(idx: usize) -> Result<ColNum, XlsxError> {
    ColNum::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}
