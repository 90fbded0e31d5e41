//! CSV loading.

use std::path::Path;

use crate::error::DatasetResult;
use crate::types::DataSet;

use super::infer::{assemble, RawCell};

/// Load a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The first record is the header; column names are kept verbatim, in file order.
/// - Every record must have as many fields as the header (ragged rows are a parse error).
/// - Column types are inferred from the values (see [`super::infer`]).
pub fn load_csv_from_path(path: impl AsRef<Path>) -> DatasetResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    load_csv_from_reader(&mut rdr)
}

/// Load CSV data from an existing CSV reader.
pub fn load_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> DatasetResult<DataSet> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

    let mut columns: Vec<Vec<RawCell>> = vec![Vec::new(); headers.len()];
    for result in rdr.records() {
        let record = result?;
        for (column, raw) in columns.iter_mut().zip(record.iter()) {
            column.push(RawCell::from_text(raw));
        }
    }

    Ok(assemble(headers, columns, true))
}
