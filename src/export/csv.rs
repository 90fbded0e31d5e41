use std::io::Write;
use std::path::Path;

use crate::error::DatasetResult;
use crate::types::DataSet;

/// Write `dataset` as CSV: a header row, then one record per row.
///
/// Missing values are empty fields; floats use their shortest round-trip form (integral floats
/// keep a trailing `.0` so they load back as floats).
pub fn write_csv_to_path(dataset: &DataSet, path: impl AsRef<Path>) -> DatasetResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_csv(dataset, &mut wtr)
}

/// Write `dataset` through an existing CSV writer, flushing at the end.
pub fn write_csv<W: Write>(dataset: &DataSet, wtr: &mut csv::Writer<W>) -> DatasetResult<()> {
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::csv::load_csv_from_reader;
    use crate::types::{DataType, Field, Schema, Value};

    fn to_csv_string(ds: &DataSet) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_csv(ds, &mut wtr).unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn nulls_are_empty_fields_and_floats_keep_their_point() {
        let schema = Schema::new(vec![
            Field::new("age", DataType::Float64),
            Field::new("city", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Float64(25.0), Value::Utf8("New York, NY".to_string())],
                vec![Value::Float64(27.5), Value::Null],
            ],
        );
        assert_eq!(to_csv_string(&ds), "age,city\n25.0,\"New York, NY\"\n27.5,\n");
    }

    #[test]
    fn written_csv_loads_back_with_the_same_types() {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("score", DataType::Float64),
            Field::new("active", DataType::Bool),
            Field::new("name", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Float64(2.0), Value::Bool(true), Value::Utf8("a".to_string())],
                vec![Value::Null, Value::Float64(0.1), Value::Bool(false), Value::Utf8("b".to_string())],
            ],
        );
        let text = to_csv_string(&ds);
        let mut rdr = csv::ReaderBuilder::new().from_reader(text.as_bytes());
        assert_eq!(load_csv_from_reader(&mut rdr).unwrap(), ds);
    }

    #[test]
    fn huge_integral_floats_load_back_as_floats() {
        let schema = Schema::new(vec![Field::new("total", DataType::Float64)]);
        let ds = DataSet::new(
            schema,
            vec![vec![Value::Float64(1e16)], vec![Value::Float64(2.5e18)]],
        );
        let text = to_csv_string(&ds);
        assert_eq!(text, "total\n1e16\n2.5e18\n");
        let mut rdr = csv::ReaderBuilder::new().from_reader(text.as_bytes());
        assert_eq!(load_csv_from_reader(&mut rdr).unwrap(), ds);
    }
}
