//! CSV export.

use crate::error::{ExportError, ExportResult};
use crate::types::{DataSet, Value};

/// Write `dataset` as CSV: a header row, then one record per row. Missing cells are empty fields.
pub fn to_csv_bytes(dataset: &DataSet) -> ExportResult<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(cell_text))?;
    }

    wtr.into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}

fn cell_text(value: &Value) -> String {
    if value.is_missing() {
        String::new()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::to_csv_bytes;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    #[test]
    fn writes_header_and_quotes_when_needed() {
        let schema = Schema::new(vec![
            Field::new("name", DataType::Utf8),
            Field::new("score", DataType::Float64),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Utf8("Smith, Ann".into()), Value::Float64(1.5)],
                vec![Value::Utf8("Bo".into()), Value::Float64(f64::NAN)],
                vec![Value::Null, Value::Null],
            ],
        );
        let text = String::from_utf8(to_csv_bytes(&ds).unwrap()).unwrap();
        assert_eq!(text, "name,score\n\"Smith, Ann\",1.5\nBo,\n,\n");
    }

    #[test]
    fn whole_floats_keep_their_decimal_point() {
        let schema = Schema::new(vec![Field::new("score", DataType::Float64)]);
        let ds = DataSet::new(
            schema,
            vec![vec![Value::Float64(1.0)], vec![Value::Float64(-2.0)]],
        );
        let text = String::from_utf8(to_csv_bytes(&ds).unwrap()).unwrap();
        assert_eq!(text, "score\n1.0\n-2.0\n");
    }
}
