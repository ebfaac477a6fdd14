//! CSV ingestion implementation.
//!
//! Two entry styles:
//!
//! - schema-driven ([`ingest_csv_from_path`], [`ingest_csv_from_reader`]): the caller names the
//!   columns and their types
//! - inferred ([`load_csv_from_bytes`], [`load_csv_from_reader`]): every header column is loaded
//!   and typed by [`super::infer`]

use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, Schema, Value};

use super::infer::{infer_dataset, parse_typed_value};

/// Ingest a CSV file into an in-memory [`DataSet`] using `schema`.
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all schema fields (order can differ).
/// - Each value is parsed according to the schema field type.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, schema: &Schema) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Ingest CSV data from an existing CSV reader using `schema`.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> IngestionResult<DataSet> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h.trim() == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(IngestionError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    DataSet::try_new(schema.clone(), rows)
}

/// Load CSV bytes (header row required) and infer every column's type.
pub fn load_csv_from_bytes(bytes: &[u8]) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);
    load_csv_from_reader(&mut rdr)
}

/// Load a CSV file and infer every column's type.
pub fn load_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    load_csv_from_reader(&mut rdr)
}

/// Load every column of a CSV reader, inferring types.
///
/// Rows with a different number of fields than the header are rejected by the reader.
pub fn load_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<DataSet> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "csv input has no header row".to_string(),
        });
    }

    let mut records: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect());
    }

    infer_dataset(&headers, &records)
}
