#![cfg(feature = "excel")]

//! Excel ingestion (`.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods`), feature-gated behind `excel`.
//!
//! Cells are first rendered to text and then go through the same parsing as CSV, so both sources
//! agree on missing tokens and type inference.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, Schema, Value, TIMESTAMP_FORMAT};

use super::infer::{infer_dataset, parse_typed_value};

/// Ingest one sheet of a workbook into a `DataSet`.
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - With a `schema`, validates that all schema fields exist as headers and parses to those types;
///   without one, loads every column and infers its type
pub fn ingest_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    schema: Option<&Schema>,
) -> IngestionResult<DataSet> {
    let sheets: Option<Vec<&str>> = sheet_name.map(|s| vec![s]);
    ingest_excel_workbook_from_path(path, sheets.as_deref(), schema)
}

/// Ingest multiple sheets from a workbook and concatenate all rows into one `DataSet`.
///
/// - If `sheet_names` is `None`, ingests **all sheets** in workbook order.
/// - If `sheet_names` is `Some(&[...])`, ingests only those sheets (in the provided order).
///
/// All sheets must share the header row of the first one.
pub fn ingest_excel_workbook_from_path(
    path: impl AsRef<Path>,
    sheet_names: Option<&[&str]>,
    schema: Option<&Schema>,
) -> IngestionResult<DataSet> {
    let mut workbook = open_workbook_auto(path)?;

    let sheets: Vec<String> = match sheet_names {
        Some(names) => names.iter().map(|s| s.to_string()).collect(),
        None => workbook.sheet_names().to_vec(),
    };
    if sheets.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "workbook has no sheets".to_string(),
        });
    }

    let mut headers: Option<Vec<String>> = None;
    let mut records: Vec<Vec<String>> = Vec::new();
    for sheet in sheets {
        let range = workbook.worksheet_range(&sheet)?;
        let (sheet_headers, mut sheet_records) =
            read_sheet(&range).map_err(|e| wrap_schema_err_with_sheet(&sheet, e))?;
        match &headers {
            None => headers = Some(sheet_headers),
            Some(h) if *h == sheet_headers => {}
            Some(h) => {
                return Err(IngestionError::SchemaMismatch {
                    message: format!(
                        "sheet '{sheet}' headers {sheet_headers:?} differ from first sheet {h:?}"
                    ),
                });
            }
        }
        records.append(&mut sheet_records);
    }
    let headers = headers.unwrap_or_default();

    match schema {
        None => infer_dataset(&headers, &records),
        Some(schema) => project_schema(&headers, &records, schema),
    }
}

fn project_schema(
    headers: &[String],
    records: &[Vec<String>],
    schema: &Schema,
) -> IngestionResult<DataSet> {
    let mut col_idxs: Vec<usize> = Vec::with_capacity(schema.fields.len());
    for f in &schema.fields {
        match headers.iter().position(|h| h.trim() == f.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(IngestionError::SchemaMismatch {
                    message: format!(
                        "missing required column '{}'. headers={:?}",
                        f.name, headers
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(records.len());
    for (idx0, record) in records.iter().enumerate() {
        // 1-based, header is row 1.
        let user_row = idx0 + 2;
        let mut out_row = Vec::with_capacity(schema.fields.len());
        for (field, &col_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(col_idx).map(String::as_str).unwrap_or("");
            out_row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(out_row);
    }

    DataSet::try_new(schema.clone(), rows)
}

/// Header cells and the text of every following row, padded to the header width.
fn read_sheet(range: &calamine::Range<Data>) -> IngestionResult<(Vec<String>, Vec<Vec<String>>)> {
    let mut rows = range.rows().skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));

    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| IngestionError::SchemaMismatch {
            message: "sheet has no non-empty rows (no header row found)".to_string(),
        })?
        .iter()
        .map(cell_to_text)
        .collect();

    let width = headers.len();
    let records = rows
        .map(|row| {
            (0..width)
                .map(|i| row.get(i).map(cell_to_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok((headers, records))
}

fn wrap_schema_err_with_sheet(sheet: &str, err: IngestionError) -> IngestionError {
    match err {
        IngestionError::SchemaMismatch { message } => IngestionError::SchemaMismatch {
            message: format!("sheet '{sheet}': {message}"),
        },
        other => other,
    }
}

fn cell_to_text(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_text(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        // Formula errors (#N/A, #DIV/0!, ...) carry no value.
        Data::Error(_) => String::new(),
        Data::Empty => String::new(),
    }
}

/// Render an Excel serial date (days since 1899-12-30) as text.
fn excel_serial_to_text(serial: f64) -> String {
    let Some(epoch) = NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        return serial.to_string();
    };
    let millis = (serial * 86_400_000.0).round() as i64;
    match epoch.checked_add_signed(Duration::milliseconds(millis)) {
        Some(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
        None => serial.to_string(),
    }
}
