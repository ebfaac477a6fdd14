//! XLSX export.
//!
//! The workbook has one sheet named `data`, a bold header row and one row per record. Numbers and
//! booleans are written as native cells; timestamps are written as text in
//! [`crate::types::TIMESTAMP_FORMAT`] so they read back through the same inference as CSV.

use rust_xlsxwriter::{Format, Workbook};

use crate::error::{ExportError, ExportResult};
use crate::types::{DataSet, Value};

/// Sheet-size limits of the XLSX format.
pub const MAX_ROWS: usize = 1_048_576;
pub const MAX_COLUMNS: usize = 16_384;

/// Write `dataset` as an in-memory XLSX workbook.
pub fn to_xlsx_bytes(dataset: &DataSet) -> ExportResult<Vec<u8>> {
    // +1 for the header row.
    if dataset.row_count() + 1 > MAX_ROWS {
        return Err(too_large(format!(
            "{} rows exceed the sheet limit of {}",
            dataset.row_count(),
            MAX_ROWS - 1
        )));
    }
    if dataset.column_count() > MAX_COLUMNS {
        return Err(too_large(format!(
            "{} columns exceed the sheet limit of {MAX_COLUMNS}",
            dataset.column_count()
        )));
    }

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("data")?;

    let bold = Format::new().set_bold();
    for (col, name) in dataset.schema.field_names().enumerate() {
        ws.write_string_with_format(0, column_index(col)?, name, &bold)?;
    }

    for (row_idx, row) in dataset.rows.iter().enumerate() {
        let r = row_index(row_idx + 1)?;
        for (col, value) in row.iter().enumerate() {
            let c = column_index(col)?;
            match value {
                v if v.is_missing() => {}
                Value::Int64(v) => {
                    ws.write_number(r, c, *v as f64)?;
                }
                Value::Float64(v) => {
                    ws.write_number(r, c, *v)?;
                }
                Value::Bool(v) => {
                    ws.write_boolean(r, c, *v)?;
                }
                Value::Utf8(s) => {
                    ws.write_string(r, c, s)?;
                }
                other => {
                    ws.write_string(r, c, other.to_string())?;
                }
            }
        }
    }

    Ok(wb.save_to_buffer()?)
}

fn row_index(idx: usize) -> ExportResult<u32> {
    u32::try_from(idx).map_err(|_| too_large(format!("row index {idx} out of range")))
}

fn column_index(idx: usize) -> ExportResult<u16> {
    u16::try_from(idx).map_err(|_| too_large(format!("column index {idx} out of range")))
}

fn too_large(message: String) -> ExportError {
    ExportError::TooLarge {
        format: "xlsx".to_string(),
        message,
    }
}
