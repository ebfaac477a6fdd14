//! Column type inference and raw-text cell parsing.
//!
//! Used when a table is loaded without an explicit [`Schema`]: every column is scanned and given
//! the narrowest [`DataType`] all of its non-missing cells parse as, in the order
//! `Int64 → Float64 → Bool → Timestamp → Utf8`.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Raw tokens read as a missing cell. Matching is exact: `" NA "` and `" "` are values.
pub const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Whether `raw` denotes a missing cell.
pub fn is_missing_token(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw)
}

/// Build a dataset from a header row and raw string records, inferring each column's type.
///
/// Blank header names become `Unnamed: {index}`, and repeated names get a `.{n}` suffix so column
/// names stay unique.
pub fn infer_dataset(headers: &[String], records: &[Vec<String>]) -> IngestionResult<DataSet> {
    let names = dedupe_headers(headers);

    let mut fields = Vec::with_capacity(names.len());
    for (col, name) in names.into_iter().enumerate() {
        let data_type = infer_column_type(
            records.iter().map(|r| r.get(col).map(String::as_str).unwrap_or("")),
            !records.is_empty(),
        );
        fields.push(Field::new(name, data_type));
    }
    let schema = Schema::new(fields);

    let mut rows = Vec::with_capacity(records.len());
    for (idx0, record) in records.iter().enumerate() {
        // 1-based data row number, +1 for the header row.
        let user_row = idx0 + 2;
        let mut row = Vec::with_capacity(schema.fields.len());
        for (col, field) in schema.fields.iter().enumerate() {
            let raw = record.get(col).map(String::as_str).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    DataSet::try_new(schema, rows)
}

/// Narrowest type every non-missing token parses as.
///
/// A column with no non-missing tokens is `Float64` when it has rows (an all-missing numeric
/// column) and `Utf8` when the table is empty.
pub fn infer_column_type<'a>(tokens: impl Iterator<Item = &'a str>, has_rows: bool) -> DataType {
    let mut candidates = [
        DataType::Int64,
        DataType::Float64,
        DataType::Bool,
        DataType::Timestamp,
    ]
    .to_vec();
    let mut saw_value = false;

    for token in tokens {
        if is_missing_token(token) {
            continue;
        }
        saw_value = true;
        let t = token.trim();
        candidates.retain(|dt| parses_as(t, *dt));
        if candidates.is_empty() {
            return DataType::Utf8;
        }
    }

    match (saw_value, candidates.first()) {
        (false, _) if has_rows => DataType::Float64,
        (false, _) => DataType::Utf8,
        (true, Some(dt)) => *dt,
        (true, None) => DataType::Utf8,
    }
}

fn parses_as(token: &str, data_type: DataType) -> bool {
    match data_type {
        DataType::Int64 => token.parse::<i64>().is_ok(),
        DataType::Float64 => token.parse::<f64>().is_ok(),
        DataType::Bool => parse_inferred_bool(token).is_some(),
        DataType::Timestamp => parse_timestamp(token).is_some(),
        DataType::Utf8 => true,
    }
}

fn parse_inferred_bool(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parse an ISO-like date or date-time. Dates map to midnight.
pub fn parse_timestamp(token: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(token, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(token, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse one raw cell into a [`Value`] of `data_type`. Missing tokens become [`Value::Null`].
///
/// Text cells are kept as written. Numbers, booleans and timestamps parse from the trimmed cell.
pub fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> IngestionResult<Value> {
    if is_missing_token(raw) {
        return Ok(Value::Null);
    }
    let trimmed = raw.trim();
    let parse_err = |message: String| IngestionError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(raw.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_err(e.to_string())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_err(e.to_string())),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(parse_err),
        DataType::Timestamp => parse_timestamp(trimmed)
            .map(Value::Timestamp)
            .ok_or_else(|| parse_err("expected date (YYYY-MM-DD) or date-time".to_string())),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}

fn dedupe_headers(headers: &[String]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut out = Vec::with_capacity(headers.len());
    for (idx, raw) in headers.iter().enumerate() {
        let base = match raw.trim() {
            "" => format!("Unnamed: {idx}"),
            s => s.to_string(),
        };
        let mut name = base.clone();
        let mut n = 0usize;
        while used.contains(&name) {
            n += 1;
            name = format!("{base}.{n}");
        }
        used.insert(name.clone());
        out.push(name);
    }
    out
}
