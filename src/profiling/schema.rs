//! Schema summary: shape, per-column types and non-null counts.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{ColumnKind, DataSet, DataType};

/// Per-column entry of a [`SchemaSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: DataType,
    pub kind: ColumnKind,
    pub non_null_count: usize,
}

/// Shape and type overview of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaSummary {
    pub row_count: usize,
    pub column_count: usize,
    /// One entry per column, in schema order.
    pub columns: Vec<ColumnSchema>,
    /// Missing cells across the whole table.
    pub total_missing_count: usize,
    /// Number of distinct data types present among the columns.
    pub distinct_type_count: usize,
}

/// Compute the [`SchemaSummary`] of `dataset`.
///
/// An empty dataset yields all-zero counts.
pub fn profile_schema(dataset: &DataSet) -> SchemaSummary {
    let row_count = dataset.row_count();

    let columns: Vec<ColumnSchema> = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let non_null_count = dataset.column(idx).filter(|v| !v.is_missing()).count();
            ColumnSchema {
                name: field.name.clone(),
                data_type: field.data_type,
                kind: field.data_type.kind(),
                non_null_count,
            }
        })
        .collect();

    let total_missing_count = columns
        .iter()
        .map(|c| row_count - c.non_null_count)
        .sum();
    let distinct_type_count = columns
        .iter()
        .map(|c| c.data_type)
        .collect::<HashSet<_>>()
        .len();

    tracing::debug!(
        rows = row_count,
        columns = columns.len(),
        missing = total_missing_count,
        "profiled schema"
    );

    SchemaSummary {
        row_count,
        column_count: columns.len(),
        columns,
        total_missing_count,
        distinct_type_count,
    }
}
