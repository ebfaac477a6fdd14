//! Row-dropping cleaning transforms.
//!
//! Both transforms return a new [`DataSet`]; the input is left untouched. Any result previously
//! derived from the input is stale for the output and must be recomputed by the caller.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::types::{DataSet, Value};

/// Built-in cleaning operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningOp {
    /// Drop every row that has a missing value in any column.
    RemoveMissing,
    /// Drop rows identical to an earlier row across all columns.
    RemoveDuplicates,
}

/// A cleaned dataset plus row counts before and after.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningOutcome {
    pub dataset: DataSet,
    pub rows_before: usize,
    pub rows_after: usize,
}

impl CleaningOutcome {
    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Apply `op` to `dataset`.
pub fn clean(dataset: &DataSet, op: CleaningOp) -> CleaningOutcome {
    let cleaned = match op {
        CleaningOp::RemoveMissing => remove_missing(dataset),
        CleaningOp::RemoveDuplicates => remove_duplicates(dataset),
    };
    let outcome = CleaningOutcome {
        rows_before: dataset.row_count(),
        rows_after: cleaned.row_count(),
        dataset: cleaned,
    };
    tracing::debug!(
        ?op,
        before = outcome.rows_before,
        after = outcome.rows_after,
        "cleaned dataset"
    );
    outcome
}

/// Drop every row containing at least one missing value.
pub fn remove_missing(dataset: &DataSet) -> DataSet {
    dataset.filter_rows(|row| !row.iter().any(Value::is_missing))
}

/// Drop rows that exactly repeat an earlier row, keeping the first occurrence in place.
pub fn remove_duplicates(dataset: &DataSet) -> DataSet {
    let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(dataset.row_count());
    let mut keep = Vec::with_capacity(dataset.row_count());
    for (i, row) in dataset.rows.iter().enumerate() {
        if seen.insert(row.iter().map(CellKey::from).collect()) {
            keep.push(i);
        }
    }
    dataset.take_rows(&keep)
}

/// Hashable view of a cell for duplicate detection.
///
/// Floats compare by bit pattern after folding `-0.0` into `0.0`; every missing cell (including
/// `NaN`) maps to the same key.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Missing,
    Int(i64),
    Float(u64),
    Bool(bool),
    Text(&'a str),
    Timestamp(NaiveDateTime),
}

impl<'a> From<&'a Value> for CellKey<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            v if v.is_missing() => CellKey::Missing,
            Value::Int64(v) => CellKey::Int(*v),
            Value::Float64(v) => CellKey::Float(if *v == 0.0 { 0 } else { v.to_bits() }),
            Value::Bool(v) => CellKey::Bool(*v),
            Value::Utf8(s) => CellKey::Text(s),
            Value::Timestamp(ts) => CellKey::Timestamp(*ts),
            Value::Null => CellKey::Missing,
        }
    }
}
