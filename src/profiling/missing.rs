//! Missing-value audit.

use serde::Serialize;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::DataSet;

use super::stats::round_to;

/// Missing-value count for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingEntry {
    pub column: String,
    pub missing_count: usize,
    /// `missing_count / row_count * 100`, rounded to 2 decimals. `0.0` for a table with no rows.
    pub missing_percentage: f64,
}

/// Per-column missing-value counts, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingReport {
    pub row_count: usize,
    pub entries: Vec<MissingEntry>,
}

impl MissingReport {
    /// `false` when the audited table had no rows; percentages are then reported as `0.0`.
    pub fn has_rows(&self) -> bool {
        self.row_count > 0
    }

    /// Missing cells across all columns.
    pub fn total_missing(&self) -> usize {
        self.entries.iter().map(|e| e.missing_count).sum()
    }

    /// Columns with at least one missing value, most missing first.
    ///
    /// Columns with equal counts keep their schema order.
    pub fn ranked(&self) -> Vec<&MissingEntry> {
        let mut out: Vec<&MissingEntry> =
            self.entries.iter().filter(|e| e.missing_count > 0).collect();
        out.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));
        out
    }
}

/// Percentage of `missing` over `rows`, rounded to 2 decimals.
///
/// Fails with [`AnalysisError::DivisionByZero`] when `rows == 0`.
pub fn missing_percentage(missing: usize, rows: usize) -> AnalysisResult<f64> {
    if rows == 0 {
        return Err(AnalysisError::DivisionByZero {
            context: "missing percentage over a table with no rows".to_string(),
        });
    }
    Ok(round_to(missing as f64 / rows as f64 * 100.0, 2))
}

/// Audit every column of `dataset` for missing values.
///
/// Never fails: a table with no rows reports `0.0` percentages.
pub fn audit_missing(dataset: &DataSet) -> MissingReport {
    let row_count = dataset.row_count();

    let entries = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let missing_count = dataset.column(idx).filter(|v| v.is_missing()).count();
            // Only a table with no rows makes the percentage fail.
            let missing_percentage = missing_percentage(missing_count, row_count).unwrap_or(0.0);
            MissingEntry {
                column: field.name.clone(),
                missing_count,
                missing_percentage,
            }
        })
        .collect();

    MissingReport { row_count, entries }
}
