//! IQR-based outlier detection.

use serde::Serialize;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{DataSet, Value};

use super::ProfileOptions;
use super::{finite_cells, resolve_numeric_column};
use super::stats;

/// Tukey fences computed from a column's quartiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlierFence {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl OutlierFence {
    /// Fences at `q1 - k * iqr` and `q3 + k * iqr`.
    pub fn from_quartiles(q1: f64, q3: f64, k: f64) -> Self {
        let iqr = q3 - q1;
        Self {
            q1,
            q3,
            iqr,
            lower_bound: q1 - k * iqr,
            upper_bound: q3 + k * iqr,
        }
    }

    /// `true` when `value` lies strictly outside `[lower_bound, upper_bound]`.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_bound || value > self.upper_bound
    }
}

/// Output of [`detect_outliers`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierReport {
    pub column: String,
    pub fence: OutlierFence,
    /// Indexes (into the analyzed dataset) of the outlier rows, ascending.
    pub row_indexes: Vec<usize>,
    /// The outlier rows, all columns, in row order.
    pub rows: DataSet,
}

impl OutlierReport {
    pub fn count(&self) -> usize {
        self.row_indexes.len()
    }
}

/// Classify the rows of `dataset` by the IQR rule on numeric column `column`.
///
/// Missing cells are never outliers. When `iqr == 0` the fence collapses to a single point and
/// every differing value is reported. A column holding an infinite value fails with
/// [`AnalysisError::NonFiniteValue`], since its quartiles are undefined.
pub fn detect_outliers(
    dataset: &DataSet,
    column: &str,
    options: &ProfileOptions,
) -> AnalysisResult<OutlierReport> {
    let idx = resolve_numeric_column(dataset, column)?;

    let indexed = finite_cells(dataset, idx, column)?;
    let values: Vec<f64> = indexed.iter().map(|&(_, x)| x).collect();

    let sorted = stats::sorted(&values);
    let empty = || AnalysisError::EmptyColumn {
        column: column.to_string(),
    };
    let q1 = stats::percentile_sorted(&sorted, 0.25).ok_or_else(empty)?;
    let q3 = stats::percentile_sorted(&sorted, 0.75).ok_or_else(empty)?;
    let fence = OutlierFence::from_quartiles(q1, q3, options.iqr_multiplier);

    let row_indexes: Vec<usize> = indexed
        .iter()
        .filter(|&&(_, x)| fence.is_outlier(x))
        .map(|&(row, _)| row)
        .collect();
    let rows = dataset.take_rows(&row_indexes);

    tracing::debug!(
        column,
        lower = fence.lower_bound,
        upper = fence.upper_bound,
        outliers = row_indexes.len(),
        "detected outliers"
    );

    Ok(OutlierReport {
        column: column.to_string(),
        fence,
        row_indexes,
        rows,
    })
}

/// Whether `value` would be an outlier under `fence`. Missing cells never are.
pub fn classify(fence: &OutlierFence, value: &Value) -> bool {
    value.as_f64().is_some_and(|x| fence.is_outlier(x))
}
