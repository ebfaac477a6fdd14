//! Univariate distribution statistics for a single numeric column.

use serde::Serialize;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::DataSet;

use super::{finite_cells, resolve_numeric_column};
use super::stats;

/// Descriptive statistics over the non-missing values of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (`n - 1` denominator).
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// `max - min`.
    pub range: f64,
    /// 25th percentile.
    pub q1: f64,
    /// 75th percentile.
    pub q3: f64,
}

/// Result of [`analyze_distribution`]: the summary plus the values it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDistribution {
    pub column: String,
    pub summary: DistributionSummary,
    /// Non-missing values in row order, for histogram / box / violin rendering.
    pub values: Vec<f64>,
}

/// Non-missing values of numeric column `column`, in row order.
///
/// Fails with [`AnalysisError::InvalidColumn`] if the column is absent or not numeric, and with
/// [`AnalysisError::NonFiniteValue`] if it holds an infinite value. An all-missing column yields
/// an empty vector.
pub fn numeric_values(dataset: &DataSet, column: &str) -> AnalysisResult<Vec<f64>> {
    let idx = resolve_numeric_column(dataset, column)?;
    let cells = finite_cells(dataset, idx, column)?;
    Ok(cells.into_iter().map(|(_, x)| x).collect())
}

/// Compute the [`DistributionSummary`] of numeric column `column`.
///
/// Errors:
///
/// - [`AnalysisError::InvalidColumn`]: column absent or not numeric
/// - [`AnalysisError::NonFiniteValue`]: an infinite value is present
/// - [`AnalysisError::EmptyColumn`]: no non-missing values
/// - [`AnalysisError::InsufficientSamples`]: a single non-missing value (sample std dev undefined)
pub fn analyze_distribution(dataset: &DataSet, column: &str) -> AnalysisResult<ColumnDistribution> {
    let values = numeric_values(dataset, column)?;
    let summary = summarize(column, &values)?;
    tracing::debug!(column, count = summary.count, "analyzed distribution");
    Ok(ColumnDistribution {
        column: column.to_string(),
        summary,
        values,
    })
}

fn summarize(column: &str, values: &[f64]) -> AnalysisResult<DistributionSummary> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyColumn {
            column: column.to_string(),
        });
    }
    let insufficient = || AnalysisError::InsufficientSamples {
        column: column.to_string(),
        required: 2,
        actual: values.len(),
    };

    let std_dev = stats::sample_std_dev(values).ok_or_else(insufficient)?;
    let mean = stats::mean(values).ok_or_else(insufficient)?;
    let sorted = stats::sorted(values);
    let pct = |p| stats::percentile_sorted(&sorted, p).ok_or_else(insufficient);
    let median = pct(0.5)?;
    let q1 = pct(0.25)?;
    let q3 = pct(0.75)?;
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    Ok(DistributionSummary {
        count: values.len(),
        mean,
        median,
        std_dev,
        min,
        max,
        range: max - min,
        q1,
        q3,
    })
}
