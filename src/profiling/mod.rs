//! Statistical profiling of a [`crate::types::DataSet`].
//!
//! Every function here is a pure function of the dataset it is given: nothing is cached, and
//! calling the same function twice on the same dataset gives the same result.
//!
//! - [`profile_schema`]: row/column counts, per-column type and non-null count
//! - [`audit_missing`]: per-column missing counts and percentages
//! - [`analyze_distribution`]: mean/median/std/min/max/range/quartiles of one numeric column
//! - [`describe`]: the same statistics for every numeric column, without failing
//! - [`compute_correlations`]: pairwise Pearson matrix + ranked strongest pairs
//! - [`detect_outliers`]: IQR fences and the rows outside them
//! - [`ProfileReport`]: schema + missing + describe + correlations in one value
//!
//! ## Example
//!
//! ```rust
//! use rust_data_profiler::profiling::{analyze_distribution, audit_missing, ProfileOptions};
//! use rust_data_profiler::profiling::detect_outliers;
//! use rust_data_profiler::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
//! let rows = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0]
//!     .iter()
//!     .map(|v| vec![Value::Float64(*v)])
//!     .chain(std::iter::once(vec![Value::Null]))
//!     .collect();
//! let ds = DataSet::new(schema, rows);
//!
//! let missing = audit_missing(&ds);
//! assert_eq!(missing.entries[0].missing_count, 1);
//!
//! let dist = analyze_distribution(&ds, "x").unwrap();
//! assert_eq!(dist.summary.count, 6);
//!
//! let outliers = detect_outliers(&ds, "x", &ProfileOptions::default()).unwrap();
//! assert_eq!(outliers.row_indexes, vec![5]);
//! ```

pub mod correlation;
pub mod describe;
pub mod distribution;
pub mod missing;
pub mod outliers;
pub mod report;
pub mod schema;
pub mod stats;

pub use correlation::{compute_correlations, CorrelationAnalysis, CorrelationMatrix, CorrelationPair};
pub use describe::{describe, NumericDescription};
pub use distribution::{analyze_distribution, numeric_values, ColumnDistribution, DistributionSummary};
pub use missing::{audit_missing, missing_percentage, MissingEntry, MissingReport};
pub use outliers::{detect_outliers, OutlierFence, OutlierReport};
pub use report::ProfileReport;
pub use schema::{profile_schema, ColumnSchema, SchemaSummary};

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{DataSet, Value};

/// Tunables for the profilers.
///
/// Use [`Default`] for the conventional settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileOptions {
    /// Number of strongest correlation pairs to keep.
    pub top_correlations: usize,
    /// Fence multiplier for the IQR outlier rule.
    pub iqr_multiplier: f64,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            top_correlations: 10,
            iqr_multiplier: 1.5,
        }
    }
}

/// Index of `column`, which must exist and be numeric.
pub(crate) fn resolve_numeric_column(dataset: &DataSet, column: &str) -> AnalysisResult<usize> {
    let idx = dataset
        .schema
        .index_of(column)
        .ok_or_else(|| AnalysisError::InvalidColumn {
            column: column.to_string(),
            reason: "no such column".to_string(),
        })?;
    let data_type = dataset.schema.fields[idx].data_type;
    if !data_type.is_numeric() {
        return Err(AnalysisError::InvalidColumn {
            column: column.to_string(),
            reason: format!("expected a numeric column, found {data_type}"),
        });
    }
    Ok(idx)
}

/// `(row_index, value)` for every non-missing cell of column `idx`, in row order.
///
/// Fails with [`AnalysisError::NonFiniteValue`] on the first infinite cell.
pub(crate) fn finite_cells(
    dataset: &DataSet,
    idx: usize,
    column: &str,
) -> AnalysisResult<Vec<(usize, f64)>> {
    let mut out = Vec::with_capacity(dataset.row_count());
    for (row, cells) in dataset.rows.iter().enumerate() {
        let Some(x) = cells.get(idx).and_then(Value::as_f64) else {
            continue;
        };
        if !x.is_finite() {
            return Err(AnalysisError::NonFiniteValue {
                column: column.to_string(),
                row,
            });
        }
        out.push((row, x));
    }
    Ok(out)
}
