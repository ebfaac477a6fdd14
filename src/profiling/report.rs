//! Whole-table profile, computed once per loaded dataset.

use serde::Serialize;

use crate::types::DataSet;

use super::correlation::{compute_correlations, CorrelationAnalysis};
use super::describe::{describe, NumericDescription};
use super::missing::{audit_missing, MissingReport};
use super::schema::{profile_schema, SchemaSummary};
use super::ProfileOptions;

/// Every per-table artifact: schema, missing values, numeric summary table and correlations.
///
/// Per-column analyses (distribution, outliers) are run on demand and are not part of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub schema: SchemaSummary,
    pub missing: MissingReport,
    pub describe: Vec<NumericDescription>,
    /// `None` when fewer than two numeric columns exist.
    pub correlations: Option<CorrelationAnalysis>,
}

impl ProfileReport {
    /// Profile `dataset`.
    pub fn build(dataset: &DataSet, options: &ProfileOptions) -> Self {
        Self {
            schema: profile_schema(dataset),
            missing: audit_missing(dataset),
            describe: describe(dataset),
            correlations: compute_correlations(dataset, options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProfileReport;
    use crate::profiling::ProfileOptions;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    #[test]
    fn report_totals_agree() {
        let schema = Schema::new(vec![
            Field::new("a", DataType::Int64),
            Field::new("b", DataType::Float64),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Float64(2.0)],
                vec![Value::Null, Value::Float64(3.0)],
                vec![Value::Int64(3), Value::Null],
                vec![Value::Int64(4), Value::Float64(9.0)],
            ],
        );
        let report = ProfileReport::build(&ds, &ProfileOptions::default());
        assert_eq!(report.missing.total_missing(), report.schema.total_missing_count);
        assert_eq!(report.describe.len(), 2);
        assert!(report.correlations.is_some());
    }
}
