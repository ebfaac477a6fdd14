//! Pairwise Pearson correlation over numeric columns.
//!
//! Each pair is computed over the rows where both columns are present (pairwise deletion), so
//! two pairs may use different row subsets. Pairs with fewer than two shared rows or zero
//! variance on either side are undefined: `NaN` in the matrix and left out of the ranking.

use serde::Serialize;

use crate::types::DataSet;

use super::ProfileOptions;
use super::stats;

/// Square, symmetric correlation matrix labelled by column name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major `columns.len() x columns.len()` coefficients. `NaN` marks an undefined pair.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Coefficient at `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Coefficient between two named columns.
    pub fn get_by_name(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.get(i, j)
    }

    /// Number of columns (and rows) in the matrix.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One entry of the ranked pair list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationPair {
    pub column_a: String,
    pub column_b: String,
    pub coefficient: f64,
    /// Number of rows where both columns were present.
    pub sample_size: usize,
}

/// Output of [`compute_correlations`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationAnalysis {
    pub matrix: CorrelationMatrix,
    /// Strongest defined pairs by `|r|`, descending; ties keep discovery order.
    pub ranked_pairs: Vec<CorrelationPair>,
}

/// Correlate every pair of numeric columns.
///
/// Returns `None` when the dataset has fewer than two numeric columns.
pub fn compute_correlations(
    dataset: &DataSet,
    options: &ProfileOptions,
) -> Option<CorrelationAnalysis> {
    let numeric = dataset.schema.numeric_indexes();
    if numeric.len() < 2 {
        tracing::debug!(numeric_columns = numeric.len(), "correlation not applicable");
        return None;
    }

    let n = numeric.len();
    let columns: Vec<String> = numeric
        .iter()
        .map(|&i| dataset.schema.fields[i].name.clone())
        .collect();
    let mut values = vec![vec![f64::NAN; n]; n];
    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);

    for (i, &col) in numeric.iter().enumerate() {
        values[i][i] = self_correlation(dataset, col);
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let paired = stats::paired_values(dataset, numeric[i], numeric[j]);
            let (xs, ys): (Vec<f64>, Vec<f64>) = paired.iter().map(|&(_, x, y)| (x, y)).unzip();
            match stats::pearson(&xs, &ys) {
                Some(r) => {
                    values[i][j] = r;
                    values[j][i] = r;
                    pairs.push(CorrelationPair {
                        column_a: columns[i].clone(),
                        column_b: columns[j].clone(),
                        coefficient: r,
                        sample_size: paired.len(),
                    });
                }
                None => {
                    tracing::debug!(
                        a = %columns[i],
                        b = %columns[j],
                        samples = paired.len(),
                        "correlation undefined for pair"
                    );
                }
            }
        }
    }

    Some(CorrelationAnalysis {
        matrix: CorrelationMatrix { columns, values },
        ranked_pairs: rank_pairs(pairs, options.top_correlations),
    })
}

/// Sort by absolute coefficient, descending, and keep the first `top_n`.
///
/// `sort_by` is stable, so equal magnitudes stay in discovery order.
fn rank_pairs(mut pairs: Vec<CorrelationPair>, top_n: usize) -> Vec<CorrelationPair> {
    pairs.sort_by(|a, b| b.coefficient.abs().total_cmp(&a.coefficient.abs()));
    pairs.truncate(top_n);
    pairs
}

/// `1.0` when the column has nonzero variance over at least two values, `NaN` otherwise.
fn self_correlation(dataset: &DataSet, col: usize) -> f64 {
    let xs: Vec<f64> = dataset.column(col).filter_map(|v| v.as_f64()).collect();
    match stats::sample_std_dev(&xs) {
        Some(sd) if sd > 0.0 => 1.0,
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::compute_correlations;
    use crate::profiling::ProfileOptions;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn floats(name_values: &[(&str, Vec<Option<f64>>)]) -> DataSet {
        let schema = Schema::new(
            name_values
                .iter()
                .map(|(n, _)| Field::new(*n, DataType::Float64))
                .collect(),
        );
        let rows = (0..name_values[0].1.len())
            .map(|r| {
                name_values
                    .iter()
                    .map(|(_, vs)| vs[r].map(Value::Float64).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        DataSet::new(schema, rows)
    }

    #[test]
    fn single_numeric_column_is_not_applicable() {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Int64),
            Field::new("name", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Utf8("a".into())],
                vec![Value::Int64(2), Value::Utf8("b".into())],
            ],
        );
        assert!(compute_correlations(&ds, &ProfileOptions::default()).is_none());
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let ds = floats(&[
            ("a", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            ("b", vec![Some(2.0), Some(4.1), Some(5.9), Some(8.2)]),
            ("c", vec![Some(4.0), Some(1.0), Some(3.0), Some(2.0)]),
        ]);
        let out = compute_correlations(&ds, &ProfileOptions::default()).unwrap();
        let m = &out.matrix;
        assert_eq!(m.len(), 3);
        for i in 0..3 {
            assert_eq!(m.get(i, i), Some(1.0));
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
        assert!(m.get_by_name("a", "b").unwrap() > 0.99);
        assert_eq!(out.ranked_pairs.len(), 3);
        assert_eq!(out.ranked_pairs[0].column_a, "a");
        assert_eq!(out.ranked_pairs[0].column_b, "b");
    }

    #[test]
    fn pairwise_deletion_uses_rows_present_in_both() {
        let ds = floats(&[
            ("a", vec![Some(1.0), Some(2.0), None, Some(4.0), Some(100.0)]),
            ("b", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), None]),
        ]);
        let out = compute_correlations(&ds, &ProfileOptions::default()).unwrap();
        let pair = &out.ranked_pairs[0];
        assert_eq!(pair.sample_size, 3);
        assert!((pair.coefficient - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_variance_pairs_are_nan_and_unranked() {
        let ds = floats(&[
            ("a", vec![Some(1.0), Some(2.0), Some(3.0)]),
            ("flat", vec![Some(5.0), Some(5.0), Some(5.0)]),
            ("b", vec![Some(3.0), Some(1.0), Some(2.0)]),
        ]);
        let out = compute_correlations(&ds, &ProfileOptions::default()).unwrap();
        assert!(out.matrix.get_by_name("a", "flat").unwrap().is_nan());
        assert!(out.matrix.get_by_name("flat", "flat").unwrap().is_nan());
        assert_eq!(out.ranked_pairs.len(), 1);
        assert_eq!(out.ranked_pairs[0].column_b, "b");
    }

    #[test]
    fn ties_keep_discovery_order_and_top_n_truncates() {
        // a~b and a~c are both perfectly correlated; b~c too. All |r| == 1.
        let ds = floats(&[
            ("a", vec![Some(1.0), Some(2.0), Some(3.0)]),
            ("b", vec![Some(2.0), Some(4.0), Some(6.0)]),
            ("c", vec![Some(3.0), Some(2.0), Some(1.0)]),
        ]);
        let opts = ProfileOptions {
            top_correlations: 2,
            ..ProfileOptions::default()
        };
        let out = compute_correlations(&ds, &opts).unwrap();
        let names: Vec<(&str, &str)> = out
            .ranked_pairs
            .iter()
            .map(|p| (p.column_a.as_str(), p.column_b.as_str()))
            .collect();
        assert_eq!(names, vec![("a", "b"), ("a", "c")]);
    }
}
