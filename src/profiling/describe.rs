//! Summary statistics table over every numeric column.

use serde::Serialize;

use crate::types::DataSet;

use super::stats;

/// One row of the [`describe`] table.
///
/// Statistics that are undefined for the column's sample size are `None`. Infinite cells are left
/// out, so `count` covers finite values only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericDescription {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

/// Describe every numeric column of `dataset`, in schema order.
pub fn describe(dataset: &DataSet) -> Vec<NumericDescription> {
    dataset
        .schema
        .numeric_indexes()
        .into_iter()
        .map(|idx| {
            let values: Vec<f64> = dataset
                .column(idx)
                .filter_map(|v| v.as_f64())
                .filter(|x| x.is_finite())
                .collect();
            let sorted = stats::sorted(&values);
            NumericDescription {
                column: dataset.schema.fields[idx].name.clone(),
                count: values.len(),
                mean: stats::mean(&values),
                std_dev: stats::sample_std_dev(&values),
                min: sorted.first().copied(),
                q1: stats::percentile_sorted(&sorted, 0.25),
                median: stats::percentile_sorted(&sorted, 0.5),
                q3: stats::percentile_sorted(&sorted, 0.75),
                max: sorted.last().copied(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::describe;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    #[test]
    fn describes_numeric_columns_only() {
        let schema = Schema::new(vec![
            Field::new("n", DataType::Int64),
            Field::new("s", DataType::Utf8),
            Field::new("one", DataType::Float64),
            Field::new("none", DataType::Float64),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Utf8("a".into()), Value::Float64(2.0), Value::Null],
                vec![Value::Int64(3), Value::Utf8("b".into()), Value::Null, Value::Null],
            ],
        );

        let d = describe(&ds);
        let names: Vec<&str> = d.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(names, vec!["n", "one", "none"]);

        assert_eq!(d[0].count, 2);
        assert_eq!(d[0].mean, Some(2.0));
        assert_eq!(d[0].median, Some(2.0));
        assert_eq!(d[0].q1, Some(1.5));

        assert_eq!(d[1].count, 1);
        assert_eq!(d[1].std_dev, None);
        assert_eq!(d[1].max, Some(2.0));

        assert_eq!(d[2].count, 0);
        assert_eq!(d[2].mean, None);
        assert_eq!(d[2].min, None);
    }

    #[test]
    fn infinite_cells_are_left_out() {
        let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Float64(1.0)],
                vec![Value::Float64(f64::INFINITY)],
                vec![Value::Float64(3.0)],
            ],
        );
        let d = describe(&ds);
        assert_eq!(d[0].count, 2);
        assert_eq!(d[0].mean, Some(2.0));
        assert_eq!(d[0].max, Some(3.0));
    }
}
