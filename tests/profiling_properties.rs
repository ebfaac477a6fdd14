use std::collections::HashSet;

use rust_data_profiler::ingestion::csv::load_csv_from_path;
use rust_data_profiler::profiling::{
    analyze_distribution, audit_missing, compute_correlations, describe, detect_outliers,
    profile_schema, OutlierFence, ProfileOptions, ProfileReport,
};
use rust_data_profiler::types::{DataSet, DataType, Field, Schema, Value};
use rust_data_profiler::{load, AnalysisError};

fn customers() -> DataSet {
    load_csv_from_path("tests/fixtures/customers.csv").unwrap()
}

#[test]
fn missing_counts_sum_to_schema_total() {
    let ds = customers();
    let schema = profile_schema(&ds);
    let missing = audit_missing(&ds);

    assert_eq!(schema.total_missing_count, 4);
    assert_eq!(missing.total_missing(), schema.total_missing_count);
    for (col, entry) in schema.columns.iter().zip(&missing.entries) {
        assert_eq!(col.non_null_count + entry.missing_count, schema.row_count);
    }
    assert_eq!(missing.entries[1].missing_percentage, 12.5);
}

#[test]
fn schema_reports_shape_and_types() {
    let schema = profile_schema(&customers());
    assert_eq!((schema.row_count, schema.column_count), (8, 6));
    assert_eq!(schema.columns[4].data_type, DataType::Timestamp);
    assert_eq!(schema.distinct_type_count, 4);
}

#[test]
fn missing_report_on_empty_table_does_not_fail() {
    let ds = load(b"a,b\n").unwrap();
    let missing = audit_missing(&ds);
    assert!(!missing.has_rows());
    assert!(missing.entries.iter().all(|e| e.missing_percentage == 0.0));
    assert!(missing.ranked().is_empty());

    let schema = profile_schema(&ds);
    assert_eq!(schema.total_missing_count, 0);
}

#[test]
fn one_to_five_distribution() {
    let ds = load(b"x\n1\n2\n3\n4\n5\n").unwrap();
    let s = analyze_distribution(&ds, "x").unwrap().summary;
    assert_eq!((s.mean, s.median, s.min, s.max, s.range), (3.0, 3.0, 1.0, 5.0, 4.0));
    assert!((s.std_dev - 1.5811).abs() < 1e-4);
    assert_eq!((s.q1, s.q3), (2.0, 4.0));
}

#[test]
fn all_missing_column_is_empty() {
    let ds = load(b"x,y\n,1\nNA,2\n").unwrap();
    let err = analyze_distribution(&ds, "x").unwrap_err();
    assert_eq!(err, AnalysisError::EmptyColumn { column: "x".to_string() });
}

#[test]
fn non_numeric_and_unknown_columns_are_invalid() {
    let ds = customers();
    assert!(matches!(
        analyze_distribution(&ds, "city"),
        Err(AnalysisError::InvalidColumn { .. })
    ));
    assert!(matches!(
        detect_outliers(&ds, "nope", &ProfileOptions::default()),
        Err(AnalysisError::InvalidColumn { .. })
    ));
}

#[test]
fn correlation_matrix_is_symmetric_and_pairs_are_unique() {
    let ds = customers();
    let out = compute_correlations(&ds, &ProfileOptions::default()).unwrap();
    let m = &out.matrix;
    assert_eq!(m.columns, vec!["id", "age", "income"]);
    for i in 0..m.len() {
        assert_eq!(m.get(i, i), Some(1.0));
        for j in 0..m.len() {
            let (a, b) = (m.get(i, j).unwrap(), m.get(j, i).unwrap());
            assert!(a == b || (a.is_nan() && b.is_nan()));
        }
    }

    let mut seen = HashSet::new();
    for p in &out.ranked_pairs {
        let key = if p.column_a < p.column_b {
            (p.column_a.clone(), p.column_b.clone())
        } else {
            (p.column_b.clone(), p.column_a.clone())
        };
        assert!(seen.insert(key));
        assert!((-1.0..=1.0).contains(&p.coefficient));
    }
    for w in out.ranked_pairs.windows(2) {
        assert!(w[0].coefficient.abs() >= w[1].coefficient.abs());
    }
}

#[test]
fn single_numeric_column_has_no_correlations() {
    let ds = load(b"x,name\n1,a\n2,b\n").unwrap();
    assert!(compute_correlations(&ds, &ProfileOptions::default()).is_none());
}

#[test]
fn iqr_fences_for_known_quartiles() {
    let fence = OutlierFence::from_quartiles(10.0, 20.0, 1.5);
    assert_eq!((fence.lower_bound, fence.upper_bound), (-5.0, 35.0));
    assert!(fence.is_outlier(40.0));
    assert!(!fence.is_outlier(35.0));
}

#[test]
fn outliers_on_fixture_income() {
    let ds = customers();
    let out = detect_outliers(&ds, "income", &ProfileOptions::default()).unwrap();
    assert_eq!(out.fence.q1, 59_500.0);
    assert_eq!(out.fence.q3, 68_000.0);
    assert_eq!(out.row_indexes, vec![7]);
    assert_eq!(out.rows.rows[0][0], Value::Int64(7));
}

#[test]
fn describe_and_report_cover_numeric_columns() {
    let ds = customers();
    let d = describe(&ds);
    let names: Vec<&str> = d.iter().map(|c| c.column.as_str()).collect();
    assert_eq!(names, vec!["id", "age", "income"]);
    assert_eq!(d[1].count, 7);

    let report = ProfileReport::build(&ds, &ProfileOptions::default());
    assert_eq!(report.describe, d);
    assert_eq!(report.schema, profile_schema(&ds));
}

#[test]
fn analyses_do_not_modify_the_table() {
    let schema = Schema::new(vec![
        Field::new("a", DataType::Float64),
        Field::new("b", DataType::Float64),
    ]);
    let ds = DataSet::new(
        schema,
        vec![
            vec![Value::Float64(1.0), Value::Float64(f64::NAN)],
            vec![Value::Float64(2.0), Value::Float64(3.0)],
            vec![Value::Float64(9.0), Value::Float64(1.0)],
        ],
    );
    let before = format!("{ds:?}");
    let opts = ProfileOptions::default();
    let _ = profile_schema(&ds);
    let _ = audit_missing(&ds);
    let _ = describe(&ds);
    let _ = compute_correlations(&ds, &opts);
    let _ = detect_outliers(&ds, "a", &opts);
    assert_eq!(format!("{ds:?}"), before);
    assert_eq!(audit_missing(&ds).entries[1].missing_count, 1);
}
