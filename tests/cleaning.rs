use std::collections::HashSet;

use rust_data_profiler::ingestion::csv::load_csv_from_path;
use rust_data_profiler::processing::{clean, remove_duplicates, remove_missing, CleaningOp};
use rust_data_profiler::profiling::audit_missing;
use rust_data_profiler::types::{DataSet, Value};

fn customers() -> DataSet {
    load_csv_from_path("tests/fixtures/customers.csv").unwrap()
}

fn ids(ds: &DataSet) -> Vec<i64> {
    ds.rows
        .iter()
        .map(|r| match r[0] {
            Value::Int64(v) => v,
            _ => panic!("id must be an integer"),
        })
        .collect()
}

#[test]
fn remove_missing_leaves_no_missing_cells() {
    let ds = customers();
    let out = clean(&ds, CleaningOp::RemoveMissing);
    assert_eq!((out.rows_before, out.rows_after), (8, 5));
    assert_eq!(audit_missing(&out.dataset).total_missing(), 0);
    assert_eq!(ids(&out.dataset), vec![1, 2, 5, 2, 7]);

    // Idempotent.
    assert_eq!(remove_missing(&out.dataset), out.dataset);
    // Input untouched.
    assert_eq!(ds.row_count(), 8);
}

#[test]
fn remove_duplicates_keeps_first_occurrence() {
    let ds = customers();
    let out = clean(&ds, CleaningOp::RemoveDuplicates);
    assert_eq!(out.rows_removed(), 1);
    assert_eq!(ids(&out.dataset), vec![1, 2, 3, 4, 5, 6, 7]);

    let distinct: HashSet<String> = out.dataset.rows.iter().map(|r| format!("{r:?}")).collect();
    assert_eq!(distinct.len(), out.dataset.row_count());

    assert_eq!(remove_duplicates(&out.dataset), out.dataset);
}

#[test]
fn missing_cells_compare_equal_for_duplicates() {
    let ds = rust_data_profiler::load(b"a,b\n1,\n1,NA\n1,2\n").unwrap();
    let out = remove_duplicates(&ds);
    assert_eq!(out.row_count(), 2);
    assert_eq!(out.rows[1][1], Value::Int64(2));
}

#[test]
fn cleaning_an_empty_table_is_a_no_op() {
    let ds = rust_data_profiler::load(b"a,b\n").unwrap();
    for op in [CleaningOp::RemoveMissing, CleaningOp::RemoveDuplicates] {
        let out = clean(&ds, op);
        assert_eq!((out.rows_before, out.rows_after), (0, 0));
        assert_eq!(out.dataset.schema, ds.schema);
    }
}
