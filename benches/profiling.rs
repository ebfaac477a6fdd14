use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_data_profiler::processing::{clean, CleaningOp};
use rust_data_profiler::profiling::{audit_missing, compute_correlations, describe, profile_schema, ProfileOptions};
use rust_data_profiler::types::{DataSet, DataType, Field, Schema, Value};

/// Deterministic numeric table with every 17th cell missing and every 50th row repeated.
fn build_dataset(rows: usize, numeric_cols: usize) -> DataSet {
    let mut fields: Vec<Field> = (0..numeric_cols)
        .map(|c| Field::new(format!("n{c}"), DataType::Float64))
        .collect();
    fields.push(Field::new("label", DataType::Utf8));

    let mut out = Vec::with_capacity(rows);
    for r in 0..rows {
        let src = if r % 50 == 49 { r - 1 } else { r };
        let mut row = Vec::with_capacity(numeric_cols + 1);
        for c in 0..numeric_cols {
            if (src + c) % 17 == 0 {
                row.push(Value::Null);
            } else {
                let x = ((src * 31 + c * 7) % 1_000) as f64 * 0.5 + c as f64;
                row.push(Value::Float64(x));
            }
        }
        row.push(Value::Utf8(format!("l{}", src % 20)));
        out.push(row);
    }
    DataSet::new(Schema::new(fields), out)
}

fn bench_profiling(c: &mut Criterion) {
    let options = ProfileOptions::default();
    let mut group = c.benchmark_group("profiling");

    for &rows in &[10_000usize, 100_000] {
        let ds = build_dataset(rows, 8);
        group.throughput(Throughput::Elements(rows as u64));

        group.bench_with_input(BenchmarkId::new("schema_and_missing", rows), &ds, |b, ds| {
            b.iter(|| {
                black_box(profile_schema(ds));
                black_box(audit_missing(ds));
            })
        });

        group.bench_with_input(BenchmarkId::new("describe", rows), &ds, |b, ds| {
            b.iter(|| black_box(describe(ds)))
        });

        group.bench_with_input(BenchmarkId::new("correlations", rows), &ds, |b, ds| {
            b.iter(|| black_box(compute_correlations(ds, &options)))
        });

        group.bench_with_input(BenchmarkId::new("remove_duplicates", rows), &ds, |b, ds| {
            b.iter(|| black_box(clean(ds, CleaningOp::RemoveDuplicates)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_profiling);
criterion_main!(benches);
