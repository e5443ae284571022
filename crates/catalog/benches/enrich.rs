// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Array dimension enrichment benchmarks

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use catalog_introspect::{ArrayColumnProbe, Column, enrich_array_dimensions};

/// `tables` tables with 20 columns each, every fourth column an array
fn wide_schema(tables: usize) -> (Vec<Column>, Vec<ArrayColumnProbe>) {
    let mut columns = Vec::with_capacity(tables * 20);
    let mut probes = Vec::new();

    for t in 0..tables {
        let table = format!("table_{}", t);
        for c in 0..20 {
            let column = format!("column_{}", c);
            if c % 4 == 0 {
                probes.push(ArrayColumnProbe::new(&table, &column, 1 + (c % 3) as i32));
            }
            columns.push(Column::new(&table, &column));
        }
    }

    (columns, probes)
}

fn bench_enrich(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrich/array_dimensions");

    for tables in [10, 100, 1000] {
        let (columns, probes) = wide_schema(tables);
        group.bench_with_input(BenchmarkId::from_parameter(tables), &tables, |b, _| {
            b.iter(|| {
                let mut columns = columns.clone();
                enrich_array_dimensions(&mut columns, black_box(&probes));
                black_box(columns);
            });
        });
    }

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_enrich
);

criterion_main!(benches);
