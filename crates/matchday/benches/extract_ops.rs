//! Extraction Benchmarks
//!
//! Locator composition, row zipping and table extraction against the mock
//! session.
//!
//! Run with: `cargo bench --bench extract_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matchday::prelude::*;

fn bench_locator_composition(c: &mut Criterion) {
    let mut group = c.benchmark_group("locator_composition");
    let table = Locator::xpath("//div[@id='content']/div[3]/div[3]/table[1]/tbody");

    for row in [1_usize, 10, 100] {
        group.bench_with_input(BenchmarkId::new("row_cells", row), &row, |bench, &n| {
            bench.iter(|| black_box(table.row_cells(black_box(n))));
        });
    }

    group.bench_function("collect_script", |bench| {
        bench.iter(|| black_box(table.rows().to_collect_script()));
    });

    group.finish();
}

fn bench_zip_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("zip_row");
    let schema = FieldSchema::new(["minute", "team", "scorer", "assist"]);

    for (name, len) in [("short", 2_usize), ("exact", 4), ("long", 8)] {
        let cells: Vec<String> = (0..len).map(|i| format!("cell {i}")).collect();
        group.bench_with_input(BenchmarkId::from_parameter(name), &cells, |bench, cells| {
            bench.iter(|| black_box(schema.zip_row(cells.clone())));
        });
    }

    group.finish();
}

fn bench_extract_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_table");
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let url = "https://native-stats.org/matches/1";
    let table = Locator::xpath("//tbody");

    for rows in [11_usize, 50] {
        let data: Vec<Vec<String>> = (0..rows)
            .map(|i| vec![i.to_string(), format!("Player {i}"), "MF".into(), "€1m".into()])
            .collect();
        let borrowed: Vec<Vec<&str>> = data
            .iter()
            .map(|row| row.iter().map(String::as_str).collect())
            .collect();
        let slices: Vec<&[&str]> = borrowed.iter().map(Vec::as_slice).collect();

        let mut session = MockSession::new().with_page(url, MockPage::new().with_table(&table, &slices));
        runtime.block_on(session.navigate(url)).unwrap();
        let options = TableOptions::default();

        group.bench_with_input(BenchmarkId::from_parameter(rows), &session, |bench, session| {
            bench.iter(|| {
                let extracted = runtime
                    .block_on(extract_table(session, &table, &options))
                    .unwrap();
                black_box(extracted);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_locator_composition,
    bench_zip_row,
    bench_extract_table
);
criterion_main!(benches);
