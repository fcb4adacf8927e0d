use std::fs;
use std::path::PathBuf;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use row_file_sort::cancellation::CancellationToken;
use row_file_sort::generate::Generate;
use row_file_sort::progress::NullProgress;
use row_file_sort::sort::Sort;

fn bench_sort(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let mut group = c.benchmark_group("sort");
    group.sample_size(10);
    for rows in [1_000usize, 10_000] {
        let unsorted = dir.path().join(format!("unsorted-{}", rows));
        Generate::new(unsorted.clone(), rows)
            .generate(&NullProgress, &CancellationToken::new())
            .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter_batched(
                || {
                    let input = dir.path().join(format!("input-{}", rows));
                    fs::copy(&unsorted, &input).unwrap();
                    input
                },
                |input: PathBuf| {
                    let mut sort = Sort::new(input);
                    sort.with_chunk_size(1024);
                    sort.sort(&NullProgress, &CancellationToken::new()).unwrap();
                },
                BatchSize::PerIteration,
            );
        });
    }
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    c.bench_function("generate 1000 rows", |b| {
        let output = dir.path().join("generated");
        b.iter(|| {
            Generate::new(output.clone(), 1_000)
                .generate(&NullProgress, &CancellationToken::new())
                .unwrap();
        });
    });
}

criterion_group!(benches, bench_sort, bench_generate);
criterion_main!(benches);
