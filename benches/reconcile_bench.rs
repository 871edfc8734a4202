use clean_publish::ignore_file::{PatternFilter, parse_patterns};
use clean_publish::reconcile::{conclude, reconcile};
use clean_publish::scanner::enumerate_files;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::HashSet;
use std::fs;
use std::hint::black_box;
use std::path::Path;
use tempfile::tempdir;

fn create_paths(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("lib/module_{}/file_{i}.js", i % 20))
        .collect()
}

fn tracked_half(paths: &[String]) -> HashSet<String> {
    paths.iter().step_by(2).cloned().collect()
}

fn benchmark_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    for count in &[100, 1_000, 10_000] {
        let found = create_paths(*count);
        let tracked = tracked_half(&found);

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| reconcile(black_box(&found), black_box(&tracked)));
        });
    }

    group.finish();
}

fn benchmark_conclude_with_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("conclude_with_patterns");
    let root = Path::new("/package");
    let patterns = parse_patterns("# generated\nlib/module_1*/\n*.map\n/coverage\n");

    for count in &[100, 1_000, 10_000] {
        let found = create_paths(*count);
        let tracked = tracked_half(&found);

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                conclude(
                    root,
                    black_box(&found),
                    black_box(&tracked),
                    Some(patterns.as_slice()),
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_pattern_filter(c: &mut Criterion) {
    let root = Path::new("/package");
    let content: String = (0..50).map(|i| format!("build_{i}/\n*.tmp{i}\n")).collect();
    let patterns = parse_patterns(&content);
    let filter = PatternFilter::new(root, &patterns).unwrap();
    let paths = create_paths(1_000);

    c.bench_function("pattern_filter_1000_paths", |b| {
        b.iter(|| filter.retain_unmatched(black_box(&paths)));
    });
}

fn benchmark_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate_files");

    for count in &[10, 100, 500] {
        let dir = tempdir().unwrap();
        for i in 0..*count {
            let path = dir.path().join(format!("src/dir_{}/file_{i}.js", i % 10));
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "module.exports = {};\n").unwrap();
        }
        fs::create_dir_all(dir.path().join("node_modules/dep")).unwrap();
        fs::write(dir.path().join("node_modules/dep/index.js"), "").unwrap();
        let vcs_patterns = vec!["node_modules/".to_string()];

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| enumerate_files(black_box(dir.path()), &vcs_patterns).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_reconcile,
    benchmark_conclude_with_patterns,
    benchmark_pattern_filter,
    benchmark_enumerate
);
criterion_main!(benches);
