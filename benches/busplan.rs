use busplan::prelude::*;
use criterion::{Criterion, criterion_group, criterion_main};
use std::{env, hint::black_box, path::Path, time::Duration};

const GRID: usize = 40;
const STEP: f64 = 0.009;

fn grid_stop(row: usize, col: usize) -> String {
    format!("Row {row} Col {col}")
}

/// One route along every row and one along every column of a square grid.
fn grid_network() -> Repository {
    let mut visits = Vec::with_capacity(GRID * GRID * 2);
    for a in 0..GRID {
        for b in 0..GRID {
            let sequence = b as u32 + 1;
            let (lat, lon) = (12.8 + a as f64 * STEP, 77.4 + b as f64 * STEP);
            visits.push(StopVisit::new(&format!("H{a}"), &grid_stop(a, b), sequence, lat, lon));
            let (lat, lon) = (12.8 + b as f64 * STEP, 77.4 + a as f64 * STEP);
            visits.push(StopVisit::new(&format!("V{a}"), &grid_stop(b, a), sequence, lat, lon));
        }
    }
    Repository::new()
        .load_visits(visits)
        .expect("Failed to build grid network")
}

fn table_network(path: &Path) -> Repository {
    let reader = TableReader::new(TableConfig::default());
    let reader = if path.extension().is_some_and(|ext| ext == "zip") {
        reader.from_zip(path.to_owned())
    } else {
        reader.from_csv(path.to_owned())
    };
    Repository::new()
        .load_table(reader)
        .expect("Failed to build repository")
}

fn solve(repository: &Repository, from: &str, to: &str) {
    let _ = black_box(repository.plan(from, to));
}

fn criterion_benchmark(c: &mut Criterion) {
    let repository = match env::var("BUSPLAN_TABLE_PATH") {
        Ok(path_str) => table_network(Path::new(&path_str)),
        Err(_) => grid_network(),
    };
    let first = grid_stop(0, 0);
    let along = grid_stop(0, GRID - 1);
    let across = grid_stop(GRID - 1, GRID - 1);

    let mut group = c.benchmark_group("Planning");

    group.warm_up_time(Duration::from_secs(5));

    group.measurement_time(Duration::from_secs(15));

    group.bench_function("Direct solve", |b| {
        b.iter(|| solve(&repository, &first, &along))
    });

    group.bench_function("Transfer solve", |b| {
        b.iter(|| solve(&repository, &first, &across))
    });

    group.bench_function("Stop search", |b| {
        b.iter(|| black_box(repository.search_stops_by_name("row 12 col 3")))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
