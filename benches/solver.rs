//! Benchmarks for nearest-point solving and the normalization sweep.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dbdist::{curves, BoundaryDistanceSolver, Point, RectBounds, SolverOptions};
use rand::prelude::*;

fn random_points(n: usize) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)).unwrap())
        .collect()
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    let points = random_points(64);
    let curves: [(&str, fn(f64) -> f64); 4] = [
        ("flat", curves::flat),
        ("diagonal", curves::diagonal),
        ("diagonal_sine", curves::diagonal_sine),
        ("arch", curves::arch),
    ];

    for (name, curve) in curves {
        let solver = BoundaryDistanceSolver::new(curve, RectBounds::unit());
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_with_input(BenchmarkId::new("curve", name), &name, |bench, _| {
            bench.iter(|| {
                for p in &points {
                    black_box(solver.solve(black_box(p)).unwrap());
                }
            })
        });
    }

    group.finish();
}

fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    for n in [10, 50, 200] {
        let opts = SolverOptions::default().with_edge_samples(n);
        let solver =
            BoundaryDistanceSolver::new(curves::diagonal_sine, RectBounds::unit()).with_options(opts);

        group.throughput(Throughput::Elements(4 * n as u64));
        group.bench_with_input(BenchmarkId::new("sequential", n), &n, |bench, _| {
            bench.iter(|| solver.compute_normalization(black_box(0.25)).unwrap())
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", n), &n, |bench, _| {
            bench.iter(|| solver.compute_normalization_par(black_box(0.25)).unwrap())
        });
    }

    group.finish();
}

fn bench_tolerance(c: &mut Criterion) {
    let mut group = c.benchmark_group("x_tolerance");
    let p = Point::new(0.3, 0.8).unwrap();

    for tol in [1e-4, 1e-6, 1e-8, 1e-10] {
        let opts = SolverOptions::default().with_x_tolerance(tol);
        let solver = BoundaryDistanceSolver::new(curves::arch, RectBounds::unit()).with_options(opts);
        group.bench_with_input(BenchmarkId::from_parameter(tol), &tol, |bench, _| {
            bench.iter(|| solver.solve(black_box(&p)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_solve, bench_normalization, bench_tolerance);
criterion_main!(benches);
