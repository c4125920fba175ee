use criterion::{Criterion, black_box, criterion_group, criterion_main};

use mp_resolution::{BinEdges, Estimator, estimator::dispersion_per_bin};

fn synthetic(n: usize) -> (Vec<f64>, Vec<f64>) {
    // Deterministic pseudo-data; no RNG needed for throughput numbers.
    let var: Vec<f64> = (0..n).map(|i| 40.0 + (i as f64 * 0.7919).sin().abs() * 900.0).collect();
    let res: Vec<f64> = (0..n).map(|i| (i as f64 * 0.1237).cos() * 25.0).collect();
    (var, res)
}

fn bench_quantile_edges(c: &mut Criterion) {
    let (var, _) = synthetic(100_000);
    c.bench_function("quantile_edges_100k", |b| {
        b.iter(|| BinEdges::quantile(black_box(&var)).unwrap())
    });
}

fn bench_dispersion(c: &mut Criterion) {
    let (var, res) = synthetic(100_000);
    let bins = BinEdges::quantile(&var).unwrap();
    for est in [Estimator::Std, Estimator::Central68, Estimator::SqrtMse] {
        c.bench_function(&format!("dispersion_100k_{}", est.id()), |b| {
            b.iter(|| dispersion_per_bin(black_box(&res), black_box(&var), &bins, est))
        });
    }
}

criterion_group!(benches, bench_quantile_edges, bench_dispersion);
criterion_main!(benches);
