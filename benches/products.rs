use clifford_engine::prelude::*;
use clifford_engine::random::random_mv;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

const BATCH_SIZE: usize = 1_000;

/// Benchmark layout construction (tables + kernels) as the dimension grows.
fn bench_layout_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout construction");
    for dims in [3usize, 4, 5, 6, 7] {
        group.bench_with_input(BenchmarkId::from_parameter(dims), &dims, |bencher, &dims| {
            bencher.iter(|| black_box(Cl::new(dims, 0).build().unwrap()))
        });
    }
    group.finish();
}

/// Benchmark dense geometric products of random multivectors.
fn bench_geometric_product(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("geometric product × 1000 batch");
    for dims in [3usize, 4, 5] {
        let (layout, _) = Cl::new(dims, 0).build().unwrap();
        let a = random_mv(&layout, &mut rng, &RandomOptions::default()).unwrap();
        let b = random_mv(&layout, &mut rng, &RandomOptions::default()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(dims), &dims, |bencher, _| {
            bencher.iter(|| {
                let mut res = MultiVector::zero(&layout);
                for _ in 0..BATCH_SIZE {
                    res = black_box(&a) * black_box(&b);
                }
                black_box(res)
            })
        });
    }
    group.finish();
}

/// Benchmark the raw kernel against the outer-product kernel on vectors only.
fn bench_kernels(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let (layout, _) = Cl::new(4, 0).build().unwrap();
    let a = random_mv(&layout, &mut rng, &RandomOptions::vectors()).unwrap();
    let b = random_mv(&layout, &mut rng, &RandomOptions::vectors()).unwrap();
    let full = layout.kernel(ProductKind::Outer);
    let vv = layout.grade_restricted_kernel(ProductKind::Outer, &[1], &[1]);

    c.bench_function("outer kernel 4D vectors × 1000 batch", |bencher| {
        bencher.iter(|| {
            let mut out = vec![0.0; layout.ga_dims()];
            for _ in 0..BATCH_SIZE {
                full.evaluate_into(black_box(a.value()), black_box(b.value()), &mut out);
            }
            black_box(out)
        })
    });

    c.bench_function("grade-restricted outer kernel 4D vectors × 1000 batch", |bencher| {
        bencher.iter(|| {
            let mut out = vec![0.0; layout.ga_dims()];
            for _ in 0..BATCH_SIZE {
                vv.evaluate_into(black_box(a.value()), black_box(b.value()), &mut out);
            }
            black_box(out)
        })
    });
}

/// Benchmark inversion through the linear solve.
fn bench_inverse(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("left_la_inv");
    for dims in [3usize, 4, 5] {
        let (layout, _) = Cl::new(dims, 0).build().unwrap();
        let a = random_mv(&layout, &mut rng, &RandomOptions::default()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(dims), &dims, |bencher, _| {
            bencher.iter(|| black_box(black_box(&a).inv()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_layout_construction,
    bench_geometric_product,
    bench_kernels,
    bench_inverse
);
criterion_main!(benches);
