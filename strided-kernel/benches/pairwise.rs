use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use strided_kernel::{assign, dasumpw_ndarray, sasumpw_ndarray, StridedArray};

fn bench_asumpw(c: &mut Criterion) {
    let mut group = c.benchmark_group("asumpw");
    let mut rng = StdRng::seed_from_u64(0);
    for n in [100usize, 10_000, 1_000_000] {
        group.throughput(Throughput::Elements(n as u64));
        let xd: Vec<f64> = (0..2 * n).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let xs: Vec<f32> = xd.iter().map(|&v| v as f32).collect();

        group.bench_with_input(BenchmarkId::new("f64_unit", n), &n, |b, &n| {
            b.iter(|| dasumpw_ndarray(n, black_box(&xd), 1, 0))
        });
        group.bench_with_input(BenchmarkId::new("f64_stride2", n), &n, |b, &n| {
            b.iter(|| dasumpw_ndarray(n, black_box(&xd), 2, 0))
        });
        group.bench_with_input(BenchmarkId::new("f32_reversed", n), &n, |b, &n| {
            b.iter(|| sasumpw_ndarray(n, black_box(&xs), -1, n - 1))
        });
    }
    group.finish();
}

fn bench_assign_transposed(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_transposed");
    for size in [100usize, 500, 1000] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let a = StridedArray::<f64>::from_fn_row_major(&[size, size], |i| (i[0] * size + i[1]) as f64);
        let mut out = StridedArray::<f64>::row_major(&[size, size]);

        group.bench_with_input(BenchmarkId::new("strided", size), &size, |b, _| {
            b.iter(|| {
                let a_view = a.view();
                let a_t = match a_view.permute(&[1, 0]) {
                    Ok(v) => v,
                    Err(err) => panic!("permute failed: {err}"),
                };
                if let Err(err) = assign(&a_t, &mut out.view_mut()) {
                    panic!("assign failed: {err}");
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_asumpw, bench_assign_transposed);
criterion_main!(benches);
