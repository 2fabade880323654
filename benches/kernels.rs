use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use genotensor::data::{dim_width, Diploid, TensorView};
use genotensor::model::{kronecker_product_coef, sum_kahan, KroneckerProduct};
use ndarray::Array2;
use std::hint::black_box;

/// Benchmark sign-split Kahan summation against a plain fold
fn bench_summation(c: &mut Criterion) {
    let mut group = c.benchmark_group("summation");

    for len in [1_000usize, 10_000, 100_000] {
        let values: Vec<f64> = (0..len)
            .map(|i| if i % 7 == 0 { -1.0 / (i + 1) as f64 } else { 1.0 / (i + 1) as f64 })
            .collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("kahan", len), &values, |b, values| {
            b.iter(|| black_box(sum_kahan(black_box(values).iter().copied())))
        });

        group.bench_with_input(BenchmarkId::new("naive", len), &values, |b, values| {
            b.iter(|| black_box(black_box(values).iter().fold(0.0, |acc, &x| acc + x)))
        });
    }

    group.finish();
}

/// Benchmark lazy Kronecker access vs materializing the product
fn bench_kronecker(c: &mut Criterion) {
    let mut group = c.benchmark_group("kronecker");

    for n_alleles in [2usize, 4, 6] {
        let width = dim_width::<Diploid>(n_alleles);
        let t = Array2::from_shape_fn((width, n_alleles), |(g, a)| ((g + a) % 3) as f64 * 0.25);
        let rows = width * width;
        group.throughput(Throughput::Elements(rows as u64));

        // One column of the joint transmission matrix, as a likelihood step reads it
        group.bench_with_input(BenchmarkId::new("lazy_column", n_alleles), &t, |b, t| {
            b.iter(|| {
                let mut acc = 0.0;
                for i in 0..rows {
                    acc += kronecker_product_coef(t, t, i, 1);
                }
                black_box(acc)
            })
        });

        group.bench_with_input(BenchmarkId::new("materialized_column", n_alleles), &t, |b, t| {
            b.iter(|| {
                let full = KroneckerProduct::new(t, t).to_array();
                black_box(full.column(1).sum())
            })
        });
    }

    group.finish();
}

/// Benchmark multi-index access through a view
fn bench_view_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_access");
    let width = dim_width::<Diploid>(4);
    let buf: Vec<f32> = (0..width * width * width).map(|x| x as f32).collect();
    let view = TensorView::new(&buf, [width, width, width]).unwrap();

    group.throughput(Throughput::Elements(buf.len() as u64));
    group.bench_function("checked_index", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for k in 0..width {
                for j in 0..width {
                    for i in 0..width {
                        acc += view[[i, j, k]];
                    }
                }
            }
            black_box(acc)
        })
    });

    group.bench_function("flat_slice", |b| {
        b.iter(|| black_box(view.as_slice().iter().sum::<f32>()))
    });

    group.finish();
}

criterion_group!(benches, bench_summation, bench_kronecker, bench_view_access);

criterion_main!(benches);
