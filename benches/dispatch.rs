use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use ndarray::Array1;
use vectorly::operators::{ADD, FMA, LT};
use vectorly::{LanewiseSlice, Shape, Species};

// --- Configuration ---
const VECTOR_LENGTHS: &[usize] = &[
    512,
    16_384,
    1_048_576, // Large enough for the parallel path
];

fn generate_data(len: usize) -> (Vec<f32>, Vec<f32>) {
    let a: Vec<f32> = (0..len).map(|i| (i % 97) as f32 * 0.5).collect();
    let b: Vec<f32> = (0..len).map(|i| (i % 89) as f32 * 0.25).collect();

    (a, b)
}

fn bench_warm_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarmDispatch");

    for shape in [Shape::S128Bit, Shape::S256Bit, Shape::S512Bit] {
        let sp = Species::<f32>::of(shape);
        let v = sp.iota().clone();
        let w = sp.broadcast(1.5);

        // First use populates the cache slot; everything after is a lookup.
        v.lanewise(ADD, &w).unwrap();

        group.bench_function(format!("add/{shape}"), |bencher| {
            bencher.iter(|| black_box(black_box(&v).lanewise(ADD, black_box(&w)).unwrap()));
        });
        group.bench_function(format!("fma/{shape}"), |bencher| {
            bencher.iter(|| black_box(v.lanewise_ternary(FMA, &w, &w).unwrap()));
        });
        group.bench_function(format!("compare/{shape}"), |bencher| {
            bencher.iter(|| black_box(v.compare(LT, black_box(&w)).unwrap()));
        });
    }

    group.finish();
}

fn bench_slice_addition(c: &mut Criterion) {
    for &vector_len in VECTOR_LENGTHS.iter() {
        let mut group = c.benchmark_group(format!("SliceAddition/{vector_len}"));
        group.throughput(Throughput::Elements(vector_len as u64));

        let (a_vec, b_vec) = generate_data(vector_len);
        let sp = Species::<f32>::preferred();

        group.bench_function("scalar loop", |bencher| {
            bencher.iter(|| {
                black_box(
                    a_vec
                        .iter()
                        .zip(black_box(&b_vec))
                        .map(|(x, y)| x + y)
                        .collect::<Vec<f32>>(),
                )
            });
        });

        group.bench_function("vector_lanewise (vectorly)", |bencher| {
            bencher.iter(|| black_box(a_vec.vector_lanewise(sp, ADD, black_box(&b_vec)).unwrap()));
        });

        group.bench_function("par_vector_lanewise (vectorly)", |bencher| {
            bencher.iter(|| {
                black_box(a_vec.par_vector_lanewise(sp, ADD, black_box(&b_vec)).unwrap())
            });
        });

        // ndarray is a good baseline since it vectorizes internally.
        let a_arr = Array1::from_vec(a_vec.clone());
        let b_arr = Array1::from_vec(b_vec.clone());

        group.bench_function("ndarray", |bencher| {
            bencher.iter(|| black_box(&a_arr + &b_arr));
        });

        group.finish();
    }
}

fn bench_slice_reduction(c: &mut Criterion) {
    for &vector_len in VECTOR_LENGTHS.iter() {
        let mut group = c.benchmark_group(format!("SliceSum/{vector_len}"));
        group.throughput(Throughput::Elements(vector_len as u64));

        let (a_vec, _) = generate_data(vector_len);
        let sp = Species::<f32>::preferred();

        group.bench_function("scalar loop", |bencher| {
            bencher.iter(|| black_box(black_box(&a_vec).iter().sum::<f32>()));
        });
        group.bench_function("vector_reduce (vectorly)", |bencher| {
            bencher.iter(|| black_box(a_vec.vector_reduce(sp, ADD).unwrap()));
        });
        group.bench_function("par_vector_reduce (vectorly)", |bencher| {
            bencher.iter(|| black_box(a_vec.par_vector_reduce(sp, ADD).unwrap()));
        });

        let a_arr = Array1::from_vec(a_vec.clone());
        group.bench_function("ndarray", |bencher| {
            bencher.iter(|| black_box(a_arr.sum()));
        });

        group.finish();
    }
}

criterion_group!(
    benches,
    bench_warm_dispatch,
    bench_slice_addition,
    bench_slice_reduction
);
criterion_main!(benches);
