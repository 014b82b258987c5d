use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vectorly::operators::{ADD, DIV, FIRST_NONZERO, HYPOT, MAX, MIN, MUL, XOR};
use vectorly::{LanewiseSlice, Shape, Species, VectorError, PARALLEL_SIMD_THRESHOLD};

#[test]
fn test_lanewise_small_array() {
    let sp = Species::<f32>::of(Shape::S256Bit);
    let a = vec![1.0f32, -2.0, 3.0];
    let b = vec![0.5f32, 0.5, 0.5];
    let result = a.par_vector_lanewise(sp, ADD, &b).unwrap();
    assert_eq!(result, vec![1.5, -1.5, 3.5]);
}

#[test]
fn test_lanewise_large_array() {
    let sp = Species::<f32>::preferred();
    let n = PARALLEL_SIMD_THRESHOLD * 2 + 3;
    let a: Vec<f32> = (0..n).map(|i| i as f32).collect();
    let b: Vec<f32> = (0..n).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();

    let result = a.par_vector_lanewise(sp, MUL, &b).unwrap();
    assert_eq!(result.len(), n);
    for (i, &val) in result.iter().enumerate() {
        let expected = if i % 2 == 0 { i as f32 } else { -(i as f32) };
        assert_eq!(val, expected, "par_vector_lanewise failed at index {i}");
    }
}

#[test]
fn test_parallel_matches_sequential_random() {
    let mut rng = StdRng::seed_from_u64(12345);
    let sp = Species::<f64>::of(Shape::S256Bit);
    let n = PARALLEL_SIMD_THRESHOLD + 999;
    let a: Vec<f64> = (0..n).map(|_| rng.random_range(-100.0..=100.0)).collect();
    let b: Vec<f64> = (0..n).map(|_| rng.random_range(-100.0..=100.0)).collect();

    let sequential = a.vector_lanewise(sp, HYPOT, &b).unwrap();
    let parallel = a.par_vector_lanewise(sp, HYPOT, &b).unwrap();
    assert_eq!(sequential, parallel);
    for (i, &h) in parallel.iter().enumerate() {
        assert_eq!(h, a[i].hypot(b[i]));
    }

    assert_eq!(a.par_vector_reduce(sp, MAX), a.vector_reduce(sp, MAX));
    assert_eq!(
        a.par_vector_reduce(sp, MIN).unwrap(),
        a.iter().cloned().fold(f64::INFINITY, f64::min)
    );

    let sum = a.par_vector_reduce(sp, ADD).unwrap();
    let reference: f64 = a.iter().sum();
    let magnitude: f64 = a.iter().map(|x| x.abs()).sum();
    assert!((sum - reference).abs() <= magnitude * 1e-12);
}

#[test]
fn test_parallel_integer_reduce() {
    let sp = Species::<i64>::preferred();
    let n = PARALLEL_SIMD_THRESHOLD * 3;
    let a: Vec<i64> = (0..n as i64).collect();
    let total = (n as i64 - 1) * n as i64 / 2;
    assert_eq!(a.par_vector_reduce(sp, ADD), Ok(total));
    assert_eq!(
        a.par_vector_reduce(sp, XOR),
        Ok(a.iter().fold(0, |acc, x| acc ^ x))
    );
}

#[test]
fn test_parallel_first_nonzero() {
    let sp = Species::<i32>::of(Shape::S128Bit);
    let n = PARALLEL_SIMD_THRESHOLD + 17;
    let mut a = vec![0i32; n];
    assert_eq!(a.par_vector_reduce(sp, FIRST_NONZERO), Ok(0));
    a[n - 1] = -5;
    a[n / 2] = 11;
    assert_eq!(a.par_vector_reduce(sp, FIRST_NONZERO), Ok(11));
}

#[test]
fn test_parallel_errors_propagate() {
    let sp = Species::<i32>::preferred();
    let n = PARALLEL_SIMD_THRESHOLD + 1;
    let a = vec![1i32; n];
    let mut b = vec![1i32; n];
    b[n - 1] = 0;
    assert!(matches!(
        a.par_vector_lanewise(sp, DIV, &b),
        Err(VectorError::Arithmetic { .. })
    ));
    assert!(matches!(
        a.par_vector_lanewise(sp, ADD, &b[1..]),
        Err(VectorError::Validation { .. })
    ));
}
