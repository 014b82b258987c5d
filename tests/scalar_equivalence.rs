//! Lane-wise results compared against scalar reference loops.
//!
//! Inputs come from a seeded `StdRng`, so failures are reproducible. Integer
//! lanes must match bit for bit; floating lanes must match bit for bit for
//! the IEEE basic operations and within a small relative error for the
//! transcendental ones.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vectorly::operators::*;
use vectorly::{Lane, Shape, Species, Vector};

const ROUNDS: usize = 200;

fn random_vector<T: Lane>(
    species: &'static Species<T>,
    rng: &mut StdRng,
    mut gen: impl FnMut(&mut StdRng) -> T,
) -> Vector<T> {
    species.from_fn(|_| gen(rng))
}

fn check_binary<T: Lane>(
    species: &'static Species<T>,
    op: impl Into<Binary> + Copy,
    reference: impl Fn(T, T) -> T,
    rng: &mut StdRng,
    mut gen: impl FnMut(&mut StdRng) -> T,
) {
    for _ in 0..ROUNDS {
        let a = random_vector(species, rng, &mut gen);
        let b = random_vector(species, rng, &mut gen);
        let r = a.lanewise(op, &b).unwrap();
        for i in 0..species.length() {
            let expected = reference(a.as_slice()[i], b.as_slice()[i]);
            assert_eq!(
                r.as_slice()[i].to_raw_bits(),
                expected.to_raw_bits(),
                "{} lane {i}: {} {} {} gave {}, expected {}",
                op.into(),
                a.as_slice()[i],
                op.into(),
                b.as_slice()[i],
                r.as_slice()[i],
                expected
            );
        }
    }
}

#[test]
fn test_i32_binary_ops_match_scalar() {
    let mut rng = StdRng::seed_from_u64(12345);
    let sp = Species::<i32>::preferred();
    let any = |rng: &mut StdRng| rng.random::<i32>();
    check_binary(sp, ADD, i32::wrapping_add, &mut rng, any);
    check_binary(sp, SUB, i32::wrapping_sub, &mut rng, any);
    check_binary(sp, MUL, i32::wrapping_mul, &mut rng, any);
    check_binary(sp, MIN, i32::min, &mut rng, any);
    check_binary(sp, MAX, i32::max, &mut rng, any);
    check_binary(sp, AND, |a, b| a & b, &mut rng, any);
    check_binary(sp, OR, |a, b| a | b, &mut rng, any);
    check_binary(sp, XOR, |a, b| a ^ b, &mut rng, any);
    check_binary(sp, AND_NOT, |a, b| a & !b, &mut rng, any);
    check_binary(sp, LSHL, |a, b| a.wrapping_shl(b as u32 & 31), &mut rng, any);
    check_binary(sp, ASHR, |a, b| a >> (b & 31), &mut rng, any);
    check_binary(sp, LSHR, |a, b| ((a as u32) >> (b & 31)) as i32, &mut rng, any);
    check_binary(sp, ROL, |a, b| a.rotate_left(b as u32), &mut rng, any);
    check_binary(sp, ROR, |a, b| a.rotate_right(b as u32), &mut rng, any);

    let nonzero = |rng: &mut StdRng| match rng.random::<i32>() {
        0 => 1,
        x => x,
    };
    check_binary(sp, DIV, i32::wrapping_div, &mut rng, nonzero);
}

#[test]
fn test_narrow_integer_ops_match_scalar() {
    let mut rng = StdRng::seed_from_u64(12345);
    let bytes = Species::<i8>::of(Shape::S128Bit);
    let any8 = |rng: &mut StdRng| rng.random::<i8>();
    check_binary(bytes, ADD, i8::wrapping_add, &mut rng, any8);
    check_binary(bytes, MUL, i8::wrapping_mul, &mut rng, any8);
    check_binary(bytes, LSHR, |a, b| ((a as u8) >> (b & 7)) as i8, &mut rng, any8);
    check_binary(bytes, ROR, |a, b| a.rotate_right(b as u32), &mut rng, any8);

    let shorts = Species::<i16>::of(Shape::S256Bit);
    let any16 = |rng: &mut StdRng| rng.random::<i16>();
    check_binary(shorts, SUB, i16::wrapping_sub, &mut rng, any16);
    check_binary(shorts, ASHR, |a, b| a >> (b & 15), &mut rng, any16);

    let longs = Species::<i64>::of(Shape::S512Bit);
    let any64 = |rng: &mut StdRng| rng.random::<i64>();
    check_binary(longs, MUL, i64::wrapping_mul, &mut rng, any64);
    check_binary(longs, LSHL, |a, b| a.wrapping_shl(b as u32 & 63), &mut rng, any64);
}

#[test]
fn test_float_basic_ops_match_scalar() {
    let mut rng = StdRng::seed_from_u64(12345);
    let sp = Species::<f32>::of(Shape::S256Bit);
    let gen = |rng: &mut StdRng| rng.random_range(-1000.0f32..=1000.0);
    check_binary(sp, ADD, |a, b| a + b, &mut rng, gen);
    check_binary(sp, SUB, |a, b| a - b, &mut rng, gen);
    check_binary(sp, MUL, |a, b| a * b, &mut rng, gen);
    check_binary(sp, DIV, |a, b| a / b, &mut rng, gen);

    let dp = Species::<f64>::preferred();
    let gen64 = |rng: &mut StdRng| rng.random_range(-1.0e6f64..=1.0e6);
    check_binary(dp, ADD, |a, b| a + b, &mut rng, gen64);
    check_binary(dp, DIV, |a, b| a / b, &mut rng, gen64);
    check_binary(dp, MAX, f64::max, &mut rng, gen64);
}

#[test]
fn test_float_transcendentals_match_scalar() {
    let mut rng = StdRng::seed_from_u64(12345);
    let sp = Species::<f64>::of(Shape::S256Bit);
    let cases: [(Unary, fn(f64) -> f64); 6] = [
        (SIN, f64::sin),
        (COS, f64::cos),
        (EXP, f64::exp),
        (SQRT, f64::sqrt),
        (CBRT, f64::cbrt),
        (LOG1P, f64::ln_1p),
    ];
    for (op, reference) in cases {
        for _ in 0..ROUNDS {
            let v = sp.from_fn(|_| rng.random_range(0.0f64..=10.0));
            let r = v.lanewise_unary(op).unwrap();
            for (&x, &y) in v.as_slice().iter().zip(r.as_slice()) {
                let expected = reference(x);
                let error = (y - expected).abs() / expected.abs().max(1.0);
                assert!(error < 1e-12, "{op} of {x}: got {y}, expected {expected}");
            }
        }
    }
}

#[test]
fn test_fma_matches_mul_add() {
    let mut rng = StdRng::seed_from_u64(12345);
    let sp = Species::<f32>::of(Shape::S128Bit);
    for _ in 0..ROUNDS {
        let a = sp.from_fn(|_| rng.random_range(-10.0f32..=10.0));
        let b = sp.from_fn(|_| rng.random_range(-10.0f32..=10.0));
        let c = sp.from_fn(|_| rng.random_range(-10.0f32..=10.0));
        let r = a.lanewise_ternary(FMA, &b, &c).unwrap();
        for i in 0..sp.length() {
            let expected = a.as_slice()[i].mul_add(b.as_slice()[i], c.as_slice()[i]);
            assert_eq!(r.as_slice()[i].to_bits(), expected.to_bits());
        }
    }
}

#[test]
fn test_compare_matches_scalar() {
    let mut rng = StdRng::seed_from_u64(12345);
    let sp = Species::<i16>::of(Shape::S128Bit);
    let relations: [(Comparison, fn(i16, i16) -> bool); 8] = [
        (EQ, |a, b| a == b),
        (NE, |a, b| a != b),
        (LT, |a, b| a < b),
        (LE, |a, b| a <= b),
        (GT, |a, b| a > b),
        (GE, |a, b| a >= b),
        (UNSIGNED_LT, |a, b| (a as u16) < (b as u16)),
        (UNSIGNED_GE, |a, b| (a as u16) >= (b as u16)),
    ];
    for _ in 0..ROUNDS {
        // A narrow range makes equal lanes common.
        let a = sp.from_fn(|_| rng.random_range(-3i16..=3));
        let b = sp.from_fn(|_| rng.random_range(-3i16..=3));
        for (op, reference) in relations {
            let m = a.compare(op, &b).unwrap();
            for i in 0..sp.length() {
                assert_eq!(
                    m.lane_is_set(i).unwrap(),
                    reference(a.as_slice()[i], b.as_slice()[i]),
                    "{op} lane {i}"
                );
            }
        }
    }
}

#[test]
fn test_integer_reductions_match_fold() {
    let mut rng = StdRng::seed_from_u64(12345);
    let sp = Species::<i64>::of(Shape::S512Bit);
    for _ in 0..ROUNDS {
        let v = sp.from_fn(|_| rng.random::<i64>());
        let lanes = v.as_slice();
        assert_eq!(
            v.reduce_lanes(ADD).unwrap(),
            lanes.iter().fold(0i64, |a, &b| a.wrapping_add(b))
        );
        assert_eq!(
            v.reduce_lanes(MUL).unwrap(),
            lanes.iter().fold(1i64, |a, &b| a.wrapping_mul(b))
        );
        assert_eq!(v.reduce_lanes(MIN).unwrap(), *lanes.iter().min().unwrap());
        assert_eq!(v.reduce_lanes(OR).unwrap(), lanes.iter().fold(0, |a, &b| a | b));
    }
}

#[test]
fn test_float_sum_within_reassociation_error() {
    let mut rng = StdRng::seed_from_u64(12345);
    let sp = Species::<f32>::of(Shape::S512Bit);
    for _ in 0..ROUNDS {
        let v = sp.from_fn(|_| rng.random_range(-1.0f32..=1.0));
        let sequential: f32 = v.as_slice().iter().sum();
        let magnitude: f32 = v.as_slice().iter().map(|x| x.abs()).sum();
        let tree = v.reduce_lanes(ADD).unwrap();
        assert!(
            (tree - sequential).abs() <= magnitude * f32::EPSILON * sp.length() as f32,
            "tree sum {tree} vs sequential {sequential}"
        );
    }
}
