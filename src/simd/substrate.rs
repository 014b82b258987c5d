//! Execution substrate for resolved lane functions.
//!
//! The kernel hands every cached operation here together with its opcode.
//! The scalar loops are the reference behavior and are always correct;
//! an accelerated path may take over a whole operation when the lane type
//! provides one, and must produce the same lanes.

use crate::simd::cache::Reducer;
use crate::simd::lanes::Lane;

/// Applies `f` to every lane of `a`.
#[inline(always)]
pub fn unary_op<T: Lane>(_opc: usize, a: &[T], f: fn(T) -> T) -> Box<[T]> {
    a.iter().map(|&x| f(x)).collect()
}

/// Applies `f` lane-wise to `a` and `b`.
#[inline(always)]
pub fn binary_op<T: Lane>(opc: usize, a: &[T], b: &[T], f: fn(T, T) -> T) -> Box<[T]> {
    if let Some(lanes) = T::accelerated_binary(opc, a, b) {
        return lanes;
    }
    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
}

/// Applies `f` lane-wise to `a`, `b` and `c`.
#[inline(always)]
pub fn ternary_op<T: Lane>(
    _opc: usize,
    a: &[T],
    b: &[T],
    c: &[T],
    f: fn(T, T, T) -> T,
) -> Box<[T]> {
    a.iter()
        .zip(b)
        .zip(c)
        .map(|((&x, &y), &z)| f(x, y, z))
        .collect()
}

/// Evaluates the relation `f` lane-wise.
#[inline(always)]
pub fn compare_op<T: Lane>(_opc: usize, a: &[T], b: &[T], f: fn(T, T) -> bool) -> Box<[bool]> {
    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
}

/// Folds all lanes with `r.combine` as a balanced pairwise tree.
///
/// The association order differs from a left-to-right fold, so floating
/// point sums and products may round differently from a scalar loop.
pub fn reduce<T: Lane>(opc: usize, a: &[T], r: Reducer<T>) -> T {
    match a.len() {
        0 => r.identity,
        1 => a[0],
        n => {
            let (lo, hi) = a.split_at(n / 2);
            (r.combine)(reduce(opc, lo, r), reduce(opc, hi, r))
        }
    }
}

/// Hardware path for whole `f32` binary operations.
#[inline(always)]
pub(crate) fn accelerated_f32(opc: usize, a: &[f32], b: &[f32]) -> Option<Box<[f32]>> {
    #[cfg(all(any(avx2, avx512), any(target_arch = "x86", target_arch = "x86_64")))]
    {
        crate::simd::avx2::binary_f32(opc, a, b)
    }
    #[cfg(not(all(any(avx2, avx512), any(target_arch = "x86", target_arch = "x86_64"))))]
    {
        let _ = (opc, a, b);
        None
    }
}
