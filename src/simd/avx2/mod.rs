//! AVX implementations of whole-vector `f32` arithmetic.
//!
//! Used by the substrate for `ADD`, `SUB`, `MUL` and `DIV` on `f32` lanes
//! when the lane count is a multiple of eight. The 256-bit `vaddps`,
//! `vsubps`, `vmulps` and `vdivps` instructions are correctly rounded, so
//! results are bit-identical to the scalar loop.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: any x86 processor with AVX (Sandy Bridge and later)
//! - **Target Architecture**: x86 or x86_64
//! - **Runtime Detection**: checked once per call with `is_x86_feature_detected!`

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::sync::Once;

use tracing::debug;

use crate::simd::operators::opcode;

/// Number of f32 elements that fit in a 256-bit register.
pub(crate) const LANE_COUNT: usize = 8;

static ANNOUNCE: Once = Once::new();

type Kernel = unsafe fn(&[f32], &[f32], &mut [f32]);

macro_rules! avx_kernel {
    ($name:ident, $intrinsic:ident) => {
        #[target_feature(enable = "avx")]
        unsafe fn $name(a: &[f32], b: &[f32], out: &mut [f32]) {
            for ((a, b), out) in a
                .chunks_exact(LANE_COUNT)
                .zip(b.chunks_exact(LANE_COUNT))
                .zip(out.chunks_exact_mut(LANE_COUNT))
            {
                let va = _mm256_loadu_ps(a.as_ptr());
                let vb = _mm256_loadu_ps(b.as_ptr());
                _mm256_storeu_ps(out.as_mut_ptr(), $intrinsic(va, vb));
            }
        }
    };
}

avx_kernel!(add, _mm256_add_ps);
avx_kernel!(sub, _mm256_sub_ps);
avx_kernel!(mul, _mm256_mul_ps);
avx_kernel!(div, _mm256_div_ps);

/// Runs `opc` over whole registers, or returns `None` when this path does
/// not apply.
pub(crate) fn binary_f32(opc: usize, a: &[f32], b: &[f32]) -> Option<Box<[f32]>> {
    if a.len() != b.len() || a.len() % LANE_COUNT != 0 {
        return None;
    }
    let kernel: Kernel = match opc {
        opcode::ADD => add,
        opcode::SUB => sub,
        opcode::MUL => mul,
        opcode::DIV => div,
        _ => return None,
    };
    if !is_x86_feature_detected!("avx") {
        return None;
    }
    ANNOUNCE.call_once(|| debug!(lanes = LANE_COUNT, "using AVX kernels for f32 arithmetic"));

    let mut out = vec![0.0f32; a.len()];
    // SAFETY: AVX support was verified above, and `a`, `b` and `out` share a
    // length that is a multiple of LANE_COUNT, so every unaligned load and
    // store stays in bounds.
    unsafe { kernel(a, b, &mut out) };
    Some(out.into_boxed_slice())
}
