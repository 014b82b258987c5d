//! Scalar lane functions for the signed integer lane types.
//!
//! Arithmetic wraps on overflow. Shift counts are reduced modulo the lane
//! width, and `MIN / -1` wraps to `MIN`.

use num::traits::{WrappingAdd, WrappingMul, WrappingNeg, WrappingShl, WrappingSub};
use num::PrimInt;

use super::Lane;
use crate::simd::operators::opcode;

/// Everything the integer kernels need from a lane type.
pub(crate) trait IntegralLane:
    Lane + PrimInt + WrappingAdd + WrappingSub + WrappingMul + WrappingNeg + WrappingShl
{
}

impl<T> IntegralLane for T where
    T: Lane + PrimInt + WrappingAdd + WrappingSub + WrappingMul + WrappingNeg + WrappingShl
{
}

#[inline(always)]
fn shift_count<T: IntegralLane>(n: T) -> u32 {
    (n.to_raw_bits() as u32) & (T::BITS - 1)
}

#[inline(always)]
fn div<T: IntegralLane>(a: T, b: T) -> T {
    match a.checked_div(&b) {
        Some(q) => q,
        // Only MIN / -1 reaches here; zero divisors are rejected by the kernel.
        None if b != T::zero() => a.wrapping_neg(),
        None => T::zero(),
    }
}

pub(crate) fn unary<T: IntegralLane>(opc: usize) -> Option<fn(T) -> T> {
    let f: fn(T) -> T = match opc {
        opcode::ABS => |a| if a < T::zero() { a.wrapping_neg() } else { a },
        opcode::NEG => |a| a.wrapping_neg(),
        _ => return None,
    };
    Some(f)
}

pub(crate) fn binary<T: IntegralLane>(opc: usize) -> Option<fn(T, T) -> T> {
    let f: fn(T, T) -> T = match opc {
        opcode::ADD => |a, b| a.wrapping_add(&b),
        opcode::SUB => |a, b| a.wrapping_sub(&b),
        opcode::MUL => |a, b| a.wrapping_mul(&b),
        opcode::DIV => div::<T>,
        opcode::MIN => |a, b| a.min(b),
        opcode::MAX => |a, b| a.max(b),
        opcode::AND => |a, b| a & b,
        opcode::OR => |a, b| a | b,
        opcode::XOR => |a, b| a ^ b,
        opcode::LSHL => |a, n| a.wrapping_shl(shift_count(n)),
        opcode::ASHR => |a, n| a.signed_shr(shift_count(n)),
        opcode::LSHR => |a, n| a.unsigned_shr(shift_count(n)),
        _ => return None,
    };
    Some(f)
}

pub(crate) fn compare<T: IntegralLane>(opc: usize) -> Option<fn(T, T) -> bool> {
    let f: fn(T, T) -> bool = match opc {
        opcode::EQ => |a, b| a == b,
        opcode::NE => |a, b| a != b,
        opcode::LT => |a, b| a < b,
        opcode::LE => |a, b| a <= b,
        opcode::GT => |a, b| a > b,
        opcode::GE => |a, b| a >= b,
        opcode::UNSIGNED_LT => |a, b| a.to_unsigned_bits() < b.to_unsigned_bits(),
        opcode::UNSIGNED_LE => |a, b| a.to_unsigned_bits() <= b.to_unsigned_bits(),
        opcode::UNSIGNED_GT => |a, b| a.to_unsigned_bits() > b.to_unsigned_bits(),
        opcode::UNSIGNED_GE => |a, b| a.to_unsigned_bits() >= b.to_unsigned_bits(),
        _ => return None,
    };
    Some(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin<T: IntegralLane>(opc: usize, a: T, b: T) -> T {
        binary::<T>(opc).map(|f| f(a, b)).unwrap()
    }

    #[test]
    fn test_wrapping_arithmetic() {
        assert_eq!(bin(opcode::ADD, i32::MAX, 1), i32::MIN);
        assert_eq!(bin(opcode::MUL, 16i8, 16), 0);
        assert_eq!(bin(opcode::DIV, i64::MIN, -1), i64::MIN);
        assert_eq!(bin(opcode::DIV, -7i16, 2), -3);
        assert_eq!(unary::<i8>(opcode::ABS).map(|f| f(i8::MIN)), Some(i8::MIN));
    }

    #[test]
    fn test_shift_counts_are_masked() {
        assert_eq!(bin(opcode::LSHL, 1i32, 33), 2);
        assert_eq!(bin(opcode::ASHR, -16i8, 10), -4);
        assert_eq!(bin(opcode::LSHR, -1i8, 4), 0x0f);
        assert_eq!(bin(opcode::LSHR, -1i16, -1), 1);
        assert_eq!(bin(opcode::LSHL, 1i64, 64), 1);
    }

    #[test]
    fn test_unsigned_compare() {
        let lt = compare::<i8>(opcode::UNSIGNED_LT).unwrap();
        assert!(lt(1, -1));
        assert!(!lt(-1, 1));
        let ge = compare::<i32>(opcode::UNSIGNED_GE).unwrap();
        assert!(ge(i32::MIN, i32::MAX));
    }

    #[test]
    fn test_floating_only_opcodes_absent() {
        assert!(unary::<i32>(opcode::SQRT).is_none());
        assert!(binary::<i32>(opcode::POW).is_none());
    }
}
