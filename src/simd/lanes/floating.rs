//! Scalar lane functions for `f32` and `f64`.

use num::Float;

use super::Lane;
use crate::simd::operators::opcode;

/// NaN-propagating minimum that orders `-0.0` below `+0.0`.
#[inline(always)]
fn min<T: Float>(a: T, b: T) -> T {
    if a.is_nan() || b.is_nan() {
        return T::nan();
    }
    if a == b {
        return if a.is_sign_negative() { a } else { b };
    }
    if a < b {
        a
    } else {
        b
    }
}

/// NaN-propagating maximum that orders `+0.0` above `-0.0`.
#[inline(always)]
fn max<T: Float>(a: T, b: T) -> T {
    if a.is_nan() || b.is_nan() {
        return T::nan();
    }
    if a == b {
        return if a.is_sign_positive() { a } else { b };
    }
    if a > b {
        a
    } else {
        b
    }
}

pub(crate) fn unary<T: Lane + Float>(opc: usize) -> Option<fn(T) -> T> {
    let f: fn(T) -> T = match opc {
        opcode::ABS => |a| a.abs(),
        opcode::NEG => |a| -a,
        opcode::SIN => |a| a.sin(),
        opcode::COS => |a| a.cos(),
        opcode::TAN => |a| a.tan(),
        opcode::ASIN => |a| a.asin(),
        opcode::ACOS => |a| a.acos(),
        opcode::ATAN => |a| a.atan(),
        opcode::EXP => |a| a.exp(),
        opcode::LOG => |a| a.ln(),
        opcode::LOG10 => |a| a.log10(),
        opcode::SQRT => |a| a.sqrt(),
        opcode::CBRT => |a| a.cbrt(),
        opcode::SINH => |a| a.sinh(),
        opcode::COSH => |a| a.cosh(),
        opcode::TANH => |a| a.tanh(),
        opcode::EXPM1 => |a| a.exp_m1(),
        opcode::LOG1P => |a| a.ln_1p(),
        _ => return None,
    };
    Some(f)
}

pub(crate) fn binary<T: Lane + Float>(opc: usize) -> Option<fn(T, T) -> T> {
    let f: fn(T, T) -> T = match opc {
        opcode::ADD => |a, b| a + b,
        opcode::SUB => |a, b| a - b,
        opcode::MUL => |a, b| a * b,
        opcode::DIV => |a, b| a / b,
        opcode::MIN => min::<T>,
        opcode::MAX => max::<T>,
        // Bitwise or on the encodings; reachable only through the private token.
        opcode::OR => |a, b| T::from_raw_bits(a.to_raw_bits() | b.to_raw_bits()),
        opcode::ATAN2 => |a, b| a.atan2(b),
        opcode::POW => |a, b| a.powf(b),
        opcode::HYPOT => |a, b| a.hypot(b),
        _ => return None,
    };
    Some(f)
}

pub(crate) fn ternary<T: Lane + Float>(opc: usize) -> Option<fn(T, T, T) -> T> {
    let f: fn(T, T, T) -> T = match opc {
        opcode::FMA => |a, b, c| a.mul_add(b, c),
        _ => return None,
    };
    Some(f)
}

pub(crate) fn compare<T: Lane + Float>(opc: usize) -> Option<fn(T, T) -> bool> {
    let f: fn(T, T) -> bool = match opc {
        opcode::EQ => |a, b| a == b,
        opcode::NE => |a, b| a != b,
        opcode::LT => |a, b| a < b,
        opcode::LE => |a, b| a <= b,
        opcode::GT => |a, b| a > b,
        opcode::GE => |a, b| a >= b,
        _ => return None,
    };
    Some(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_signed_zero() {
        assert!(min(0.0f32, -0.0).is_sign_negative());
        assert!(min(-0.0f64, 0.0).is_sign_negative());
        assert!(max(-0.0f32, 0.0).is_sign_positive());
        assert!(max(0.0f64, -0.0).is_sign_positive());
    }

    #[test]
    fn test_min_max_nan() {
        assert!(min(f32::NAN, 1.0).is_nan());
        assert!(max(1.0f64, f64::NAN).is_nan());
        assert_eq!(min(1.0f32, 2.0), 1.0);
        assert_eq!(max(1.0f64, 2.0), 2.0);
    }

    #[test]
    fn test_bitwise_or_on_encodings() {
        let or = binary::<f32>(opcode::OR).unwrap();
        assert_eq!(or(0.0, -3.0), -3.0);
        assert_eq!(or(-0.0, 0.0).to_bits(), 0x8000_0000);
    }

    #[test]
    fn test_integral_only_opcodes_absent() {
        assert!(binary::<f64>(opcode::LSHL).is_none());
        assert!(binary::<f64>(opcode::AND).is_none());
        assert!(compare::<f32>(opcode::UNSIGNED_LT).is_none());
    }

    #[test]
    fn test_fma_and_division() {
        let fma = ternary::<f64>(opcode::FMA).unwrap();
        assert_eq!(fma(2.0, 3.0, 1.0), 7.0);
        let div = binary::<f32>(opcode::DIV).unwrap();
        assert_eq!(div(1.0, -0.0), f32::NEG_INFINITY);
        assert!(div(0.0, 0.0).is_nan());
    }
}
