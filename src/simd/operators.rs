//! Operator tokens for lane-wise, cross-lane, comparison, test and
//! conversion operations.
//!
//! Every token is a `const` value carrying its symbolic name, a display
//! form, its arity, a set of capability bits and (unless it is special)
//! a small opcode. Arity, capability bits and opcode are packed into a
//! single `u32` so the capability gate can test them with one mask.
//!
//! Tokens come in categories that mirror how they are used:
//!
//! - [`Unary`], [`Binary`], [`Ternary`] for `lanewise`
//! - [`Associative`] for `reduce_lanes` (also usable as a [`Binary`])
//! - [`Comparison`] for `compare`
//! - [`Test`] for `test`
//! - [`Conversion`] for `convert`
//!
//! # Opcodes
//!
//! Opcodes are dense indexes into the per-species operation caches. Among
//! public tokens, opcodes never repeat inside one (arity, boolean,
//! conversion) bucket; this is checked at compile time over
//! [`ALL_OPERATORS`].

use std::fmt;

use crate::error::{validation_error, Result, VectorError};
use crate::simd::lanes::{LaneKind, LaneType};

/// Capability bits packed into an operator's info word.
pub mod kind {
    /// No capability bits.
    pub const NONE: u32 = 0;
    /// Arity one.
    pub const UNARY: u32 = 1;
    /// Arity two.
    pub const BINARY: u32 = 2;
    /// Arity three.
    pub const TERNARY: u32 = 3;
    /// Mask selecting the arity.
    pub const ARITY_MASK: u32 = 3;
    /// Usable for cross-lane reductions.
    pub const ASSOCIATIVE: u32 = 1 << 2;
    /// Second operand is a shift count.
    pub const SHIFT: u32 = 1 << 3;
    /// Produces a mask instead of a vector.
    pub const BOOLEAN: u32 = 1 << 4;
    /// Changes the lane type.
    pub const CONVERSION: u32 = 1 << 5;
    /// Internal helper, excluded from the diagnostic registry.
    pub const PRIVATE: u32 = 1 << 6;
    /// No opcode; always implemented in software.
    pub const SPECIAL: u32 = 1 << 7;
    /// Integral lanes only.
    pub const NO_FP: u32 = 1 << 8;
    /// Floating-point lanes only.
    pub const ONLY_FP: u32 = 1 << 9;
    /// The opcode field holds a valid opcode.
    pub const OPCODE_VALID: u32 = 1 << 10;
    /// All capability bits.
    pub const KIND_MASK: u32 = (1 << 11) - 1;
}

const OPCODE_SHIFT: u32 = 16;

/// Size of the opcode space; every operation cache has this many slots.
pub const OPCODE_LIMIT: usize = 64;

/// Dense opcodes of the non-conversion operators, shared with the lane kernels.
pub(crate) mod opcode {
    pub const ABS: usize = 0;
    pub const NEG: usize = 1;
    pub const SIN: usize = 2;
    pub const COS: usize = 3;
    pub const TAN: usize = 4;
    pub const ASIN: usize = 5;
    pub const ACOS: usize = 6;
    pub const ATAN: usize = 7;
    pub const EXP: usize = 8;
    pub const LOG: usize = 9;
    pub const LOG10: usize = 10;
    pub const SQRT: usize = 11;
    pub const CBRT: usize = 12;
    pub const SINH: usize = 13;
    pub const COSH: usize = 14;
    pub const TANH: usize = 15;
    pub const EXPM1: usize = 16;
    pub const LOG1P: usize = 17;
    pub const ADD: usize = 0;
    pub const SUB: usize = 1;
    pub const MUL: usize = 2;
    pub const DIV: usize = 3;
    pub const MIN: usize = 4;
    pub const MAX: usize = 5;
    pub const AND: usize = 6;
    pub const OR: usize = 7;
    pub const XOR: usize = 8;
    pub const LSHL: usize = 9;
    pub const ASHR: usize = 10;
    pub const LSHR: usize = 11;
    pub const ATAN2: usize = 12;
    pub const POW: usize = 13;
    pub const HYPOT: usize = 14;
    pub const FMA: usize = 0;
    pub const EQ: usize = 0;
    pub const NE: usize = 1;
    pub const LT: usize = 2;
    pub const LE: usize = 3;
    pub const GT: usize = 4;
    pub const GE: usize = 5;
    pub const UNSIGNED_LT: usize = 6;
    pub const UNSIGNED_LE: usize = 7;
    pub const UNSIGNED_GT: usize = 8;
    pub const UNSIGNED_GE: usize = 9;
}

/// How a conversion token maps a lane value to the target lane type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    /// Value conversion with native `as` semantics.
    Cast,
    /// Same-width reinterpretation of the lane bits.
    Reinterpret,
    /// Widening that treats the source bits as unsigned.
    ZeroExtend,
}

/// Domain and range of a conversion token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConversionInfo {
    /// Conversion flavor.
    pub kind: ConversionKind,
    /// Source lane type.
    pub domain: LaneType,
    /// Target lane type.
    pub range: LaneType,
}

/// The type of value an operator produces per lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeType {
    /// Same lane type as the input.
    Natural,
    /// One boolean per lane (a mask).
    Boolean,
    /// Another lane type (conversions).
    Lane(LaneType),
}

/// An operator token, independent of its category.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operator {
    name: &'static str,
    op_name: &'static str,
    info: u32,
    conversion: Option<ConversionInfo>,
}

impl Operator {
    const fn make(
        name: &'static str,
        op_name: &'static str,
        arity: u32,
        opcode: i32,
        kind_bits: u32,
        conversion: Option<ConversionInfo>,
    ) -> Self {
        let mut info = arity | (kind_bits & kind::KIND_MASK & !kind::ARITY_MASK);
        if opcode >= 0 {
            assert!((opcode as usize) < OPCODE_LIMIT, "opcode outside the cache range");
            info |= kind::OPCODE_VALID | ((opcode as u32) << OPCODE_SHIFT);
        } else {
            info |= kind::SPECIAL;
        }
        Operator {
            name,
            op_name,
            info,
            conversion,
        }
    }

    /// Symbolic name, e.g. `"ADD"`.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Display form, e.g. `"+"`.
    pub const fn operator_name(&self) -> &'static str {
        self.op_name
    }

    /// Number of vector operands.
    pub const fn arity(&self) -> usize {
        (self.info & kind::ARITY_MASK) as usize
    }

    /// Raw capability bits (without opcode).
    pub const fn kind_bits(&self) -> u32 {
        self.info & kind::KIND_MASK
    }

    /// True if any of `bits` is set on this operator.
    pub const fn is_kind(&self, bits: u32) -> bool {
        self.info & bits != 0
    }

    /// True for operators producing masks.
    pub const fn is_boolean(&self) -> bool {
        self.is_kind(kind::BOOLEAN)
    }

    /// True for operators valid in `reduce_lanes`.
    pub const fn is_associative(&self) -> bool {
        self.is_kind(kind::ASSOCIATIVE)
    }

    /// True for shift and rotate operators.
    pub const fn is_shift(&self) -> bool {
        self.is_kind(kind::SHIFT)
    }

    /// True for lane-type conversions.
    pub const fn is_conversion(&self) -> bool {
        self.is_kind(kind::CONVERSION)
    }

    /// True if the operator has no opcode and is composed in software.
    pub const fn is_special(&self) -> bool {
        self.is_kind(kind::SPECIAL)
    }

    /// True for internal helper operators.
    pub const fn is_private(&self) -> bool {
        self.is_kind(kind::PRIVATE)
    }

    /// The dense opcode, or `None` for special operators.
    pub const fn opcode(&self) -> Option<usize> {
        if self.is_kind(kind::OPCODE_VALID) {
            Some((self.info >> OPCODE_SHIFT) as usize)
        } else {
            None
        }
    }

    /// Conversion domain and range, for conversion tokens.
    pub const fn conversion(&self) -> Option<ConversionInfo> {
        self.conversion
    }

    /// What one result lane holds.
    pub const fn range_type(&self) -> RangeType {
        if self.is_boolean() {
            return RangeType::Boolean;
        }
        match self.conversion {
            Some(info) => RangeType::Lane(info.range),
            None => RangeType::Natural,
        }
    }

    /// True if this operator can be applied to lanes of `lane_kind`.
    pub const fn compatible_with(&self, lane_kind: LaneKind) -> bool {
        if let Some(info) = self.conversion {
            return matches!(
                (info.domain.kind(), lane_kind),
                (LaneKind::Integral, LaneKind::Integral) | (LaneKind::Floating, LaneKind::Floating)
            );
        }
        match lane_kind {
            LaneKind::Integral => !self.is_kind(kind::ONLY_FP),
            LaneKind::Floating => !self.is_kind(kind::NO_FP),
        }
    }

    const fn bucket(&self) -> u32 {
        self.info & (kind::ARITY_MASK | kind::BOOLEAN | kind::CONVERSION)
    }

    const fn is_registered(&self) -> bool {
        !self.is_private() && self.is_kind(kind::OPCODE_VALID)
    }

    const fn collides_with(&self, other: &Operator) -> bool {
        self.is_registered()
            && other.is_registered()
            && self.bucket() == other.bucket()
            && (self.info >> OPCODE_SHIFT) == (other.info >> OPCODE_SHIFT)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Anything that names an operator.
pub trait OperatorToken: Copy + fmt::Debug {
    /// The underlying operator.
    fn operator(self) -> Operator;
}

impl OperatorToken for Operator {
    #[inline(always)]
    fn operator(self) -> Operator {
        self
    }
}

macro_rules! category {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Operator);

        impl $name {
            /// The underlying operator.
            pub const fn op(self) -> Operator {
                self.0
            }
        }

        impl OperatorToken for $name {
            #[inline(always)]
            fn operator(self) -> Operator {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0.name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.0.name)
            }
        }

        impl PartialEq<Operator> for $name {
            fn eq(&self, other: &Operator) -> bool {
                self.0 == *other
            }
        }
    };
}

category!(
    /// Lane-wise operator with one operand.
    Unary
);
category!(
    /// Lane-wise operator with two operands.
    Binary
);
category!(
    /// Lane-wise operator with three operands.
    Ternary
);
category!(
    /// Binary operator that can also fold all lanes of a vector.
    Associative
);
category!(
    /// Binary lane-wise relation producing a mask.
    Comparison
);
category!(
    /// Unary lane-wise predicate producing a mask.
    Test
);
category!(
    /// Lane-wise change of lane type.
    Conversion
);

impl From<Associative> for Binary {
    #[inline(always)]
    fn from(op: Associative) -> Self {
        Binary(op.0)
    }
}

impl PartialEq<Associative> for Binary {
    fn eq(&self, other: &Associative) -> bool {
        self.0 == other.0
    }
}

// Registry entries back to typed lanewise tokens. Private helpers, masks
// and conversions never narrow.
macro_rules! narrow_from_operator {
    ($name:ident, $arity:expr, $accepts:expr) => {
        impl TryFrom<Operator> for $name {
            type Error = VectorError;

            fn try_from(op: Operator) -> Result<Self> {
                let lanewise = op.arity() == $arity && !op.is_boolean() && !op.is_conversion();
                if lanewise && !op.is_private() && ($accepts)(&op) {
                    Ok($name(op))
                } else {
                    Err(validation_error(format!(
                        "{} is not a {} operator",
                        op.name,
                        stringify!($name)
                    )))
                }
            }
        }
    };
}

narrow_from_operator!(Unary, 1, |_: &Operator| true);
narrow_from_operator!(Binary, 2, |_: &Operator| true);
narrow_from_operator!(Ternary, 3, |_: &Operator| true);
narrow_from_operator!(Associative, 2, Operator::is_associative);

pub(crate) const fn unary(
    name: &'static str,
    op_name: &'static str,
    opcode: i32,
    bits: u32,
) -> Unary {
    Unary(Operator::make(name, op_name, kind::UNARY, opcode, bits, None))
}

pub(crate) const fn binary(
    name: &'static str,
    op_name: &'static str,
    opcode: i32,
    bits: u32,
) -> Binary {
    Binary(Operator::make(name, op_name, kind::BINARY, opcode, bits, None))
}

pub(crate) const fn ternary(
    name: &'static str,
    op_name: &'static str,
    opcode: i32,
    bits: u32,
) -> Ternary {
    Ternary(Operator::make(name, op_name, kind::TERNARY, opcode, bits, None))
}

pub(crate) const fn associative(
    name: &'static str,
    op_name: &'static str,
    opcode: i32,
    bits: u32,
) -> Associative {
    Associative(Operator::make(
        name,
        op_name,
        kind::BINARY,
        opcode,
        bits | kind::ASSOCIATIVE,
        None,
    ))
}

pub(crate) const fn compare(
    name: &'static str,
    op_name: &'static str,
    opcode: i32,
    bits: u32,
) -> Comparison {
    Comparison(Operator::make(
        name,
        op_name,
        kind::BINARY,
        opcode,
        bits | kind::BOOLEAN,
        None,
    ))
}

pub(crate) const fn predicate(
    name: &'static str,
    op_name: &'static str,
    opcode: i32,
    bits: u32,
) -> Test {
    Test(Operator::make(
        name,
        op_name,
        kind::UNARY,
        opcode,
        bits | kind::BOOLEAN,
        None,
    ))
}

pub(crate) const fn convert(
    name: &'static str,
    op_name: &'static str,
    opcode: i32,
    conversion: ConversionKind,
    domain: LaneType,
    range: LaneType,
) -> Conversion {
    Conversion(Operator::make(
        name,
        op_name,
        kind::UNARY,
        opcode,
        kind::CONVERSION,
        Some(ConversionInfo {
            kind: conversion,
            domain,
            range,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Unary
// ---------------------------------------------------------------------------

/// Zero or minus one: `a != 0 ? -1 : 0`.
pub const ZOMO: Unary = unary("ZOMO", "a==0?0:-1", -1, kind::NONE);
/// Absolute value (wrapping for the most negative integer).
pub const ABS: Unary = unary("ABS", "abs", opcode::ABS as i32, kind::NONE);
/// Negation (wrapping for integers).
pub const NEG: Unary = unary("NEG", "-a", opcode::NEG as i32, kind::NONE);
/// Bitwise complement.
pub const NOT: Unary = unary("NOT", "~", -1, kind::NO_FP);
/// Sine.
pub const SIN: Unary = unary("SIN", "sin", opcode::SIN as i32, kind::ONLY_FP);
/// Cosine.
pub const COS: Unary = unary("COS", "cos", opcode::COS as i32, kind::ONLY_FP);
/// Tangent.
pub const TAN: Unary = unary("TAN", "tan", opcode::TAN as i32, kind::ONLY_FP);
/// Arc sine.
pub const ASIN: Unary = unary("ASIN", "asin", opcode::ASIN as i32, kind::ONLY_FP);
/// Arc cosine.
pub const ACOS: Unary = unary("ACOS", "acos", opcode::ACOS as i32, kind::ONLY_FP);
/// Arc tangent.
pub const ATAN: Unary = unary("ATAN", "atan", opcode::ATAN as i32, kind::ONLY_FP);
/// `e^a`.
pub const EXP: Unary = unary("EXP", "exp", opcode::EXP as i32, kind::ONLY_FP);
/// Natural logarithm.
pub const LOG: Unary = unary("LOG", "log", opcode::LOG as i32, kind::ONLY_FP);
/// Base-10 logarithm.
pub const LOG10: Unary = unary("LOG10", "log10", opcode::LOG10 as i32, kind::ONLY_FP);
/// Square root.
pub const SQRT: Unary = unary("SQRT", "sqrt", opcode::SQRT as i32, kind::ONLY_FP);
/// Cube root.
pub const CBRT: Unary = unary("CBRT", "cbrt", opcode::CBRT as i32, kind::ONLY_FP);
/// Hyperbolic sine.
pub const SINH: Unary = unary("SINH", "sinh", opcode::SINH as i32, kind::ONLY_FP);
/// Hyperbolic cosine.
pub const COSH: Unary = unary("COSH", "cosh", opcode::COSH as i32, kind::ONLY_FP);
/// Hyperbolic tangent.
pub const TANH: Unary = unary("TANH", "tanh", opcode::TANH as i32, kind::ONLY_FP);
/// `e^a - 1`.
pub const EXPM1: Unary = unary("EXPM1", "expm1", opcode::EXPM1 as i32, kind::ONLY_FP);
/// `ln(1 + a)`.
pub const LOG1P: Unary = unary("LOG1P", "log1p", opcode::LOG1P as i32, kind::ONLY_FP);

// ---------------------------------------------------------------------------
// Binary
// ---------------------------------------------------------------------------

/// Addition.
pub const ADD: Associative = associative("ADD", "+", opcode::ADD as i32, kind::NONE);
/// Subtraction.
pub const SUB: Binary = binary("SUB", "-", opcode::SUB as i32, kind::NONE);
/// Multiplication.
pub const MUL: Associative = associative("MUL", "*", opcode::MUL as i32, kind::NONE);
/// Division; integer division by zero is an error.
pub const DIV: Binary = binary("DIV", "/", opcode::DIV as i32, kind::NONE);
/// Minimum.
pub const MIN: Associative = associative("MIN", "min", opcode::MIN as i32, kind::NONE);
/// Maximum.
pub const MAX: Associative = associative("MAX", "max", opcode::MAX as i32, kind::NONE);
/// First operand unless its bits are zero, else the second.
pub const FIRST_NONZERO: Associative =
    associative("FIRST_NONZERO", "a==0?b:a", -1, kind::NONE);
/// Bitwise and.
pub const AND: Associative = associative("AND", "&", opcode::AND as i32, kind::NO_FP);
/// Bitwise and-not: `a & !b`.
pub const AND_NOT: Binary = binary("AND_NOT", "&~", -1, kind::NO_FP);
/// Bitwise or.
pub const OR: Associative = associative("OR", "|", opcode::OR as i32, kind::NO_FP);
/// Bitwise or on the raw lane bits of any lane type.
pub(crate) const OR_UNCHECKED: Binary =
    binary("OR_UNCHECKED", "|", opcode::OR as i32, kind::PRIVATE);
/// Bitwise xor.
pub const XOR: Associative = associative("XOR", "^", opcode::XOR as i32, kind::NO_FP);
/// Left shift.
pub const LSHL: Binary = binary("LSHL", "<<", opcode::LSHL as i32, kind::SHIFT | kind::NO_FP);
/// Arithmetic right shift.
pub const ASHR: Binary = binary("ASHR", ">>", opcode::ASHR as i32, kind::SHIFT | kind::NO_FP);
/// Logical right shift.
pub const LSHR: Binary = binary("LSHR", ">>>", opcode::LSHR as i32, kind::SHIFT | kind::NO_FP);
/// Rotate left.
pub const ROL: Binary = binary("ROL", "rotateLeft", -1, kind::SHIFT | kind::NO_FP);
/// Rotate right.
pub const ROR: Binary = binary("ROR", "rotateRight", -1, kind::SHIFT | kind::NO_FP);
/// Two-argument arc tangent.
pub const ATAN2: Binary = binary("ATAN2", "atan2", opcode::ATAN2 as i32, kind::ONLY_FP);
/// Power.
pub const POW: Binary = binary("POW", "pow", opcode::POW as i32, kind::ONLY_FP);
/// `sqrt(a^2 + b^2)`.
pub const HYPOT: Binary = binary("HYPOT", "hypot", opcode::HYPOT as i32, kind::ONLY_FP);

// ---------------------------------------------------------------------------
// Ternary
// ---------------------------------------------------------------------------

/// Fused multiply-add `a * b + c`.
pub const FMA: Ternary = ternary("FMA", "fma", opcode::FMA as i32, kind::ONLY_FP);
/// Bitwise blend `(a & !c) | (b & c)`.
pub const BITWISE_BLEND: Ternary = ternary("BITWISE_BLEND", "a^((a^b)&c)", -1, kind::NO_FP);

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// `a == b`.
pub const EQ: Comparison = compare("EQ", "==", opcode::EQ as i32, kind::NONE);
/// `a != b`.
pub const NE: Comparison = compare("NE", "!=", opcode::NE as i32, kind::NONE);
/// `a < b`.
pub const LT: Comparison = compare("LT", "<", opcode::LT as i32, kind::NONE);
/// `a <= b`.
pub const LE: Comparison = compare("LE", "<=", opcode::LE as i32, kind::NONE);
/// `a > b`.
pub const GT: Comparison = compare("GT", ">", opcode::GT as i32, kind::NONE);
/// `a >= b`.
pub const GE: Comparison = compare("GE", ">=", opcode::GE as i32, kind::NONE);
/// Unsigned `a < b`.
pub const UNSIGNED_LT: Comparison =
    compare("UNSIGNED_LT", "<", opcode::UNSIGNED_LT as i32, kind::NO_FP);
/// Unsigned `a <= b`.
pub const UNSIGNED_LE: Comparison =
    compare("UNSIGNED_LE", "<=", opcode::UNSIGNED_LE as i32, kind::NO_FP);
/// Unsigned `a > b`.
pub const UNSIGNED_GT: Comparison =
    compare("UNSIGNED_GT", ">", opcode::UNSIGNED_GT as i32, kind::NO_FP);
/// Unsigned `a >= b`.
pub const UNSIGNED_GE: Comparison =
    compare("UNSIGNED_GE", ">=", opcode::UNSIGNED_GE as i32, kind::NO_FP);

// ---------------------------------------------------------------------------
// Test
// ---------------------------------------------------------------------------

/// Bit pattern is exactly zero (`+0.0` qualifies, `-0.0` does not).
pub const IS_DEFAULT: Test = predicate("IS_DEFAULT", "bits(a)==0", -1, kind::NONE);
/// Sign bit set (`-0.0` qualifies).
pub const IS_NEGATIVE: Test = predicate("IS_NEGATIVE", "bits(a)<0", -1, kind::NONE);
/// Neither infinite nor NaN.
pub const IS_FINITE: Test = predicate("IS_FINITE", "isFinite", -1, kind::ONLY_FP);
/// NaN.
pub const IS_NAN: Test = predicate("IS_NAN", "isNaN", -1, kind::ONLY_FP);
/// Positive or negative infinity.
pub const IS_INFINITE: Test = predicate("IS_INFINITE", "isInfinite", -1, kind::ONLY_FP);

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

use ConversionKind::{Cast, Reinterpret, ZeroExtend};
use LaneType::{F32, F64, I16, I32, I64, I8};

/// `i8` to `f64`.
pub const B2D: Conversion = convert("B2D", "b2d", 0, Cast, I8, F64);
/// `i8` to `f32`.
pub const B2F: Conversion = convert("B2F", "b2f", 1, Cast, I8, F32);
/// `i8` to `i32`.
pub const B2I: Conversion = convert("B2I", "b2i", 2, Cast, I8, I32);
/// `i8` to `i64`.
pub const B2L: Conversion = convert("B2L", "b2l", 3, Cast, I8, I64);
/// `i8` to `i16`.
pub const B2S: Conversion = convert("B2S", "b2s", 4, Cast, I8, I16);
/// `f64` to `i8`.
pub const D2B: Conversion = convert("D2B", "d2b", 5, Cast, F64, I8);
/// `f64` to `f32`.
pub const D2F: Conversion = convert("D2F", "d2f", 6, Cast, F64, F32);
/// `f64` to `i32`.
pub const D2I: Conversion = convert("D2I", "d2i", 7, Cast, F64, I32);
/// `f64` to `i64`.
pub const D2L: Conversion = convert("D2L", "d2l", 8, Cast, F64, I64);
/// `f64` to `i16`.
pub const D2S: Conversion = convert("D2S", "d2s", 9, Cast, F64, I16);
/// `f32` to `i8`.
pub const F2B: Conversion = convert("F2B", "f2b", 10, Cast, F32, I8);
/// `f32` to `f64`.
pub const F2D: Conversion = convert("F2D", "f2d", 11, Cast, F32, F64);
/// `f32` to `i32`.
pub const F2I: Conversion = convert("F2I", "f2i", 12, Cast, F32, I32);
/// `f32` to `i64`.
pub const F2L: Conversion = convert("F2L", "f2l", 13, Cast, F32, I64);
/// `f32` to `i16`.
pub const F2S: Conversion = convert("F2S", "f2s", 14, Cast, F32, I16);
/// `i32` to `i8`.
pub const I2B: Conversion = convert("I2B", "i2b", 15, Cast, I32, I8);
/// `i32` to `f64`.
pub const I2D: Conversion = convert("I2D", "i2d", 16, Cast, I32, F64);
/// `i32` to `f32`.
pub const I2F: Conversion = convert("I2F", "i2f", 17, Cast, I32, F32);
/// `i32` to `i64`.
pub const I2L: Conversion = convert("I2L", "i2l", 18, Cast, I32, I64);
/// `i32` to `i16`.
pub const I2S: Conversion = convert("I2S", "i2s", 19, Cast, I32, I16);
/// `i64` to `i8`.
pub const L2B: Conversion = convert("L2B", "l2b", 20, Cast, I64, I8);
/// `i64` to `f64`.
pub const L2D: Conversion = convert("L2D", "l2d", 21, Cast, I64, F64);
/// `i64` to `f32`.
pub const L2F: Conversion = convert("L2F", "l2f", 22, Cast, I64, F32);
/// `i64` to `i32`.
pub const L2I: Conversion = convert("L2I", "l2i", 23, Cast, I64, I32);
/// `i64` to `i16`.
pub const L2S: Conversion = convert("L2S", "l2s", 24, Cast, I64, I16);
/// `i16` to `i8`.
pub const S2B: Conversion = convert("S2B", "s2b", 25, Cast, I16, I8);
/// `i16` to `f64`.
pub const S2D: Conversion = convert("S2D", "s2d", 26, Cast, I16, F64);
/// `i16` to `f32`.
pub const S2F: Conversion = convert("S2F", "s2f", 27, Cast, I16, F32);
/// `i16` to `i32`.
pub const S2I: Conversion = convert("S2I", "s2i", 28, Cast, I16, I32);
/// `i16` to `i64`.
pub const S2L: Conversion = convert("S2L", "s2l", 29, Cast, I16, I64);
/// Raw bits of `f64` as `i64`.
pub const REINTERPRET_D2L: Conversion =
    convert("REINTERPRET_D2L", "reinterpret", 30, Reinterpret, F64, I64);
/// Raw bits of `f32` as `i32`.
pub const REINTERPRET_F2I: Conversion =
    convert("REINTERPRET_F2I", "reinterpret", 31, Reinterpret, F32, I32);
/// `i32` bits as `f32`.
pub const REINTERPRET_I2F: Conversion =
    convert("REINTERPRET_I2F", "reinterpret", 32, Reinterpret, I32, F32);
/// `i64` bits as `f64`.
pub const REINTERPRET_L2D: Conversion =
    convert("REINTERPRET_L2D", "reinterpret", 33, Reinterpret, I64, F64);
/// Unsigned widening `i8` to `i16`.
pub const ZERO_EXTEND_B2S: Conversion =
    convert("ZERO_EXTEND_B2S", "zeroExtend", 34, ZeroExtend, I8, I16);
/// Unsigned widening `i8` to `i32`.
pub const ZERO_EXTEND_B2I: Conversion =
    convert("ZERO_EXTEND_B2I", "zeroExtend", 35, ZeroExtend, I8, I32);
/// Unsigned widening `i8` to `i64`.
pub const ZERO_EXTEND_B2L: Conversion =
    convert("ZERO_EXTEND_B2L", "zeroExtend", 36, ZeroExtend, I8, I64);
/// Unsigned widening `i16` to `i32`.
pub const ZERO_EXTEND_S2I: Conversion =
    convert("ZERO_EXTEND_S2I", "zeroExtend", 37, ZeroExtend, I16, I32);
/// Unsigned widening `i16` to `i64`.
pub const ZERO_EXTEND_S2L: Conversion =
    convert("ZERO_EXTEND_S2L", "zeroExtend", 38, ZeroExtend, I16, I64);
/// Unsigned widening `i32` to `i64`.
pub const ZERO_EXTEND_I2L: Conversion =
    convert("ZERO_EXTEND_I2L", "zeroExtend", 39, ZeroExtend, I32, I64);

/// Every operator token, private helpers included.
pub const ALL_OPERATORS: &[Operator] = &[
    ZOMO.0, ABS.0, NEG.0, NOT.0, SIN.0, COS.0, TAN.0, ASIN.0, ACOS.0, ATAN.0, EXP.0, LOG.0,
    LOG10.0, SQRT.0, CBRT.0, SINH.0, COSH.0, TANH.0, EXPM1.0, LOG1P.0, ADD.0, SUB.0, MUL.0,
    DIV.0, MIN.0, MAX.0, FIRST_NONZERO.0, AND.0, AND_NOT.0, OR.0, OR_UNCHECKED.0, XOR.0, LSHL.0,
    ASHR.0, LSHR.0, ROL.0, ROR.0, ATAN2.0, POW.0, HYPOT.0, FMA.0, BITWISE_BLEND.0, EQ.0, NE.0,
    LT.0, LE.0, GT.0, GE.0, UNSIGNED_LT.0, UNSIGNED_LE.0, UNSIGNED_GT.0, UNSIGNED_GE.0,
    IS_DEFAULT.0, IS_NEGATIVE.0, IS_FINITE.0, IS_NAN.0, IS_INFINITE.0, B2D.0, B2F.0, B2I.0,
    B2L.0, B2S.0, D2B.0, D2F.0, D2I.0, D2L.0, D2S.0, F2B.0, F2D.0, F2I.0, F2L.0, F2S.0, I2B.0,
    I2D.0, I2F.0, I2L.0, I2S.0, L2B.0, L2D.0, L2F.0, L2I.0, L2S.0, S2B.0, S2D.0, S2F.0, S2I.0,
    S2L.0, REINTERPRET_D2L.0, REINTERPRET_F2I.0, REINTERPRET_I2F.0, REINTERPRET_L2D.0,
    ZERO_EXTEND_B2S.0, ZERO_EXTEND_B2I.0, ZERO_EXTEND_B2L.0, ZERO_EXTEND_S2I.0,
    ZERO_EXTEND_S2L.0, ZERO_EXTEND_I2L.0,
];

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn registry_is_consistent(ops: &[Operator]) -> bool {
    let mut i = 0;
    while i < ops.len() {
        let mut j = i + 1;
        while j < ops.len() {
            if ops[i].collides_with(&ops[j]) || str_eq(ops[i].name, ops[j].name) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    registry_is_consistent(ALL_OPERATORS),
    "operator registry has a duplicate name or opcode"
);

/// Re-checks the registry at runtime and names the first offending pair.
///
/// The same check already runs at compile time; this exists so tests and
/// callers can see the details of a failure.
pub fn validate_registry() -> Result<()> {
    for (i, a) in ALL_OPERATORS.iter().enumerate() {
        for b in &ALL_OPERATORS[i + 1..] {
            if a.collides_with(b) {
                return Err(validation_error(format!(
                    "operators {} and {} share opcode {:?}",
                    a.name,
                    b.name,
                    a.opcode()
                )));
            }
            if a.name == b.name {
                return Err(validation_error(format!("duplicate operator name {}", a.name)));
            }
        }
    }
    Ok(())
}

/// Looks up the public operator registered under `opcode` in the bucket
/// described by `arity`, `boolean` and `conversion`.
pub fn opcode_name(
    arity: usize,
    boolean: bool,
    conversion: bool,
    opcode: usize,
) -> Option<&'static str> {
    ALL_OPERATORS
        .iter()
        .filter(|op| op.is_registered())
        .find(|op| {
            op.arity() == arity
                && op.is_boolean() == boolean
                && op.is_conversion() == conversion
                && op.opcode() == Some(opcode)
        })
        .map(|op| op.name)
}

/// Finds an operator by its symbolic name.
pub fn operator_by_name(name: &str) -> Option<Operator> {
    ALL_OPERATORS
        .iter()
        .copied()
        .find(|op| !op.is_private() && op.name == name)
}
