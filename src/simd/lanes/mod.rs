//! Lane types: the primitive element kinds a vector can hold.
//!
//! [`Lane`] is implemented for `i8`, `i16`, `i32`, `i64`, `f32` and `f64`
//! and is sealed. It carries everything the generic kernel needs to know
//! about an element type: its [`LaneType`] descriptor, the constants used
//! as reduction identities, the bits view and the per-opcode scalar lane
//! functions that fill the operation caches.

use std::fmt;

use crate::simd::cache::Reducer;
use crate::simd::operators::{kind, opcode};
use crate::simd::species::SpeciesTable;

mod floating;
mod integral;

/// Integral or floating-point element kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Two's complement signed integers.
    Integral,
    /// IEEE-754 binary floating point.
    Floating,
}

/// Descriptor of one primitive lane type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LaneType {
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
}

impl LaneType {
    /// Every lane type, narrowest integers first.
    pub const ALL: [LaneType; 6] = [
        LaneType::I8,
        LaneType::I16,
        LaneType::I32,
        LaneType::I64,
        LaneType::F32,
        LaneType::F64,
    ];

    /// Integral or floating.
    pub const fn kind(self) -> LaneKind {
        match self {
            LaneType::F32 | LaneType::F64 => LaneKind::Floating,
            _ => LaneKind::Integral,
        }
    }

    /// Width of one lane in bits.
    pub const fn bits(self) -> u32 {
        match self {
            LaneType::I8 => 8,
            LaneType::I16 => 16,
            LaneType::I32 | LaneType::F32 => 32,
            LaneType::I64 | LaneType::F64 => 64,
        }
    }

    /// Width of one lane in bytes.
    pub const fn byte_size(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Rust name of the element type.
    pub const fn name(self) -> &'static str {
        match self {
            LaneType::I8 => "i8",
            LaneType::I16 => "i16",
            LaneType::I32 => "i32",
            LaneType::I64 => "i64",
            LaneType::F32 => "f32",
            LaneType::F64 => "f64",
        }
    }

    /// The integral lane type of the same width.
    pub const fn integral(self) -> LaneType {
        match self {
            LaneType::F32 => LaneType::I32,
            LaneType::F64 => LaneType::I64,
            other => other,
        }
    }

    /// Capability bits a kernel over this lane type must reject.
    pub const fn forbidden_kind(self) -> u32 {
        match self.kind() {
            LaneKind::Integral => kind::ONLY_FP,
            LaneKind::Floating => kind::NO_FP,
        }
    }
}

impl fmt::Display for LaneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A primitive element type usable as a vector lane.
///
/// The "raw bits" of a lane are its two's complement bit pattern,
/// sign-extended to `i64`. For floats this is the IEEE-754 encoding, so
/// `-0.0` has nonzero raw bits while `+0.0` has zero raw bits.
pub trait Lane:
    sealed::Sealed
    + Copy
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Default
    + Send
    + Sync
    + 'static
{
    /// Runtime descriptor.
    const TYPE: LaneType;
    /// Lane width in bits.
    const BITS: u32 = Self::TYPE.bits();
    /// Lane width in bytes.
    const BYTES: usize = Self::TYPE.byte_size();
    /// Zero; all bits clear for both integers and floats.
    const ZERO: Self;
    /// One.
    const ONE: Self;
    /// Minus one; all bits set for integers.
    const MINUS_ONE: Self;
    /// Smallest value (`-inf` for floats), identity of `MAX`.
    const MIN_OR_INF: Self;
    /// Largest value (`+inf` for floats), identity of `MIN`.
    const MAX_OR_INF: Self;
    /// Operator capability bits rejected by kernels over this lane.
    const FORBID_OPCODE_KIND: u32 = Self::TYPE.forbidden_kind();
    /// Raw bits of positive infinity; zero for integral lanes.
    const INFINITY_BITS: i64;

    /// The integral lane type of the same width (`Self` for integers).
    type Integral: Lane;

    /// Raw bits, sign-extended.
    fn to_raw_bits(self) -> i64;

    /// Lane from raw bits; bits above the lane width are ignored.
    fn from_raw_bits(bits: i64) -> Self;

    /// Raw bits zero-extended from the lane width.
    #[inline(always)]
    fn to_unsigned_bits(self) -> u64 {
        let bits = self.to_raw_bits() as u64;
        if Self::BITS == 64 {
            bits
        } else {
            bits & ((1u64 << Self::BITS) - 1)
        }
    }

    /// Numeric value as `i64` (saturating for floats, NaN maps to zero).
    fn to_long(self) -> i64;

    /// Numeric conversion from `i64` with native `as` semantics.
    fn from_long_lossy(value: i64) -> Self;

    /// Numeric value as `f64`.
    fn to_double(self) -> f64;

    /// Writes the native-endian encoding into `out` (exactly `BYTES` long).
    fn write_ne_bytes(self, out: &mut [u8]);

    /// Reads a lane from its native-endian encoding (exactly `BYTES` long).
    fn read_ne_bytes(bytes: &[u8]) -> Self;

    /// Scalar lane function for a unary opcode.
    fn unary_impl(opc: usize) -> Option<fn(Self) -> Self>;

    /// Scalar lane function for a binary opcode.
    fn binary_impl(opc: usize) -> Option<fn(Self, Self) -> Self>;

    /// Scalar lane function for a ternary opcode.
    fn ternary_impl(opc: usize) -> Option<fn(Self, Self, Self) -> Self>;

    /// Scalar relation for a comparison opcode.
    fn compare_impl(opc: usize) -> Option<fn(Self, Self) -> bool>;

    /// Identity element and combiner for an associative opcode.
    fn reduce_impl(opc: usize) -> Option<Reducer<Self>> {
        let identity = match opc {
            opcode::ADD | opcode::OR | opcode::XOR => Self::ZERO,
            opcode::MUL => Self::ONE,
            opcode::AND => Self::MINUS_ONE,
            opcode::MIN => Self::MAX_OR_INF,
            opcode::MAX => Self::MIN_OR_INF,
            _ => return None,
        };
        Some(Reducer {
            identity,
            combine: Self::binary_impl(opc)?,
        })
    }

    /// Hardware path for a whole binary operation, if one applies.
    #[inline(always)]
    fn accelerated_binary(_opc: usize, _a: &[Self], _b: &[Self]) -> Option<Box<[Self]>> {
        None
    }

    #[doc(hidden)]
    fn species_table() -> &'static SpeciesTable<Self>;
}

macro_rules! integral_lane {
    ($t:ty, $lane:ident) => {
        impl sealed::Sealed for $t {}

        impl Lane for $t {
            const TYPE: LaneType = LaneType::$lane;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MINUS_ONE: Self = -1;
            const MIN_OR_INF: Self = <$t>::MIN;
            const MAX_OR_INF: Self = <$t>::MAX;
            const INFINITY_BITS: i64 = 0;

            type Integral = $t;

            #[inline(always)]
            fn to_raw_bits(self) -> i64 {
                self as i64
            }

            #[inline(always)]
            fn from_raw_bits(bits: i64) -> Self {
                bits as $t
            }

            #[inline(always)]
            fn to_long(self) -> i64 {
                self as i64
            }

            #[inline(always)]
            fn from_long_lossy(value: i64) -> Self {
                value as $t
            }

            #[inline(always)]
            fn to_double(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn write_ne_bytes(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_ne_bytes());
            }

            #[inline(always)]
            fn read_ne_bytes(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf.copy_from_slice(bytes);
                <$t>::from_ne_bytes(buf)
            }

            fn unary_impl(opc: usize) -> Option<fn(Self) -> Self> {
                integral::unary::<$t>(opc)
            }

            fn binary_impl(opc: usize) -> Option<fn(Self, Self) -> Self> {
                integral::binary::<$t>(opc)
            }

            fn ternary_impl(_opc: usize) -> Option<fn(Self, Self, Self) -> Self> {
                None
            }

            fn compare_impl(opc: usize) -> Option<fn(Self, Self) -> bool> {
                integral::compare::<$t>(opc)
            }

            fn species_table() -> &'static SpeciesTable<Self> {
                static TABLE: SpeciesTable<$t> = SpeciesTable::new();
                &TABLE
            }
        }
    };
}

macro_rules! floating_lane {
    ($t:ty, $lane:ident, $bits:ty, $int:ty, $inf:expr $(, accelerated = $accel:path)?) => {
        impl sealed::Sealed for $t {}

        impl Lane for $t {
            const TYPE: LaneType = LaneType::$lane;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const MINUS_ONE: Self = -1.0;
            const MIN_OR_INF: Self = <$t>::NEG_INFINITY;
            const MAX_OR_INF: Self = <$t>::INFINITY;
            const INFINITY_BITS: i64 = $inf;

            type Integral = $int;

            #[inline(always)]
            fn to_raw_bits(self) -> i64 {
                self.to_bits() as $int as i64
            }

            #[inline(always)]
            fn from_raw_bits(bits: i64) -> Self {
                <$t>::from_bits(bits as $bits)
            }

            #[inline(always)]
            fn to_long(self) -> i64 {
                self as i64
            }

            #[inline(always)]
            fn from_long_lossy(value: i64) -> Self {
                value as $t
            }

            #[inline(always)]
            fn to_double(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn write_ne_bytes(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_ne_bytes());
            }

            #[inline(always)]
            fn read_ne_bytes(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf.copy_from_slice(bytes);
                <$t>::from_ne_bytes(buf)
            }

            fn unary_impl(opc: usize) -> Option<fn(Self) -> Self> {
                floating::unary::<$t>(opc)
            }

            fn binary_impl(opc: usize) -> Option<fn(Self, Self) -> Self> {
                floating::binary::<$t>(opc)
            }

            fn ternary_impl(opc: usize) -> Option<fn(Self, Self, Self) -> Self> {
                floating::ternary::<$t>(opc)
            }

            fn compare_impl(opc: usize) -> Option<fn(Self, Self) -> bool> {
                floating::compare::<$t>(opc)
            }

            $(
                #[inline(always)]
                fn accelerated_binary(opc: usize, a: &[Self], b: &[Self]) -> Option<Box<[Self]>> {
                    $accel(opc, a, b)
                }
            )?

            fn species_table() -> &'static SpeciesTable<Self> {
                static TABLE: SpeciesTable<$t> = SpeciesTable::new();
                &TABLE
            }
        }
    };
}

integral_lane!(i8, I8);
integral_lane!(i16, I16);
integral_lane!(i32, I32);
integral_lane!(i64, I64);
floating_lane!(
    f32,
    F32,
    u32,
    i32,
    0x7f80_0000,
    accelerated = crate::simd::substrate::accelerated_f32
);
floating_lane!(f64, F64, u64, i64, 0x7ff0_0000_0000_0000);
