//! Shapes and species.
//!
//! A [`Shape`] is a vector width in bits. A [`Species`] pairs a lane type
//! with a shape and is the factory for the vectors, masks and shuffles of
//! that flavor. There is exactly one species per (lane type, shape) pair;
//! it is created on first use, lives for the rest of the process and
//! holds the operation caches and the cached constant vectors.

use std::fmt;
use std::ptr;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::{not_representable, validation_error, Result};
use crate::simd::cache::OpCaches;
use crate::simd::gate;
use crate::simd::lanes::{Lane, LaneType};
use crate::simd::mask::Mask;
use crate::simd::operators::{kind, Associative, FIRST_NONZERO};
use crate::simd::shuffle::Shuffle;
use crate::simd::vector::Vector;

/// Widest vector the build targets, in bits.
pub const MAX_VECTOR_BITS: usize = if cfg!(avx512) {
    512
} else if cfg!(avx2) {
    256
} else {
    128
};

/// Vector width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// 64 bits.
    S64Bit,
    /// 128 bits.
    S128Bit,
    /// 256 bits.
    S256Bit,
    /// 512 bits.
    S512Bit,
    /// The widest shape of the build target.
    ///
    /// Its width equals one of the concrete shapes, but its species are
    /// distinct from theirs.
    SMaxBit,
}

impl Shape {
    /// Concrete shapes, narrowest first.
    pub const CONCRETE: [Shape; 4] =
        [Shape::S64Bit, Shape::S128Bit, Shape::S256Bit, Shape::S512Bit];

    /// Width in bits.
    pub const fn bit_size(self) -> usize {
        match self {
            Shape::S64Bit => 64,
            Shape::S128Bit => 128,
            Shape::S256Bit => 256,
            Shape::S512Bit => 512,
            Shape::SMaxBit => MAX_VECTOR_BITS,
        }
    }

    /// The concrete shape of `bits` width.
    pub fn for_bit_size(bits: usize) -> Result<Shape> {
        Shape::CONCRETE
            .into_iter()
            .find(|shape| shape.bit_size() == bits)
            .ok_or_else(|| validation_error(format!("no vector shape is {bits} bits wide")))
    }

    /// The concrete shape matching the widest vectors of the build target.
    pub const fn preferred() -> Shape {
        match MAX_VECTOR_BITS {
            512 => Shape::S512Bit,
            256 => Shape::S256Bit,
            _ => Shape::S128Bit,
        }
    }

    /// Lane count of this shape for lanes of `lane` type.
    pub const fn lane_count(self, lane: LaneType) -> usize {
        self.bit_size() / lane.bits() as usize
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::SMaxBit => write!(f, "S_Max_BIT({})", MAX_VECTOR_BITS),
            other => write!(f, "S_{}_BIT", other.bit_size()),
        }
    }
}

/// Short vector type name such as `i32x8`, used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VectorType {
    /// Lane type.
    pub lane: LaneType,
    /// Lane count.
    pub length: usize,
}

impl fmt::Display for VectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.lane, self.length)
    }
}

/// One vector flavor: a lane type at a given shape.
pub struct Species<T: Lane> {
    shape: Shape,
    length: usize,
    pub(crate) caches: OpCaches<T>,
    zero: OnceLock<Vector<T>>,
    iota: OnceLock<Vector<T>>,
    all_true: OnceLock<Mask<T>>,
    all_false: OnceLock<Mask<T>>,
    iota_shuffle: OnceLock<Shuffle<T>>,
}

impl<T: Lane> Species<T> {
    fn new(shape: Shape) -> Self {
        let length = shape.lane_count(T::TYPE);
        debug!(lane = %T::TYPE, shape = %shape, length, "materializing species");
        Species {
            shape,
            length,
            caches: OpCaches::new(),
            zero: OnceLock::new(),
            iota: OnceLock::new(),
            all_true: OnceLock::new(),
            all_false: OnceLock::new(),
            iota_shuffle: OnceLock::new(),
        }
    }

    /// The species of `T` lanes at `shape`.
    pub fn of(shape: Shape) -> &'static Species<T> {
        T::species_table().get(shape)
    }

    /// The species of `T` lanes at the preferred shape.
    pub fn preferred() -> &'static Species<T> {
        Self::of(Shape::preferred())
    }

    /// The concrete species of `T` lanes with exactly `length` lanes.
    pub fn for_lane_count(length: usize) -> Result<&'static Species<T>> {
        Shape::CONCRETE
            .into_iter()
            .find(|shape| shape.lane_count(T::TYPE) == length)
            .map(Self::of)
            .ok_or_else(|| {
                validation_error(format!("no {} species has {length} lanes", T::TYPE))
            })
    }

    /// Shape of this species.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Lane count.
    #[inline(always)]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Lane type.
    pub fn element_type(&self) -> LaneType {
        T::TYPE
    }

    /// Bits per lane.
    pub fn element_size(&self) -> u32 {
        T::BITS
    }

    /// Total vector width in bits.
    pub fn vector_bit_size(&self) -> usize {
        self.length * T::BITS as usize
    }

    /// Total vector width in bytes.
    pub fn vector_byte_size(&self) -> usize {
        self.length * T::BYTES
    }

    /// Name of the vectors of this species, e.g. `f32x8`.
    pub fn vector_type(&self) -> VectorType {
        VectorType {
            lane: T::TYPE,
            length: self.length,
        }
    }

    /// Same shape, lanes of type `U`.
    pub fn with_lanes<U: Lane>(&self) -> &'static Species<U> {
        Species::of(self.shape)
    }

    /// Same lane type, another shape.
    pub fn with_shape(&self, shape: Shape) -> &'static Species<T> {
        Species::of(shape)
    }

    /// Operation caches of this species.
    pub fn caches(&self) -> &OpCaches<T> {
        &self.caches
    }

    /// The all-zero vector.
    pub fn zero(&'static self) -> &'static Vector<T> {
        self.zero
            .get_or_init(|| Vector::from_boxed(self, vec![T::ZERO; self.length].into_boxed_slice()))
    }

    /// The vector `[0, 1, ..., length - 1]`.
    pub fn iota(&'static self) -> &'static Vector<T> {
        self.iota
            .get_or_init(|| self.from_fn(|i| T::from_long_lossy(i as i64)))
    }

    /// The mask with every lane set to `bit`.
    pub fn mask_all(&'static self, bit: bool) -> &'static Mask<T> {
        let slot = if bit { &self.all_true } else { &self.all_false };
        slot.get_or_init(|| Mask::from_boxed(self, vec![bit; self.length].into_boxed_slice()))
    }

    /// The identity shuffle `[0, 1, ..., length - 1]`.
    pub fn iota_shuffle(&'static self) -> &'static Shuffle<T> {
        self.iota_shuffle
            .get_or_init(|| Shuffle::iota(self, 0, 1, false))
    }

    /// A vector with every lane equal to `e`.
    pub fn broadcast(&'static self, e: T) -> Vector<T> {
        Vector::from_boxed(self, vec![e; self.length].into_boxed_slice())
    }

    /// A vector with every lane equal to `value`, which must be exactly
    /// representable as `T`.
    pub fn broadcast_long(&'static self, value: i64) -> Result<Vector<T>> {
        let e = T::from_long_lossy(value);
        if e.to_long() != value {
            return Err(not_representable(value, "i64", T::TYPE.name()));
        }
        Ok(self.broadcast(e))
    }

    /// A vector holding `values`, which must have exactly `length` lanes.
    pub fn from_values(&'static self, values: &[T]) -> Result<Vector<T>> {
        if values.len() != self.length {
            return Err(validation_error(format!(
                "{} expects {} lanes, got {}",
                self.vector_type(),
                self.length,
                values.len()
            )));
        }
        Ok(Vector::from_boxed(self, values.into()))
    }

    /// A vector whose lane `i` is `f(i)`.
    pub fn from_fn(&'static self, f: impl FnMut(usize) -> T) -> Vector<T> {
        Vector::from_boxed(self, (0..self.length).map(f).collect())
    }

    /// Largest multiple of the lane count not above `n`.
    #[inline(always)]
    pub fn loop_bound(&self, n: usize) -> usize {
        n - n % self.length
    }

    /// Mask of the lanes `i` with `offset + i < limit`.
    pub fn index_in_range(&'static self, offset: usize, limit: usize) -> Mask<T> {
        Mask::from_boxed(
            self,
            (0..self.length)
                .map(|i| offset.checked_add(i).is_some_and(|idx| idx < limit))
                .collect(),
        )
    }

    /// A mask from per-lane booleans; `bits` must have `length` entries.
    pub fn mask_from_bools(&'static self, bits: &[bool]) -> Result<Mask<T>> {
        if bits.len() != self.length {
            return Err(validation_error(format!(
                "mask of {} expects {} lanes, got {}",
                self.vector_type(),
                self.length,
                bits.len()
            )));
        }
        Ok(Mask::from_boxed(self, bits.into()))
    }

    /// A mask whose lane `i` is bit `i` of `bits`.
    pub fn mask_from_long(&'static self, bits: u64) -> Mask<T> {
        Mask::from_boxed(
            self,
            (0..self.length)
                .map(|i| i < 64 && (bits >> i) & 1 == 1)
                .collect(),
        )
    }

    /// Identity element of `op`: the result of reducing no lanes.
    pub fn reduction_identity(&self, op: Associative) -> Result<T> {
        if op == FIRST_NONZERO {
            gate::check_kind(op, kind::ASSOCIATIVE, T::FORBID_OPCODE_KIND, self.vector_type())?;
            return Ok(T::ZERO);
        }
        let opc = gate::op_code(op, kind::ASSOCIATIVE, T::FORBID_OPCODE_KIND, self.vector_type())?;
        let reducer = self
            .caches
            .reduce
            .find(op, opc, self.vector_type(), T::reduce_impl)?;
        Ok(reducer.identity)
    }
}

impl<T: Lane> PartialEq for Species<T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl<T: Lane> Eq for Species<T> {}

impl<T: Lane> fmt::Display for Species<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Species[{}, {}, {}]", T::TYPE, self.length, self.shape)
    }
}

impl<T: Lane> fmt::Debug for Species<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Process-wide slots holding the species of one lane type.
#[doc(hidden)]
pub struct SpeciesTable<T: Lane> {
    s64: OnceLock<Species<T>>,
    s128: OnceLock<Species<T>>,
    s256: OnceLock<Species<T>>,
    s512: OnceLock<Species<T>>,
    smax: OnceLock<Species<T>>,
}

impl<T: Lane> SpeciesTable<T> {
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        SpeciesTable {
            s64: OnceLock::new(),
            s128: OnceLock::new(),
            s256: OnceLock::new(),
            s512: OnceLock::new(),
            smax: OnceLock::new(),
        }
    }

    pub(crate) fn get(&'static self, shape: Shape) -> &'static Species<T> {
        let slot = match shape {
            Shape::S64Bit => &self.s64,
            Shape::S128Bit => &self.s128,
            Shape::S256Bit => &self.s256,
            Shape::S512Bit => &self.s512,
            Shape::SMaxBit => &self.smax,
        };
        slot.get_or_init(|| Species::new(shape))
    }
}
