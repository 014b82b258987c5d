//! Lane type conversions and reinterpretation.
//!
//! A conversion maps `M` input lanes to `M` logical output lanes, which
//! are then placed into a vector of `N` lanes:
//!
//! * `M > N` (expanding): `part` in `[0, M / N)` selects which run of `N`
//!   logical lanes is returned.
//! * `M < N` (contracting): `part` in `(-(N / M), 0]` selects where the
//!   `M` lanes land; the remaining lanes are zero.
//! * `M == N`: `part` must be `0`.

use crate::error::{out_of_bounds, species_mismatch, unsupported_operation, Result};
use crate::simd::gate::check_kind;
use crate::simd::lanes::Lane;
use crate::simd::operators::{kind, Conversion, ConversionKind};
use crate::simd::species::Species;
use crate::simd::vector::Vector;

/// Value conversion between lane types with native `as` semantics:
/// truncating integer narrowing, saturating float to integer with NaN
/// mapped to zero and IEEE rounding between float widths.
pub trait LaneCast<U: Lane>: Lane {
    fn cast_lane(self) -> U;
}

macro_rules! lane_cast {
    ($from:ty => $($to:ty),+) => {
        $(
            impl LaneCast<$to> for $from {
                #[inline(always)]
                fn cast_lane(self) -> $to {
                    self as $to
                }
            }
        )+
    };
}

lane_cast!(i8 => i8, i16, i32, i64, f32, f64);
lane_cast!(i16 => i8, i16, i32, i64, f32, f64);
lane_cast!(i32 => i8, i16, i32, i64, f32, f64);
lane_cast!(i64 => i8, i16, i32, i64, f32, f64);
lane_cast!(f32 => i8, i16, i32, i64, f32, f64);
lane_cast!(f64 => i8, i16, i32, i64, f32, f64);

impl<T: Lane> Vector<T> {
    /// Applies `op` and returns the result in the same shape.
    pub fn convert<U: Lane>(&self, op: Conversion, part: i32) -> Result<Vector<U>>
    where
        T: LaneCast<U>,
    {
        self.convert_shape(op, self.species().with_lanes::<U>(), part)
    }

    /// Applies `op` and returns part `part` of the result as a vector of
    /// `to`.
    pub fn convert_shape<U: Lane>(
        &self,
        op: Conversion,
        to: &'static Species<U>,
        part: i32,
    ) -> Result<Vector<U>>
    where
        T: LaneCast<U>,
    {
        check_kind(op, kind::CONVERSION, 0, self.vector_type())?;
        let info = op
            .op()
            .conversion()
            .ok_or_else(|| unsupported_operation(op.op().name(), self.vector_type().to_string()))?;
        if info.domain != T::TYPE {
            return Err(unsupported_operation(op.op().name(), self.vector_type().to_string()));
        }
        if info.range != U::TYPE {
            return Err(species_mismatch(info.range, to.vector_type()));
        }
        let f: fn(T) -> U = match info.kind {
            ConversionKind::Cast => <T as LaneCast<U>>::cast_lane,
            ConversionKind::Reinterpret => |e: T| U::from_raw_bits(e.to_raw_bits()),
            ConversionKind::ZeroExtend => |e: T| U::from_raw_bits(e.to_unsigned_bits() as i64),
        };

        let (m, n) = (self.length(), to.length());
        let mut lanes = vec![U::ZERO; n].into_boxed_slice();
        if m >= n {
            let parts = m / n;
            if part < 0 || part as usize >= parts {
                return Err(out_of_bounds("part", part as i64, parts));
            }
            let start = part as usize * n;
            for (out, &e) in lanes.iter_mut().zip(&self.as_slice()[start..start + n]) {
                *out = f(e);
            }
        } else {
            let parts = n / m;
            let slot = part.unsigned_abs() as usize;
            if part > 0 || slot >= parts {
                return Err(out_of_bounds("part", part as i64, parts));
            }
            let start = slot * m;
            for (out, &e) in lanes[start..start + m].iter_mut().zip(self.as_slice()) {
                *out = f(e);
            }
        }
        Ok(Vector::from_boxed(to, lanes))
    }

    /// The native byte image of this vector read back as lanes of `U` in
    /// the same shape.
    pub fn reinterpret_as<U: Lane>(&self) -> Vector<U> {
        let to = self.species().with_lanes::<U>();
        let mut bytes = vec![0u8; self.species().vector_byte_size()];
        for (chunk, &e) in bytes.chunks_exact_mut(T::BYTES).zip(self.as_slice()) {
            e.write_ne_bytes(chunk);
        }
        Vector::from_boxed(
            to,
            bytes.chunks_exact(U::BYTES).map(U::read_ne_bytes).collect(),
        )
    }

    /// The lane bits as integers of the same width.
    pub fn view_as_integral_lanes(&self) -> Vector<T::Integral> {
        Vector::from_boxed(
            self.species().with_lanes::<T::Integral>(),
            self.as_slice()
                .iter()
                .map(|&e| <T::Integral as Lane>::from_raw_bits(e.to_raw_bits()))
                .collect(),
        )
    }
}
