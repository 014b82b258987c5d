//! Lane-wise dispatch: arithmetic, reductions, comparisons and tests.
//!
//! Each entry point validates its operator against the lane type, routes
//! special operators to their compositions, resolves everything else
//! through the species' operation cache and runs the resolved function on
//! the substrate.
//!
//! Masked forms follow one rule: where the mask is clear, the result lane
//! is the receiver's lane.

use crate::error::{arithmetic_error, not_representable, unsupported_operation, Result};
use crate::simd::gate::{check_kind, op_code};
use crate::simd::lanes::{Lane, LaneKind};
use crate::simd::mask::Mask;
use crate::simd::operators::{
    kind, opcode, Associative, Binary, Comparison, Ternary, Test, Unary, ABS, ADD, AND, AND_NOT,
    BITWISE_BLEND, DIV, EQ, FIRST_NONZERO, GT, IS_DEFAULT, IS_FINITE, IS_INFINITE, IS_NAN,
    IS_NEGATIVE, LSHL, LSHR, LT, MAX, MIN, MUL, NE, NEG, NOT, OR, OR_UNCHECKED, ROL, ROR, SUB,
    XOR, ZOMO,
};
use crate::simd::substrate;
use crate::simd::vector::Vector;

#[inline(always)]
fn is_integral<T: Lane>() -> bool {
    T::TYPE.kind() == LaneKind::Integral
}

impl<T: Lane> Vector<T> {
    // -----------------------------------------------------------------------
    // Unary
    // -----------------------------------------------------------------------

    /// Applies `op` to every lane.
    pub fn lanewise_unary(&self, op: Unary) -> Result<Self> {
        if op.op().is_special() {
            return self.unary_special(op);
        }
        let species = self.species();
        let opc = op_code(op, 0, T::FORBID_OPCODE_KIND, self.vector_type())?;
        let f = species
            .caches
            .unary
            .find(op, opc, self.vector_type(), T::unary_impl)?;
        Ok(self.with_lanes(substrate::unary_op(opc, self.as_slice(), f)))
    }

    /// Applies `op` to the lanes set in `m`; other lanes are unchanged.
    pub fn lanewise_unary_masked(&self, op: Unary, m: &Mask<T>) -> Result<Self> {
        self.check_mask(m)?;
        self.blend(&self.lanewise_unary(op)?, m)
    }

    fn unary_special(&self, op: Unary) -> Result<Self> {
        check_kind(op, 0, T::FORBID_OPCODE_KIND, self.vector_type())?;
        let minus_one = self.broadcast(T::MINUS_ONE);
        if op == ZOMO {
            let nonzero = self.compare_scalar(NE, T::ZERO)?;
            return self.blend(&minus_one, &nonzero);
        }
        if op == NOT {
            return minus_one.lanewise(XOR, self);
        }
        Err(unsupported_operation(op.op().name(), self.vector_type().to_string()))
    }

    // -----------------------------------------------------------------------
    // Binary
    // -----------------------------------------------------------------------

    /// Combines lane `i` of `self` and `v` with `op`, for every lane.
    ///
    /// Integer `DIV` fails if any lane of `v` is zero.
    pub fn lanewise(&self, op: impl Into<Binary>, v: &Self) -> Result<Self> {
        let op = op.into();
        self.check_species(v)?;
        if op.op().is_special() {
            return self.binary_special(op, v);
        }
        let species = self.species();
        let opc = op_code(op, 0, T::FORBID_OPCODE_KIND, self.vector_type())?;
        if opc == opcode::DIV && is_integral::<T>() && v.compare_scalar(EQ, T::ZERO)?.any_true() {
            return Err(arithmetic_error(format!(
                "{}: division by zero in an active lane",
                self.vector_type()
            )));
        }
        let f = species
            .caches
            .binary
            .find(op, opc, self.vector_type(), T::binary_impl)?;
        Ok(self.with_lanes(substrate::binary_op(opc, self.as_slice(), v.as_slice(), f)))
    }

    /// `lanewise(op, broadcast(e))`.
    pub fn lanewise_scalar(&self, op: impl Into<Binary>, e: T) -> Result<Self> {
        self.lanewise(op, &self.broadcast(e))
    }

    /// Combines the lanes set in `m`; other lanes keep the value of `self`.
    ///
    /// Integer `DIV` fails only if a zero divisor sits in a set lane.
    pub fn lanewise_masked(&self, op: impl Into<Binary>, v: &Self, m: &Mask<T>) -> Result<Self> {
        let op = op.into();
        self.check_species(v)?;
        self.check_mask(m)?;
        if op == DIV && is_integral::<T>() {
            let eqz = v.compare_scalar(EQ, T::ZERO)?;
            if eqz.and(m)?.any_true() {
                return Err(arithmetic_error(format!(
                    "{}: division by zero in an active lane",
                    self.vector_type()
                )));
            }
            // Inactive zero divisors become -1 so the full-width divide cannot trap.
            let divisor = v.lanewise_unary_masked(NOT, &eqz)?;
            return self.blend(&self.lanewise(op, &divisor)?, m);
        }
        self.blend(&self.lanewise(op, v)?, m)
    }

    /// `lanewise_masked(op, broadcast(e), m)`.
    pub fn lanewise_scalar_masked(&self, op: impl Into<Binary>, e: T, m: &Mask<T>) -> Result<Self> {
        self.lanewise_masked(op, &self.broadcast(e), m)
    }

    fn binary_special(&self, op: Binary, that: &Self) -> Result<Self> {
        check_kind(op, 0, T::FORBID_OPCODE_KIND, self.vector_type())?;
        if op == FIRST_NONZERO {
            let nonzero = self
                .view_as_integral_lanes()
                .compare_scalar(NE, <T::Integral as Lane>::ZERO)?
                .cast(self.species())?;
            let that = that.blend(self.species().zero(), &nonzero)?;
            return self.lanewise(OR_UNCHECKED, &that);
        }
        if op == AND_NOT {
            return self.lanewise(AND, &that.lanewise_unary(NOT)?);
        }
        if op == ROL || op == ROR {
            let neg = that.lanewise_unary(NEG)?;
            let (left, right) = if op == ROL { (that, &neg) } else { (&neg, that) };
            let hi = self.lanewise(LSHL, left)?;
            let lo = self.lanewise(LSHR, right)?;
            return hi.lanewise(OR, &lo);
        }
        Err(unsupported_operation(op.op().name(), self.vector_type().to_string()))
    }

    // -----------------------------------------------------------------------
    // Ternary
    // -----------------------------------------------------------------------

    /// Combines lane `i` of `self`, `v1` and `v2` with `op`, for every lane.
    pub fn lanewise_ternary(&self, op: Ternary, v1: &Self, v2: &Self) -> Result<Self> {
        self.check_species(v1)?;
        self.check_species(v2)?;
        if op.op().is_special() {
            check_kind(op, 0, T::FORBID_OPCODE_KIND, self.vector_type())?;
            if op == BITWISE_BLEND {
                return self.lanewise(XOR, &self.lanewise(XOR, v1)?.lanewise(AND, v2)?);
            }
            return Err(unsupported_operation(op.op().name(), self.vector_type().to_string()));
        }
        let species = self.species();
        let opc = op_code(op, 0, T::FORBID_OPCODE_KIND, self.vector_type())?;
        let f = species
            .caches
            .ternary
            .find(op, opc, self.vector_type(), T::ternary_impl)?;
        Ok(self.with_lanes(substrate::ternary_op(
            opc,
            self.as_slice(),
            v1.as_slice(),
            v2.as_slice(),
            f,
        )))
    }

    /// `lanewise_ternary(op, broadcast(e1), broadcast(e2))`.
    pub fn lanewise_ternary_scalars(&self, op: Ternary, e1: T, e2: T) -> Result<Self> {
        self.lanewise_ternary(op, &self.broadcast(e1), &self.broadcast(e2))
    }

    /// Combines the lanes set in `m`; other lanes keep the value of `self`.
    pub fn lanewise_ternary_masked(
        &self,
        op: Ternary,
        v1: &Self,
        v2: &Self,
        m: &Mask<T>,
    ) -> Result<Self> {
        self.check_mask(m)?;
        self.blend(&self.lanewise_ternary(op, v1, v2)?, m)
    }

    // -----------------------------------------------------------------------
    // Shorthands
    // -----------------------------------------------------------------------

    /// `lanewise(ADD, v)`.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, v: &Self) -> Result<Self> {
        self.lanewise(ADD, v)
    }

    /// `lanewise(SUB, v)`.
    #[allow(clippy::should_implement_trait)]
    pub fn sub(&self, v: &Self) -> Result<Self> {
        self.lanewise(SUB, v)
    }

    /// `lanewise(MUL, v)`.
    #[allow(clippy::should_implement_trait)]
    pub fn mul(&self, v: &Self) -> Result<Self> {
        self.lanewise(MUL, v)
    }

    /// `lanewise(DIV, v)`.
    #[allow(clippy::should_implement_trait)]
    pub fn div(&self, v: &Self) -> Result<Self> {
        self.lanewise(DIV, v)
    }

    /// `lanewise(MIN, v)`.
    pub fn min(&self, v: &Self) -> Result<Self> {
        self.lanewise(MIN, v)
    }

    /// `lanewise(MAX, v)`.
    pub fn max(&self, v: &Self) -> Result<Self> {
        self.lanewise(MAX, v)
    }

    /// `lanewise_unary(NEG)`.
    #[allow(clippy::should_implement_trait)]
    pub fn neg(&self) -> Result<Self> {
        self.lanewise_unary(NEG)
    }

    /// `lanewise_unary(ABS)`.
    pub fn abs(&self) -> Result<Self> {
        self.lanewise_unary(ABS)
    }

    // -----------------------------------------------------------------------
    // Blend and index
    // -----------------------------------------------------------------------

    /// Lane `i` of `v` where `m` is set, else lane `i` of `self`.
    pub fn blend(&self, v: &Self, m: &Mask<T>) -> Result<Self> {
        self.check_species(v)?;
        self.check_mask(m)?;
        Ok(self.with_lanes(
            self.as_slice()
                .iter()
                .zip(v.as_slice())
                .zip(m.as_slice())
                .map(|((&a, &b), &set)| if set { b } else { a })
                .collect(),
        ))
    }

    /// `blend(broadcast(e), m)`.
    pub fn blend_scalar(&self, e: T, m: &Mask<T>) -> Result<Self> {
        self.blend(&self.broadcast(e), m)
    }

    /// `self + iota * scale`, failing if `length * scale` does not fit
    /// the lane type.
    pub fn add_index(&self, scale: i32) -> Result<Self> {
        let span = (self.length() as i64) * scale as i64;
        if T::from_long_lossy(span).to_long() != span {
            return Err(not_representable(
                format!("{} * {}", self.length(), scale),
                "i64",
                T::TYPE.name(),
            ));
        }
        let species = self.species();
        let step = species
            .iota()
            .lanewise_scalar(MUL, T::from_long_lossy(scale as i64))?;
        self.lanewise(ADD, &step)
    }

    // -----------------------------------------------------------------------
    // Reductions
    // -----------------------------------------------------------------------

    /// Folds every lane with `op`.
    ///
    /// `ADD` and `MUL` over floating lanes are not folded left to right;
    /// results may differ from a sequential loop by reassociation error.
    /// `FIRST_NONZERO` returns the lowest lane whose bits are nonzero.
    pub fn reduce_lanes(&self, op: Associative) -> Result<T> {
        if op == FIRST_NONZERO {
            check_kind(op, kind::ASSOCIATIVE, T::FORBID_OPCODE_KIND, self.vector_type())?;
            let nonzero = self
                .view_as_integral_lanes()
                .compare_scalar(NE, <T::Integral as Lane>::ZERO)?;
            return Ok(self
                .as_slice()
                .get(nonzero.first_true())
                .copied()
                .unwrap_or(T::ZERO));
        }
        let opc = op_code(op, kind::ASSOCIATIVE, T::FORBID_OPCODE_KIND, self.vector_type())?;
        let r = self
            .species()
            .caches
            .reduce
            .find(op, opc, self.vector_type(), T::reduce_impl)?;
        Ok(substrate::reduce(opc, self.as_slice(), r))
    }

    /// Folds the lanes set in `m`; with no lane set the result is the
    /// identity of `op`.
    pub fn reduce_lanes_masked(&self, op: Associative, m: &Mask<T>) -> Result<T> {
        self.check_mask(m)?;
        let identity = self.species().reduction_identity(op)?;
        self.broadcast(identity).blend(self, m)?.reduce_lanes(op)
    }

    /// `reduce_lanes(op)` widened to `i64`.
    pub fn reduce_lanes_to_long(&self, op: Associative) -> Result<i64> {
        Ok(self.reduce_lanes(op)?.to_long())
    }

    /// `reduce_lanes_masked(op, m)` widened to `i64`.
    pub fn reduce_lanes_to_long_masked(&self, op: Associative, m: &Mask<T>) -> Result<i64> {
        Ok(self.reduce_lanes_masked(op, m)?.to_long())
    }

    // -----------------------------------------------------------------------
    // Comparisons and tests
    // -----------------------------------------------------------------------

    /// Evaluates `op` between lane `i` of `self` and `v`.
    pub fn compare(&self, op: Comparison, v: &Self) -> Result<Mask<T>> {
        self.check_species(v)?;
        let species = self.species();
        let opc = op_code(op, kind::BOOLEAN, T::FORBID_OPCODE_KIND, self.vector_type())?;
        let f = species
            .caches
            .compare
            .find(op, opc, self.vector_type(), T::compare_impl)?;
        Ok(Mask::from_boxed(
            species,
            substrate::compare_op(opc, self.as_slice(), v.as_slice(), f),
        ))
    }

    /// `compare(op, broadcast(e))`.
    pub fn compare_scalar(&self, op: Comparison, e: T) -> Result<Mask<T>> {
        self.compare(op, &self.broadcast(e))
    }

    /// `compare(op, v)` restricted to the lanes set in `m`.
    pub fn compare_masked(&self, op: Comparison, v: &Self, m: &Mask<T>) -> Result<Mask<T>> {
        self.compare(op, v)?.and(m)
    }

    /// `compare(op, v)` shorthand for `EQ`.
    #[allow(clippy::should_implement_trait)]
    pub fn eq(&self, v: &Self) -> Result<Mask<T>> {
        self.compare(EQ, v)
    }

    /// `compare(op, v)` shorthand for `LT`.
    pub fn lt(&self, v: &Self) -> Result<Mask<T>> {
        self.compare(LT, v)
    }

    /// Evaluates the predicate `op` on every lane.
    ///
    /// The floating tests strip the sign bit and compare the magnitude
    /// bits against the encoding of infinity.
    pub fn test(&self, op: Test) -> Result<Mask<T>> {
        check_kind(op, kind::BOOLEAN, T::FORBID_OPCODE_KIND, self.vector_type())?;
        let bits = self.view_as_integral_lanes();
        let zero = <T::Integral as Lane>::ZERO;
        let m = if op == IS_DEFAULT {
            bits.compare_scalar(EQ, zero)?
        } else if op == IS_NEGATIVE {
            bits.compare_scalar(LT, zero)?
        } else {
            let sign_clear = <T::Integral as Lane>::from_raw_bits(i64::MAX >> (64 - T::BITS));
            let infinity = <T::Integral as Lane>::from_raw_bits(T::INFINITY_BITS);
            let magnitude = bits.lanewise_scalar(AND, sign_clear)?;
            let relation = if op == IS_FINITE {
                LT
            } else if op == IS_NAN {
                GT
            } else if op == IS_INFINITE {
                EQ
            } else {
                return Err(unsupported_operation(op.op().name(), self.vector_type().to_string()));
            };
            magnitude.compare_scalar(relation, infinity)?
        };
        m.cast(self.species())
    }

    /// `test(op)` restricted to the lanes set in `m`.
    pub fn test_masked(&self, op: Test, m: &Mask<T>) -> Result<Mask<T>> {
        self.test(op)?.and(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VectorError;
    use crate::simd::operators::{ASHR, FMA, HYPOT, SQRT, UNSIGNED_GT, UNSIGNED_LT};
    use crate::simd::species::{Shape, Species};

    fn ints(values: &[i32]) -> Vector<i32> {
        Species::<i32>::of(Shape::S128Bit).from_values(values).unwrap()
    }

    fn floats(values: &[f32]) -> Vector<f32> {
        Species::<f32>::of(Shape::S128Bit).from_values(values).unwrap()
    }

    fn mask(bits: &[bool]) -> Mask<i32> {
        Species::<i32>::of(Shape::S128Bit).mask_from_bools(bits).unwrap()
    }

    #[test]
    fn test_wrapping_add() {
        let v = ints(&[i32::MAX, 1, -1, 0]);
        let r = v.lanewise_scalar(ADD, 1).unwrap();
        assert_eq!(r.to_array(), vec![i32::MIN, 2, 0, 1]);
    }

    #[test]
    fn test_capability_gate() {
        let v = ints(&[1, 2, 3, 4]);
        assert!(matches!(
            v.lanewise_unary(SQRT),
            Err(VectorError::UnsupportedOperation { .. })
        ));
        let f = floats(&[1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(f.lanewise(AND, &f), Err(VectorError::UnsupportedOperation { .. })));
        assert!(f.lanewise_unary(NOT).is_err());
        assert!(f.compare(UNSIGNED_LT, &f).is_err());
        assert!(v.lanewise(HYPOT, &v).is_err());
    }

    #[test]
    fn test_special_unary() {
        let v = ints(&[0, 5, -3, 0]);
        assert_eq!(v.lanewise_unary(ZOMO).unwrap().to_array(), vec![0, -1, -1, 0]);
        assert_eq!(v.lanewise_unary(NOT).unwrap().to_array(), vec![-1, !5, !-3, -1]);
        let f = floats(&[0.0, -0.0, 2.5, f32::NAN]);
        assert_eq!(f.lanewise_unary(ZOMO).unwrap().to_array()[..3], [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_shifts_and_rotates() {
        let v = ints(&[1, -8, 0x1234_5678, i32::MIN]);
        let n = ints(&[33, 1, 8, 31]);
        assert_eq!(v.lanewise(LSHL, &n).unwrap().to_array(), vec![2, -16, 0x3456_7800, 0]);
        assert_eq!(v.lanewise(ASHR, &n).unwrap().to_array(), vec![0, -4, 0x12_3456, -1]);
        assert_eq!(v.lanewise(LSHR, &n).unwrap().to_array(), vec![0, 0x7fff_fffc, 0x12_3456, 1]);
        let rol = v.lanewise(ROL, &n).unwrap();
        let expected: Vec<i32> = [1i32, -8, 0x1234_5678, i32::MIN]
            .iter()
            .zip([33u32, 1, 8, 31])
            .map(|(&a, n)| a.rotate_left(n))
            .collect();
        assert_eq!(rol.to_array(), expected);
        let ror = v.lanewise(ROR, &n).unwrap();
        let expected: Vec<i32> = [1i32, -8, 0x1234_5678, i32::MIN]
            .iter()
            .zip([33u32, 1, 8, 31])
            .map(|(&a, n)| a.rotate_right(n))
            .collect();
        assert_eq!(ror.to_array(), expected);
    }

    #[test]
    fn test_byte_rotate_uses_lane_width() {
        let sp = Species::<i8>::of(Shape::S64Bit);
        let v = sp.broadcast(0b0101_0011u8 as i8);
        let r = v.lanewise_scalar(ROL, 3).unwrap();
        assert_eq!(r.lane(0), Ok((0b0101_0011u8).rotate_left(3) as i8));
    }

    #[test]
    fn test_and_not_and_bitwise_blend() {
        let a = ints(&[0b1100, -1, 0, 7]);
        let b = ints(&[0b1010, 0xff, -1, 0]);
        assert_eq!(a.lanewise(AND_NOT, &b).unwrap().to_array(), vec![0b0100, !0xff, 0, 7]);
        let c = ints(&[0b0110, 0, -1, 1]);
        let r = a.lanewise_ternary(BITWISE_BLEND, &b, &c).unwrap();
        let expected: Vec<i32> = (0..4)
            .map(|i| {
                let (x, y, z) = (a.as_slice()[i], b.as_slice()[i], c.as_slice()[i]);
                (x & !z) | (y & z)
            })
            .collect();
        assert_eq!(r.to_array(), expected);
    }

    #[test]
    fn test_division_by_zero() {
        let a = Species::<i32>::of(Shape::S128Bit)
            .from_values(&[10, 20, 30, 40])
            .unwrap();
        let b = ints(&[2, 0, 5, 4]);
        assert!(matches!(a.div(&b), Err(VectorError::Arithmetic { .. })));

        let m = mask(&[true, false, true, true]);
        let r = a.lanewise_masked(DIV, &b, &m).unwrap();
        assert_eq!(r.to_array(), vec![5, 20, 6, 10]);

        let all = mask(&[true; 4]);
        assert!(a.lanewise_masked(DIV, &b, &all).is_err());
    }

    #[test]
    fn test_float_division_never_fails() {
        let a = floats(&[1.0, -1.0, 0.0, 2.0]);
        let b = floats(&[0.0, 0.0, 0.0, -0.0]);
        let r = a.div(&b).unwrap();
        assert_eq!(r.as_slice()[0], f32::INFINITY);
        assert_eq!(r.as_slice()[1], f32::NEG_INFINITY);
        assert!(r.as_slice()[2].is_nan());
        assert_eq!(r.as_slice()[3], f32::NEG_INFINITY);
    }

    #[test]
    fn test_masked_keeps_receiver() {
        let a = ints(&[1, 2, 3, 4]);
        let b = ints(&[10, 20, 30, 40]);
        let m = mask(&[true, false, false, true]);
        assert_eq!(a.lanewise_masked(SUB, &b, &m).unwrap().to_array(), vec![-9, 2, 3, -36]);
        assert_eq!(
            a.lanewise_unary_masked(NEG, &m).unwrap().to_array(),
            vec![-1, 2, 3, -4]
        );
        assert_eq!(
            a.lanewise_scalar_masked(MAX, 3, &m).unwrap().to_array(),
            vec![3, 2, 3, 4]
        );
    }

    #[test]
    fn test_first_nonzero_lanewise() {
        let a = floats(&[0.0, -0.0, 3.0, 0.0]);
        let b = floats(&[7.0, 8.0, 9.0, -0.0]);
        let r = a.lanewise(FIRST_NONZERO, &b).unwrap();
        let bits: Vec<u32> = r.as_slice().iter().map(|x| x.to_bits()).collect();
        assert_eq!(bits, vec![7.0f32.to_bits(), 0x8000_0000, 3.0f32.to_bits(), 0x8000_0000]);

        let x = ints(&[0, 4, 0, -1]);
        let y = ints(&[5, 6, 0, 9]);
        assert_eq!(x.lanewise(FIRST_NONZERO, &y).unwrap().to_array(), vec![5, 4, 0, -1]);
    }

    #[test]
    fn test_fma() {
        let a = floats(&[1.0, 2.0, 3.0, 4.0]);
        let r = a.lanewise_ternary_scalars(FMA, 2.0, 0.5).unwrap();
        assert_eq!(r.to_array(), vec![2.5, 4.5, 6.5, 8.5]);
        let i = ints(&[1, 2, 3, 4]);
        assert!(i.lanewise_ternary_scalars(FMA, 1, 1).is_err());
    }

    #[test]
    fn test_reductions() {
        let v = ints(&[3, -1, 7, 2]);
        assert_eq!(v.reduce_lanes(ADD), Ok(11));
        assert_eq!(v.reduce_lanes(MUL), Ok(-42));
        assert_eq!(v.reduce_lanes(MIN), Ok(-1));
        assert_eq!(v.reduce_lanes(MAX), Ok(7));
        assert_eq!(v.reduce_lanes(XOR), Ok(3 ^ -1 ^ 7 ^ 2));
        assert_eq!(v.reduce_lanes_to_long(AND), Ok((3 & -1 & 7 & 2) as i64));

        let none = mask(&[false; 4]);
        assert_eq!(v.reduce_lanes_masked(ADD, &none), Ok(0));
        assert_eq!(v.reduce_lanes_masked(MUL, &none), Ok(1));
        assert_eq!(v.reduce_lanes_masked(AND, &none), Ok(-1));
        assert_eq!(v.reduce_lanes_masked(MIN, &none), Ok(i32::MAX));
        assert_eq!(v.reduce_lanes_masked(MAX, &none), Ok(i32::MIN));
        assert_eq!(v.reduce_lanes_masked(FIRST_NONZERO, &none), Ok(0));

        let some = mask(&[false, true, true, false]);
        assert_eq!(v.reduce_lanes_masked(ADD, &some), Ok(6));
    }

    #[test]
    fn test_first_nonzero_reduction_sees_negative_zero() {
        let sp = Species::<f32>::of(Shape::S128Bit);
        let v = sp.from_values(&[0.0, -0.0, 3.0, 0.0]).unwrap();
        let r = v.reduce_lanes(FIRST_NONZERO).unwrap();
        assert_eq!(r.to_bits(), 0x8000_0000);
        let zeros = sp.zero();
        assert_eq!(zeros.reduce_lanes(FIRST_NONZERO).unwrap().to_bits(), 0);
    }

    #[test]
    fn test_float_min_max_reduction() {
        let v = floats(&[0.0, -0.0, 1.0, 2.0]);
        assert!(v.reduce_lanes(MIN).unwrap().is_sign_negative());
        let nan = floats(&[1.0, f32::NAN, 3.0, 4.0]);
        assert!(nan.reduce_lanes(MAX).unwrap().is_nan());
        let none = Species::<f32>::of(Shape::S128Bit).mask_all(false);
        assert_eq!(v.reduce_lanes_masked(MIN, none), Ok(f32::INFINITY));
        assert_eq!(v.reduce_lanes_masked(MAX, none), Ok(f32::NEG_INFINITY));
    }

    #[test]
    fn test_compare() {
        let a = ints(&[1, -1, 5, 0]);
        let b = ints(&[2, 1, 5, -7]);
        assert_eq!(a.lt(&b).unwrap().to_array(), vec![true, true, false, false]);
        assert_eq!(a.eq(&b).unwrap().to_array(), vec![false, false, true, false]);
        assert_eq!(
            a.compare(UNSIGNED_GT, &b).unwrap().to_array(),
            vec![false, true, false, false]
        );
        let m = mask(&[false, true, true, true]);
        assert_eq!(
            a.compare_masked(LT, &b, &m).unwrap().to_array(),
            vec![false, true, false, false]
        );
        let nan = floats(&[f32::NAN, 1.0, 2.0, 3.0]);
        assert_eq!(
            nan.compare_scalar(EQ, f32::NAN).unwrap().to_array(),
            vec![false; 4]
        );
    }

    #[test]
    fn test_signed_zero_tests() {
        let v = floats(&[-0.0, 0.0, f32::NAN, f32::NEG_INFINITY]);
        assert_eq!(v.test(IS_DEFAULT).unwrap().to_array(), vec![false, true, false, false]);
        assert_eq!(v.test(IS_NEGATIVE).unwrap().to_array(), vec![true, false, false, true]);
        assert_eq!(v.test(IS_FINITE).unwrap().to_array(), vec![true, true, false, false]);
        assert_eq!(v.test(IS_NAN).unwrap().to_array(), vec![false, false, true, false]);
        assert_eq!(v.test(IS_INFINITE).unwrap().to_array(), vec![false, false, false, true]);

        let i = ints(&[0, -3, 4, 0]);
        assert_eq!(i.test(IS_DEFAULT).unwrap().to_array(), vec![true, false, false, true]);
        assert!(i.test(IS_NAN).is_err());
        let m = mask(&[true, true, false, false]);
        assert_eq!(
            i.test_masked(IS_DEFAULT, &m).unwrap().to_array(),
            vec![true, false, false, false]
        );
    }

    #[test]
    fn test_add_index() {
        let sp = Species::<i8>::of(Shape::S128Bit);
        let v = sp.zero().add_index(7).unwrap();
        assert_eq!(v.lane(15), Ok(105));
        assert!(matches!(
            sp.zero().add_index(8),
            Err(VectorError::NotRepresentable { .. })
        ));
        let f = floats(&[0.5; 4]).add_index(-2).unwrap();
        assert_eq!(f.to_array(), vec![0.5, -1.5, -3.5, -5.5]);
    }

    #[test]
    fn test_species_mismatch() {
        let a = ints(&[1, 2, 3, 4]);
        let b = Species::<i32>::of(Shape::S256Bit).broadcast(1);
        assert!(matches!(a.add(&b), Err(VectorError::SpeciesMismatch { .. })));
    }

    #[test]
    fn test_cache_is_warm_after_dispatch() {
        let sp = Species::<i16>::of(Shape::S64Bit);
        let v = sp.broadcast(3);
        v.lanewise(ADD, &v).unwrap();
        v.lanewise_unary(ABS).unwrap();
        assert!(sp.caches().binary.is_cached(opcode::ADD));
        assert!(sp.caches().unary.is_cached(opcode::ABS));
    }
}
