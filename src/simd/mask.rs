//! Per-lane boolean masks.

use std::fmt;
use std::ptr;

use crate::error::{check_index, check_range, species_mismatch, validation_error, Result};
use crate::simd::lanes::Lane;
use crate::simd::species::{Species, VectorType};
use crate::simd::vector::{same_species, Vector};

/// One boolean per lane, tagged with the species of the vectors it controls.
#[derive(Clone)]
pub struct Mask<T: Lane> {
    species: &'static Species<T>,
    bits: Box<[bool]>,
}

impl<T: Lane> Mask<T> {
    #[inline(always)]
    pub(crate) fn from_boxed(species: &'static Species<T>, bits: Box<[bool]>) -> Self {
        debug_assert_eq!(bits.len(), species.length());
        Mask { species, bits }
    }

    /// Loads `length` booleans from `a` starting at `offset`.
    pub fn from_array(species: &'static Species<T>, a: &[bool], offset: usize) -> Result<Self> {
        check_range(offset, species.length(), a.len())?;
        Ok(Mask::from_boxed(species, a[offset..offset + species.length()].into()))
    }

    /// Stores the lanes into `a` starting at `offset`.
    pub fn into_array(&self, a: &mut [bool], offset: usize) -> Result<()> {
        check_range(offset, self.length(), a.len())?;
        a[offset..offset + self.length()].copy_from_slice(&self.bits);
        Ok(())
    }

    /// Species of the vectors this mask controls.
    #[inline(always)]
    pub fn species(&self) -> &'static Species<T> {
        self.species
    }

    /// Lane count.
    #[inline(always)]
    pub fn length(&self) -> usize {
        self.bits.len()
    }

    /// Name of the controlled vector type.
    pub fn vector_type(&self) -> VectorType {
        self.species.vector_type()
    }

    /// Lane `i`.
    pub fn lane_is_set(&self, i: usize) -> Result<bool> {
        let i = check_index("lane", i as i64, self.length())?;
        Ok(self.bits[i])
    }

    /// Read-only view of the lanes.
    #[inline(always)]
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// The lanes, copied.
    pub fn to_array(&self) -> Vec<bool> {
        self.bits.to_vec()
    }

    /// Bit `i` of the result is lane `i`. Fails above 64 lanes.
    pub fn to_long(&self) -> Result<u64> {
        if self.length() > 64 {
            return Err(validation_error(format!(
                "mask of {} does not fit in 64 bits",
                self.vector_type()
            )));
        }
        Ok(self
            .bits
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, &b)| acc | ((b as u64) << i)))
    }

    /// A vector with `-1` in set lanes and `0` elsewhere.
    pub fn to_vector(&self) -> Vector<T> {
        Vector::from_boxed(
            self.species,
            self.bits
                .iter()
                .map(|&b| if b { T::MINUS_ONE } else { T::ZERO })
                .collect(),
        )
    }

    fn zip_with(&self, other: &Mask<T>, f: impl Fn(bool, bool) -> bool) -> Result<Self> {
        same_species(self.species, other.species)?;
        Ok(Mask::from_boxed(
            self.species,
            self.bits
                .iter()
                .zip(other.bits.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        ))
    }

    /// Lane-wise negation.
    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> Self {
        Mask::from_boxed(self.species, self.bits.iter().map(|&b| !b).collect())
    }

    /// Lane-wise conjunction.
    pub fn and(&self, other: &Mask<T>) -> Result<Self> {
        self.zip_with(other, |a, b| a & b)
    }

    /// Lane-wise disjunction.
    pub fn or(&self, other: &Mask<T>) -> Result<Self> {
        self.zip_with(other, |a, b| a | b)
    }

    /// Lane-wise exclusive or.
    pub fn xor(&self, other: &Mask<T>) -> Result<Self> {
        self.zip_with(other, |a, b| a ^ b)
    }

    /// Lanes set here and clear in `other`.
    pub fn and_not(&self, other: &Mask<T>) -> Result<Self> {
        self.zip_with(other, |a, b| a & !b)
    }

    /// Lanes where both masks agree.
    pub fn eq_lanes(&self, other: &Mask<T>) -> Result<Self> {
        self.zip_with(other, |a, b| a == b)
    }

    /// Number of set lanes.
    pub fn true_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Index of the lowest set lane, or `length` if none is set.
    pub fn first_true(&self) -> usize {
        self.bits.iter().position(|&b| b).unwrap_or(self.length())
    }

    /// Index of the highest set lane, or `length` if none is set.
    pub fn last_true(&self) -> usize {
        self.bits.iter().rposition(|&b| b).unwrap_or(self.length())
    }

    /// True if any lane is set.
    pub fn any_true(&self) -> bool {
        self.bits.iter().any(|&b| b)
    }

    /// True if every lane is set.
    pub fn all_true(&self) -> bool {
        self.bits.iter().all(|&b| b)
    }

    /// The same lanes as a mask of `species`, which must have the same
    /// lane count.
    pub fn cast<U: Lane>(&self, species: &'static Species<U>) -> Result<Mask<U>> {
        if species.length() != self.length() {
            return Err(species_mismatch(self.species, species));
        }
        Ok(Mask::from_boxed(species, self.to_array().into_boxed_slice()))
    }
}

impl<T: Lane> PartialEq for Mask<T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.species, other.species) && self.bits == other.bits
    }
}

impl<T: Lane> Eq for Mask<T> {}

impl<T: Lane> fmt::Debug for Mask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask<{}>", self.vector_type())?;
        f.debug_list().entries(self.bits.iter()).finish()
    }
}

impl<T: Lane> fmt::Display for Mask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.bits.iter().map(|&b| if b { 'T' } else { '.' }).collect();
        f.write_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::species::Shape;

    fn mask(bits: &[bool]) -> Mask<i32> {
        Species::<i32>::of(Shape::S128Bit).mask_from_bools(bits).unwrap()
    }

    #[test]
    fn test_boolean_algebra() {
        let a = mask(&[true, true, false, false]);
        let b = mask(&[true, false, true, false]);
        assert_eq!(a.and(&b).unwrap().to_array(), vec![true, false, false, false]);
        assert_eq!(a.or(&b).unwrap().to_array(), vec![true, true, true, false]);
        assert_eq!(a.xor(&b).unwrap().to_array(), vec![false, true, true, false]);
        assert_eq!(a.and_not(&b).unwrap().to_array(), vec![false, true, false, false]);
        assert_eq!(a.eq_lanes(&b).unwrap().to_array(), vec![true, false, false, true]);
        assert_eq!(a.not().to_array(), vec![false, false, true, true]);
    }

    #[test]
    fn test_population_queries() {
        let m = mask(&[false, true, false, true]);
        assert_eq!(m.true_count(), 2);
        assert_eq!(m.first_true(), 1);
        assert_eq!(m.last_true(), 3);
        assert!(m.any_true());
        assert!(!m.all_true());

        let none = mask(&[false; 4]);
        assert_eq!(none.first_true(), 4);
        assert_eq!(none.last_true(), 4);
        assert!(!none.any_true());
    }

    #[test]
    fn test_bit_packing() {
        let m = mask(&[true, false, true, true]);
        assert_eq!(m.to_long(), Ok(0b1101));
        let sp = Species::<i32>::of(Shape::S128Bit);
        assert_eq!(sp.mask_from_long(0b1101), m);
        assert_eq!(m.to_vector().to_array(), vec![-1, 0, -1, -1]);
    }

    #[test]
    fn test_cast_between_species() {
        let m = mask(&[true, false, false, true]);
        let f = m.cast(Species::<f32>::of(Shape::S128Bit)).unwrap();
        assert_eq!(f.to_array(), m.to_array());
        let l = m.cast(Species::<i64>::of(Shape::S256Bit)).unwrap();
        assert_eq!(l.length(), 4);
        assert!(m.cast(Species::<i8>::of(Shape::S128Bit)).is_err());
        assert_eq!(m.cast(m.species()).unwrap(), m);
    }

    #[test]
    fn test_mixed_species_rejected() {
        let a = mask(&[true; 4]);
        let b = Species::<i32>::of(Shape::SMaxBit).mask_all(true);
        assert!(a.and(b).is_err());
    }

    #[test]
    fn test_array_transfer() {
        let sp = Species::<i64>::of(Shape::S128Bit);
        let m = Mask::from_array(sp, &[false, true, true], 1).unwrap();
        assert!(m.all_true());
        let mut out = [false; 3];
        assert!(m.into_array(&mut out, 2).is_err());
        m.into_array(&mut out, 0).unwrap();
        assert_eq!(out, [true, true, false]);
        assert_eq!(m.to_string(), "TT");
    }
}
