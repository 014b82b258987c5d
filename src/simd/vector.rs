//! The vector value type.
//!
//! A [`Vector`] owns its lanes exclusively: factories copy or take
//! ownership of their input, and no method hands out a mutable view of
//! the storage. Every operation that changes lane values returns a new
//! vector.
//!
//! The lane-wise kernel lives in `kernel.rs`, permutations in
//! `rearrange.rs`, loads and stores in `memory.rs` and lane type
//! conversions in `convert.rs`; all of them extend this type.

use std::fmt;
use std::ptr;

use crate::error::{check_index, species_mismatch, Result};
use crate::simd::lanes::Lane;
use crate::simd::mask::Mask;
use crate::simd::shuffle::Shuffle;
use crate::simd::species::{Species, VectorType};

/// A fixed-length sequence of lanes tagged with its species.
#[derive(Clone)]
pub struct Vector<T: Lane> {
    species: &'static Species<T>,
    lanes: Box<[T]>,
}

impl<T: Lane> Vector<T> {
    /// Wraps `lanes`, whose length must equal the species' lane count.
    #[inline(always)]
    pub(crate) fn from_boxed(species: &'static Species<T>, lanes: Box<[T]>) -> Self {
        debug_assert_eq!(lanes.len(), species.length());
        Vector { species, lanes }
    }

    /// A vector of the same species holding `lanes`.
    #[inline(always)]
    pub(crate) fn with_lanes(&self, lanes: Box<[T]>) -> Self {
        Vector::from_boxed(self.species, lanes)
    }

    /// The species of this vector.
    #[inline(always)]
    pub fn species(&self) -> &'static Species<T> {
        self.species
    }

    /// Lane count.
    #[inline(always)]
    pub fn length(&self) -> usize {
        self.lanes.len()
    }

    /// Name of the vector type, e.g. `i32x8`.
    pub fn vector_type(&self) -> VectorType {
        self.species.vector_type()
    }

    /// Lane `i`.
    pub fn lane(&self, i: usize) -> Result<T> {
        let i = check_index("lane", i as i64, self.length())?;
        Ok(self.lanes[i])
    }

    /// A copy of this vector with lane `i` replaced by `e`.
    pub fn with_lane(&self, i: usize, e: T) -> Result<Self> {
        let i = check_index("lane", i as i64, self.length())?;
        let mut lanes = self.lanes.clone();
        lanes[i] = e;
        Ok(self.with_lanes(lanes))
    }

    /// Read-only view of the lanes.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &self.lanes
    }

    /// The lanes, copied.
    pub fn to_array(&self) -> Vec<T> {
        self.lanes.to_vec()
    }

    /// The lanes widened to `i64` (saturating for floats).
    pub fn to_long_array(&self) -> Vec<i64> {
        self.lanes.iter().map(|e| e.to_long()).collect()
    }

    /// The lanes converted to `f64`.
    pub fn to_double_array(&self) -> Vec<f64> {
        self.lanes.iter().map(|e| e.to_double()).collect()
    }

    /// A vector of this species with every lane equal to `e`.
    pub fn broadcast(&self, e: T) -> Self {
        self.species.broadcast(e)
    }

    #[inline(always)]
    pub(crate) fn check_species(&self, other: &Vector<T>) -> Result<()> {
        same_species(self.species, other.species)
    }

    #[inline(always)]
    pub(crate) fn check_mask(&self, m: &Mask<T>) -> Result<()> {
        same_species(self.species, m.species())
    }

    #[inline(always)]
    pub(crate) fn check_shuffle(&self, s: &Shuffle<T>) -> Result<()> {
        same_species(self.species, s.species())
    }
}

#[inline(always)]
pub(crate) fn same_species<T: Lane>(a: &'static Species<T>, b: &'static Species<T>) -> Result<()> {
    if ptr::eq(a, b) {
        Ok(())
    } else {
        Err(species_mismatch(a, b))
    }
}

impl<T: Lane> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.species, other.species) && self.lanes == other.lanes
    }
}

impl<T: Lane> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vector_type())?;
        f.debug_list().entries(self.lanes.iter()).finish()
    }
}

impl<T: Lane> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.lanes.iter()).finish()
    }
}
