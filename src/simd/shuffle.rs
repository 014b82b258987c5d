//! Lane permutations.
//!
//! A [`Shuffle`] holds one source index per output lane. Valid indexes lie
//! in `[0, length)`. Any other requested index is stored *partially
//! wrapped*: reduced modulo `length` into `[-length, 0)`, which keeps the
//! source lane recoverable (`index + length`) while marking the lane as
//! exceptional.

use std::fmt;
use std::ptr;

use crate::error::{
    check_index, check_range, shuffle_index_error, species_mismatch, validation_error, Result,
};
use crate::simd::lanes::Lane;
use crate::simd::mask::Mask;
use crate::simd::species::Species;
use crate::simd::vector::Vector;

#[inline(always)]
fn partially_wrap(index: i64, length: usize) -> i32 {
    let n = length as i64;
    if (0..n).contains(&index) {
        index as i32
    } else {
        (index.rem_euclid(n) - n) as i32
    }
}

/// Per-lane source indexes, tagged with a species.
#[derive(Clone)]
pub struct Shuffle<T: Lane> {
    species: &'static Species<T>,
    indexes: Box<[i32]>,
}

impl<T: Lane> Shuffle<T> {
    #[inline(always)]
    fn from_boxed(species: &'static Species<T>, indexes: Box<[i32]>) -> Self {
        debug_assert_eq!(indexes.len(), species.length());
        Shuffle { species, indexes }
    }

    pub(crate) fn from_long_indexes(
        species: &'static Species<T>,
        indexes: impl Iterator<Item = i64>,
    ) -> Self {
        let n = species.length();
        Shuffle::from_boxed(species, indexes.map(|i| partially_wrap(i, n)).collect())
    }

    /// A shuffle from exactly `length` source indexes; out-of-range
    /// entries are stored as exceptional.
    pub fn from_values(species: &'static Species<T>, indexes: &[i32]) -> Result<Self> {
        if indexes.len() != species.length() {
            return Err(validation_error(format!(
                "shuffle of {} expects {} indexes, got {}",
                species.vector_type(),
                species.length(),
                indexes.len()
            )));
        }
        Ok(Shuffle::from_long_indexes(
            species,
            indexes.iter().map(|&i| i as i64),
        ))
    }

    /// Loads `length` source indexes from `a` starting at `offset`.
    pub fn from_array(species: &'static Species<T>, a: &[i32], offset: usize) -> Result<Self> {
        check_range(offset, species.length(), a.len())?;
        Self::from_values(species, &a[offset..offset + species.length()])
    }

    /// A shuffle whose lane `i` selects `f(i)`.
    pub fn from_fn(species: &'static Species<T>, mut f: impl FnMut(usize) -> i32) -> Self {
        Shuffle::from_long_indexes(species, (0..species.length()).map(|i| f(i) as i64))
    }

    /// The shuffle `start, start + step, start + 2 * step, ...`.
    ///
    /// With `wrap` every index is reduced modulo `length`, so all lanes
    /// are valid; otherwise out-of-range indexes become exceptional.
    pub fn iota(species: &'static Species<T>, start: i32, step: i32, wrap: bool) -> Self {
        let n = species.length() as i64;
        let raw = (0..n).map(|i| start as i64 + i * step as i64);
        if wrap {
            Shuffle::from_boxed(species, raw.map(|i| i.rem_euclid(n) as i32).collect())
        } else {
            Shuffle::from_long_indexes(species, raw)
        }
    }

    /// Species of the vectors this shuffle permutes.
    #[inline(always)]
    pub fn species(&self) -> &'static Species<T> {
        self.species
    }

    /// Lane count.
    #[inline(always)]
    pub fn length(&self) -> usize {
        self.indexes.len()
    }

    /// Source index stored for lane `i`; negative when exceptional.
    pub fn lane_source(&self, i: usize) -> Result<i32> {
        let i = check_index("lane", i as i64, self.length())?;
        Ok(self.indexes[i])
    }

    /// Read-only view of the stored indexes.
    #[inline(always)]
    pub fn as_slice(&self) -> &[i32] {
        &self.indexes
    }

    /// The stored indexes, copied.
    pub fn to_array(&self) -> Vec<i32> {
        self.indexes.to_vec()
    }

    /// The stored indexes as lanes of `T`.
    pub fn to_vector(&self) -> Vector<T> {
        Vector::from_boxed(
            self.species,
            self.indexes
                .iter()
                .map(|&i| T::from_long_lossy(i as i64))
                .collect(),
        )
    }

    /// Set where the stored index is valid.
    pub fn lane_is_valid(&self) -> Mask<T> {
        Mask::from_boxed(self.species, self.indexes.iter().map(|&i| i >= 0).collect())
    }

    /// This shuffle, or an error naming the first exceptional lane.
    pub fn check_indexes(&self) -> Result<Self> {
        match self.indexes.iter().position(|&i| i < 0) {
            Some(lane) => Err(shuffle_index_error(lane, self.indexes[lane], self.length())),
            None => Ok(self.clone()),
        }
    }

    /// Every exceptional index replaced by its wrapped source lane.
    pub fn wrap_indexes(&self) -> Self {
        let n = self.length() as i32;
        Shuffle::from_boxed(
            self.species,
            self.indexes
                .iter()
                .map(|&i| if i < 0 { i + n } else { i })
                .collect(),
        )
    }

    /// The same indexes for vectors of `species`, which must have the
    /// same lane count.
    pub fn cast<U: Lane>(&self, species: &'static Species<U>) -> Result<Shuffle<U>> {
        if species.length() != self.length() {
            return Err(species_mismatch(self.species, species));
        }
        Ok(Shuffle::from_boxed(species, self.indexes.clone()))
    }
}

impl<T: Lane> PartialEq for Shuffle<T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.species, other.species) && self.indexes == other.indexes
    }
}

impl<T: Lane> Eq for Shuffle<T> {}

impl<T: Lane> fmt::Debug for Shuffle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shuffle<{}>", self.species.vector_type())?;
        f.debug_list().entries(self.indexes.iter()).finish()
    }
}
