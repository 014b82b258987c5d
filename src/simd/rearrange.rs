//! Cross-lane movement: shuffles, selection and sliding windows.

use crate::error::{check_index, out_of_bounds, shuffle_index_error, Result};
use crate::simd::lanes::Lane;
use crate::simd::mask::Mask;
use crate::simd::operators::{GE, LT};
use crate::simd::shuffle::Shuffle;
use crate::simd::vector::Vector;

impl<T: Lane> Vector<T> {
    #[inline(always)]
    fn gather_lanes(&self, indexes: &[i32]) -> Self {
        let lanes = self.as_slice();
        self.with_lanes(indexes.iter().map(|&i| lanes[i as usize]).collect())
    }

    /// Lane `i` of the result is lane `s[i]` of `self`.
    ///
    /// Fails if any index of `s` is exceptional.
    pub fn rearrange(&self, s: &Shuffle<T>) -> Result<Self> {
        self.check_shuffle(s)?;
        let s = s.check_indexes()?;
        Ok(self.gather_lanes(s.as_slice()))
    }

    /// Like [`rearrange`](Self::rearrange) for the lanes set in `m`;
    /// unset lanes are zero and their indexes are not checked.
    pub fn rearrange_masked(&self, s: &Shuffle<T>, m: &Mask<T>) -> Result<Self> {
        self.check_shuffle(s)?;
        self.check_mask(m)?;
        let lanes = self.as_slice();
        let mut out = Vec::with_capacity(self.length());
        for (lane, (&i, &set)) in s.as_slice().iter().zip(m.as_slice()).enumerate() {
            if !set {
                out.push(T::ZERO);
            } else if i < 0 {
                return Err(shuffle_index_error(lane, i, self.length()));
            } else {
                out.push(lanes[i as usize]);
            }
        }
        Ok(self.with_lanes(out.into_boxed_slice()))
    }

    /// Two-input rearrange: valid indexes select from `self`, exceptional
    /// indexes select lane `index + length` from `v`.
    pub fn rearrange_with(&self, s: &Shuffle<T>, v: &Self) -> Result<Self> {
        self.check_shuffle(s)?;
        self.check_species(v)?;
        let valid = s.lane_is_valid();
        let wrapped = s.wrap_indexes();
        let r0 = self.gather_lanes(wrapped.as_slice());
        let r1 = v.gather_lanes(wrapped.as_slice());
        r1.blend(&r0, &valid)
    }

    /// This vector's lanes as a shuffle of the same species.
    pub fn to_shuffle(&self) -> Shuffle<T> {
        Shuffle::from_long_indexes(self.species(), self.as_slice().iter().map(|&e| e.to_long()))
    }

    /// `v.rearrange(self.to_shuffle())`.
    pub fn select_from(&self, v: &Self) -> Result<Self> {
        self.check_species(v)?;
        v.rearrange(&self.to_shuffle())
    }

    /// `v.rearrange_masked(self.to_shuffle(), m)`.
    pub fn select_from_masked(&self, v: &Self, m: &Mask<T>) -> Result<Self> {
        self.check_species(v)?;
        v.rearrange_masked(&self.to_shuffle(), m)
    }

    fn check_origin(&self, origin: usize) -> Result<()> {
        if origin > self.length() {
            return Err(out_of_bounds("origin", origin as i64, self.length() + 1));
        }
        Ok(())
    }

    /// The window of `length` lanes starting at `origin` in the
    /// concatenation `self ++ v`.
    pub fn slice(&self, origin: usize, v: &Self) -> Result<Self> {
        self.check_species(v)?;
        self.check_origin(origin)?;
        let species = self.species();
        let n = self.length();
        let from_self = species
            .iota()
            .compare_scalar(LT, T::from_long_lossy((n - origin) as i64))?;
        let iota = Shuffle::iota(species, origin as i32, 1, true);
        v.rearrange(&iota)?.blend(&self.rearrange(&iota)?, &from_self)
    }

    /// `slice(origin, zero)`.
    pub fn slice_single(&self, origin: usize) -> Result<Self> {
        self.slice(origin, self.species().zero())
    }

    /// `slice(origin, v)` with the lanes clear in `m` set to zero.
    pub fn slice_masked(&self, origin: usize, v: &Self, m: &Mask<T>) -> Result<Self> {
        self.check_mask(m)?;
        self.species().zero().blend(&self.slice(origin, v)?, m)
    }

    /// Inverse of [`slice`](Self::slice): inserts `self` at `origin` into
    /// the pair `(w, w)` and returns part `0` or `1` of the result.
    pub fn unslice(&self, origin: usize, w: &Self, part: usize) -> Result<Self> {
        self.check_species(w)?;
        self.check_origin(origin)?;
        check_index("part", part as i64, 2)?;
        let species = self.species();
        let relation = if part == 0 { GE } else { LT };
        let into_w = species
            .iota()
            .compare_scalar(relation, T::from_long_lossy(origin as i64))?;
        let iota = Shuffle::iota(species, -(origin as i32), 1, true);
        w.blend(&self.rearrange(&iota)?, &into_w)
    }

    /// Like [`unslice`](Self::unslice), writing only the lanes of `self`
    /// set in `m`.
    pub fn unslice_masked(
        &self,
        origin: usize,
        w: &Self,
        part: usize,
        m: &Mask<T>,
    ) -> Result<Self> {
        self.check_mask(m)?;
        let merged = w.slice(origin, w)?.blend(self, m)?;
        merged.unslice(origin, w, part)
    }

    /// `unslice(origin, zero, 0)`.
    pub fn unslice_single(&self, origin: usize) -> Result<Self> {
        self.unslice(origin, self.species().zero(), 0)
    }
}
