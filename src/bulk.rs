//! Strip-mined lane-wise operations over whole slices.
//!
//! Every method walks the slice one vector at a time up to
//! [`Species::loop_bound`] and finishes the tail with a masked vector from
//! [`Species::index_in_range`], so slices of any length are accepted. The
//! `par_*` variants split slices longer than [`PARALLEL_SIMD_THRESHOLD`]
//! into chunks of about [`PARALLEL_CHUNK_SIZE`] elements and process the
//! chunks on the rayon thread pool.
//!
//! # Examples
//!
//! ```
//! use vectorly::operators::{ADD, MAX};
//! use vectorly::{LanewiseSlice, Shape, Species};
//!
//! let sp = Species::<f32>::of(Shape::S128Bit);
//! let a: Vec<f32> = (0..10).map(|i| i as f32).collect();
//! let b = vec![0.5f32; 10];
//! let sum = a.vector_lanewise(sp, ADD, &b).unwrap();
//! assert_eq!(sum[9], 9.5);
//! assert_eq!(a.vector_reduce(sp, MAX).unwrap(), 9.0);
//! ```

use rayon::prelude::*;

use crate::error::{validation_error, Result};
use crate::simd::operators::{Associative, Binary, FIRST_NONZERO};
use crate::simd::{Lane, Species, Vector};
use crate::{PARALLEL_CHUNK_SIZE, PARALLEL_SIMD_THRESHOLD};

/// Vectorized lane-wise operations on slices.
pub trait LanewiseSlice<T: Lane> {
    /// `self[i] op other[i]` for every `i`, computed with vectors of
    /// `species`.
    ///
    /// # Errors
    ///
    /// Fails when the slices differ in length or when the operation
    /// itself fails, e.g. integer division by zero.
    fn vector_lanewise(
        &self,
        species: &'static Species<T>,
        op: impl Into<Binary>,
        other: &[T],
    ) -> Result<Vec<T>>;

    /// [`vector_lanewise`](Self::vector_lanewise), split across threads
    /// for long slices.
    fn par_vector_lanewise(
        &self,
        species: &'static Species<T>,
        op: impl Into<Binary>,
        other: &[T],
    ) -> Result<Vec<T>>;

    /// Folds the whole slice with `op`; an empty slice yields the identity.
    ///
    /// Floating `ADD` and `MUL` are reassociated and may differ from a
    /// sequential fold by rounding.
    fn vector_reduce(&self, species: &'static Species<T>, op: Associative) -> Result<T>;

    /// [`vector_reduce`](Self::vector_reduce), split across threads for
    /// long slices.
    fn par_vector_reduce(&self, species: &'static Species<T>, op: Associative) -> Result<T>;
}

fn check_lengths<T>(a: &[T], b: &[T]) -> Result<()> {
    if a.len() != b.len() {
        return Err(validation_error(format!(
            "slices must have the same length, got {} and {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

#[inline(always)]
fn chunk_size<T: Lane>(species: &'static Species<T>) -> usize {
    let step = species.length();
    ((PARALLEL_CHUNK_SIZE / step) * step).max(step)
}

fn lanewise_into<T: Lane>(
    species: &'static Species<T>,
    op: Binary,
    a: &[T],
    b: &[T],
    out: &mut [T],
) -> Result<()> {
    let step = species.length();
    let bound = species.loop_bound(a.len());
    for i in (0..bound).step_by(step) {
        let va = Vector::from_array(species, a, i)?;
        let vb = Vector::from_array(species, b, i)?;
        va.lanewise(op, &vb)?.into_array(out, i)?;
    }
    if bound < a.len() {
        let m = species.index_in_range(bound, a.len());
        let va = Vector::from_array_masked(species, a, bound, &m)?;
        let vb = Vector::from_array_masked(species, b, bound, &m)?;
        va.lanewise_masked(op, &vb, &m)?
            .into_array_masked(out, bound, &m)?;
    }
    Ok(())
}

fn reduce_chunk<T: Lane>(species: &'static Species<T>, op: Associative, a: &[T]) -> Result<T> {
    let step = species.length();
    let bound = species.loop_bound(a.len());

    if op == FIRST_NONZERO {
        for i in (0..bound).step_by(step) {
            let e = Vector::from_array(species, a, i)?.reduce_lanes(op)?;
            if e.to_raw_bits() != 0 {
                return Ok(e);
            }
        }
        if bound < a.len() {
            let m = species.index_in_range(bound, a.len());
            return Vector::from_array_masked(species, a, bound, &m)?.reduce_lanes_masked(op, &m);
        }
        return Ok(T::ZERO);
    }

    let mut acc = species.broadcast(species.reduction_identity(op)?);
    for i in (0..bound).step_by(step) {
        acc = acc.lanewise(op, &Vector::from_array(species, a, i)?)?;
    }
    if bound < a.len() {
        let m = species.index_in_range(bound, a.len());
        acc = acc.lanewise_masked(op, &Vector::from_array_masked(species, a, bound, &m)?, &m)?;
    }
    acc.reduce_lanes(op)
}

impl<T: Lane> LanewiseSlice<T> for [T] {
    fn vector_lanewise(
        &self,
        species: &'static Species<T>,
        op: impl Into<Binary>,
        other: &[T],
    ) -> Result<Vec<T>> {
        check_lengths(self, other)?;
        let mut out = vec![T::ZERO; self.len()];
        lanewise_into(species, op.into(), self, other, &mut out)?;
        Ok(out)
    }

    fn par_vector_lanewise(
        &self,
        species: &'static Species<T>,
        op: impl Into<Binary>,
        other: &[T],
    ) -> Result<Vec<T>> {
        if self.len() <= PARALLEL_SIMD_THRESHOLD {
            return self.vector_lanewise(species, op, other);
        }
        check_lengths(self, other)?;
        let op = op.into();
        let chunk_size = chunk_size(species);
        let mut out = vec![T::ZERO; self.len()];
        out.par_chunks_mut(chunk_size)
            .enumerate()
            .try_for_each(|(chunk_idx, out_chunk)| {
                let start = chunk_idx * chunk_size;
                let end = start + out_chunk.len();
                lanewise_into(species, op, &self[start..end], &other[start..end], out_chunk)
            })?;
        Ok(out)
    }

    fn vector_reduce(&self, species: &'static Species<T>, op: Associative) -> Result<T> {
        reduce_chunk(species, op, self)
    }

    fn par_vector_reduce(&self, species: &'static Species<T>, op: Associative) -> Result<T> {
        if self.len() <= PARALLEL_SIMD_THRESHOLD {
            return self.vector_reduce(species, op);
        }
        let partials = self
            .par_chunks(chunk_size(species))
            .map(|chunk| reduce_chunk(species, op, chunk))
            .collect::<Result<Vec<T>>>()?;
        reduce_chunk(species, op, &partials)
    }
}
