//! Loads and stores between vectors and slices.
//!
//! Unmasked transfers check the whole lane range before touching memory.
//! Masked transfers check only the lanes that are set; unset lanes read as
//! zero and are never written, so a masked tail may hang off the end of
//! the slice. Gathers and scatters check every referenced index before
//! the first write.

use crate::error::{check_index, check_range, Result};
use crate::simd::lanes::Lane;
use crate::simd::mask::Mask;
use crate::simd::species::Species;
use crate::simd::vector::Vector;

/// Byte order of lane images in a byte slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least significant byte first.
    LittleEndian,
    /// Most significant byte first.
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the target.
    pub const fn native() -> ByteOrder {
        if cfg!(target_endian = "big") {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }

    #[inline(always)]
    fn is_native(self) -> bool {
        self == ByteOrder::native()
    }
}

#[inline(always)]
fn element_index(offset: usize, i: usize, length: usize) -> Result<usize> {
    let index = offset as i64 + i as i64;
    check_index("index", index, length)
}

#[inline(always)]
fn mapped_index(offset: usize, delta: i32, length: usize) -> Result<usize> {
    check_index("index", offset as i64 + delta as i64, length)
}

impl<T: Lane> Vector<T> {
    /// Loads `length` lanes from `a` starting at `offset`.
    pub fn from_array(species: &'static Species<T>, a: &[T], offset: usize) -> Result<Self> {
        check_range(offset, species.length(), a.len())?;
        Ok(Vector::from_boxed(
            species,
            a[offset..offset + species.length()].into(),
        ))
    }

    /// Loads the lanes set in `m` from `a[offset + i]`; other lanes are zero.
    pub fn from_array_masked(
        species: &'static Species<T>,
        a: &[T],
        offset: usize,
        m: &Mask<T>,
    ) -> Result<Self> {
        let zero = species.zero();
        zero.check_mask(m)?;
        if check_range(offset, species.length(), a.len()).is_ok() {
            return Vector::from_array(species, a, offset)?.blend_into_zero(m);
        }
        let mut lanes = Vec::with_capacity(species.length());
        for (i, &set) in m.as_slice().iter().enumerate() {
            lanes.push(if set { a[element_index(offset, i, a.len())?] } else { T::ZERO });
        }
        Ok(Vector::from_boxed(species, lanes.into_boxed_slice()))
    }

    fn blend_into_zero(&self, m: &Mask<T>) -> Result<Self> {
        self.species().zero().blend(self, m)
    }

    /// Stores every lane into `a` starting at `offset`.
    pub fn into_array(&self, a: &mut [T], offset: usize) -> Result<()> {
        check_range(offset, self.length(), a.len())?;
        a[offset..offset + self.length()].copy_from_slice(self.as_slice());
        Ok(())
    }

    /// Stores the lanes set in `m` into `a[offset + i]`.
    pub fn into_array_masked(&self, a: &mut [T], offset: usize, m: &Mask<T>) -> Result<()> {
        self.check_mask(m)?;
        let mut targets = Vec::with_capacity(m.true_count());
        for (i, &set) in m.as_slice().iter().enumerate() {
            if set {
                targets.push((element_index(offset, i, a.len())?, self.as_slice()[i]));
            }
        }
        for (index, e) in targets {
            a[index] = e;
        }
        Ok(())
    }

    /// Gathers lane `i` from `a[offset + map[map_offset + i]]`.
    pub fn from_array_mapped(
        species: &'static Species<T>,
        a: &[T],
        offset: usize,
        map: &[i32],
        map_offset: usize,
    ) -> Result<Self> {
        check_range(map_offset, species.length(), map.len())?;
        let lanes = map[map_offset..map_offset + species.length()]
            .iter()
            .map(|&d| mapped_index(offset, d, a.len()).map(|index| a[index]))
            .collect::<Result<Box<[T]>>>()?;
        Ok(Vector::from_boxed(species, lanes))
    }

    /// Gathers the lanes set in `m`; other lanes are zero and their map
    /// entries are not read.
    pub fn from_array_mapped_masked(
        species: &'static Species<T>,
        a: &[T],
        offset: usize,
        map: &[i32],
        map_offset: usize,
        m: &Mask<T>,
    ) -> Result<Self> {
        species.zero().check_mask(m)?;
        let mut lanes = Vec::with_capacity(species.length());
        for (i, &set) in m.as_slice().iter().enumerate() {
            if set {
                let d = map[element_index(map_offset, i, map.len())?];
                lanes.push(a[mapped_index(offset, d, a.len())?]);
            } else {
                lanes.push(T::ZERO);
            }
        }
        Ok(Vector::from_boxed(species, lanes.into_boxed_slice()))
    }

    /// Scatters lane `i` to `a[offset + map[map_offset + i]]`. When two
    /// lanes map to the same element the higher lane wins.
    pub fn into_array_mapped(
        &self,
        a: &mut [T],
        offset: usize,
        map: &[i32],
        map_offset: usize,
    ) -> Result<()> {
        check_range(map_offset, self.length(), map.len())?;
        let targets = map[map_offset..map_offset + self.length()]
            .iter()
            .map(|&d| mapped_index(offset, d, a.len()))
            .collect::<Result<Vec<usize>>>()?;
        for (index, &e) in targets.into_iter().zip(self.as_slice()) {
            a[index] = e;
        }
        Ok(())
    }

    /// Scatters the lanes set in `m`.
    pub fn into_array_mapped_masked(
        &self,
        a: &mut [T],
        offset: usize,
        map: &[i32],
        map_offset: usize,
        m: &Mask<T>,
    ) -> Result<()> {
        self.check_mask(m)?;
        let mut targets = Vec::with_capacity(m.true_count());
        for (i, &set) in m.as_slice().iter().enumerate() {
            if set {
                let d = map[element_index(map_offset, i, map.len())?];
                targets.push((mapped_index(offset, d, a.len())?, self.as_slice()[i]));
            }
        }
        for (index, e) in targets {
            a[index] = e;
        }
        Ok(())
    }

    /// Loads `length` lane images from `bytes` starting at byte `offset`.
    pub fn from_byte_array(
        species: &'static Species<T>,
        bytes: &[u8],
        offset: usize,
        order: ByteOrder,
    ) -> Result<Self> {
        check_range(offset, species.vector_byte_size(), bytes.len())?;
        let lanes = bytes[offset..offset + species.vector_byte_size()]
            .chunks_exact(T::BYTES)
            .map(|chunk| read_lane::<T>(chunk, order))
            .collect();
        Ok(Vector::from_boxed(species, lanes))
    }

    /// Loads the lanes set in `m`; only their byte ranges are checked.
    pub fn from_byte_array_masked(
        species: &'static Species<T>,
        bytes: &[u8],
        offset: usize,
        order: ByteOrder,
        m: &Mask<T>,
    ) -> Result<Self> {
        species.zero().check_mask(m)?;
        let mut lanes = Vec::with_capacity(species.length());
        for (i, &set) in m.as_slice().iter().enumerate() {
            if set {
                let start = offset.saturating_add(i * T::BYTES);
                check_range(start, T::BYTES, bytes.len())?;
                lanes.push(read_lane::<T>(&bytes[start..start + T::BYTES], order));
            } else {
                lanes.push(T::ZERO);
            }
        }
        Ok(Vector::from_boxed(species, lanes.into_boxed_slice()))
    }

    /// Stores every lane image into `bytes` starting at byte `offset`.
    pub fn into_byte_array(&self, bytes: &mut [u8], offset: usize, order: ByteOrder) -> Result<()> {
        let size = self.species().vector_byte_size();
        check_range(offset, size, bytes.len())?;
        for (chunk, &e) in bytes[offset..offset + size]
            .chunks_exact_mut(T::BYTES)
            .zip(self.as_slice())
        {
            write_lane(e, chunk, order);
        }
        Ok(())
    }

    /// Stores the lane images set in `m`.
    pub fn into_byte_array_masked(
        &self,
        bytes: &mut [u8],
        offset: usize,
        order: ByteOrder,
        m: &Mask<T>,
    ) -> Result<()> {
        self.check_mask(m)?;
        for (i, &set) in m.as_slice().iter().enumerate() {
            if set {
                check_range(offset.saturating_add(i * T::BYTES), T::BYTES, bytes.len())?;
            }
        }
        for (i, (&set, &e)) in m.as_slice().iter().zip(self.as_slice()).enumerate() {
            if set {
                let start = offset + i * T::BYTES;
                write_lane(e, &mut bytes[start..start + T::BYTES], order);
            }
        }
        Ok(())
    }
}

#[inline(always)]
fn read_lane<T: Lane>(chunk: &[u8], order: ByteOrder) -> T {
    if order.is_native() {
        T::read_ne_bytes(chunk)
    } else {
        let mut swapped = [0u8; 8];
        let swapped = &mut swapped[..chunk.len()];
        swapped.copy_from_slice(chunk);
        swapped.reverse();
        T::read_ne_bytes(swapped)
    }
}

#[inline(always)]
fn write_lane<T: Lane>(e: T, chunk: &mut [u8], order: ByteOrder) {
    e.write_ne_bytes(chunk);
    if !order.is_native() {
        chunk.reverse();
    }
}
