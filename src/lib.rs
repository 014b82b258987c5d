//! Portable explicit-width SIMD vectors.
//!
//! A [`Vector`] is a fixed number of lanes of one primitive type, tagged
//! with the [`Species`] that fixes its lane type and [`Shape`]. Operations
//! are named by operator tokens from [`operators`] and are dispatched
//! through a per-species cache of scalar lane functions, with masked,
//! reducing, comparing, permuting and converting variants.
//!
//! ```
//! use vectorly::operators::{ADD, LT, MUL};
//! use vectorly::{Shape, Species};
//!
//! let sp = Species::<i32>::of(Shape::S128Bit);
//! let v = sp.from_values(&[1, 2, 3, 4]).unwrap();
//! let w = v.lanewise_scalar(MUL, 10).unwrap();
//! assert_eq!(w.reduce_lanes(ADD).unwrap(), 100);
//! assert_eq!(v.compare_scalar(LT, 3).unwrap().true_count(), 2);
//! ```

pub mod bulk;
pub mod error;
pub mod simd;

pub use bulk::LanewiseSlice;
pub use error::{Result, VectorError};
pub use simd::operators;
pub use simd::{
    ByteOrder, Lane, LaneCast, LaneKind, LaneType, Mask, Shape, Shuffle, Species, Vector,
    VectorType, MAX_VECTOR_BITS,
};

/// Slice length above which the `par_*` methods of [`LanewiseSlice`]
/// split work across threads.
pub const PARALLEL_SIMD_THRESHOLD: usize = 262_144;

/// Elements per parallel task, rounded down to a multiple of the lane count.
pub const PARALLEL_CHUNK_SIZE: usize = 16_384;
