pub mod cache;
pub mod gate;
pub mod lanes;
pub mod operators;
pub mod species;
pub mod substrate;

mod convert;
mod kernel;
mod mask;
mod memory;
mod rearrange;
mod shuffle;
mod vector;

#[cfg(all(any(avx2, avx512), any(target_arch = "x86", target_arch = "x86_64")))]
pub(crate) mod avx2;

pub use convert::LaneCast;
pub use lanes::{Lane, LaneKind, LaneType};
pub use mask::Mask;
pub use memory::ByteOrder;
pub use shuffle::Shuffle;
pub use species::{Shape, Species, VectorType, MAX_VECTOR_BITS};
pub use vector::Vector;
