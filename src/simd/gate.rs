//! Capability gate between operator tokens and lane kernels.
//!
//! Every dispatch passes through [`op_code`] (tokens with an opcode) or
//! [`check_kind`] (special tokens) before any lane is touched, so an
//! operator applied to a lane type it does not support fails at the
//! boundary with [`VectorError::UnsupportedOperation`].
//!
//! [`VectorError::UnsupportedOperation`]: crate::error::VectorError::UnsupportedOperation

use std::fmt;

use crate::error::{unsupported_operation, Result};
use crate::simd::operators::{kind, OperatorToken};

/// Verifies that `op` carries every bit of `require` and none of `forbid`.
#[inline(always)]
pub fn check_kind(
    op: impl OperatorToken,
    require: u32,
    forbid: u32,
    vector_type: impl fmt::Display,
) -> Result<()> {
    let bits = op.operator().kind_bits();
    if bits & require != require || bits & forbid != 0 {
        return Err(unsupported_operation(
            op.operator().name(),
            vector_type.to_string(),
        ));
    }
    Ok(())
}

/// Returns the opcode of `op` after checking its capability bits.
///
/// Special tokens have no opcode and are rejected here; the kernel routes
/// them to their software compositions before reaching the gate.
#[inline(always)]
pub fn op_code(
    op: impl OperatorToken,
    require: u32,
    forbid: u32,
    vector_type: impl fmt::Display,
) -> Result<usize> {
    check_kind(op, require, forbid | kind::SPECIAL, &vector_type)?;
    op.operator()
        .opcode()
        .ok_or_else(|| unsupported_operation(op.operator().name(), vector_type.to_string()))
}
