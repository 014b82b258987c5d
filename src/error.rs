//! Error types for vectorly operations.
//!
//! Every failure a caller can trigger is reported as a [`VectorError`]
//! instead of a panic, so that capability violations, bounds violations
//! and arithmetic domain violations stay distinguishable from each other.

use thiserror::Error;

/// Errors that can occur during vectorly operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorError {
    /// The operator is not admissible for the lane type of the vector.
    #[error("Unsupported operation: {operator} is not supported by {vector_type}")]
    UnsupportedOperation {
        /// Symbolic name of the rejected operator.
        operator: String,
        /// Vector type the operator was applied to, e.g. `i32x8`.
        vector_type: String,
    },
    /// The operator passed the capability gate but no implementation is wired up.
    #[error("Illegal {category} operator {operator} for {vector_type}")]
    IllegalOperator {
        /// Symbolic name of the operator.
        operator: String,
        /// Operator category (unary, binary, ternary, associative, comparison).
        category: &'static str,
        /// Vector type whose operation cache was consulted.
        vector_type: String,
    },
    /// An index or offset lies outside the valid range.
    #[error("Index out of bounds: {what} {index} out of bounds for length {length}")]
    IndexOutOfBounds {
        /// What kind of index was checked (lane, offset, origin, part...).
        what: &'static str,
        /// The offending index.
        index: i64,
        /// The exclusive upper bound that was violated.
        length: usize,
    },
    /// Integer division or similar domain violation in an active lane.
    #[error("Arithmetic error: {message}")]
    Arithmetic {
        /// Human-readable error message.
        message: String,
    },
    /// A value cannot be represented exactly in the target lane type.
    #[error("Value {value} ({from_type}) cannot be represented as {to_type}")]
    NotRepresentable {
        /// The offending value, formatted.
        value: String,
        /// Type the value came from.
        from_type: &'static str,
        /// Lane type it was converted to.
        to_type: &'static str,
    },
    /// A shuffle index in a checked or actively masked lane is out of range.
    #[error("Shuffle index error: lane {lane} selects {index}, outside [0, {length})")]
    ShuffleIndex {
        /// Output lane holding the bad index.
        lane: usize,
        /// The exceptional (wrapped) source index.
        index: i32,
        /// Lane count of the shuffle.
        length: usize,
    },
    /// Two operands belong to different species.
    #[error("Species mismatch: expected {expected}, found {found}")]
    SpeciesMismatch {
        /// Species of the receiver.
        expected: String,
        /// Species of the argument.
        found: String,
    },
    /// Input validation error.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message.
        message: String,
    },
}

/// Result type alias for vectorly operations.
pub type Result<T> = std::result::Result<T, VectorError>;

/// Creates an unsupported-operation error.
pub fn unsupported_operation(
    operator: impl Into<String>,
    vector_type: impl Into<String>,
) -> VectorError {
    VectorError::UnsupportedOperation {
        operator: operator.into(),
        vector_type: vector_type.into(),
    }
}

/// Creates an illegal-operator error.
pub fn illegal_operator(
    operator: impl Into<String>,
    category: &'static str,
    vector_type: impl Into<String>,
) -> VectorError {
    VectorError::IllegalOperator {
        operator: operator.into(),
        category,
        vector_type: vector_type.into(),
    }
}

/// Creates a bounds error.
pub fn out_of_bounds(what: &'static str, index: i64, length: usize) -> VectorError {
    VectorError::IndexOutOfBounds {
        what,
        index,
        length,
    }
}

/// Creates an arithmetic error.
pub fn arithmetic_error(message: impl Into<String>) -> VectorError {
    VectorError::Arithmetic {
        message: message.into(),
    }
}

/// Creates a representability error.
pub fn not_representable(
    value: impl ToString,
    from_type: &'static str,
    to_type: &'static str,
) -> VectorError {
    VectorError::NotRepresentable {
        value: value.to_string(),
        from_type,
        to_type,
    }
}

/// Creates a shuffle index error.
pub fn shuffle_index_error(lane: usize, index: i32, length: usize) -> VectorError {
    VectorError::ShuffleIndex {
        lane,
        index,
        length,
    }
}

/// Creates a species mismatch error.
pub fn species_mismatch(expected: impl ToString, found: impl ToString) -> VectorError {
    VectorError::SpeciesMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> VectorError {
    VectorError::Validation {
        message: message.into(),
    }
}

/// Checks `0 <= index < length`.
#[inline(always)]
pub(crate) fn check_index(what: &'static str, index: i64, length: usize) -> Result<usize> {
    if index < 0 || index as u64 >= length as u64 {
        return Err(out_of_bounds(what, index, length));
    }
    Ok(index as usize)
}

/// Checks that `[offset, offset + size)` lies inside `[0, length)`.
#[inline(always)]
pub(crate) fn check_range(offset: usize, size: usize, length: usize) -> Result<()> {
    match offset.checked_add(size) {
        Some(end) if end <= length => Ok(()),
        _ => Err(out_of_bounds("offset", offset as i64, length)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_operation_display() {
        let error = unsupported_operation("SQRT", "i32x8");
        let display = format!("{}", error);
        assert!(display.contains("Unsupported operation"));
        assert!(display.contains("SQRT"));
        assert!(display.contains("i32x8"));
    }

    #[test]
    fn test_illegal_operator_display() {
        let error = illegal_operator("ADD", "binary", "f32x4");
        let display = format!("{}", error);
        assert!(display.contains("Illegal binary operator ADD"));
        assert!(display.contains("f32x4"));
    }

    #[test]
    fn test_out_of_bounds_display() {
        let error = out_of_bounds("origin", 9, 9);
        let display = format!("{}", error);
        assert!(display.contains("origin 9"));
        assert!(display.contains("length 9"));
    }

    #[test]
    fn test_not_representable_display() {
        let error = not_representable(300, "i64", "i8");
        let display = format!("{}", error);
        assert!(display.contains("300"));
        assert!(display.contains("i64"));
        assert!(display.contains("i8"));
    }

    #[test]
    fn test_check_helpers() {
        assert_eq!(check_index("lane", 3, 4), Ok(3));
        assert!(check_index("lane", 4, 4).is_err());
        assert!(check_index("lane", -1, 4).is_err());
        assert!(check_range(4, 4, 8).is_ok());
        assert!(check_range(5, 4, 8).is_err());
        assert!(check_range(usize::MAX, 2, 8).is_err());
    }

    #[test]
    fn test_error_equality() {
        let error1 = arithmetic_error("divide by zero");
        let error2 = arithmetic_error("divide by zero");
        let error3 = shuffle_index_error(0, -3, 4);

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = validation_error("test error");

        let _: &dyn std::error::Error = &error;

        assert!(std::error::Error::source(&error).is_none());
    }
}
