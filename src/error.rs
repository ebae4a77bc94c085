//! Error types for lanewise operations.
//!
//! Arithmetic on vectors never fails at runtime; shape mismatches are rejected
//! at compile time. The variants below cover the few places where a runtime
//! value decides the outcome: checked lane access, byte and slice loads,
//! runtime shuffles, allocation and text parsing.

use std::fmt;

/// Errors that can occur during lanewise operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    /// A checked lane accessor was given an index outside `0..lanes`.
    LaneOutOfRange {
        /// The offending index.
        index: usize,
        /// Lane count of the vector.
        lanes: usize,
    },
    /// Memory allocation failed.
    AllocationError {
        /// The size that was requested to be allocated.
        requested_size: usize,
        /// The alignment that was requested.
        requested_alignment: usize,
        /// Human-readable error message.
        message: String,
    },
    /// Invalid layout parameters were provided.
    LayoutError {
        /// The size parameter that caused the error.
        size: usize,
        /// The alignment parameter that caused the error.
        alignment: usize,
        /// Human-readable error message.
        message: String,
    },
    /// An aligned load was attempted from memory that is not aligned to the shape.
    Misaligned {
        /// Address of the first byte.
        address: usize,
        /// Alignment required by the shape.
        alignment: usize,
    },
    /// A byte or element source was shorter than the shape requires.
    ByteLength {
        /// Number of units required.
        expected: usize,
        /// Number of units available.
        found: usize,
    },
    /// A runtime shuffle index selected a lane that does not exist.
    ShuffleIndex {
        /// Position in the index vector.
        position: usize,
        /// The index value found there.
        index: usize,
        /// Number of selectable source lanes.
        limit: usize,
    },
    /// Text input ran out before every lane received a value.
    Parse {
        /// Number of lanes that had to be filled.
        expected: usize,
        /// Number of values successfully read.
        found: usize,
    },
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::LaneOutOfRange { index, lanes } => write!(
                f,
                "Lane index out of range: {} (vector has {} lanes)",
                index, lanes
            ),
            VectorError::AllocationError {
                requested_size,
                requested_alignment,
                message,
            } => write!(
                f,
                "Memory allocation failed: {} (requested {} bytes with {} byte alignment)",
                message, requested_size, requested_alignment
            ),
            VectorError::LayoutError {
                size,
                alignment,
                message,
            } => write!(
                f,
                "Invalid memory layout: {} (size: {}, alignment: {})",
                message, size, alignment
            ),
            VectorError::Misaligned { address, alignment } => write!(
                f,
                "Misaligned load: address {:#x} is not aligned to {} bytes",
                address, alignment
            ),
            VectorError::ByteLength { expected, found } => write!(
                f,
                "Source too short: expected at least {} units, found {}",
                expected, found
            ),
            VectorError::ShuffleIndex {
                position,
                index,
                limit,
            } => write!(
                f,
                "Shuffle index {} at position {} exceeds {} source lanes",
                index, position, limit
            ),
            VectorError::Parse { expected, found } => write!(
                f,
                "Parse underflow: expected {} values, found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for VectorError {}

/// Result type alias for lanewise operations.
pub type Result<T> = std::result::Result<T, VectorError>;

/// Creates a lane range error.
pub fn lane_error(index: usize, lanes: usize) -> VectorError {
    VectorError::LaneOutOfRange { index, lanes }
}

/// Creates an allocation error.
pub fn allocation_error(size: usize, alignment: usize, message: impl Into<String>) -> VectorError {
    VectorError::AllocationError {
        requested_size: size,
        requested_alignment: alignment,
        message: message.into(),
    }
}

/// Creates a layout error.
pub fn layout_error(size: usize, alignment: usize, message: impl Into<String>) -> VectorError {
    VectorError::LayoutError {
        size,
        alignment,
        message: message.into(),
    }
}

/// Creates a length error for short byte or element sources.
pub fn length_error(expected: usize, found: usize) -> VectorError {
    VectorError::ByteLength { expected, found }
}
