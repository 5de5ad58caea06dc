//! Memory-layer error types.

use std::error::Error;
use std::fmt;

use asl_core::{Error as RuntimeError, PrimitiveKind};

/// Errors from typed access to a [`MemoryRegion`](crate::MemoryRegion).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// The access `[offset, offset + width)` does not fit in the region.
    OutOfBounds {
        /// Byte offset of the access.
        offset: usize,
        /// Width of the access in bytes.
        width: usize,
        /// Length of the region in bytes.
        len: usize,
    },
    /// A value of one kind was written where another kind was requested.
    KindMismatch {
        /// The kind the access was made as.
        expected: PrimitiveKind,
        /// The kind of the supplied value.
        found: PrimitiveKind,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { offset, width, len } => {
                write!(
                    f,
                    "access of {width} bytes at offset {offset} exceeds region of {len} bytes"
                )
            }
            Self::KindMismatch { expected, found } => {
                write!(f, "kind mismatch: expected {expected}, found {found}")
            }
        }
    }
}

impl Error for AccessError {}

impl From<AccessError> for RuntimeError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::OutOfBounds { .. } => RuntimeError::index_out_of_bounds(),
            AccessError::KindMismatch { expected, found } => {
                RuntimeError::kind_mismatch(expected, found)
            }
        }
    }
}

/// Errors from the [`Heap`](crate::Heap).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeapError {
    /// The allocation would push live bytes past the configured limit.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes still available under the limit.
        available: usize,
    },
    /// The heap configuration failed validation.
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                available,
            } => {
                write!(
                    f,
                    "heap capacity exceeded: requested {requested} bytes, {available} bytes available"
                )
            }
            Self::InvalidConfig { reason } => write!(f, "invalid heap config: {reason}"),
        }
    }
}

impl Error for HeapError {}
