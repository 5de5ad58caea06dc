//! C-compatible status codes.
//!
//! [`AslStatus`] is a `repr(i32)` enum covering every failure an FFI call
//! can report. Conversions from the runtime's error types are provided.

use asl_core::{Error, ErrorCode, UnknownKind};
use asl_mem::{AccessError, HeapError};

/// C-compatible status code returned by FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AslStatus {
    /// Success.
    Ok = 0,
    /// Handle is invalid or was already destroyed.
    InvalidHandle = -1,
    /// An argument is null, an unknown kind tag, or otherwise invalid.
    InvalidArgument = -2,
    /// An access fell outside a region.
    IndexOutOfBounds = -3,
    /// A value's kind did not match the kind required.
    KindMismatch = -4,
    /// Caller-provided buffer is too small.
    BufferTooSmall = -5,
    /// A result handle does not hold the requested variant.
    WrongVariant = -6,
    /// The heap limit would be exceeded.
    AllocationFailed = -7,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -8,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&AccessError> for AslStatus {
    fn from(e: &AccessError) -> Self {
        match e {
            AccessError::OutOfBounds { .. } => AslStatus::IndexOutOfBounds,
            AccessError::KindMismatch { .. } => AslStatus::KindMismatch,
        }
    }
}

impl From<&HeapError> for AslStatus {
    fn from(e: &HeapError) -> Self {
        match e {
            HeapError::CapacityExceeded { .. } => AslStatus::AllocationFailed,
            HeapError::InvalidConfig { .. } => AslStatus::InternalError,
        }
    }
}

impl From<&Error> for AslStatus {
    fn from(e: &Error) -> Self {
        match e.code() {
            ErrorCode::INDEX_OUT_OF_BOUNDS => AslStatus::IndexOutOfBounds,
            ErrorCode::KIND_MISMATCH => AslStatus::KindMismatch,
            _ => AslStatus::InvalidArgument,
        }
    }
}

impl From<UnknownKind> for AslStatus {
    fn from(_e: UnknownKind) -> Self {
        AslStatus::InvalidArgument
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asl_core::PrimitiveKind;

    #[test]
    fn status_code_values_are_stable() {
        assert_eq!(AslStatus::Ok as i32, 0);
        assert_eq!(AslStatus::InvalidHandle as i32, -1);
        assert_eq!(AslStatus::InvalidArgument as i32, -2);
        assert_eq!(AslStatus::IndexOutOfBounds as i32, -3);
        assert_eq!(AslStatus::KindMismatch as i32, -4);
        assert_eq!(AslStatus::BufferTooSmall as i32, -5);
        assert_eq!(AslStatus::WrongVariant as i32, -6);
        assert_eq!(AslStatus::AllocationFailed as i32, -7);
        assert_eq!(AslStatus::InternalError as i32, -8);
        assert_eq!(AslStatus::Panicked as i32, -128);
    }

    #[test]
    fn access_error_to_status() {
        assert_eq!(
            AslStatus::from(&AccessError::OutOfBounds {
                offset: 4,
                width: 8,
                len: 8
            }),
            AslStatus::IndexOutOfBounds
        );
        assert_eq!(
            AslStatus::from(&AccessError::KindMismatch {
                expected: PrimitiveKind::U8,
                found: PrimitiveKind::I8
            }),
            AslStatus::KindMismatch
        );
    }

    #[test]
    fn heap_error_to_status() {
        assert_eq!(
            AslStatus::from(&HeapError::CapacityExceeded {
                requested: 10,
                available: 0
            }),
            AslStatus::AllocationFailed
        );
    }

    #[test]
    fn runtime_error_to_status() {
        assert_eq!(
            AslStatus::from(&Error::index_out_of_bounds()),
            AslStatus::IndexOutOfBounds
        );
        assert_eq!(
            AslStatus::from(&Error::kind_mismatch(PrimitiveKind::F32, PrimitiveKind::F64)),
            AslStatus::KindMismatch
        );
        assert_eq!(
            AslStatus::from(&Error::new(99, "custom")),
            AslStatus::InvalidArgument
        );
    }

    #[test]
    fn unknown_kind_is_invalid_argument() {
        let err = PrimitiveKind::try_from(42i32).unwrap_err();
        assert_eq!(AslStatus::from(err), AslStatus::InvalidArgument);
    }
}
