//! The result algebra for recoverable runtime failures.
//!
//! Container operations that can fail at runtime (indexing past the end,
//! storing a value of the wrong kind) return an [`Outcome`]. Allocation
//! failure is deliberately absent: it is fatal and never reaches this
//! channel.

use std::borrow::Cow;
use std::fmt;

use crate::kind::PrimitiveKind;

/// Numeric error code carried by an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    /// An index was at or beyond the container's length.
    pub const INDEX_OUT_OF_BOUNDS: ErrorCode = ErrorCode(1);
    /// A value's kind differs from the container's element kind.
    pub const KIND_MISMATCH: ErrorCode = ErrorCode(2);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ErrorCode {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// A recoverable runtime error: a code and a human-readable message.
///
/// Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Error {
    code: ErrorCode,
    message: Cow<'static, str>,
}

/// Outcome of a fallible runtime operation.
///
/// Exactly one of `Ok` / `Err` is populated; callers branch on it before
/// touching the payload.
pub type Outcome<T> = Result<T, Error>;

impl Error {
    /// Message used for every out-of-bounds access.
    pub const INDEX_OUT_OF_BOUNDS_MESSAGE: &'static str = "Index out of Bounds";

    /// Construct an error from an arbitrary code and message.
    pub fn new(code: impl Into<ErrorCode>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The error returned when an index is at or beyond a container's length.
    pub fn index_out_of_bounds() -> Self {
        Self::new(
            ErrorCode::INDEX_OUT_OF_BOUNDS,
            Self::INDEX_OUT_OF_BOUNDS_MESSAGE,
        )
    }

    /// The error returned when a value of kind `found` is stored into a
    /// container of kind `expected`.
    pub fn kind_mismatch(expected: PrimitiveKind, found: PrimitiveKind) -> Self {
        Self::new(
            ErrorCode::KIND_MISMATCH,
            format!("Kind mismatch: expected {expected}, found {found}"),
        )
    }

    /// The error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this is an out-of-bounds error.
    pub fn is_out_of_bounds(&self) -> bool {
        self.code == ErrorCode::INDEX_OUT_OF_BOUNDS
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}
