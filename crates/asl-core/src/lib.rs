//! Primitive kinds, values and the error algebra for the ASL runtime.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace:
//!
//! - [`PrimitiveKind`]: the closed set of primitive representations and
//!   their byte widths.
//! - [`Primitive`]: the compile-time view of a kind, implemented for the
//!   Rust numeric types and [`Pointer`].
//! - [`Value`]: a kind-tagged primitive for code that only learns the kind
//!   at runtime.
//! - [`Error`] and [`Outcome`]: the result algebra used by every
//!   recoverable container operation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod kind;
pub mod primitive;
pub mod value;

pub use error::{Error, ErrorCode, Outcome};
pub use kind::{PrimitiveKind, UnknownKind};
pub use primitive::{Pointer, Primitive};
pub use value::Value;
