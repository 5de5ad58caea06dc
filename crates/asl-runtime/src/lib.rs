//! Containers for the ASL runtime.
//!
//! Built on the typed regions of [`asl_mem`], these containers report
//! recoverable failures through [`Outcome`](asl_core::Outcome) rather than
//! by panicking:
//!
//! - [`DynamicArray`]: fixed-length array of one primitive kind, chosen at
//!   runtime.
//! - [`IndexableString`]: NUL-terminated byte string with checked indexing.
//! - [`Bitset`]: fixed-size bit array.
//!
//! Running out of memory is not recoverable and is never reported through
//! an `Outcome`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod bitset;
pub mod string;

pub use array::DynamicArray;
pub use bitset::Bitset;
pub use string::IndexableString;
