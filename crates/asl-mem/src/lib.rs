//! Memory layer for the ASL runtime.
//!
//! Everything the runtime stores lives in an owned [`MemoryRegion`]:
//!
//! ```text
//! Heap ── HandleTable<MemoryRegion>   allocate / free by RegionHandle
//! BoxedValue ── MemoryRegion          one primitive, exactly its width
//! accessor / Cursor                   typed reads and writes at offsets
//! dispatch::ops(kind)                 per-kind width and accessors
//! ```
//!
//! Access is bounds-checked and never reaches outside a region. Values are
//! stored in native byte order at arbitrary (unaligned) offsets.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod accessor;
pub mod boxed;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handle;
pub mod heap;
pub mod region;

pub use accessor::Cursor;
pub use boxed::{box_value, unbox, BoxedValue};
pub use config::HeapConfig;
pub use dispatch::{ops, KindOps};
pub use error::{AccessError, HeapError};
pub use handle::{Handle, HandleTable};
pub use heap::{Heap, RegionHandle};
pub use region::MemoryRegion;
