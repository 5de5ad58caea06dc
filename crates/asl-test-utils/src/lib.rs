//! Test utilities for ASL runtime development.
//!
//! Provides per-kind sample values and `proptest` strategies in
//! [`fixtures`], and [`init_tracing`] for tests that want to see the
//! runtime's `tracing` output.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use tracing_subscriber::EnvFilter;

/// Install a test-writer `tracing` subscriber, filtered by `RUST_LOG`
/// (default `warn`).
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
