//! Heap configuration parameters.

use crate::error::HeapError;

/// Configuration for the flat [`Heap`](crate::Heap).
///
/// Validated at heap construction; all values are immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeapConfig {
    /// Upper bound on the sum of live region sizes, in bytes.
    ///
    /// Default: 1 GiB. An allocation that would exceed it is a fatal
    /// out-of-memory condition for [`Heap::allocate`](crate::Heap::allocate).
    pub max_live_bytes: usize,

    /// Number of handle slots reserved up front.
    ///
    /// Default: 64. The table grows past this on demand.
    pub initial_slots: usize,
}

impl HeapConfig {
    /// Default live-byte limit: 1 GiB.
    pub const DEFAULT_MAX_LIVE_BYTES: usize = 1 << 30;

    /// Default number of pre-reserved handle slots.
    pub const DEFAULT_INITIAL_SLOTS: usize = 64;

    /// Create a config with the given live-byte limit and default slots.
    pub fn new(max_live_bytes: usize) -> Self {
        Self {
            max_live_bytes,
            initial_slots: Self::DEFAULT_INITIAL_SLOTS,
        }
    }

    /// Check the configuration for values the heap cannot work with.
    pub fn validate(&self) -> Result<(), HeapError> {
        if self.max_live_bytes == 0 {
            return Err(HeapError::InvalidConfig {
                reason: "max_live_bytes must be non-zero".into(),
            });
        }
        if self.initial_slots > u32::MAX as usize {
            return Err(HeapError::InvalidConfig {
                reason: format!(
                    "initial_slots {} exceeds the handle slot space",
                    self.initial_slots
                ),
            });
        }
        Ok(())
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_LIVE_BYTES)
    }
}
