//! The flat runtime heap.
//!
//! [`Heap`] hands out zero-filled [`MemoryRegion`]s addressed by
//! [`RegionHandle`]s and tracks how many bytes are live. It is the
//! `allocate`/`free` pair of the runtime: freeing returns the size that was
//! released, and freeing a stale handle is reported rather than undefined.

use tracing::{trace, warn};

use crate::config::HeapConfig;
use crate::error::HeapError;
use crate::handle::{Handle, HandleTable};
use crate::region::MemoryRegion;

/// Handle to a region owned by a [`Heap`].
pub type RegionHandle = Handle;

/// A table of live regions with a byte budget.
#[derive(Debug)]
pub struct Heap {
    regions: HandleTable<MemoryRegion>,
    config: HeapConfig,
    live_bytes: usize,
}

impl Heap {
    /// Create a heap with the default configuration.
    pub fn new() -> Self {
        let config = HeapConfig::default();
        Self {
            regions: HandleTable::with_capacity(config.initial_slots),
            config,
            live_bytes: 0,
        }
    }

    /// Create a heap with a validated configuration.
    pub fn with_config(config: HeapConfig) -> Result<Self, HeapError> {
        config.validate()?;
        Ok(Self {
            regions: HandleTable::with_capacity(config.initial_slots),
            config,
            live_bytes: 0,
        })
    }

    /// The configuration this heap was built with.
    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    /// Sum of the sizes of all live regions.
    pub fn live_bytes(&self) -> usize {
        self.live_bytes
    }

    /// Number of live regions.
    pub fn live_regions(&self) -> usize {
        self.regions.len()
    }

    /// Bytes still available under the configured limit.
    pub fn available(&self) -> usize {
        self.config.max_live_bytes.saturating_sub(self.live_bytes)
    }

    /// Allocate a zero-filled region of `bytes`, or report that the heap
    /// limit would be exceeded.
    pub fn try_allocate(&mut self, bytes: usize) -> Result<RegionHandle, HeapError> {
        let available = self.available();
        if bytes > available {
            warn!(requested = bytes, available, "heap allocation refused");
            return Err(HeapError::CapacityExceeded {
                requested: bytes,
                available,
            });
        }
        let handle = self.regions.insert(MemoryRegion::zeroed(bytes));
        self.live_bytes += bytes;
        trace!(%handle, bytes, live = self.live_bytes, "heap allocate");
        Ok(handle)
    }

    /// Allocate a zero-filled region of `bytes`.
    ///
    /// # Panics
    ///
    /// Running out of heap is fatal: panics if the allocation would exceed
    /// [`HeapConfig::max_live_bytes`]. Use [`Heap::try_allocate`] to observe
    /// the condition instead.
    pub fn allocate(&mut self, bytes: usize) -> RegionHandle {
        match self.try_allocate(bytes) {
            Ok(handle) => handle,
            Err(e) => panic!("out of memory: {e}"),
        }
    }

    /// Release the region behind `handle` and return its size.
    ///
    /// Returns `None` if the handle is stale or was never issued; the heap
    /// is left unchanged.
    pub fn free(&mut self, handle: RegionHandle) -> Option<usize> {
        let Some(region) = self.regions.remove(handle) else {
            warn!(%handle, "free of stale region handle");
            return None;
        };
        let size = region.len();
        self.live_bytes -= size;
        trace!(%handle, size, live = self.live_bytes, "heap free");
        Some(size)
    }

    /// Borrow the region behind `handle`.
    pub fn get(&self, handle: RegionHandle) -> Option<&MemoryRegion> {
        self.regions.get(handle)
    }

    /// Mutably borrow the region behind `handle`.
    pub fn get_mut(&mut self, handle: RegionHandle) -> Option<&mut MemoryRegion> {
        self.regions.get_mut(handle)
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}
