//! Owned, fixed-size byte regions with checked typed access.
//!
//! A [`MemoryRegion`] is the unit of storage for the whole runtime: boxed
//! values, array payloads and string bytes all live in one. Every access
//! goes through checked slicing, so an offset computed from bad arithmetic
//! surfaces as [`AccessError::OutOfBounds`] instead of touching memory
//! outside the region.

use std::fmt;

use asl_core::Primitive;
use tracing::trace;

use crate::error::AccessError;

/// A contiguous, zero-initialised block of bytes with a fixed length.
///
/// The region exclusively owns its storage. It never grows or shrinks;
/// a different size means a different region.
#[derive(Clone, PartialEq, Eq)]
pub struct MemoryRegion {
    data: Box<[u8]>,
}

impl MemoryRegion {
    /// Allocate a zero-filled region of `len` bytes.
    ///
    /// Allocation failure aborts the process; there is no fallback.
    pub fn zeroed(len: usize) -> Self {
        trace!(len, "region allocated");
        Self {
            data: vec![0u8; len].into_boxed_slice(),
        }
    }

    /// Allocate a region holding a copy of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        trace!(len = bytes.len(), "region allocated from bytes");
        Self {
            data: bytes.into(),
        }
    }

    /// Length of the region in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the region has zero length.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The whole region as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The whole region as a mutable byte slice.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Borrow `width` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, width: usize) -> Result<&[u8], AccessError> {
        let end = self.end_of(offset, width)?;
        Ok(&self.data[offset..end])
    }

    /// Mutably borrow `width` bytes starting at `offset`.
    pub fn bytes_mut(&mut self, offset: usize, width: usize) -> Result<&mut [u8], AccessError> {
        let end = self.end_of(offset, width)?;
        Ok(&mut self.data[offset..end])
    }

    /// Read a `T` stored at `offset`.
    pub fn read<T: Primitive>(&self, offset: usize) -> Result<T, AccessError> {
        let bytes = self.bytes(offset, T::KIND.width())?;
        Ok(T::from_ne_slice(bytes))
    }

    /// Write `value` at `offset`.
    ///
    /// Either the full width is written or nothing is.
    pub fn write<T: Primitive>(&mut self, offset: usize, value: T) -> Result<(), AccessError> {
        let bytes = self.bytes_mut(offset, T::KIND.width())?;
        value.write_ne_slice(bytes);
        Ok(())
    }

    /// Reset every byte to zero.
    pub fn fill_zero(&mut self) {
        self.data.fill(0);
    }

    /// Exclusive end of `[offset, offset + width)`, if it lies within the region.
    fn end_of(&self, offset: usize, width: usize) -> Result<usize, AccessError> {
        match offset.checked_add(width) {
            Some(end) if end <= self.data.len() => Ok(end),
            _ => Err(AccessError::OutOfBounds {
                offset,
                width,
                len: self.data.len(),
            }),
        }
    }
}

impl fmt::Debug for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRegion")
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asl_core::Pointer;
    use proptest::prelude::*;

    #[test]
    fn zeroed_region_is_all_zero() {
        let region = MemoryRegion::zeroed(64);
        assert_eq!(region.len(), 64);
        assert!(region.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_region() {
        let region = MemoryRegion::zeroed(0);
        assert!(region.is_empty());
        assert!(region.bytes(0, 0).unwrap().is_empty());
        assert!(region.read::<u8>(0).is_err());
    }

    #[test]
    fn typed_write_then_read() {
        let mut region = MemoryRegion::zeroed(16);
        region.write(0, 0xdead_beefu32).unwrap();
        region.write(4, -7i16).unwrap();
        region.write(8, 2.5f64).unwrap();
        assert_eq!(region.read::<u32>(0).unwrap(), 0xdead_beef);
        assert_eq!(region.read::<i16>(4).unwrap(), -7);
        assert_eq!(region.read::<f64>(8).unwrap(), 2.5);
    }

    #[test]
    fn unaligned_offsets_are_fine() {
        let mut region = MemoryRegion::zeroed(16);
        region.write(3, u64::MAX - 1).unwrap();
        assert_eq!(region.read::<u64>(3).unwrap(), u64::MAX - 1);
    }

    #[test]
    fn access_at_exact_end_is_out_of_bounds() {
        let mut region = MemoryRegion::zeroed(8);
        assert!(region.read::<u32>(4).is_ok());
        assert_eq!(
            region.read::<u32>(5),
            Err(AccessError::OutOfBounds {
                offset: 5,
                width: 4,
                len: 8
            })
        );
        assert!(region.write(8, 1u8).is_err());
    }

    #[test]
    fn failed_write_leaves_region_untouched() {
        let mut region = MemoryRegion::zeroed(6);
        region.write(0, 0x0101_0101u32).unwrap();
        let before = region.clone();
        assert!(region.write(4, u32::MAX).is_err());
        assert_eq!(region, before);
    }

    #[test]
    fn offset_overflow_is_out_of_bounds() {
        let region = MemoryRegion::zeroed(8);
        assert!(matches!(
            region.bytes(usize::MAX, 2),
            Err(AccessError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn fill_zero_resets_contents() {
        let mut region = MemoryRegion::from_bytes(&[1, 2, 3]);
        region.fill_zero();
        assert_eq!(region.as_bytes(), &[0, 0, 0]);
    }

    #[test]
    fn debug_shows_length_only() {
        let region = MemoryRegion::zeroed(12);
        assert_eq!(format!("{region:?}"), "MemoryRegion { len: 12 }");
    }

    proptest! {
        #[test]
        fn u64_round_trip_at_any_valid_offset(len in 8usize..64, off in 0usize..64, v in any::<u64>()) {
            let off = off % (len - 7);
            let mut region = MemoryRegion::zeroed(len);
            region.write(off, v).unwrap();
            prop_assert_eq!(region.read::<u64>(off).unwrap(), v);
        }

        #[test]
        fn pointer_round_trip(off in 0usize..16, addr in any::<usize>()) {
            let mut region = MemoryRegion::zeroed(32);
            region.write(off, Pointer(addr)).unwrap();
            prop_assert_eq!(region.read::<Pointer>(off).unwrap(), Pointer(addr));
        }
    }
}
