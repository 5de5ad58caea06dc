//! Typed reads and writes at byte offsets, by static or runtime kind.
//!
//! The static forms ([`read_as`], [`write_as`]) are for callers that know
//! the Rust type; the runtime forms ([`read`], [`write`]) go through the
//! [dispatch table](crate::dispatch) for callers that only hold a
//! [`PrimitiveKind`] or a [`Value`]. All of them bound-check against the region.

use asl_core::{Primitive, PrimitiveKind, Value};

use crate::dispatch::ops;
use crate::error::AccessError;
use crate::region::MemoryRegion;

/// Read a value of `kind` at `offset`.
pub fn read(
    kind: PrimitiveKind,
    region: &MemoryRegion,
    offset: usize,
) -> Result<Value, AccessError> {
    (ops(kind).read)(region, offset)
}

/// Write `value` at `offset`, as the kind it carries.
///
/// No widening or narrowing happens here; exactly `value.kind().width()`
/// bytes are written.
pub fn write(region: &mut MemoryRegion, offset: usize, value: Value) -> Result<(), AccessError> {
    (ops(value.kind()).write)(region, offset, value)
}

/// Read a `T` at `offset`.
pub fn read_as<T: Primitive>(region: &MemoryRegion, offset: usize) -> Result<T, AccessError> {
    region.read(offset)
}

/// Write a `T` at `offset`.
pub fn write_as<T: Primitive>(
    region: &mut MemoryRegion,
    offset: usize,
    value: T,
) -> Result<(), AccessError> {
    region.write(offset, value)
}

/// A read position within a region.
///
/// Shifting a cursor is plain offset arithmetic; the bound check happens
/// when it is read through.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    region: &'a MemoryRegion,
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// A cursor at the start of `region`.
    pub fn new(region: &'a MemoryRegion) -> Self {
        Self { region, offset: 0 }
    }

    /// A cursor at `offset` within `region`.
    pub fn at(region: &'a MemoryRegion, offset: usize) -> Self {
        Self { region, offset }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes between the cursor and the end of the region.
    pub fn remaining(&self) -> usize {
        self.region.len().saturating_sub(self.offset)
    }

    /// Move the cursor forward by `bytes`, or `None` on offset overflow.
    pub fn shift(self, bytes: usize) -> Option<Self> {
        Some(Self {
            region: self.region,
            offset: self.offset.checked_add(bytes)?,
        })
    }

    /// Read a `T` at the cursor.
    pub fn read<T: Primitive>(&self) -> Result<T, AccessError> {
        read_as(self.region, self.offset)
    }

    /// Read a value of `kind` at the cursor.
    pub fn read_kind(&self, kind: PrimitiveKind) -> Result<Value, AccessError> {
        read(kind, self.region, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asl_test_utils::fixtures::{all_samples, arb_value};
    use proptest::prelude::*;

    #[test]
    fn kind_write_then_static_read() {
        let mut region = MemoryRegion::zeroed(8);
        write(&mut region, 2, Value::I32(-9)).unwrap();
        assert_eq!(read_as::<i32>(&region, 2).unwrap(), -9);
    }

    #[test]
    fn static_write_then_kind_read() {
        let mut region = MemoryRegion::zeroed(8);
        write_as(&mut region, 0, 1.25f32).unwrap();
        assert_eq!(
            read(PrimitiveKind::F32, &region, 0).unwrap(),
            Value::F32(1.25)
        );
    }

    #[test]
    fn same_width_reinterpretation_is_bit_exact() {
        let mut region = MemoryRegion::zeroed(4);
        write_as(&mut region, 0, -1i32).unwrap();
        assert_eq!(read_as::<u32>(&region, 0).unwrap(), u32::MAX);
        write_as(&mut region, 0, 1.0f32).unwrap();
        assert_eq!(read_as::<u32>(&region, 0).unwrap(), 1.0f32.to_bits());
    }

    #[test]
    fn write_uses_the_value_width() {
        let mut region = MemoryRegion::from_bytes(&[0xff; 4]);
        write(&mut region, 0, Value::U8(0)).unwrap();
        assert_eq!(region.as_bytes(), &[0, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn cursor_shifts_and_reads() {
        let mut region = MemoryRegion::zeroed(6);
        write_as(&mut region, 0, 0x0a0bu16).unwrap();
        write_as(&mut region, 2, 0x0102_0304u32).unwrap();
        let c = Cursor::new(&region);
        assert_eq!(c.read::<u16>().unwrap(), 0x0a0b);
        let c = c.shift(2).unwrap();
        assert_eq!(c.offset(), 2);
        assert_eq!(c.remaining(), 4);
        assert_eq!(
            c.read_kind(PrimitiveKind::U32).unwrap(),
            Value::U32(0x0102_0304)
        );
        let past = c.shift(4).unwrap();
        assert_eq!(past.remaining(), 0);
        assert!(past.read::<u8>().is_err());
    }

    #[test]
    fn every_sample_round_trips_at_unaligned_offset() {
        let mut region = MemoryRegion::zeroed(16);
        for value in all_samples() {
            write(&mut region, 3, value).unwrap();
            assert!(read(value.kind(), &region, 3).unwrap().bit_eq(&value));
        }
    }

    #[test]
    fn cursor_shift_overflow() {
        let region = MemoryRegion::zeroed(1);
        assert!(Cursor::at(&region, usize::MAX).shift(1).is_none());
    }

    proptest! {
        #[test]
        fn write_then_read_round_trips(value in arb_value(), offset in 0usize..24) {
            let mut region = MemoryRegion::zeroed(32);
            let kind = value.kind();
            write(&mut region, offset, value).unwrap();
            let back = read(kind, &region, offset).unwrap();
            prop_assert!(back.bit_eq(&value));
        }

        #[test]
        fn out_of_range_offsets_fail(value in arb_value(), extra in 0usize..8) {
            let mut region = MemoryRegion::zeroed(16);
            let kind = value.kind();
            let offset = 16 - kind.width() + 1 + extra;
            prop_assert!(write(&mut region, offset, value).is_err());
            prop_assert!(read(kind, &region, offset).is_err());
        }
    }
}
