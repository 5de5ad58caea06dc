//! Kind-keyed dispatch table.
//!
//! Containers choose their element kind at construction time, so they
//! cannot name a Rust type when they access memory. [`ops`] resolves a
//! [`PrimitiveKind`] to the width and accessor functions monomorphised for
//! that kind. The lookup is an exhaustive `match`: adding a kind to the
//! registry does not compile until this table knows about it.

use std::fmt;

use asl_core::{Pointer, Primitive, PrimitiveKind, Value};

use crate::boxed::BoxedValue;
use crate::error::AccessError;
use crate::region::MemoryRegion;

/// Width and accessors for one primitive kind.
pub struct KindOps {
    /// The kind these operations are for.
    pub kind: PrimitiveKind,
    /// Width of one value in bytes.
    pub width: usize,
    /// Decode a value from exactly `width` native-endian bytes.
    pub decode: fn(&[u8]) -> Value,
    /// Read a value at a byte offset.
    pub read: fn(&MemoryRegion, usize) -> Result<Value, AccessError>,
    /// Write a value at a byte offset. The value must be of this kind.
    pub write: fn(&mut MemoryRegion, usize, Value) -> Result<(), AccessError>,
    /// Read a value at a byte offset and box it.
    pub boxed: fn(&MemoryRegion, usize) -> Result<BoxedValue, AccessError>,
}

impl fmt::Debug for KindOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindOps")
            .field("kind", &self.kind)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

fn decode<T: Primitive>(bytes: &[u8]) -> Value {
    T::from_ne_slice(bytes).into_value()
}

fn read<T: Primitive>(region: &MemoryRegion, offset: usize) -> Result<Value, AccessError> {
    region.read::<T>(offset).map(Primitive::into_value)
}

fn write<T: Primitive>(
    region: &mut MemoryRegion,
    offset: usize,
    value: Value,
) -> Result<(), AccessError> {
    let bytes = region.bytes_mut(offset, T::KIND.width())?;
    let v = T::from_value(value).ok_or(AccessError::KindMismatch {
        expected: T::KIND,
        found: value.kind(),
    })?;
    v.write_ne_slice(bytes);
    Ok(())
}

fn boxed<T: Primitive>(region: &MemoryRegion, offset: usize) -> Result<BoxedValue, AccessError> {
    region.read::<T>(offset).map(BoxedValue::from_primitive)
}

macro_rules! kind_ops {
    ($($name:ident: $ty:ty),* $(,)?) => {$(
        static $name: KindOps = KindOps {
            kind: <$ty as Primitive>::KIND,
            width: <$ty as Primitive>::KIND.width(),
            decode: decode::<$ty>,
            read: read::<$ty>,
            write: write::<$ty>,
            boxed: boxed::<$ty>,
        };
    )*};
}

kind_ops! {
    I8_OPS: i8,
    I16_OPS: i16,
    I32_OPS: i32,
    I64_OPS: i64,
    U8_OPS: u8,
    U16_OPS: u16,
    U32_OPS: u32,
    U64_OPS: u64,
    F32_OPS: f32,
    F64_OPS: f64,
    POINTER_OPS: Pointer,
}

/// Resolve the operations for `kind`.
pub fn ops(kind: PrimitiveKind) -> &'static KindOps {
    match kind {
        PrimitiveKind::I8 => &I8_OPS,
        PrimitiveKind::I16 => &I16_OPS,
        PrimitiveKind::I32 => &I32_OPS,
        PrimitiveKind::I64 => &I64_OPS,
        PrimitiveKind::U8 => &U8_OPS,
        PrimitiveKind::U16 => &U16_OPS,
        PrimitiveKind::U32 => &U32_OPS,
        PrimitiveKind::U64 => &U64_OPS,
        PrimitiveKind::F32 => &F32_OPS,
        PrimitiveKind::F64 => &F64_OPS,
        PrimitiveKind::Pointer => &POINTER_OPS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_kind() {
        for kind in PrimitiveKind::ALL {
            let ops = ops(kind);
            assert_eq!(ops.kind, kind);
            assert_eq!(ops.width, kind.width());
        }
    }

    #[test]
    fn read_and_write_through_table() {
        let mut region = MemoryRegion::zeroed(16);
        let u32_ops = ops(PrimitiveKind::U32);
        (u32_ops.write)(&mut region, 4, Value::U32(42)).unwrap();
        assert_eq!((u32_ops.read)(&region, 4).unwrap(), Value::U32(42));
        assert_eq!(region.read::<u32>(4).unwrap(), 42);
    }

    #[test]
    fn write_rejects_other_kinds_without_touching_memory() {
        let mut region = MemoryRegion::zeroed(8);
        let err = (ops(PrimitiveKind::U32).write)(&mut region, 0, Value::I32(-1)).unwrap_err();
        assert_eq!(
            err,
            AccessError::KindMismatch {
                expected: PrimitiveKind::U32,
                found: PrimitiveKind::I32,
            }
        );
        assert!(region.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn write_checks_bounds_before_kind() {
        let mut region = MemoryRegion::zeroed(2);
        let err = (ops(PrimitiveKind::U32).write)(&mut region, 0, Value::I8(1)).unwrap_err();
        assert!(matches!(err, AccessError::OutOfBounds { .. }));
    }

    #[test]
    fn decode_reads_exact_slice() {
        let bytes = 7u16.to_ne_bytes();
        assert_eq!((ops(PrimitiveKind::U16).decode)(&bytes), Value::U16(7));
    }

    #[test]
    fn boxed_reads_and_boxes() {
        let mut region = MemoryRegion::zeroed(8);
        region.write(0, -3.5f64).unwrap();
        let b = (ops(PrimitiveKind::F64).boxed)(&region, 0).unwrap();
        assert_eq!(b.kind(), PrimitiveKind::F64);
        assert_eq!(b.unbox(), Value::F64(-3.5));
    }
}
