//! Boxing primitives into their own heap regions.

use asl_core::{Primitive, PrimitiveKind, Value};

use crate::dispatch::ops;
use crate::region::MemoryRegion;

/// A single primitive stored in a region of exactly its kind's width.
///
/// A box owns its region. Handing a box to someone else moves the region
/// with it; nothing aliases it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoxedValue {
    kind: PrimitiveKind,
    region: MemoryRegion,
}

impl BoxedValue {
    /// Box a kind-tagged value.
    pub fn new(value: Value) -> Self {
        let kind = value.kind();
        let ops = ops(kind);
        let mut region = MemoryRegion::zeroed(ops.width);
        (ops.write)(&mut region, 0, value)
            .expect("box region is one value of its own kind wide");
        Self { kind, region }
    }

    /// Box a statically-typed primitive.
    pub fn from_primitive<T: Primitive>(value: T) -> Self {
        let mut region = MemoryRegion::zeroed(T::KIND.width());
        value.write_ne_slice(region.as_bytes_mut());
        Self {
            kind: T::KIND,
            region,
        }
    }

    /// The kind the value was boxed as.
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    /// Read the boxed value back out.
    pub fn unbox(&self) -> Value {
        (ops(self.kind).decode)(self.region.as_bytes())
    }

    /// Read the boxed value as `T`, or `None` if it was boxed as another kind.
    pub fn unbox_as<T: Primitive>(&self) -> Option<T> {
        (self.kind == T::KIND).then(|| T::from_ne_slice(self.region.as_bytes()))
    }

    /// The raw bytes of the boxed value.
    pub fn as_bytes(&self) -> &[u8] {
        self.region.as_bytes()
    }

    /// Give up the box, keeping its region.
    pub fn into_region(self) -> MemoryRegion {
        self.region
    }
}

impl From<Value> for BoxedValue {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Box `value` into a fresh region.
pub fn box_value(value: Value) -> BoxedValue {
    BoxedValue::new(value)
}

/// Read the value back out of `boxed`.
pub fn unbox(boxed: &BoxedValue) -> Value {
    boxed.unbox()
}
