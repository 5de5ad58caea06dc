//! Fixed-length arrays whose element kind is chosen at runtime.

use asl_core::{Error, Outcome, Primitive, PrimitiveKind, Value};
use asl_mem::{ops, BoxedValue, MemoryRegion};
use tracing::debug;

/// A contiguous array of `len` values of one [`PrimitiveKind`].
///
/// The payload is a single region of exactly `len * kind.width()` bytes,
/// zero-filled at construction. The length never changes.
///
/// Every index is checked: an index at or past the end yields
/// [`Error::index_out_of_bounds`], and storing a value of another kind
/// yields [`Error::kind_mismatch`]. A failed `set` leaves the array
/// untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynamicArray {
    kind: PrimitiveKind,
    len: usize,
    data: MemoryRegion,
}

impl DynamicArray {
    /// Create an array of `len` zero values of `kind`.
    ///
    /// # Panics
    ///
    /// Panics if `len * kind.width()` overflows `usize`. Like running out
    /// of memory, this is not a recoverable condition.
    pub fn new(kind: PrimitiveKind, len: usize) -> Self {
        let Some(bytes) = kind.byte_size(len) else {
            panic!("array of {len} {kind} values overflows the address space");
        };
        debug!(%kind, len, bytes, "array created");
        Self {
            kind,
            len,
            data: MemoryRegion::zeroed(bytes),
        }
    }

    /// Create an array of `kind` holding `values` in order.
    ///
    /// Fails with a kind mismatch if any value is not of `kind`.
    pub fn from_values(kind: PrimitiveKind, values: &[Value]) -> Outcome<Self> {
        let mut array = Self::new(kind, values.len());
        for (index, &value) in values.iter().enumerate() {
            array.set(index, value)?;
        }
        Ok(array)
    }

    /// Element kind.
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the payload in bytes.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// The raw payload.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    fn offset_of(&self, index: usize) -> Outcome<usize> {
        if index >= self.len {
            return Err(Error::index_out_of_bounds());
        }
        Ok(index * self.kind.width())
    }

    /// Read element `index` into a freshly boxed value.
    pub fn get(&self, index: usize) -> Outcome<BoxedValue> {
        let offset = self.offset_of(index)?;
        Ok((ops(self.kind).boxed)(&self.data, offset)?)
    }

    /// Read element `index` as a [`Value`] without boxing it.
    pub fn get_value(&self, index: usize) -> Outcome<Value> {
        let offset = self.offset_of(index)?;
        Ok((ops(self.kind).read)(&self.data, offset)?)
    }

    /// Read element `index` as `T`.
    ///
    /// Fails with a kind mismatch if `T` is not the element kind.
    pub fn get_as<T: Primitive>(&self, index: usize) -> Outcome<T> {
        let offset = self.offset_of(index)?;
        if T::KIND != self.kind {
            return Err(Error::kind_mismatch(self.kind, T::KIND));
        }
        Ok(self.data.read::<T>(offset)?)
    }

    /// Store `value` at `index`.
    ///
    /// The bound is checked before the kind, so an out-of-range index is
    /// reported as such even when the value is also of the wrong kind.
    pub fn set(&mut self, index: usize, value: Value) -> Outcome<()> {
        let offset = self.offset_of(index)?;
        if value.kind() != self.kind {
            return Err(Error::kind_mismatch(self.kind, value.kind()));
        }
        (ops(self.kind).write)(&mut self.data, offset, value)?;
        Ok(())
    }

    /// Store a `T` at `index`.
    pub fn set_as<T: Primitive>(&mut self, index: usize, value: T) -> Outcome<()> {
        self.set(index, value.into_value())
    }

    /// Store the contents of `boxed` at `index`.
    pub fn set_boxed(&mut self, index: usize, boxed: &BoxedValue) -> Outcome<()> {
        self.set(index, boxed.unbox())
    }

    /// Iterate over the elements in index order.
    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        let ops = ops(self.kind);
        self.data.as_bytes().chunks_exact(ops.width).map(ops.decode)
    }
}
