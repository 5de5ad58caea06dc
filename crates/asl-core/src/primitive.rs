//! The compile-time view of a primitive kind.

use std::fmt;

use crate::kind::PrimitiveKind;
use crate::value::Value;

mod sealed {
    pub trait Sealed {}
}

/// A Rust type that is the native representation of one [`PrimitiveKind`].
///
/// Implemented for the fixed-width integers, `f32`, `f64` and [`Pointer`].
/// The set is closed: the runtime registry is exhaustive, so outside
/// implementations would have no kind to map to.
pub trait Primitive: Copy + fmt::Debug + PartialEq + sealed::Sealed + 'static {
    /// The kind this type represents.
    const KIND: PrimitiveKind;

    /// Decode a value from its native-endian bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len() != Self::KIND.width()`.
    fn from_ne_slice(bytes: &[u8]) -> Self;

    /// Encode this value into `out` as native-endian bytes.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != Self::KIND.width()`.
    fn write_ne_slice(self, out: &mut [u8]);

    /// Wrap this value in its kind-tagged form.
    fn into_value(self) -> Value;

    /// Unwrap a kind-tagged value, or `None` if it is of another kind.
    fn from_value(value: Value) -> Option<Self>;
}

/// An opaque host-width address or handle stored as a primitive.
///
/// The runtime never dereferences a `Pointer`; it only moves the bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pointer(pub usize);

impl Pointer {
    /// The all-zero pointer.
    pub const NULL: Pointer = Pointer(0);

    /// Whether this is the all-zero pointer.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Offset this pointer by `bytes`, or `None` on address overflow.
    pub fn shift(self, bytes: usize) -> Option<Pointer> {
        self.0.checked_add(bytes).map(Pointer)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<usize> for Pointer {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

macro_rules! impl_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Primitive for $ty {
            const KIND: PrimitiveKind = PrimitiveKind::$kind;

            fn from_ne_slice(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(bytes);
                <$ty>::from_ne_bytes(buf)
            }

            fn write_ne_slice(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_ne_bytes());
            }

            fn into_value(self) -> Value {
                Value::$kind(self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$kind(v) => Some(v),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$kind(v)
            }
        }
    )*};
}

impl_primitive! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl sealed::Sealed for Pointer {}

impl Primitive for Pointer {
    const KIND: PrimitiveKind = PrimitiveKind::Pointer;

    fn from_ne_slice(bytes: &[u8]) -> Self {
        let mut buf = [0u8; std::mem::size_of::<usize>()];
        buf.copy_from_slice(bytes);
        Pointer(usize::from_ne_bytes(buf))
    }

    fn write_ne_slice(self, out: &mut [u8]) {
        out.copy_from_slice(&self.0.to_ne_bytes());
    }

    fn into_value(self) -> Value {
        Value::Pointer(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Pointer(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Pointer> for Value {
    fn from(v: Pointer) -> Self {
        Value::Pointer(v)
    }
}
