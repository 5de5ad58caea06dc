//! Kind-tagged primitive values.

use std::fmt;

use crate::kind::PrimitiveKind;
use crate::primitive::{Pointer, Primitive};

/// A primitive value together with its kind.
///
/// This is the runtime-kind counterpart of [`Primitive`]: containers whose
/// element kind is chosen at construction time read and write `Value`s.
/// Equality follows the payload type, so float comparisons are IEEE
/// (`NaN != NaN`); use [`Value::bit_eq`] for exact identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// Signed 8-bit integer.
    I8(i8),
    /// Signed 16-bit integer.
    I16(i16),
    /// Signed 32-bit integer.
    I32(i32),
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 8-bit integer.
    U8(u8),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// Single precision float.
    F32(f32),
    /// Double precision float.
    F64(f64),
    /// Opaque address or handle.
    Pointer(Pointer),
}

impl Value {
    /// The kind of this value.
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Self::I8(_) => PrimitiveKind::I8,
            Self::I16(_) => PrimitiveKind::I16,
            Self::I32(_) => PrimitiveKind::I32,
            Self::I64(_) => PrimitiveKind::I64,
            Self::U8(_) => PrimitiveKind::U8,
            Self::U16(_) => PrimitiveKind::U16,
            Self::U32(_) => PrimitiveKind::U32,
            Self::U64(_) => PrimitiveKind::U64,
            Self::F32(_) => PrimitiveKind::F32,
            Self::F64(_) => PrimitiveKind::F64,
            Self::Pointer(_) => PrimitiveKind::Pointer,
        }
    }

    /// The all-zero value of `kind`, which is what a fresh region holds.
    pub const fn zero(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::I8 => Self::I8(0),
            PrimitiveKind::I16 => Self::I16(0),
            PrimitiveKind::I32 => Self::I32(0),
            PrimitiveKind::I64 => Self::I64(0),
            PrimitiveKind::U8 => Self::U8(0),
            PrimitiveKind::U16 => Self::U16(0),
            PrimitiveKind::U32 => Self::U32(0),
            PrimitiveKind::U64 => Self::U64(0),
            PrimitiveKind::F32 => Self::F32(0.0),
            PrimitiveKind::F64 => Self::F64(0.0),
            PrimitiveKind::Pointer => Self::Pointer(Pointer::NULL),
        }
    }

    /// The raw bit pattern, zero-extended to 64 bits.
    ///
    /// Signed integers are reinterpreted as their unsigned counterpart of
    /// the same width before widening, so `I8(-1)` has bits `0xff`.
    pub const fn to_bits(self) -> u64 {
        match self {
            Self::I8(v) => v as u8 as u64,
            Self::I16(v) => v as u16 as u64,
            Self::I32(v) => v as u32 as u64,
            Self::I64(v) => v as u64,
            Self::U8(v) => v as u64,
            Self::U16(v) => v as u64,
            Self::U32(v) => v as u64,
            Self::U64(v) => v,
            Self::F32(v) => v.to_bits() as u64,
            Self::F64(v) => v.to_bits(),
            Self::Pointer(p) => p.0 as u64,
        }
    }

    /// Rebuild a value of `kind` from a bit pattern produced by [`Value::to_bits`].
    ///
    /// Returns `None` if `bits` has set bits above the kind's width; the
    /// runtime never truncates silently.
    pub fn from_bits(kind: PrimitiveKind, bits: u64) -> Option<Self> {
        let width_bits = kind.width() * 8;
        if width_bits < 64 && bits >> width_bits != 0 {
            return None;
        }
        let value = match kind {
            PrimitiveKind::I8 => Self::I8(bits as u8 as i8),
            PrimitiveKind::I16 => Self::I16(bits as u16 as i16),
            PrimitiveKind::I32 => Self::I32(bits as u32 as i32),
            PrimitiveKind::I64 => Self::I64(bits as i64),
            PrimitiveKind::U8 => Self::U8(bits as u8),
            PrimitiveKind::U16 => Self::U16(bits as u16),
            PrimitiveKind::U32 => Self::U32(bits as u32),
            PrimitiveKind::U64 => Self::U64(bits),
            PrimitiveKind::F32 => Self::F32(f32::from_bits(bits as u32)),
            PrimitiveKind::F64 => Self::F64(f64::from_bits(bits)),
            PrimitiveKind::Pointer => Self::Pointer(Pointer(usize::try_from(bits).ok()?)),
        };
        Some(value)
    }

    /// Whether both values have the same kind and the same bits.
    pub fn bit_eq(&self, other: &Value) -> bool {
        self.kind() == other.kind() && self.to_bits() == other.to_bits()
    }

    /// The payload as `T`, or `None` if this value is of another kind.
    pub fn get<T: Primitive>(self) -> Option<T> {
        T::from_value(self)
    }

    /// Encode this value into `out` as native-endian bytes.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != self.kind().width()`.
    pub fn write_ne_slice(self, out: &mut [u8]) {
        match self {
            Self::I8(v) => v.write_ne_slice(out),
            Self::I16(v) => v.write_ne_slice(out),
            Self::I32(v) => v.write_ne_slice(out),
            Self::I64(v) => v.write_ne_slice(out),
            Self::U8(v) => v.write_ne_slice(out),
            Self::U16(v) => v.write_ne_slice(out),
            Self::U32(v) => v.write_ne_slice(out),
            Self::U64(v) => v.write_ne_slice(out),
            Self::F32(v) => v.write_ne_slice(out),
            Self::F64(v) => v.write_ne_slice(out),
            Self::Pointer(v) => v.write_ne_slice(out),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Pointer(p) => write!(f, "{p}"),
        }
    }
}
