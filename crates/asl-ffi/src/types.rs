//! C-compatible kind tags and the tagged value struct.

use asl_core::{PrimitiveKind, Value};

use crate::status::AslStatus;

/// Primitive kind tag accepted by every function taking an `i32 kind`.
///
/// Tags match [`PrimitiveKind::tag`]; any other value is rejected with
/// [`AslStatus::InvalidArgument`].
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AslKind {
    /// Signed 8-bit integer.
    I8 = 0,
    /// Signed 16-bit integer.
    I16 = 1,
    /// Signed 32-bit integer.
    I32 = 2,
    /// Signed 64-bit integer.
    I64 = 3,
    /// Unsigned 8-bit integer.
    U8 = 4,
    /// Unsigned 16-bit integer.
    U16 = 5,
    /// Unsigned 32-bit integer.
    U32 = 6,
    /// Unsigned 64-bit integer.
    U64 = 7,
    /// IEEE-754 single precision float.
    F32 = 8,
    /// IEEE-754 double precision float.
    F64 = 9,
    /// Host-width address.
    Pointer = 10,
}

impl From<PrimitiveKind> for AslKind {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::I8 => AslKind::I8,
            PrimitiveKind::I16 => AslKind::I16,
            PrimitiveKind::I32 => AslKind::I32,
            PrimitiveKind::I64 => AslKind::I64,
            PrimitiveKind::U8 => AslKind::U8,
            PrimitiveKind::U16 => AslKind::U16,
            PrimitiveKind::U32 => AslKind::U32,
            PrimitiveKind::U64 => AslKind::U64,
            PrimitiveKind::F32 => AslKind::F32,
            PrimitiveKind::F64 => AslKind::F64,
            PrimitiveKind::Pointer => AslKind::Pointer,
        }
    }
}

/// Convert a raw kind tag from C.
pub(crate) fn kind_from_raw(tag: i32) -> Result<PrimitiveKind, AslStatus> {
    PrimitiveKind::try_from(tag).map_err(AslStatus::from)
}

/// A kind-tagged primitive as passed by value across the C boundary.
///
/// `bits` holds the value's bit pattern zero-extended to 64 bits: signed
/// integers as their two's-complement bits at their own width, floats as
/// their IEEE-754 bits. Bits above the kind's width must be zero.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AslValue {
    /// An [`AslKind`] tag.
    pub kind: i32,
    /// The value's bits.
    pub bits: u64,
}

impl AslValue {
    pub(crate) fn from_value(value: Value) -> Self {
        Self {
            kind: AslKind::from(value.kind()) as i32,
            bits: value.to_bits(),
        }
    }

    /// Decode into a [`Value`], rejecting unknown kinds and stray high bits.
    pub(crate) fn to_value(self) -> Result<Value, AslStatus> {
        let kind = kind_from_raw(self.kind)?;
        Value::from_bits(kind, self.bits).ok_or(AslStatus::InvalidArgument)
    }
}

/// Width in bytes of the kind `kind`, or 0 for an unknown tag.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_width_of(kind: i32) -> usize {
    kind_from_raw(kind).map_or(0, PrimitiveKind::width)
}
