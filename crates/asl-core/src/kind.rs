//! The primitive registry: [`PrimitiveKind`] and its byte widths.

use std::error::Error;
use std::fmt;

/// One of the fixed primitive representations the runtime can store.
///
/// The discriminant is the kind's stable tag. Tags only matter at the
/// boundary with the outside world, where they are converted with
/// `TryFrom`. Inside Rust the enum itself is the dispatch key, so an
/// out-of-range tag cannot be constructed.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
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
    /// IEEE 754 single precision float.
    F32 = 8,
    /// IEEE 754 double precision float.
    F64 = 9,
    /// Opaque host-width address or handle.
    Pointer = 10,
}

impl PrimitiveKind {
    /// Number of kinds.
    pub const COUNT: usize = 11;

    /// Every kind, in tag order.
    pub const ALL: [PrimitiveKind; Self::COUNT] = [
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::F32,
        Self::F64,
        Self::Pointer,
    ];

    /// Width of one value of this kind in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
            Self::Pointer => std::mem::size_of::<usize>(),
        }
    }

    /// Bytes needed to store `items` values of this kind, or `None` on overflow.
    pub const fn byte_size(self, items: usize) -> Option<usize> {
        items.checked_mul(self.width())
    }

    /// The stable tag of this kind.
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Canonical lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Pointer => "pointer",
        }
    }

    /// Whether this kind is a signed integer.
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Whether this kind is a floating-point number.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw tag that does not name any [`PrimitiveKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownKind {
    /// The rejected tag.
    pub tag: i64,
}

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown primitive kind tag {}", self.tag)
    }
}

impl Error for UnknownKind {}

impl TryFrom<u8> for PrimitiveKind {
    type Error = UnknownKind;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(tag as usize)
            .copied()
            .ok_or(UnknownKind { tag: tag.into() })
    }
}

impl TryFrom<i32> for PrimitiveKind {
    type Error = UnknownKind;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        u8::try_from(tag)
            .ok()
            .and_then(|t| Self::try_from(t).ok())
            .ok_or(UnknownKind { tag: tag.into() })
    }
}
