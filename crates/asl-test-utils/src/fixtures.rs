//! Sample values and strategies covering every primitive kind.

use asl_core::{Pointer, PrimitiveKind, Value};
use proptest::prelude::*;

/// Boundary values for `kind`: zero, one, the extremes, and for floats
/// the non-finite values and a NaN with a payload.
pub fn sample_values(kind: PrimitiveKind) -> Vec<Value> {
    match kind {
        PrimitiveKind::I8 => vec![
            Value::I8(0),
            Value::I8(1),
            Value::I8(i8::MIN),
            Value::I8(i8::MAX),
        ],
        PrimitiveKind::I16 => vec![
            Value::I16(0),
            Value::I16(-1),
            Value::I16(i16::MIN),
            Value::I16(i16::MAX),
        ],
        PrimitiveKind::I32 => vec![
            Value::I32(0),
            Value::I32(-1),
            Value::I32(i32::MIN),
            Value::I32(i32::MAX),
        ],
        PrimitiveKind::I64 => vec![
            Value::I64(0),
            Value::I64(-1),
            Value::I64(i64::MIN),
            Value::I64(i64::MAX),
        ],
        PrimitiveKind::U8 => vec![
            Value::U8(0),
            Value::U8(1),
            Value::U8(b'a'),
            Value::U8(u8::MAX),
        ],
        PrimitiveKind::U16 => vec![Value::U16(0), Value::U16(1), Value::U16(u16::MAX)],
        PrimitiveKind::U32 => vec![Value::U32(0), Value::U32(42), Value::U32(u32::MAX)],
        PrimitiveKind::U64 => vec![Value::U64(0), Value::U64(1 << 40), Value::U64(u64::MAX)],
        PrimitiveKind::F32 => vec![
            Value::F32(0.0),
            Value::F32(-0.0),
            Value::F32(1.5),
            Value::F32(f32::MIN_POSITIVE),
            Value::F32(f32::INFINITY),
            Value::F32(f32::NEG_INFINITY),
            Value::F32(f32::from_bits(0x7fc0_0001)),
        ],
        PrimitiveKind::F64 => vec![
            Value::F64(0.0),
            Value::F64(-0.0),
            Value::F64(-2.25),
            Value::F64(f64::MAX),
            Value::F64(f64::INFINITY),
            Value::F64(f64::from_bits(0x7ff8_0000_0000_0001)),
        ],
        PrimitiveKind::Pointer => vec![
            Value::Pointer(Pointer::NULL),
            Value::Pointer(Pointer(0x1000)),
            Value::Pointer(Pointer(usize::MAX)),
        ],
    }
}

/// [`sample_values`] for every kind, in tag order.
pub fn all_samples() -> Vec<Value> {
    PrimitiveKind::ALL
        .into_iter()
        .flat_map(sample_values)
        .collect()
}

/// Any value of `kind`, including every float bit pattern.
pub fn arb_value_of(kind: PrimitiveKind) -> BoxedStrategy<Value> {
    match kind {
        PrimitiveKind::I8 => any::<i8>().prop_map(Value::I8).boxed(),
        PrimitiveKind::I16 => any::<i16>().prop_map(Value::I16).boxed(),
        PrimitiveKind::I32 => any::<i32>().prop_map(Value::I32).boxed(),
        PrimitiveKind::I64 => any::<i64>().prop_map(Value::I64).boxed(),
        PrimitiveKind::U8 => any::<u8>().prop_map(Value::U8).boxed(),
        PrimitiveKind::U16 => any::<u16>().prop_map(Value::U16).boxed(),
        PrimitiveKind::U32 => any::<u32>().prop_map(Value::U32).boxed(),
        PrimitiveKind::U64 => any::<u64>().prop_map(Value::U64).boxed(),
        PrimitiveKind::F32 => any::<u32>()
            .prop_map(|b| Value::F32(f32::from_bits(b)))
            .boxed(),
        PrimitiveKind::F64 => any::<u64>()
            .prop_map(|b| Value::F64(f64::from_bits(b)))
            .boxed(),
        PrimitiveKind::Pointer => any::<usize>()
            .prop_map(|p| Value::Pointer(Pointer(p)))
            .boxed(),
    }
}

/// Any kind.
pub fn arb_kind() -> impl Strategy<Value = PrimitiveKind> {
    prop::sample::select(PrimitiveKind::ALL.to_vec())
}

/// Any value of any kind.
pub fn arb_value() -> impl Strategy<Value = Value> {
    arb_kind().prop_flat_map(arb_value_of)
}
