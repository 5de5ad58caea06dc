//! Benchmark workloads for the ASL runtime value layer.
//!
//! Provides deterministic inputs shared by the Criterion benches:
//!
//! - [`index_sequence`]: pseudo-random in-range indices from a seed
//! - [`filled_array`]: a [`DynamicArray`] populated with per-index values
//! - [`sample_text`]: printable ASCII text of a given length

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use asl_core::{Pointer, PrimitiveKind, Value};
use asl_runtime::DynamicArray;

/// `n` indices in `0..len`, from a 64-bit LCG seeded with `seed`.
///
/// # Panics
///
/// Panics if `len` is zero.
pub fn index_sequence(len: usize, n: usize, seed: u64) -> Vec<usize> {
    assert!(len > 0, "index_sequence needs a non-empty range");
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % len as u64) as usize
        })
        .collect()
}

/// The value [`filled_array`] stores at `index`.
pub fn value_for(kind: PrimitiveKind, index: usize) -> Value {
    let i = index as u64;
    match kind {
        PrimitiveKind::I8 => Value::I8(i as i8),
        PrimitiveKind::I16 => Value::I16(i as i16),
        PrimitiveKind::I32 => Value::I32(i as i32),
        PrimitiveKind::I64 => Value::I64(i as i64),
        PrimitiveKind::U8 => Value::U8(i as u8),
        PrimitiveKind::U16 => Value::U16(i as u16),
        PrimitiveKind::U32 => Value::U32(i as u32),
        PrimitiveKind::U64 => Value::U64(i),
        PrimitiveKind::F32 => Value::F32(index as f32),
        PrimitiveKind::F64 => Value::F64(index as f64),
        PrimitiveKind::Pointer => Value::Pointer(Pointer(index)),
    }
}

/// An array of `len` values of `kind`; element `i` holds `value_for(kind, i)`.
pub fn filled_array(kind: PrimitiveKind, len: usize) -> DynamicArray {
    let values: Vec<Value> = (0..len).map(|i| value_for(kind, i)).collect();
    DynamicArray::from_values(kind, &values).unwrap()
}

/// `len` bytes of printable ASCII, cycling through `a..=z`.
pub fn sample_text(len: usize) -> String {
    (b'a'..=b'z').cycle().take(len).map(char::from).collect()
}
