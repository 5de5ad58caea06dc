//! Criterion micro-benchmarks for array, string, and bitset operations.

use std::hint::black_box;

use asl_bench::{filled_array, index_sequence, sample_text};
use asl_core::{PrimitiveKind, Value};
use asl_runtime::{Bitset, DynamicArray, IndexableString};
use criterion::{criterion_group, criterion_main, Criterion};

const LEN: usize = 10_000;

fn bench_array_init(c: &mut Criterion) {
    c.bench_function("array_init_u32_10k", |b| {
        b.iter(|| DynamicArray::new(black_box(PrimitiveKind::U32), LEN));
    });
}

fn bench_array_get_boxed(c: &mut Criterion) {
    let array = filled_array(PrimitiveKind::U32, LEN);
    let indices = index_sequence(LEN, 1024, 42);
    c.bench_function("array_get_boxed_1k", |b| {
        b.iter(|| {
            for &i in &indices {
                black_box(array.get(black_box(i)).unwrap());
            }
        });
    });
}

fn bench_array_get_as(c: &mut Criterion) {
    let array = filled_array(PrimitiveKind::F64, LEN);
    let indices = index_sequence(LEN, 1024, 42);
    c.bench_function("array_get_as_f64_1k", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for &i in &indices {
                sum += array.get_as::<f64>(black_box(i)).unwrap();
            }
            black_box(sum)
        });
    });
}

fn bench_array_set(c: &mut Criterion) {
    let mut array = DynamicArray::new(PrimitiveKind::I64, LEN);
    let indices = index_sequence(LEN, 1024, 9);
    c.bench_function("array_set_i64_1k", |b| {
        b.iter(|| {
            for &i in &indices {
                array.set(black_box(i), Value::I64(-1)).unwrap();
            }
        });
    });
}

fn bench_array_out_of_bounds(c: &mut Criterion) {
    let array = DynamicArray::new(PrimitiveKind::U8, 16);
    c.bench_function("array_get_out_of_bounds", |b| {
        b.iter(|| black_box(array.get(black_box(16)).is_err()));
    });
}

fn bench_string_get(c: &mut Criterion) {
    let s = IndexableString::new(&sample_text(LEN));
    let indices = index_sequence(LEN, 1024, 5);
    c.bench_function("string_get_1k", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for &i in &indices {
                acc += u32::from(s.get(black_box(i)).unwrap());
            }
            black_box(acc)
        });
    });
}

fn bench_bitset_toggle(c: &mut Criterion) {
    let mut bs = Bitset::new(LEN);
    let indices = index_sequence(LEN, 1024, 11);
    c.bench_function("bitset_toggle_1k", |b| {
        b.iter(|| {
            for &i in &indices {
                bs.toggle(black_box(i));
            }
            black_box(bs.count_ones())
        });
    });
}

criterion_group!(
    benches,
    bench_array_init,
    bench_array_get_boxed,
    bench_array_get_as,
    bench_array_set,
    bench_array_out_of_bounds,
    bench_string_get,
    bench_bitset_toggle
);
criterion_main!(benches);
