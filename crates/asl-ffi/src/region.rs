//! Heap region FFI: allocate, free, and typed access at byte offsets.
//!
//! All regions live in one process-wide [`Heap`] with the default
//! [`HeapConfig`](asl_mem::HeapConfig). Exceeding its limit is reported as
//! [`AslStatus::AllocationFailed`] rather than by panicking while the heap
//! lock is held.

use std::sync::{LazyLock, Mutex};

use asl_mem::{accessor, Handle, Heap};

use crate::status::AslStatus;
use crate::types::{kind_from_raw, AslValue};

static HEAP: LazyLock<Mutex<Heap>> = LazyLock::new(|| Mutex::new(Heap::new()));

/// Allocate a zero-filled region of `bytes`. Writes its handle to
/// `region_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_allocate(bytes: usize, region_out: *mut u64) -> i32 {
    ffi_guard!({
        if region_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        match ffi_lock!(HEAP).try_allocate(bytes) {
            Ok(handle) => {
                ffi_write!(region_out, handle.to_raw());
                AslStatus::Ok as i32
            }
            Err(e) => AslStatus::from(&e) as i32,
        }
    })
}

/// Free a region. Writes the number of bytes released to `freed_out`
/// unless it is null.
///
/// Freeing an already-freed handle returns `InvalidHandle` and changes
/// nothing.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_free(region: u64, freed_out: *mut usize) -> i32 {
    ffi_guard!({
        let Some(size) = ffi_lock!(HEAP).free(Handle::from_raw(region)) else {
            return AslStatus::InvalidHandle as i32;
        };
        if !freed_out.is_null() {
            ffi_write!(freed_out, size);
        }
        AslStatus::Ok as i32
    })
}

/// Length of a region in bytes.
///
/// **Ambiguity warning:** returns 0 for both an empty region and an
/// invalid handle.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_region_len(region: u64) -> usize {
    ffi_guard_or!(0, {
        HEAP.lock()
            .ok()
            .and_then(|heap| heap.get(Handle::from_raw(region)).map(|r| r.len()))
            .unwrap_or(0)
    })
}

/// Read a value of `kind` at `offset` within `region` into `value_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_read(
    kind: i32,
    region: u64,
    offset: usize,
    value_out: *mut AslValue,
) -> i32 {
    ffi_guard!({
        if value_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        let kind = match kind_from_raw(kind) {
            Ok(k) => k,
            Err(status) => return status as i32,
        };
        let heap = ffi_lock!(HEAP);
        let Some(data) = heap.get(Handle::from_raw(region)) else {
            return AslStatus::InvalidHandle as i32;
        };
        match accessor::read(kind, data, offset) {
            Ok(value) => {
                ffi_write!(value_out, AslValue::from_value(value));
                AslStatus::Ok as i32
            }
            Err(e) => AslStatus::from(&e) as i32,
        }
    })
}

/// Write `value` at `offset` within `region`, as the kind it is tagged with.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_write(region: u64, offset: usize, value: AslValue) -> i32 {
    ffi_guard!({
        let value = match value.to_value() {
            Ok(v) => v,
            Err(status) => return status as i32,
        };
        let mut heap = ffi_lock!(HEAP);
        let Some(data) = heap.get_mut(Handle::from_raw(region)) else {
            return AslStatus::InvalidHandle as i32;
        };
        match accessor::write(data, offset, value) {
            Ok(()) => AslStatus::Ok as i32,
            Err(e) => AslStatus::from(&e) as i32,
        }
    })
}
