//! C FFI bindings for the ASL runtime value layer.
//!
//! Every runtime object a C caller can hold (heap regions, boxed values,
//! errors, results, arrays, strings) lives in a global handle table and is
//! addressed by an opaque `u64`. Functions return an [`AslStatus`] as `i32`
//! and write results through out pointers; a stale or destroyed handle
//! yields [`AslStatus::InvalidHandle`], never undefined behaviour.
//!
//! Container failures (index out of bounds, kind mismatch) are not status
//! codes: `asl_array_get` and friends succeed and hand back a *result*
//! handle whose `Err` side carries the runtime [`Error`](asl_core::Error).
//!
//! A panic inside any entry point is caught, logged, and reported as
//! [`AslStatus::Panicked`]; the message is available from
//! [`asl_last_panic_message`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::any::Any;
use std::cell::RefCell;
use std::os::raw::c_char;

/// Run an FFI body, converting a panic into `$default`.
macro_rules! ffi_guard_or {
    ($default:expr, $body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| $body)) {
            Ok(v) => v,
            Err(payload) => {
                $crate::record_panic(payload.as_ref());
                $default
            }
        }
    };
}

/// Run an FFI body returning a status, converting a panic into
/// [`AslStatus::Panicked`].
macro_rules! ffi_guard {
    ($body:block) => {
        ffi_guard_or!($crate::status::AslStatus::Panicked as i32, $body)
    };
}

/// Lock a global table, returning `InternalError` from the enclosing
/// status-returning body if the mutex is poisoned.
macro_rules! ffi_lock {
    ($table:expr) => {
        match $table.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::AslStatus::InternalError as i32,
        }
    };
}

/// Write `$value` through the out pointer `$out`, which must be non-null.
macro_rules! ffi_write {
    ($out:expr, $value:expr) => {
        // SAFETY: null-checked by the caller; validity per the C contract.
        unsafe { *$out = $value }
    };
}

pub mod array;
pub mod boxed;
pub mod outcome;
pub mod region;
pub mod status;
pub mod string;
pub mod types;

pub use status::AslStatus;
pub use types::{AslKind, AslValue};

thread_local! {
    static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

pub(crate) fn record_panic(payload: &(dyn Any + Send)) {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    };
    tracing::error!(%message, "panic caught at FFI boundary");
    LAST_PANIC.with(|cell| *cell.borrow_mut() = message);
}

/// Copy `src` into a caller buffer of `cap` bytes as a NUL-terminated string,
/// truncating if needed. Returns the untruncated length.
#[allow(unsafe_code)]
pub(crate) fn copy_c_string(src: &[u8], buf: *mut c_char, cap: usize) -> usize {
    if !buf.is_null() && cap > 0 {
        let n = src.len().min(cap - 1);
        // SAFETY: buf points to at least cap writable bytes per caller contract,
        // and n + 1 <= cap.
        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), buf.cast::<u8>(), n);
            *buf.add(n) = 0;
        }
    }
    src.len()
}

/// Message of the most recent panic caught on this thread.
///
/// Copies up to `cap - 1` bytes plus a NUL into `buf` (if non-null) and
/// returns the full message length in bytes, or 0 if no panic was caught.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_last_panic_message(buf: *mut c_char, cap: usize) -> usize {
    LAST_PANIC.with(|cell| copy_c_string(cell.borrow().as_bytes(), buf, cap))
}
