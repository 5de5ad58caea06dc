//! Indexable string FFI.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::Mutex;

use asl_mem::{Handle, HandleTable};
use asl_runtime::IndexableString;

use crate::outcome::{store_result, ResultSlot};
use crate::status::AslStatus;

static STRINGS: Mutex<HandleTable<IndexableString>> = Mutex::new(HandleTable::new());

/// Copy the NUL-terminated `cstr` into a new string. Writes its handle to
/// `string_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_string_new(cstr: *const c_char, string_out: *mut u64) -> i32 {
    ffi_guard!({
        if cstr.is_null() || string_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        // SAFETY: caller guarantees cstr is a valid NUL-terminated string.
        let bytes = unsafe { CStr::from_ptr(cstr) }.to_bytes();
        let handle = ffi_lock!(STRINGS).insert(IndexableString::from_bytes(bytes));
        ffi_write!(string_out, handle.to_raw());
        AslStatus::Ok as i32
    })
}

/// Length of a string in bytes.
///
/// **Ambiguity warning:** returns 0 for both an empty string and an
/// invalid handle.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_string_len(string: u64) -> usize {
    ffi_guard_or!(0, {
        STRINGS
            .lock()
            .ok()
            .and_then(|strings| {
                strings
                    .get(Handle::from_raw(string))
                    .map(IndexableString::len)
            })
            .unwrap_or(0)
    })
}

/// Read byte `index`. Writes a result handle to `result_out` holding either
/// a `u8` box or the out-of-bounds error.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_string_get(string: u64, index: usize, result_out: *mut u64) -> i32 {
    ffi_guard!({
        if result_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        let outcome = match ffi_lock!(STRINGS).get(Handle::from_raw(string)) {
            Some(s) => s.get_boxed(index),
            None => return AslStatus::InvalidHandle as i32,
        };
        match store_result(ResultSlot::from(outcome)) {
            Ok(handle) => {
                ffi_write!(result_out, handle);
                AslStatus::Ok as i32
            }
            Err(status) => status as i32,
        }
    })
}

/// Destroy a string.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_string_destroy(string: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(STRINGS).remove(Handle::from_raw(string)) {
            Some(_) => AslStatus::Ok as i32,
            None => AslStatus::InvalidHandle as i32,
        }
    })
}
