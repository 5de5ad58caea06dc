//! Dynamic array FFI.
//!
//! `get` and `set` report container failures through a result handle, not
//! through the status code: a call that returns `ASL_STATUS_OK` may still
//! produce an `Err` result carrying code 1 (out of bounds) or 2 (kind
//! mismatch).

use std::sync::Mutex;

use asl_mem::{Handle, HandleTable};
use asl_runtime::DynamicArray;

use crate::outcome::{store_result, ResultSlot};
use crate::status::AslStatus;
use crate::types::{kind_from_raw, AslValue};

static ARRAYS: Mutex<HandleTable<DynamicArray>> = Mutex::new(HandleTable::new());

/// Create an array of `len` zero values of `kind`. Writes its handle to
/// `array_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_array_init(kind: i32, len: usize, array_out: *mut u64) -> i32 {
    ffi_guard!({
        if array_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        let kind = match kind_from_raw(kind) {
            Ok(k) => k,
            Err(status) => return status as i32,
        };
        let array = DynamicArray::new(kind, len);
        let handle = ffi_lock!(ARRAYS).insert(array);
        ffi_write!(array_out, handle.to_raw());
        AslStatus::Ok as i32
    })
}

/// Number of elements in an array.
///
/// **Ambiguity warning:** returns 0 for both an empty array and an invalid
/// handle.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_array_len(array: u64) -> usize {
    ffi_guard_or!(0, {
        ARRAYS
            .lock()
            .ok()
            .and_then(|arrays| arrays.get(Handle::from_raw(array)).map(DynamicArray::len))
            .unwrap_or(0)
    })
}

/// Read element `index`. Writes a result handle to `result_out` holding
/// either a box with the element or the out-of-bounds error.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_array_get(array: u64, index: usize, result_out: *mut u64) -> i32 {
    ffi_guard!({
        if result_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        let outcome = match ffi_lock!(ARRAYS).get(Handle::from_raw(array)) {
            Some(a) => a.get(index),
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

/// Store `value` at `index`. Writes a result handle to `result_out`: an
/// empty `Ok`, or the out-of-bounds or kind-mismatch error.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_array_set(
    array: u64,
    index: usize,
    value: AslValue,
    result_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if result_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        let value = match value.to_value() {
            Ok(v) => v,
            Err(status) => return status as i32,
        };
        let outcome = match ffi_lock!(ARRAYS).get_mut(Handle::from_raw(array)) {
            Some(a) => a.set(index, value),
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

/// Destroy an array.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_array_destroy(array: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ARRAYS).remove(Handle::from_raw(array)) {
            Some(_) => AslStatus::Ok as i32,
            None => AslStatus::InvalidHandle as i32,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxed::asl_unbox;
    use crate::outcome::{
        asl_error_code, asl_result_destroy, asl_result_is_ok, asl_result_take_error,
        asl_result_take_value,
    };
    use crate::types::AslKind;
    use asl_core::Value;

    fn new_array(kind: AslKind, len: usize) -> u64 {
        let mut h = 0u64;
        assert_eq!(asl_array_init(kind as i32, len, &mut h), AslStatus::Ok as i32);
        h
    }

    fn take_error_code(result: u64) -> i32 {
        assert_eq!(asl_result_is_ok(result), 0);
        let mut e = 0u64;
        assert_eq!(asl_result_take_error(result, &mut e), AslStatus::Ok as i32);
        asl_error_code(e)
    }

    #[test]
    fn u32_array_through_ffi() {
        let a = new_array(AslKind::U32, 3);
        assert_eq!(asl_array_len(a), 3);

        let mut r = 0u64;
        let v = AslValue::from_value(Value::U32(42));
        assert_eq!(asl_array_set(a, 1, v, &mut r), AslStatus::Ok as i32);
        assert_eq!(asl_result_is_ok(r), 1);
        asl_result_destroy(r);

        assert_eq!(asl_array_get(a, 1, &mut r), AslStatus::Ok as i32);
        let mut boxed = 0u64;
        assert_eq!(asl_result_take_value(r, &mut boxed), AslStatus::Ok as i32);
        let mut out = AslValue::default();
        assert_eq!(asl_unbox(boxed, &mut out), AslStatus::Ok as i32);
        assert_eq!(out, v);

        assert_eq!(asl_array_get(a, 3, &mut r), AslStatus::Ok as i32);
        assert_eq!(take_error_code(r), 1);

        assert_eq!(asl_array_destroy(a), AslStatus::Ok as i32);
        assert_eq!(asl_array_len(a), 0);
        assert_eq!(asl_array_get(a, 0, &mut r), AslStatus::InvalidHandle as i32);
    }

    #[test]
    fn set_with_wrong_kind_is_err_result() {
        let a = new_array(AslKind::I8, 2);
        let mut r = 0u64;
        let v = AslValue::from_value(Value::U8(1));
        assert_eq!(asl_array_set(a, 0, v, &mut r), AslStatus::Ok as i32);
        assert_eq!(take_error_code(r), 2);

        assert_eq!(asl_array_set(a, 9, v, &mut r), AslStatus::Ok as i32);
        assert_eq!(take_error_code(r), 1);
        asl_array_destroy(a);
    }

    #[test]
    fn init_rejects_bad_arguments() {
        let mut h = 0u64;
        assert_eq!(asl_array_init(40, 1, &mut h), AslStatus::InvalidArgument as i32);
        assert_eq!(
            asl_array_init(AslKind::U8 as i32, 1, std::ptr::null_mut()),
            AslStatus::InvalidArgument as i32
        );
    }

    #[test]
    fn oversized_array_reports_panic() {
        let mut h = 0u64;
        assert_eq!(
            asl_array_init(AslKind::U64 as i32, usize::MAX, &mut h),
            AslStatus::Panicked as i32
        );
    }
}
