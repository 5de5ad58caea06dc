//! Error and result FFI.
//!
//! An error handle owns an [`Error`]. A result handle owns either a boxed
//! value (which may be absent, as for a successful `set`) or an error.
//! Constructing a result consumes the box or error handle passed in, and
//! taking the payload back out consumes the result.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::Mutex;

use asl_core::{Error, Outcome};
use asl_mem::{BoxedValue, Handle, HandleTable};

use crate::boxed::boxes;
use crate::status::AslStatus;

/// Payload of a result handle.
#[derive(Debug)]
pub(crate) enum ResultSlot {
    Ok(Option<BoxedValue>),
    Err(Error),
}

impl From<Outcome<BoxedValue>> for ResultSlot {
    fn from(outcome: Outcome<BoxedValue>) -> Self {
        match outcome {
            Ok(b) => ResultSlot::Ok(Some(b)),
            Err(e) => ResultSlot::Err(e),
        }
    }
}

impl From<Outcome<()>> for ResultSlot {
    fn from(outcome: Outcome<()>) -> Self {
        match outcome {
            Ok(()) => ResultSlot::Ok(None),
            Err(e) => ResultSlot::Err(e),
        }
    }
}

static ERRORS: Mutex<HandleTable<Error>> = Mutex::new(HandleTable::new());
static RESULTS: Mutex<HandleTable<ResultSlot>> = Mutex::new(HandleTable::new());

/// Store `slot` as a new result and return its raw handle.
pub(crate) fn store_result(slot: ResultSlot) -> Result<u64, AslStatus> {
    let mut results = RESULTS.lock().map_err(|_| AslStatus::InternalError)?;
    Ok(results.insert(slot).to_raw())
}

// ── Errors ──────────────────────────────────────────────────────

/// Create an error from a code and a NUL-terminated message. Invalid UTF-8
/// in the message is replaced. Writes the handle to `error_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_error_new(
    code: i32,
    message: *const c_char,
    error_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if message.is_null() || error_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        // SAFETY: caller guarantees message is a valid NUL-terminated string.
        let text = unsafe { CStr::from_ptr(message) }
            .to_string_lossy()
            .into_owned();
        let handle = ffi_lock!(ERRORS).insert(Error::new(code, text));
        ffi_write!(error_out, handle.to_raw());
        AslStatus::Ok as i32
    })
}

/// Code of an error.
///
/// **Ambiguity warning:** returns 0 for an invalid handle; no runtime
/// error uses code 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_error_code(error: u64) -> i32 {
    ffi_guard_or!(0, {
        ERRORS
            .lock()
            .ok()
            .and_then(|errors| errors.get(Handle::from_raw(error)).map(|e| e.code().0))
            .unwrap_or(0)
    })
}

/// Copy an error's message into `buf` as a NUL-terminated string.
///
/// Writes the message length (excluding the NUL) to `len_out` unless it is
/// null. Returns `BufferTooSmall` if `cap` cannot hold the message and its
/// NUL; the truncated prefix is still written.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_error_message(
    error: u64,
    buf: *mut c_char,
    cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let errors = ffi_lock!(ERRORS);
        let Some(e) = errors.get(Handle::from_raw(error)) else {
            return AslStatus::InvalidHandle as i32;
        };
        let len = crate::copy_c_string(e.message().as_bytes(), buf, cap);
        if !len_out.is_null() {
            ffi_write!(len_out, len);
        }
        if buf.is_null() || cap <= len {
            return AslStatus::BufferTooSmall as i32;
        }
        AslStatus::Ok as i32
    })
}

/// Destroy an error.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_error_destroy(error: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ERRORS).remove(Handle::from_raw(error)) {
            Some(_) => AslStatus::Ok as i32,
            None => AslStatus::InvalidHandle as i32,
        }
    })
}

// ── Results ─────────────────────────────────────────────────────

/// Wrap a box in an `Ok` result, consuming the box handle. Pass 0 for an
/// `Ok` without a value.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_result_ok(boxed: u64, result_out: *mut u64) -> i32 {
    ffi_guard!({
        if result_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        let value = if boxed == Handle::NULL.to_raw() {
            None
        } else {
            match ffi_lock!(boxes()).remove(Handle::from_raw(boxed)) {
                Some(b) => Some(b),
                None => return AslStatus::InvalidHandle as i32,
            }
        };
        match store_result(ResultSlot::Ok(value)) {
            Ok(handle) => {
                ffi_write!(result_out, handle);
                AslStatus::Ok as i32
            }
            Err(status) => status as i32,
        }
    })
}

/// Wrap an error in an `Err` result, consuming the error handle.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_result_err(error: u64, result_out: *mut u64) -> i32 {
    ffi_guard!({
        if result_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        let Some(e) = ffi_lock!(ERRORS).remove(Handle::from_raw(error)) else {
            return AslStatus::InvalidHandle as i32;
        };
        match store_result(ResultSlot::Err(e)) {
            Ok(handle) => {
                ffi_write!(result_out, handle);
                AslStatus::Ok as i32
            }
            Err(status) => status as i32,
        }
    })
}

/// 1 if the result is `Ok`, 0 if it is `Err`, or a negative status.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_result_is_ok(result: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(RESULTS).get(Handle::from_raw(result)) {
            Some(ResultSlot::Ok(_)) => 1,
            Some(ResultSlot::Err(_)) => 0,
            None => AslStatus::InvalidHandle as i32,
        }
    })
}

/// Consume an `Ok` result, moving its value into a new box whose handle is
/// written to `boxed_out` (0 if the result carries no value).
///
/// Returns `WrongVariant` and leaves the result alive if it is `Err`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_result_take_value(result: u64, boxed_out: *mut u64) -> i32 {
    ffi_guard!({
        if boxed_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        let handle = Handle::from_raw(result);
        let value = {
            let mut results = ffi_lock!(RESULTS);
            match results.get(handle) {
                Some(ResultSlot::Ok(_)) => {}
                Some(ResultSlot::Err(_)) => return AslStatus::WrongVariant as i32,
                None => return AslStatus::InvalidHandle as i32,
            }
            match results.remove(handle) {
                Some(ResultSlot::Ok(value)) => value,
                _ => return AslStatus::InternalError as i32,
            }
        };
        let raw = match value {
            Some(b) => ffi_lock!(boxes()).insert(b).to_raw(),
            None => Handle::NULL.to_raw(),
        };
        ffi_write!(boxed_out, raw);
        AslStatus::Ok as i32
    })
}

/// Consume an `Err` result, moving its error into a new error handle
/// written to `error_out`.
///
/// Returns `WrongVariant` and leaves the result alive if it is `Ok`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_result_take_error(result: u64, error_out: *mut u64) -> i32 {
    ffi_guard!({
        if error_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        let handle = Handle::from_raw(result);
        let error = {
            let mut results = ffi_lock!(RESULTS);
            match results.get(handle) {
                Some(ResultSlot::Err(_)) => {}
                Some(ResultSlot::Ok(_)) => return AslStatus::WrongVariant as i32,
                None => return AslStatus::InvalidHandle as i32,
            }
            match results.remove(handle) {
                Some(ResultSlot::Err(e)) => e,
                _ => return AslStatus::InternalError as i32,
            }
        };
        let raw = ffi_lock!(ERRORS).insert(error).to_raw();
        ffi_write!(error_out, raw);
        AslStatus::Ok as i32
    })
}

/// Destroy a result and whatever it holds.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_result_destroy(result: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(RESULTS).remove(Handle::from_raw(result)) {
            Some(_) => AslStatus::Ok as i32,
            None => AslStatus::InvalidHandle as i32,
        }
    })
}
