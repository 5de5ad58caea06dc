//! Boxed value FFI: box, unbox, destroy.

use std::sync::Mutex;

use asl_mem::{BoxedValue, Handle, HandleTable};

use crate::status::AslStatus;
use crate::types::AslValue;

static BOXES: Mutex<HandleTable<BoxedValue>> = Mutex::new(HandleTable::new());

pub(crate) fn boxes() -> &'static Mutex<HandleTable<BoxedValue>> {
    &BOXES
}

/// Box `value` into its own region. Writes the box handle to `boxed_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_box(value: AslValue, boxed_out: *mut u64) -> i32 {
    ffi_guard!({
        if boxed_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        let value = match value.to_value() {
            Ok(v) => v,
            Err(status) => return status as i32,
        };
        let handle = ffi_lock!(BOXES).insert(BoxedValue::new(value));
        ffi_write!(boxed_out, handle.to_raw());
        AslStatus::Ok as i32
    })
}

/// Read the value held by a box into `value_out`. The box stays alive.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_unbox(boxed: u64, value_out: *mut AslValue) -> i32 {
    ffi_guard!({
        if value_out.is_null() {
            return AslStatus::InvalidArgument as i32;
        }
        let value = match ffi_lock!(BOXES).get(Handle::from_raw(boxed)) {
            Some(b) => b.unbox(),
            None => return AslStatus::InvalidHandle as i32,
        };
        ffi_write!(value_out, AslValue::from_value(value));
        AslStatus::Ok as i32
    })
}

/// Destroy a box, releasing its region.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn asl_box_destroy(boxed: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(BOXES).remove(Handle::from_raw(boxed)) {
            Some(_) => AslStatus::Ok as i32,
            None => AslStatus::InvalidHandle as i32,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use asl_core::{Pointer, Value};
    use asl_test_utils::fixtures::all_samples;

    #[test]
    fn box_unbox_destroy() {
        let mut h = 0u64;
        let v = AslValue::from_value(Value::I64(-12345));
        assert_eq!(asl_box(v, &mut h), AslStatus::Ok as i32);

        let mut out = AslValue::default();
        assert_eq!(asl_unbox(h, &mut out), AslStatus::Ok as i32);
        assert_eq!(out, v);

        assert_eq!(asl_box_destroy(h), AslStatus::Ok as i32);
        assert_eq!(asl_box_destroy(h), AslStatus::InvalidHandle as i32);
        assert_eq!(asl_unbox(h, &mut out), AslStatus::InvalidHandle as i32);
    }

    #[test]
    fn every_sample_survives_boxing() {
        for value in all_samples() {
            let mut h = 0u64;
            assert_eq!(
                asl_box(AslValue::from_value(value), &mut h),
                AslStatus::Ok as i32
            );
            let mut out = AslValue::default();
            asl_unbox(h, &mut out);
            assert!(out.to_value().unwrap().bit_eq(&value));
            asl_box_destroy(h);
        }
    }

    #[test]
    fn box_rejects_bad_input() {
        let mut h = 0u64;
        assert_eq!(
            asl_box(AslValue { kind: 12, bits: 0 }, &mut h),
            AslStatus::InvalidArgument as i32
        );
        assert_eq!(
            asl_box(
                AslValue::from_value(Value::Pointer(Pointer(1))),
                std::ptr::null_mut()
            ),
            AslStatus::InvalidArgument as i32
        );
        assert_eq!(
            asl_unbox(0, std::ptr::null_mut()),
            AslStatus::InvalidArgument as i32
        );
    }
}
