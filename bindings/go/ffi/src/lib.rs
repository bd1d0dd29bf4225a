//! C-FFI layer for the personnummer validator — used by Go (cgo) and other
//! FFI consumers.
//!
//! ZERO logic here. All calls delegate to `pnr-core`.
//!
//! # Memory Contract
//!
//! All functions that return `*mut c_char` allocate via `CString`.
//! The caller MUST free the returned string by calling `pnr_free_string()`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use chrono::NaiveDate;

/// Result from a pnr FFI call.
/// If `error` is null, the call succeeded and `result` contains the output.
/// If `error` is non-null, the call failed and `error` contains the error message.
/// The caller MUST free both `result` and `error` with `pnr_free_string()`.
#[repr(C)]
pub struct PnrResult {
    pub result: *mut c_char,
    pub error: *mut c_char,
}

/// Convert to a C string, dropping interior NULs rather than failing.
fn to_c_string(value: String) -> CString {
    CString::new(value).unwrap_or_else(|e| {
        let mut bytes = e.into_vec();
        bytes.retain(|&b| b != 0);
        CString::new(bytes).unwrap_or_default()
    })
}

impl PnrResult {
    fn ok(value: String) -> Self {
        PnrResult {
            result: to_c_string(value).into_raw(),
            error: std::ptr::null_mut(),
        }
    }

    fn err(msg: String) -> Self {
        PnrResult {
            result: std::ptr::null_mut(),
            error: to_c_string(msg).into_raw(),
        }
    }
}

/// Helper: convert a C string pointer to a Rust &str.
/// Returns None if the pointer is null or not valid UTF-8.
unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Helper: read the optional evaluation date.
/// A null pointer means the local calendar date.
unsafe fn today_from_ptr(ptr: *const c_char) -> Result<NaiveDate, String> {
    if ptr.is_null() {
        return Ok(pnr_core::today());
    }
    let text = cstr_to_str(ptr).ok_or_else(|| "invalid UTF-8 today".to_string())?;
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| format!("today must be YYYY-MM-DD: {}", e))
}

/// Validate a personnummer.
/// Returns JSON: { "valid": bool, ... } — an invalid number is a successful call.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string.
/// `today` must be null or a null-terminated "YYYY-MM-DD" C string.
/// The caller must free the returned strings with `pnr_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn pnr_validate(text: *const c_char, today: *const c_char) -> PnrResult {
    let text = match cstr_to_str(text) {
        Some(s) => s,
        None => return PnrResult::err("null or invalid UTF-8 input".into()),
    };
    let today = match today_from_ptr(today) {
        Ok(d) => d,
        Err(e) => return PnrResult::err(e),
    };

    let result = pnr_core::validate_at(text, today);
    match serde_json::to_string_pretty(&result.to_json()) {
        Ok(json) => PnrResult::ok(json),
        Err(e) => PnrResult::err(format!("Serialization error: {}", e)),
    }
}

/// Normalize a personnummer to canonical form.
/// On invalid input, `error` holds the validation message.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string.
/// `today` must be null or a null-terminated "YYYY-MM-DD" C string.
/// The caller must free the returned strings with `pnr_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn pnr_normalize(text: *const c_char, today: *const c_char) -> PnrResult {
    let text = match cstr_to_str(text) {
        Some(s) => s,
        None => return PnrResult::err("null or invalid UTF-8 input".into()),
    };
    let today = match today_from_ptr(today) {
        Ok(d) => d,
        Err(e) => return PnrResult::err(e),
    };

    match pnr_core::normalizer::normalize_at(text, today) {
        Ok(normalized) => PnrResult::ok(normalized),
        Err(e) => PnrResult::err(e.to_string()),
    }
}

/// Free a string previously returned by a pnr FFI function.
///
/// # Safety
/// `ptr` must be a pointer previously returned by a pnr FFI function,
/// or null (in which case this is a no-op).
#[no_mangle]
pub unsafe extern "C" fn pnr_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn take(ptr: *mut c_char) -> String {
        let s = CStr::from_ptr(ptr).to_string_lossy().into_owned();
        pnr_free_string(ptr);
        s
    }

    #[test]
    fn test_normalize_roundtrip_through_c_strings() {
        let input = CString::new("19811218-9876").unwrap();
        unsafe {
            let res = pnr_normalize(input.as_ptr(), std::ptr::null());
            assert!(res.error.is_null());
            assert_eq!(take(res.result), "19811218-9876");
        }
    }

    #[test]
    fn test_normalize_invalid_sets_error() {
        let input = CString::new("19811218-9870").unwrap();
        unsafe {
            let res = pnr_normalize(input.as_ptr(), std::ptr::null());
            assert!(res.result.is_null());
            assert!(take(res.error).contains("Luhn"));
        }
    }

    #[test]
    fn test_validate_null_pointer() {
        unsafe {
            let res = pnr_validate(std::ptr::null(), std::ptr::null());
            assert!(res.result.is_null());
            assert!(take(res.error).contains("null"));
        }
    }

    #[test]
    fn test_validate_returns_json() {
        let input = CString::new("12345").unwrap();
        unsafe {
            let res = pnr_validate(input.as_ptr(), std::ptr::null());
            let json: serde_json::Value = serde_json::from_str(&take(res.result)).unwrap();
            assert_eq!(json["valid"], false);
            assert_eq!(json["kind"], "format");
        }
    }

    #[test]
    fn test_explicit_today_controls_century() {
        let input = CString::new("1212121212").unwrap();
        let early = CString::new("2010-01-01").unwrap();
        let late = CString::new("2026-10-16").unwrap();
        unsafe {
            let res = pnr_normalize(input.as_ptr(), early.as_ptr());
            assert_eq!(take(res.result), "19121212-1212");
            let res = pnr_normalize(input.as_ptr(), late.as_ptr());
            assert_eq!(take(res.result), "20121212-1212");

            let res = pnr_validate(input.as_ptr(), early.as_ptr());
            let json: serde_json::Value = serde_json::from_str(&take(res.result)).unwrap();
            assert_eq!(json["birth_date"], "1912-12-12");
        }
    }

    #[test]
    fn test_malformed_today_sets_error() {
        let input = CString::new("1212121212").unwrap();
        let bad = CString::new("16/10/2026").unwrap();
        unsafe {
            let res = pnr_validate(input.as_ptr(), bad.as_ptr());
            assert!(res.result.is_null());
            assert!(take(res.error).contains("YYYY-MM-DD"));
        }
    }
}
