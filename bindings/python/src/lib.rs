//! Python bindings for the personnummer validator
//!
//! Thin wrapper around `pnr-core` — ZERO logic here.
//! All behavior comes from the Rust implementation.

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn parse_today(today: Option<&str>) -> PyResult<NaiveDate> {
    match today {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|e| PyValueError::new_err(format!("today must be YYYY-MM-DD: {}", e))),
        None => Ok(pnr_core::today()),
    }
}

/// Validate a personnummer.
///
/// Never raises for malformed personnummer input; the outcome is reported
/// in the returned JSON.
///
/// Args:
///     text: personnummer in any accepted format
///     today: optional evaluation date "YYYY-MM-DD" for century resolution
///
/// Returns:
///     JSON string, either
///     {"valid": true, "normalized": "...", "birth_date": "...", "gender_hint": "..."}
///     or
///     {"valid": false, "kind": "format|date|checksum", "error": "..."}
///
/// Raises:
///     ValueError: If `today` is not a valid date
#[pyfunction]
#[pyo3(signature = (text, today=None))]
fn validate(text: &str, today: Option<&str>) -> PyResult<String> {
    let today = parse_today(today)?;
    let result = pnr_core::validate_at(text, today);

    serde_json::to_string_pretty(&result.to_json())
        .map_err(|e| PyValueError::new_err(format!("Serialization error: {}", e)))
}

/// Normalize a personnummer to the canonical YYYYMMDD-XXXX form.
///
/// Guarantees:
///   - Idempotent: normalize(normalize(x)) == normalize(x)
///
/// Args:
///     text: personnummer in any accepted format
///     today: optional evaluation date "YYYY-MM-DD" for century resolution
///
/// Raises:
///     ValueError: With the validation message if the number is invalid,
///         or if `today` is not a valid date
#[pyfunction]
#[pyo3(signature = (text, today=None))]
fn normalize(text: &str, today: Option<&str>) -> PyResult<String> {
    let today = parse_today(today)?;
    pnr_core::normalizer::normalize_at(text, today).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Compute the Luhn check digit for a nine-digit YYMMDDNNN prefix.
///
/// Raises:
///     ValueError: If the prefix does not contain exactly nine digits
#[pyfunction]
fn check_digit(prefix: &str) -> PyResult<u8> {
    let digits = pnr_core::checksum::digits(prefix);
    if digits.len() != 9 {
        return Err(PyValueError::new_err(format!(
            "expected 9 digits, found {}",
            digits.len()
        )));
    }
    Ok(pnr_core::checksum::check_digit(&digits))
}

/// pnr Python module — Swedish personnummer validation
#[pymodule]
fn pnr(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(validate, m)?)?;
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    m.add_function(wrap_pyfunction!(check_digit, m)?)?;
    Ok(())
}
