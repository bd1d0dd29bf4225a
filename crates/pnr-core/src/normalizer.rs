//! Canonical normalizer — produces the `YYYYMMDD<sep>NNNC` form
//!
//! # Guarantees
//!
//! - **Idempotent**: `normalize(normalize(x)) == normalize(x)`
//! - **Deterministic**: same input and evaluation date give the same output
//! - **Shape-independent**: `YYMMDD-NNNC`, `YYMMDDNNNC`, `YYYYMMDD-NNNC` and
//!   `YYYYMMDDNNNC` of one number share a canonical form

use std::fmt;

use chrono::NaiveDate;

use crate::parser::Separator;
use crate::{Personnummer, Result};

/// Heuristic gender category derived from the serial number
///
/// Read from the second-to-last digit: even is `Female`, odd is `Male`.
/// This follows the historical assignment convention and is not
/// authoritative identity data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderHint {
    Female,
    Male,
}

impl GenderHint {
    /// Derive the hint from the digit at position 8 of the `YYMMDDNNNC` block
    pub fn from_serial_digit(digit: u8) -> Self {
        if digit % 2 == 0 {
            GenderHint::Female
        } else {
            GenderHint::Male
        }
    }
}

impl fmt::Display for GenderHint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenderHint::Female => write!(f, "female"),
            GenderHint::Male => write!(f, "male"),
        }
    }
}

// ── Public API ─────────────────────────────────────────────

/// Normalize a personnummer using today's local date for century resolution.
///
/// # Errors
/// Returns the `ValidationError` of the first failing stage.
pub fn normalize(input: &str) -> Result<String> {
    normalize_at(input, crate::today())
}

/// Normalize a personnummer against an explicit evaluation date.
pub fn normalize_at(input: &str, today: NaiveDate) -> Result<String> {
    Personnummer::parse_at(input, today).map(|pnr| pnr.normalized)
}

/// Build the canonical string from its validated parts.
///
/// `last10` must be the checked `YYMMDDNNNC` block; its final four digits
/// become the suffix.
pub fn canonical(birth_date: NaiveDate, separator: Separator, last10: &str) -> String {
    format!(
        "{}{}{}",
        birth_date.format("%Y%m%d"),
        separator.resolved(),
        &last10[6..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_canonical_default_separator() {
        let date = NaiveDate::from_ymd_opt(1981, 12, 18).unwrap();
        assert_eq!(canonical(date, Separator::None, "8112189876"), "19811218-9876");
        assert_eq!(canonical(date, Separator::Plus, "8112189876"), "19811218+9876");
    }

    #[test]
    fn test_all_shapes_share_canonical_form() {
        for raw in ["811218-9876", "8112189876", "19811218-9876", "198112189876"] {
            assert_eq!(normalize_at(raw, today()).unwrap(), "19811218-9876", "input {}", raw);
        }
    }

    #[test]
    fn test_plus_marker_is_kept() {
        assert_eq!(normalize_at("811218+9876", today()).unwrap(), "18811218+9876");
    }

    #[test]
    fn test_normalize_idempotent() {
        for raw in ["8112189876", "811218+9876", "1212121212", "000229-1235"] {
            let once = normalize_at(raw, today()).unwrap();
            let twice = normalize_at(&once, today()).unwrap();
            assert_eq!(once, twice, "normalize must be idempotent for {}", raw);
        }
    }

    #[test]
    fn test_normalize_propagates_errors() {
        assert!(normalize_at("19811218-9870", today()).is_err());
        assert!(normalize_at("", today()).is_err());
    }

    #[test]
    fn test_gender_hint_parity() {
        assert_eq!(GenderHint::from_serial_digit(7), GenderHint::Male);
        assert_eq!(GenderHint::from_serial_digit(0), GenderHint::Female);
        assert_eq!(GenderHint::from_serial_digit(8).to_string(), "female");
    }
}
