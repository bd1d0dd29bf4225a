//! Property tests for personnummer validation
//!
//! Every property runs against a fixed evaluation date unless the property
//! is about the evaluation date itself.

use chrono::{Datelike, Days, NaiveDate};
use pnr_core::checksum::{check_digit, digits};
use pnr_core::resolver::{resolve_date, CENTENARIAN_DAYS};
use pnr_core::{validate_at, ErrorKind, Separator};
use proptest::prelude::*;

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// Birth date whose short form is unambiguous against `fixed_today`
fn recent_birth_date() -> impl Strategy<Value = NaiveDate> {
    (1930i32..=2025, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Three-digit serial
fn serial() -> impl Strategy<Value = String> {
    (0u32..1000).prop_map(|n| format!("{:03}", n))
}

/// Evaluation dates for which every century candidate can be compared
fn evaluation_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..36500).prop_map(|n| {
        NaiveDate::from_ymd_opt(2000, 3, 1)
            .unwrap()
            .checked_add_days(Days::new(n))
            .unwrap()
    })
}

/// `YYMMDDNNN` + computed check digit
fn block(date: NaiveDate, serial: &str) -> String {
    let prefix = format!("{}{}", date.format("%y%m%d"), serial);
    format!("{}{}", prefix, check_digit(&digits(&prefix)))
}

proptest! {
    // ── Totality ───────────────────────────────────────

    #[test]
    fn test_any_input_yields_a_result(input in "\\PC*") {
        let result = validate_at(&input, fixed_today());
        if !result.is_valid() {
            prop_assert!(!result.error_message().is_empty());
        }
    }

    #[test]
    fn test_wrong_digit_count_is_format_error(
        digits in prop_oneof!["[0-9]{0,9}", "[0-9]{11}", "[0-9]{13,20}"],
        noise in "[a-zA-Z /]{0,5}",
    ) {
        let input = format!("{}{}", noise, digits);
        let result = validate_at(&input, fixed_today());
        prop_assert_eq!(result.error_kind(), Some(ErrorKind::Format));
        let msg = result.error_message();
        prop_assert!(msg.contains("10 or 12 digits"), "message: {}", msg);
    }

    // ── Checksum ───────────────────────────────────────

    #[test]
    fn test_only_one_check_digit_is_valid(date in recent_birth_date(), serial in serial()) {
        let block = block(date, &serial);
        let long = format!("{}{}-{}", date.format("%C"), &block[..6], &block[6..]);
        prop_assert!(validate_at(&long, fixed_today()).is_valid());

        let valid_digit = block.as_bytes()[9];
        for replacement in b'0'..=b'9' {
            if replacement == valid_digit {
                continue;
            }
            let mut tampered = long.clone().into_bytes();
            let last = tampered.len() - 1;
            tampered[last] = replacement;
            let tampered = String::from_utf8(tampered).unwrap();
            let result = validate_at(&tampered, fixed_today());
            prop_assert_eq!(result.error_kind(), Some(ErrorKind::Checksum));
        }
    }

    // ── Normalization ──────────────────────────────────

    #[test]
    fn test_all_shapes_normalize_identically(date in recent_birth_date(), serial in serial()) {
        let block = block(date, &serial);
        let century = date.format("%C").to_string();
        let shapes = [
            format!("{}-{}", &block[..6], &block[6..]),
            block.clone(),
            format!("{}{}-{}", century, &block[..6], &block[6..]),
            format!("{}{}", century, block),
        ];

        let expected = format!("{}-{}", date.format("%Y%m%d"), &block[6..]);
        for shape in &shapes {
            let result = validate_at(shape, fixed_today());
            prop_assert_eq!(result.normalized(), Some(expected.as_str()), "shape {}", shape);
            prop_assert_eq!(result.birth_date(), Some(date));
        }
    }

    #[test]
    fn test_normalization_is_idempotent(
        date in recent_birth_date(),
        serial in serial(),
        plus in any::<bool>(),
    ) {
        let block = block(date, &serial);
        let sep = if plus { '+' } else { '-' };
        let input = format!("{}{}{}", &block[..6], sep, &block[6..]);

        let first = validate_at(&input, fixed_today());
        let normalized = first.normalized().unwrap().to_string();
        let second = validate_at(&normalized, fixed_today());
        prop_assert_eq!(second.normalized(), Some(normalized.as_str()));
        prop_assert_eq!(first.birth_date(), second.birth_date());
    }

    // ── Century resolution ─────────────────────────────

    #[test]
    fn test_hyphen_resolves_to_latest_past_candidate(
        yy in 0i32..100,
        month in 1u32..=12,
        day in 1u32..=28,
        today in evaluation_date(),
        hyphen in any::<bool>(),
    ) {
        let fragment = format!("{:02}{:02}{:02}", yy, month, day);
        let separator = if hyphen { Separator::Hyphen } else { Separator::None };
        let resolved = resolve_date(&fragment, separator, today).unwrap();

        prop_assert_eq!(resolved.year().rem_euclid(100), yy);
        prop_assert!(resolved <= today);
        let next = NaiveDate::from_ymd_opt(resolved.year() + 100, month, day).unwrap();
        prop_assert!(next > today);
    }

    #[test]
    fn test_plus_resolves_to_latest_centenarian_candidate(
        yy in 0i32..100,
        month in 1u32..=12,
        day in 1u32..=28,
        today in evaluation_date(),
    ) {
        let fragment = format!("{:02}{:02}{:02}", yy, month, day);
        let resolved = resolve_date(&fragment, Separator::Plus, today).unwrap();

        prop_assert_eq!(resolved.year().rem_euclid(100), yy);
        prop_assert!((today - resolved).num_days() >= CENTENARIAN_DAYS);
        let next = NaiveDate::from_ymd_opt(resolved.year() + 100, month, day).unwrap();
        prop_assert!((today - next).num_days() < CENTENARIAN_DAYS);
    }
}
