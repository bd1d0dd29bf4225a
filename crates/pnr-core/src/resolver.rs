//! Date resolver — turns the date fragment into a calendar date
//!
//! Long-form fragments (`YYYYMMDD`) carry their century and are final once
//! they pass the strict calendar check. Short-form fragments (`YYMMDD`) are
//! checked the same way and then assigned a century from the candidates
//! 18YY, 19YY and 20YY, using the century marker and the evaluation date.
//!
//! # Century rules
//!
//! - `+`: the most recent candidate at least [`CENTENARIAN_DAYS`] before
//!   `today`. Falls back to the 1900-based candidate when none qualifies.
//! - `-` or no marker: the most recent candidate not after `today`. Falls back
//!   to the 1900-based candidate when every candidate lies in the future.
//!
//! A candidate that does not exist on the calendar (29 February 1800 or 1900)
//! never qualifies. If the fallback itself does not exist, the 2000-based
//! candidate is used; it always exists for a fragment that passed the
//! calendar check.
//!
//! `today` is always an explicit argument so resolution is reproducible.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::parser::Separator;
use crate::{Result, ValidationError};

/// Age in days treated as "100 years or older" (100 × 365.25)
pub const CENTENARIAN_DAYS: i64 = 36525;

const CENTURY_BASES: [i32; 3] = [1800, 1900, 2000];

/// Shape of the date fragment being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// `YYYYMMDD`, from a 12-digit input
    Long,
    /// `YYMMDD`, from a 10-digit input
    Short,
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DatePattern::Long => write!(f, "YYYYMMDD"),
            DatePattern::Short => write!(f, "YYMMDD"),
        }
    }
}

// ── Public API ────────────────────────────────────────────

/// Resolve a date fragment to a full calendar date.
///
/// # Errors
/// Returns `ValidationError::Date` if the fragment is not 6 or 8 ASCII
/// digits or does not name a real calendar date.
pub fn resolve_date(fragment: &str, separator: Separator, today: NaiveDate) -> Result<NaiveDate> {
    let parsed = parse_fragment(fragment)?;
    if fragment.len() == 8 {
        return Ok(parsed);
    }
    Ok(resolve_century(parsed, separator, today))
}

/// Strictly parse a `YYYYMMDD` or `YYMMDD` fragment.
///
/// Short fragments are checked against the 2000-based year. 18YY, 19YY and
/// 20YY share leap status except for YY = 00, where only 2000 is a leap year,
/// so this accepts exactly the fragments that exist in at least one century.
pub fn parse_fragment(fragment: &str) -> Result<NaiveDate> {
    let pattern = match fragment.len() {
        8 => DatePattern::Long,
        _ => DatePattern::Short,
    };
    let invalid = || ValidationError::Date {
        fragment: fragment.to_string(),
        pattern,
    };

    if !matches!(fragment.len(), 6 | 8) || !fragment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let (year_part, rest) = fragment.split_at(fragment.len() - 4);
    let year: i32 = year_part.parse().map_err(|_| invalid())?;
    let month: u32 = rest[..2].parse().map_err(|_| invalid())?;
    let day: u32 = rest[2..].parse().map_err(|_| invalid())?;

    let year = match pattern {
        // Year 0000 is not a representable civil year
        DatePattern::Long if year == 0 => return Err(invalid()),
        DatePattern::Long => year,
        DatePattern::Short => 2000 + year,
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// The 1800-, 1900- and 2000-based readings of a two-digit-year date.
///
/// Only the last two digits of `short.year()` are used. Entries are `None`
/// where the date does not exist in that century.
pub fn century_candidates(short: NaiveDate) -> [Option<NaiveDate>; 3] {
    let yy = short.year().rem_euclid(100);
    CENTURY_BASES.map(|base| NaiveDate::from_ymd_opt(base + yy, short.month(), short.day()))
}

/// Pick the century for a short-form date.
pub fn resolve_century(short: NaiveDate, separator: Separator, today: NaiveDate) -> NaiveDate {
    let candidates = century_candidates(short);
    let existing = candidates.iter().flatten().copied();

    let chosen = match separator {
        Separator::Plus => existing
            .filter(|d| today.signed_duration_since(*d).num_days() >= CENTENARIAN_DAYS)
            .max(),
        Separator::Hyphen | Separator::None => existing.filter(|d| *d <= today).max(),
    };

    match chosen {
        Some(date) => {
            tracing::trace!(%separator, year = date.year(), "century resolved");
            date
        }
        None => {
            let fallback = fallback_candidate(&candidates, short);
            tracing::trace!(%separator, year = fallback.year(), "no qualifying century, using fallback");
            fallback
        }
    }
}

fn fallback_candidate(candidates: &[Option<NaiveDate>; 3], short: NaiveDate) -> NaiveDate {
    // [1800, 1900, 2000]
    candidates[1].or(candidates[2]).unwrap_or(short)
}
