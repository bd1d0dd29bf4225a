//! Parsed input types — the structural view of a personnummer token
//!
//! A `ParsedInput` is only ever constructed by `parser::parse`, so its digit
//! sequence is guaranteed to hold exactly 10 or 12 ASCII digits.

use std::fmt;

/// Length of a digit sequence written with a four-digit year
pub const LONG_FORM_DIGITS: usize = 12;

/// Length of a digit sequence written with a two-digit year
pub const SHORT_FORM_DIGITS: usize = 10;

/// Century marker found in the raw token
///
/// `Plus` means the bearer is (or would be) at least 100 years old at
/// evaluation time. `Hyphen` and `None` both mean younger than 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    #[default]
    None,
    Plus,
    Hyphen,
}

impl Separator {
    /// Detect the marker by presence only; position is not checked.
    /// `+` wins over `-` when both occur.
    pub fn detect(text: &str) -> Self {
        if text.contains('+') {
            Separator::Plus
        } else if text.contains('-') {
            Separator::Hyphen
        } else {
            Separator::None
        }
    }

    /// Character written into the canonical form (`-` when none was given)
    pub fn resolved(self) -> char {
        match self {
            Separator::Plus => '+',
            Separator::Hyphen | Separator::None => '-',
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Separator::None => write!(f, "none"),
            Separator::Plus => write!(f, "+"),
            Separator::Hyphen => write!(f, "-"),
        }
    }
}

/// Digit sequence plus century marker, as extracted from the raw token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    pub(crate) digits: String,
    pub(crate) separator: Separator,
}

impl ParsedInput {
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    /// True for the 12-digit `YYYYMMDDNNNC` shape
    pub fn is_long_form(&self) -> bool {
        self.digits.len() == LONG_FORM_DIGITS
    }

    /// `YYYYMMDD` for long form, `YYMMDD` for short form
    pub fn date_fragment(&self) -> &str {
        if self.is_long_form() {
            &self.digits[..8]
        } else {
            &self.digits[..6]
        }
    }

    /// The `YYMMDDNNNC` block consumed by the checksum
    pub fn last10(&self) -> &str {
        &self.digits[self.digits.len() - SHORT_FORM_DIGITS..]
    }
}
