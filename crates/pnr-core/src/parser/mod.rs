//! Personnummer parser — classifies a raw token into digits + century marker
//!
//! Accepted shapes: `YYMMDD-NNNC`, `YYMMDDNNNC`, `YYYYMMDD-NNNC`,
//! `YYYYMMDDNNNC`, each optionally using `+` instead of `-`.
//! Anything that is not an ASCII digit is discarded, so `19811218 9876`
//! and `19 81 12 18-98 76` parse the same as `19811218-9876`.

pub mod input;

pub use input::{ParsedInput, Separator, LONG_FORM_DIGITS, SHORT_FORM_DIGITS};

use crate::{Result, ValidationError};

/// Parse a raw token into a digit sequence and separator.
///
/// # Errors
/// Returns `ValidationError::Format` when the digit count is neither 10
/// nor 12. No date or checksum logic runs on such input.
pub fn parse(raw: &str) -> Result<ParsedInput> {
    let trimmed = raw.trim();
    let separator = Separator::detect(trimmed);
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        SHORT_FORM_DIGITS | LONG_FORM_DIGITS => Ok(ParsedInput { digits, separator }),
        found => Err(ValidationError::Format { found }),
    }
}
