//! Luhn check digit for the `YYMMDDNNNC` block
//!
//! Positions 0..9 are weighted 2,1,2,1,… ; two-digit products are reduced to
//! their digit sum (`p - 9`), and the check digit is `(10 - sum % 10) % 10`.
//! The century digits of a 12-digit input never take part.

use crate::{Result, ValidationError};

/// Decimal digits of `text`, ignoring every non-digit character
pub fn digits(text: &str) -> Vec<u8> {
    text.bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

/// Compute the check digit for the first nine digits of the block.
///
/// Only the first nine entries of `first9` are read; shorter input is
/// treated as if padded with zeros.
pub fn check_digit(first9: &[u8]) -> u8 {
    let sum: u32 = first9
        .iter()
        .take(9)
        .enumerate()
        .map(|(i, &d)| {
            let weight = if i % 2 == 0 { 2 } else { 1 };
            let product = u32::from(d) * weight;
            if product > 9 {
                product - 9
            } else {
                product
            }
        })
        .sum();

    ((10 - sum % 10) % 10) as u8
}

/// Verify the tenth digit of `last10` against the computed check digit.
///
/// # Errors
/// Returns `ValidationError::Checksum` on mismatch, or
/// `ValidationError::Format` if `last10` does not hold exactly ten digits.
pub fn verify(last10: &str) -> Result<()> {
    let digits = digits(last10);
    if digits.len() != 10 {
        return Err(ValidationError::Format {
            found: digits.len(),
        });
    }

    let expected = check_digit(&digits[..9]);
    let found = digits[9];
    if expected == found {
        Ok(())
    } else {
        Err(ValidationError::Checksum { expected, found })
    }
}
