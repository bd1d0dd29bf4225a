//! Error types for personnummer validation
//!
//! Every stage of the pipeline returns `Result<T, ValidationError>`.
//! The error kind is a closed taxonomy; message text comes from `Display` only.

use std::fmt;

use crate::resolver::DatePattern;

/// Stage that rejected the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Digit count after stripping non-digits is not 10 or 12
    Format,
    /// Date fragment is not a real calendar date
    Date,
    /// Luhn check digit does not match
    Checksum,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::Format => write!(f, "format"),
            ErrorKind::Date => write!(f, "date"),
            ErrorKind::Checksum => write!(f, "checksum"),
        }
    }
}

/// Validation failure, carrying the context of the stage that detected it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid format: a personnummer must consist of 10 or 12 digits (found {found})")]
    Format { found: usize },

    #[error("Invalid date: the date part ({pattern}) '{fragment}' is not a valid calendar date")]
    Date {
        fragment: String,
        pattern: DatePattern,
    },

    #[error("Invalid check digit: the Luhn check failed")]
    Checksum { expected: u8, found: u8 },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Format { .. } => ErrorKind::Format,
            ValidationError::Date { .. } => ErrorKind::Date,
            ValidationError::Checksum { .. } => ErrorKind::Checksum,
        }
    }
}

/// Result type alias for validation stages
pub type Result<T> = std::result::Result<T, ValidationError>;
