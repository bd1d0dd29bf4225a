//! pnr-core - validation and normalization of Swedish personal identity numbers
//!
//! This crate holds all personnummer semantics. The CLI and the language
//! bindings are thin shells over [`validate`].
//!
//! # Architecture
//!
//! ```text
//! raw token → Parser → digits + century marker
//!                ↓
//!             Date Resolver → birth date (century from marker + today)
//!                ↓
//!             Checksum → Luhn over YYMMDDNNNC
//!                ↓
//!             Normalizer → YYYYMMDD<sep>NNNC + gender hint
//! ```
//!
//! Each stage short-circuits: the first failing stage decides the error.
//!
//! # Guarantees
//!
//! - **Total**: every input maps to `Valid` or `Invalid`, nothing panics
//! - **Deterministic**: same input and evaluation date give the same result
//! - **Canonical**: one normalized form per number

pub mod checksum;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod redact;
pub mod resolver;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

pub use error::{ErrorKind, Result, ValidationError};
pub use normalizer::GenderHint;
pub use parser::Separator;

/// The evaluation date used when none is injected: the local calendar date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A validated personnummer with its derived facts
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Personnummer {
    pub normalized: String,
    pub birth_date: NaiveDate,
    pub gender_hint: GenderHint,
    pub separator: Separator,
}

impl Personnummer {
    /// Parse and validate against today's local date.
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_at(input, today())
    }

    /// Parse and validate against an explicit evaluation date.
    ///
    /// # Errors
    /// `Format` for a wrong digit count, `Date` for an impossible date,
    /// `Checksum` for a bad check digit. Stages run in that order.
    pub fn parse_at(input: &str, today: NaiveDate) -> Result<Self> {
        let parsed = traced_stage("parse", parser::parse(input))?;
        let separator = parsed.separator();
        let birth_date = traced_stage(
            "resolve",
            resolver::resolve_date(parsed.date_fragment(), separator, today),
        )?;

        let last10 = parsed.last10();
        traced_stage("checksum", checksum::verify(last10))?;

        let serial_digit = last10.as_bytes()[8] - b'0';
        Ok(Self {
            normalized: normalizer::canonical(birth_date, separator, last10),
            birth_date,
            gender_hint: GenderHint::from_serial_digit(serial_digit),
            separator,
        })
    }
}

impl FromStr for Personnummer {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Personnummer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

/// Emit one debug event per stage outcome and pass the result through
fn traced_stage<T>(stage: &'static str, result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => tracing::debug!(stage = %stage, "stage passed"),
        Err(err) => tracing::debug!(stage = %stage, kind = %err.kind(), "stage failed"),
    }
    result
}

/// Outcome of [`validate`]: exactly one of valid or invalid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(Personnummer),
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub fn personnummer(&self) -> Option<&Personnummer> {
        match self {
            ValidationResult::Valid(pnr) => Some(pnr),
            ValidationResult::Invalid(_) => None,
        }
    }

    pub fn normalized(&self) -> Option<&str> {
        self.personnummer().map(|pnr| pnr.normalized.as_str())
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.personnummer().map(|pnr| pnr.birth_date)
    }

    pub fn gender_hint(&self) -> Option<GenderHint> {
        self.personnummer().map(|pnr| pnr.gender_hint)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid(err) => Some(err),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(ValidationError::kind)
    }

    /// Human-readable error text; empty when valid
    pub fn error_message(&self) -> String {
        self.error().map(ToString::to_string).unwrap_or_default()
    }

    /// Machine-readable form shared by the CLI and the bindings
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ValidationResult::Valid(pnr) => serde_json::json!({
                "valid": true,
                "normalized": pnr.normalized,
                "birth_date": pnr.birth_date.format("%Y-%m-%d").to_string(),
                "gender_hint": pnr.gender_hint.to_string(),
            }),
            ValidationResult::Invalid(err) => serde_json::json!({
                "valid": false,
                "kind": err.kind().to_string(),
                "error": err.to_string(),
            }),
        }
    }
}

impl From<Result<Personnummer>> for ValidationResult {
    fn from(result: Result<Personnummer>) -> Self {
        match result {
            Ok(pnr) => ValidationResult::Valid(pnr),
            Err(err) => ValidationResult::Invalid(err),
        }
    }
}

/// Validate a personnummer against today's local date.
pub fn validate(input: &str) -> ValidationResult {
    validate_at(input, today())
}

/// Validate a personnummer against an explicit evaluation date.
///
/// Never panics, whatever the input.
pub fn validate_at(input: &str, today: NaiveDate) -> ValidationResult {
    let span = tracing::debug_span!("validate", fingerprint = tracing::field::Empty);
    if !span.is_disabled() {
        let fingerprint = redact::fingerprint(input);
        span.record("fingerprint", tracing::field::display(&fingerprint));
    }
    let _guard = span.enter();

    let result = ValidationResult::from(Personnummer::parse_at(input, today));
    match &result {
        ValidationResult::Valid(pnr) => {
            tracing::debug!(gender_hint = %pnr.gender_hint, "personnummer valid");
        }
        ValidationResult::Invalid(err) => {
            tracing::debug!(kind = %err.kind(), "personnummer invalid");
        }
    }

    result
}
