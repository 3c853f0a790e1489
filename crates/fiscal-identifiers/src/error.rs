//! Error types for fiscal-identifiers

use thiserror::Error;

use crate::IdentifierKind;

/// Result type alias for identifier validation
pub type Result<T> = std::result::Result<T, IdentifierError>;

/// Why a value was rejected by a validator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Nothing left after normalization
    #[error("no value provided")]
    Empty,

    /// Normalized digit count does not fit the identifier
    #[error("{kind} must have {expected} digits, found {found}")]
    WrongLength {
        kind: IdentifierKind,
        expected: String,
        found: usize,
    },

    /// Every digit is the same (`000.000.000-00`)
    #[error("{kind} cannot repeat a single digit")]
    RepeatedDigits { kind: IdentifierKind },

    /// A supplied check digit differs from the computed one
    #[error("{kind} check digit at position {position} should be {expected}, found {found}")]
    CheckDigitMismatch {
        kind: IdentifierKind,
        position: usize,
        expected: u8,
        found: u8,
    },

    /// An 11-digit phone number whose subscriber part does not start with 9
    #[error("mobile numbers must start with 9 after the area code, found {found}")]
    MobilePrefix { found: char },

    /// Structural mismatch for non-numeric identifiers (e-mail)
    #[error("malformed {kind}")]
    Malformed { kind: &'static str },

    /// The kind has no validator
    #[error("unsupported identifier kind")]
    UnsupportedKind,
}

impl IdentifierError {
    /// Short machine-readable reason, used in logs and JSON output
    pub fn code(&self) -> &'static str {
        match self {
            IdentifierError::Empty => "empty",
            IdentifierError::WrongLength { .. } => "wrong_length",
            IdentifierError::RepeatedDigits { .. } => "repeated_digits",
            IdentifierError::CheckDigitMismatch { .. } => "check_digit_mismatch",
            IdentifierError::MobilePrefix { .. } => "mobile_prefix",
            IdentifierError::Malformed { .. } => "malformed",
            IdentifierError::UnsupportedKind => "unsupported_kind",
        }
    }
}

/// Emit a trace event for a rejected value and pass the result through.
///
/// Only the kind and the reason are logged, never the value itself.
pub(crate) fn traced<T>(kind: IdentifierKind, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        tracing::trace!(%kind, reason = err.code(), "identifier rejected");
    }
    result
}
