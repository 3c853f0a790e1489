//! Composite validators: document dispatch, CEP, phone and e-mail

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::checksum::require_len;
use crate::error::traced;
use crate::{
    normalize, validate_cnpj, validate_cpf, validate_state_registration_mg, DocumentKind,
    IdentifierError, IdentifierKind, Result,
};

lazy_static! {
    // Syntactic sanity check only: local@domain.tld without spaces
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s]+$").unwrap();
}

/// Landline or mobile, as told apart by digit count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "snake_case")]
pub enum PhoneKind {
    /// Area code + 8 digits
    Landline,
    /// Area code + 9 + 8 digits
    Mobile,
}

/// Validate a CPF or CNPJ, choosing the algorithm from the normalized length
///
/// # Examples
/// ```
/// use fiscal_identifiers::{validate_document, DocumentKind};
/// assert_eq!(validate_document("529.982.247-25"), Ok(DocumentKind::Cpf));
/// assert_eq!(validate_document("11.222.333/0001-81"), Ok(DocumentKind::Cnpj));
/// assert!(validate_document("1234").is_err());
/// ```
pub fn validate_document(raw: &str) -> Result<DocumentKind> {
    let digits = normalize(raw);
    let kind = DocumentKind::from_len(digits.len());
    match kind {
        DocumentKind::Cpf => validate_cpf(&digits).map(|_| kind),
        DocumentKind::Cnpj => validate_cnpj(&digits).map(|_| kind),
        DocumentKind::Unknown if digits.is_empty() => Err(IdentifierError::Empty),
        DocumentKind::Unknown => Err(IdentifierError::WrongLength {
            kind: IdentifierKind::Unknown,
            expected: "11 or 14".to_string(),
            found: digits.len(),
        }),
    }
}

/// Check whether `raw` is a valid CPF (11 digits) or CNPJ (14 digits)
pub fn is_valid_document(raw: &str) -> bool {
    validate_document(raw).is_ok()
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn is_valid_document_ffi(raw: String) -> bool {
    is_valid_document(&raw)
}

/// Validate a CEP (postal code), returning its 8 digits.
///
/// There is no check digit; any 8 digits pass. Treating an empty CEP as
/// "not provided" is up to the caller.
pub fn validate_cep(raw: &str) -> Result<String> {
    let digits = normalize(raw);
    traced(IdentifierKind::Cep, require_len(IdentifierKind::Cep, &digits)).map(|_| digits)
}

/// Check whether `raw` has exactly 8 digits
pub fn is_valid_cep(raw: &str) -> bool {
    validate_cep(raw).is_ok()
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn is_valid_cep_ffi(raw: String) -> bool {
    is_valid_cep(&raw)
}

fn check_phone(digits: &str) -> Result<PhoneKind> {
    require_len(IdentifierKind::Phone, digits)?;
    if digits.len() == 10 {
        return Ok(PhoneKind::Landline);
    }
    match digits.as_bytes()[2] {
        b'9' => Ok(PhoneKind::Mobile),
        other => Err(IdentifierError::MobilePrefix {
            found: char::from(other),
        }),
    }
}

/// Validate a phone number with area code
pub fn validate_phone(raw: &str) -> Result<PhoneKind> {
    traced(IdentifierKind::Phone, check_phone(&normalize(raw)))
}

/// Check whether `raw` is a 10-digit landline or an 11-digit mobile number
/// whose third digit is 9
pub fn is_valid_phone(raw: &str) -> bool {
    validate_phone(raw).is_ok()
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn is_valid_phone_ffi(raw: String) -> bool {
    is_valid_phone(&raw)
}

/// Validate the shape of an e-mail address (not full RFC 5322)
pub fn validate_email(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if EMAIL_PATTERN.is_match(raw) {
        Ok(raw.to_string())
    } else {
        tracing::trace!(reason = "malformed", "e-mail rejected");
        Err(IdentifierError::Malformed { kind: "e-mail" })
    }
}

/// Check whether `raw` looks like `local@domain.tld`
pub fn is_valid_email(raw: &str) -> bool {
    validate_email(raw).is_ok()
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn is_valid_email_ffi(raw: String) -> bool {
    is_valid_email(&raw)
}

/// Validate `raw` as the given kind, returning its normalized digits
pub fn validate(kind: IdentifierKind, raw: &str) -> Result<String> {
    match kind {
        IdentifierKind::Cpf => validate_cpf(raw),
        IdentifierKind::Cnpj => validate_cnpj(raw),
        IdentifierKind::Cep => validate_cep(raw),
        IdentifierKind::Phone => validate_phone(raw).map(|_| normalize(raw)),
        IdentifierKind::StateRegistrationMg => validate_state_registration_mg(raw),
        IdentifierKind::Unknown => Err(IdentifierError::UnsupportedKind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_dispatch() {
        assert!(is_valid_document("529.982.247-25"));
        assert!(is_valid_document("11222333000181"));
        assert!(!is_valid_document("111.111.111-11"));
        assert!(!is_valid_document("00.000.000/0000-00"));
        assert!(!is_valid_document("529.982.247"));
        assert_eq!(validate_document(""), Err(IdentifierError::Empty));
    }

    #[test]
    fn test_document_dispatch_ignores_punctuation() {
        // A CPF typed with a CNPJ-style mask is still checked as a CPF
        assert_eq!(validate_document("52.998.224/72-5"), Ok(DocumentKind::Cpf));
    }

    #[test]
    fn test_cep() {
        assert!(is_valid_cep("01310-100"));
        assert!(is_valid_cep("01310100"));
        assert!(!is_valid_cep("123"));
        assert!(!is_valid_cep("01310-1000"));
        assert_eq!(validate_cep(""), Err(IdentifierError::Empty));
    }

    #[test]
    fn test_phone() {
        assert_eq!(validate_phone("11912345678"), Ok(PhoneKind::Mobile));
        assert_eq!(validate_phone("(11) 2345-6789"), Ok(PhoneKind::Landline));
        assert_eq!(
            validate_phone("11812345678"),
            Err(IdentifierError::MobilePrefix { found: '8' })
        );
        assert!(!is_valid_phone("912345678"));
        assert!(!is_valid_phone("551191234567"));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("compras@hortifruti.com.br"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("compras@hortifruti"));
        assert!(!is_valid_email("compras hortifruti@x.com"));
        assert!(!is_valid_email("@hortifruti.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_validate_by_kind() {
        assert_eq!(
            validate(IdentifierKind::Phone, "(31) 99876-5432"),
            Ok("31998765432".to_string())
        );
        assert_eq!(
            validate(IdentifierKind::Unknown, "123"),
            Err(IdentifierError::UnsupportedKind)
        );
    }
}
