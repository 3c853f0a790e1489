//! Check-digit algorithms: CPF and CNPJ (modulo 11) and IE-MG (modulo 10)

use crate::digits::digit_values;
use crate::error::traced;
use crate::{
    all_same_digit, mod11_check_digit, normalize, IdentifierError, IdentifierKind, Result,
};

/// Weighted sum where the first digit gets `top` and each following digit
/// one less (CPF: 10..=2, then 11..=2)
fn descending_sum(values: &[u8], top: u32) -> u32 {
    values
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (top - i as u32))
        .sum()
}

/// Weighted sum with CNPJ weights: walking right to left, 2 through 9 and
/// then back to 2. Over 12 digits this reads `5,4,3,2,9,8,7,6,5,4,3,2`.
fn cyclic_sum(values: &[u8]) -> u32 {
    values
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (2 + (i as u32 % 8)))
        .sum()
}

/// Values of `base` when it is exactly `len` ASCII digits
fn strict_digits(base: &str, len: usize) -> Option<Vec<u8>> {
    if base.len() == len && base.bytes().all(|b| b.is_ascii_digit()) {
        Some(digit_values(base))
    } else {
        None
    }
}

pub(crate) fn require_len(kind: IdentifierKind, digits: &str) -> Result<()> {
    if digits.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if !kind.accepts_len(digits.len()) {
        return Err(IdentifierError::WrongLength {
            kind,
            expected: kind.expected_description(),
            found: digits.len(),
        });
    }
    Ok(())
}

fn compare(kind: IdentifierKind, position: usize, expected: u8, found: u8) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(IdentifierError::CheckDigitMismatch {
            kind,
            position,
            expected,
            found,
        })
    }
}

/// Both CPF check digits for a 9-digit base
///
/// # Examples
/// ```
/// use fiscal_identifiers::cpf_check_digits;
/// assert_eq!(cpf_check_digits("529982247"), Some([2, 5]));
/// assert_eq!(cpf_check_digits("5299822"), None);
/// ```
pub fn cpf_check_digits(base: &str) -> Option<[u8; 2]> {
    let mut values = strict_digits(base, 9)?;
    let first = mod11_check_digit(descending_sum(&values, 10));
    values.push(first);
    let second = mod11_check_digit(descending_sum(&values, 11));
    Some([first, second])
}

/// Both CNPJ check digits for a 12-digit base
pub fn cnpj_check_digits(base: &str) -> Option<[u8; 2]> {
    let mut values = strict_digits(base, 12)?;
    let first = mod11_check_digit(cyclic_sum(&values));
    values.push(first);
    let second = mod11_check_digit(cyclic_sum(&values));
    Some([first, second])
}

/// IE-MG check digit for a 12-digit base.
///
/// Weights alternate `1,2,1,2,...`; a product of two digits is reduced to the
/// sum of its digits before accumulating. The digit is `10 - total % 10`, with
/// 10 mapped to 0.
pub fn ie_mg_check_digit(base: &str) -> Option<u8> {
    let values = strict_digits(base, 12)?;
    let total: u32 = values
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let product = u32::from(d) * if i % 2 == 0 { 1 } else { 2 };
            if product >= 10 {
                product / 10 + product % 10
            } else {
                product
            }
        })
        .sum();
    Some(match 10 - (total % 10) {
        10 => 0,
        digit => digit as u8,
    })
}

fn check_cpf(digits: String) -> Result<String> {
    let kind = IdentifierKind::Cpf;
    require_len(kind, &digits)?;
    // Must run before the arithmetic: 111.111.111-11 has a matching checksum
    if all_same_digit(&digits) {
        return Err(IdentifierError::RepeatedDigits { kind });
    }
    let values = digit_values(&digits);
    let first = mod11_check_digit(descending_sum(&values[..9], 10));
    compare(kind, 9, first, values[9])?;
    let second = mod11_check_digit(descending_sum(&values[..10], 11));
    compare(kind, 10, second, values[10])?;
    Ok(digits)
}

fn check_cnpj(digits: String) -> Result<String> {
    let kind = IdentifierKind::Cnpj;
    require_len(kind, &digits)?;
    if all_same_digit(&digits) {
        return Err(IdentifierError::RepeatedDigits { kind });
    }
    let values = digit_values(&digits);
    let first = mod11_check_digit(cyclic_sum(&values[..12]));
    compare(kind, 12, first, values[12])?;
    let second = mod11_check_digit(cyclic_sum(&values[..13]));
    compare(kind, 13, second, values[13])?;
    Ok(digits)
}

fn check_ie_mg(digits: String) -> Result<String> {
    let kind = IdentifierKind::StateRegistrationMg;
    require_len(kind, &digits)?;
    let expected = ie_mg_check_digit(&digits[..12]).ok_or(IdentifierError::Malformed {
        kind: "state registration",
    })?;
    compare(kind, 12, expected, digits.as_bytes()[12] - b'0')?;
    Ok(digits)
}

/// Validate a CPF, returning its normalized digits
pub fn validate_cpf(raw: &str) -> Result<String> {
    traced(IdentifierKind::Cpf, check_cpf(normalize(raw)))
}

/// Validate a CNPJ, returning its normalized digits
pub fn validate_cnpj(raw: &str) -> Result<String> {
    traced(IdentifierKind::Cnpj, check_cnpj(normalize(raw)))
}

/// Validate a Minas Gerais state registration, returning its normalized digits.
///
/// Only the MG algorithm is implemented; registrations from other states
/// use different check digits and will generally be rejected.
pub fn validate_state_registration_mg(raw: &str) -> Result<String> {
    traced(
        IdentifierKind::StateRegistrationMg,
        check_ie_mg(normalize(raw)),
    )
}

/// Check whether `raw` is a valid CPF
pub fn is_valid_cpf(raw: &str) -> bool {
    validate_cpf(raw).is_ok()
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn is_valid_cpf_ffi(raw: String) -> bool {
    is_valid_cpf(&raw)
}

/// Check whether `raw` is a valid CNPJ
pub fn is_valid_cnpj(raw: &str) -> bool {
    validate_cnpj(raw).is_ok()
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn is_valid_cnpj_ffi(raw: String) -> bool {
    is_valid_cnpj(&raw)
}

/// Check whether `raw` is a valid Minas Gerais state registration
pub fn is_valid_state_registration_mg(raw: &str) -> bool {
    validate_state_registration_mg(raw).is_ok()
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn is_valid_state_registration_mg_ffi(raw: String) -> bool {
    is_valid_state_registration_mg(&raw)
}
