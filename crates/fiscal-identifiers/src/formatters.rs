//! Display masks for identifiers
//!
//! Masks are templates where `#` takes the next digit and anything else is
//! copied literally. CPF, CNPJ, CEP and phone masks are applied only when
//! the digit count matches exactly; otherwise the input is returned as typed.
//! The IE-MG mask fills progressively so it can run on every keystroke.

use crate::{normalize, DocumentKind, IdentifierKind};

const CPF_MASK: &str = "###.###.###-##";
const CNPJ_MASK: &str = "##.###.###/####-##";
const CEP_MASK: &str = "#####-###";
const MOBILE_MASK: &str = "(##) #####-####";
const LANDLINE_MASK: &str = "(##) ####-####";
const IE_MG_MASK: &str = "###.###.###.####";

/// Fill `mask` with `digits` until the digits run out.
///
/// Literal characters are emitted only when another digit follows, so a
/// partial fill never ends in a separator.
fn fill_mask(digits: &str, mask: &str) -> String {
    let mut out = String::with_capacity(mask.len());
    let mut pending = String::new();
    let mut remaining = digits.chars();

    for slot in mask.chars() {
        if slot != '#' {
            pending.push(slot);
            continue;
        }
        match remaining.next() {
            Some(digit) => {
                out.push_str(&pending);
                pending.clear();
                out.push(digit);
            }
            None => break,
        }
    }
    out
}

/// Length did not match the mask: hand back what the user typed
fn passthrough(raw: &str) -> String {
    raw.to_string()
}

/// `52998224725` → `529.982.247-25`
///
/// # Examples
/// ```
/// use fiscal_identifiers::format_cpf;
/// assert_eq!(format_cpf("52998224725"), "529.982.247-25");
/// assert_eq!(format_cpf("529982"), "529982");
/// ```
pub fn format_cpf(raw: &str) -> String {
    let digits = normalize(raw);
    match digits.len() {
        11 => fill_mask(&digits, CPF_MASK),
        _ => passthrough(raw),
    }
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn format_cpf_ffi(raw: String) -> String {
    format_cpf(&raw)
}

/// `11222333000181` → `11.222.333/0001-81`
pub fn format_cnpj(raw: &str) -> String {
    let digits = normalize(raw);
    match digits.len() {
        14 => fill_mask(&digits, CNPJ_MASK),
        _ => passthrough(raw),
    }
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn format_cnpj_ffi(raw: String) -> String {
    format_cnpj(&raw)
}

/// `01310100` → `01310-100`
pub fn format_cep(raw: &str) -> String {
    let digits = normalize(raw);
    match digits.len() {
        8 => fill_mask(&digits, CEP_MASK),
        _ => passthrough(raw),
    }
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn format_cep_ffi(raw: String) -> String {
    format_cep(&raw)
}

/// `11912345678` → `(11) 91234-5678`, `1123456789` → `(11) 2345-6789`
pub fn format_phone(raw: &str) -> String {
    let digits = normalize(raw);
    match digits.len() {
        11 => fill_mask(&digits, MOBILE_MASK),
        10 => fill_mask(&digits, LANDLINE_MASK),
        _ => passthrough(raw),
    }
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn format_phone_ffi(raw: String) -> String {
    format_phone(&raw)
}

/// Progressive `XXX.XXX.XXX.XXXX` mask; digits past the thirteenth are dropped
pub fn format_state_registration_mg(raw: &str) -> String {
    let digits = normalize(raw);
    let end = digits.len().min(13);
    fill_mask(&digits[..end], IE_MG_MASK)
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn format_state_registration_mg_ffi(raw: String) -> String {
    format_state_registration_mg(&raw)
}

/// CPF or CNPJ mask, picked by normalized length
pub fn format_document(raw: &str) -> String {
    match DocumentKind::classify(raw) {
        DocumentKind::Cpf => format_cpf(raw),
        DocumentKind::Cnpj => format_cnpj(raw),
        DocumentKind::Unknown => passthrough(raw),
    }
}

/// Apply the mask for `kind`; `Unknown` returns the input unchanged
pub fn format(kind: IdentifierKind, raw: &str) -> String {
    match kind {
        IdentifierKind::Cpf => format_cpf(raw),
        IdentifierKind::Cnpj => format_cnpj(raw),
        IdentifierKind::Cep => format_cep(raw),
        IdentifierKind::Phone => format_phone(raw),
        IdentifierKind::StateRegistrationMg => format_state_registration_mg(raw),
        IdentifierKind::Unknown => passthrough(raw),
    }
}
