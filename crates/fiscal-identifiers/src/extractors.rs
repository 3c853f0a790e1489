//! CPF/CNPJ extraction from free text (spreadsheets, e-mails, notes)

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{format_document, is_valid_cnpj, is_valid_cpf, normalize, DocumentKind};

/// Extracted document with position information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct ExtractedIdentifier {
    pub kind: DocumentKind,
    /// Normalized digits
    pub value: String,
    /// Canonical mask, e.g. `529.982.247-25`
    pub formatted: String,
    pub start_index: u32,
    pub end_index: u32,
}

lazy_static! {
    // CNPJ is tried first so a 14-digit run is never read as a CPF prefix.
    // Separators are optional and may be mixed.
    static ref DOCUMENT_REGEX: Regex = Regex::new(
        r"(?P<cnpj>\d{2}\.?\d{3}\.?\d{3}/?\d{4}-?\d{2})|(?P<cpf>\d{3}\.?\d{3}\.?\d{3}-?\d{2})"
    ).unwrap();
}

/// True when the match sits inside a longer run of digits
fn embedded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    before.is_some_and(|c| c.is_ascii_digit()) || after.is_some_and(|c| c.is_ascii_digit())
}

/// Extract every checksum-valid CPF and CNPJ from `text`, in order of appearance
pub fn extract_documents(text: &str) -> Vec<ExtractedIdentifier> {
    let mut results = Vec::new();

    for cap in DOCUMENT_REGEX.captures_iter(text) {
        let (kind, m) = match (cap.name("cnpj"), cap.name("cpf")) {
            (Some(m), _) => (DocumentKind::Cnpj, m),
            (None, Some(m)) => (DocumentKind::Cpf, m),
            (None, None) => continue,
        };
        if embedded(text, m.start(), m.end()) {
            continue;
        }
        let valid = match kind {
            DocumentKind::Cnpj => is_valid_cnpj(m.as_str()),
            _ => is_valid_cpf(m.as_str()),
        };
        if !valid {
            continue;
        }
        let value = normalize(m.as_str());
        results.push(ExtractedIdentifier {
            kind,
            formatted: format_document(&value),
            value,
            start_index: m.start() as u32,
            end_index: m.end() as u32,
        });
    }

    tracing::debug!(found = results.len(), "extracted documents");
    results
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn extract_documents_ffi(text: String) -> Vec<ExtractedIdentifier> {
    extract_documents(&text)
}
