//! Identifier kinds and the length-keyed document classification

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::normalize;

/// Closed set of identifiers the console validates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// Individual taxpayer number (11 digits)
    Cpf,
    /// Company registry number (14 digits)
    Cnpj,
    /// Postal code (8 digits)
    Cep,
    /// Landline (10 digits) or mobile (11 digits) number with area code
    Phone,
    /// Minas Gerais state registration (13 digits)
    #[serde(rename = "state_registration_mg", alias = "ie_mg")]
    StateRegistrationMg,
    /// Anything else
    Unknown,
}

impl IdentifierKind {
    /// Get all identifier kinds, `Unknown` last
    pub fn all() -> &'static [IdentifierKind] {
        &[
            IdentifierKind::Cpf,
            IdentifierKind::Cnpj,
            IdentifierKind::Cep,
            IdentifierKind::Phone,
            IdentifierKind::StateRegistrationMg,
            IdentifierKind::Unknown,
        ]
    }

    /// Normalized digit counts accepted by this kind
    pub fn expected_lengths(self) -> &'static [usize] {
        match self {
            IdentifierKind::Cpf => &[11],
            IdentifierKind::Cnpj => &[14],
            IdentifierKind::Cep => &[8],
            IdentifierKind::Phone => &[10, 11],
            IdentifierKind::StateRegistrationMg => &[13],
            IdentifierKind::Unknown => &[],
        }
    }

    /// Whether a normalized digit count fits this kind
    pub fn accepts_len(self, len: usize) -> bool {
        self.expected_lengths().contains(&len)
    }

    /// Every kind a normalized length is compatible with.
    ///
    /// Length alone is ambiguous at 11 (CPF and mobile phone), so all
    /// candidates are returned in declaration order. An empty result means
    /// `Unknown`.
    pub fn candidates_for_len(len: usize) -> Vec<IdentifierKind> {
        IdentifierKind::all()
            .iter()
            .copied()
            .filter(|kind| kind.accepts_len(len))
            .collect()
    }

    /// Human-readable label, as shown next to form fields
    pub fn label(self) -> &'static str {
        match self {
            IdentifierKind::Cpf => "CPF",
            IdentifierKind::Cnpj => "CNPJ",
            IdentifierKind::Cep => "CEP",
            IdentifierKind::Phone => "Telefone",
            IdentifierKind::StateRegistrationMg => "IE-MG",
            IdentifierKind::Unknown => "Desconhecido",
        }
    }

    /// `expected_lengths` rendered for error messages ("10 or 11")
    pub(crate) fn expected_description(self) -> String {
        self.expected_lengths()
            .iter()
            .map(|len| len.to_string())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which taxpayer document a generic "CPF/CNPJ" field holds.
///
/// Computed once from the normalized length and then matched; punctuation in
/// the raw input never influences the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// 11 digits, checked as a CPF
    Cpf,
    /// 14 digits, checked as a CNPJ
    Cnpj,
    /// Any other length, never valid
    Unknown,
}

impl DocumentKind {
    /// Classify a normalized digit count
    pub fn from_len(len: usize) -> Self {
        match len {
            11 => DocumentKind::Cpf,
            14 => DocumentKind::Cnpj,
            _ => DocumentKind::Unknown,
        }
    }

    /// Normalize `raw` and classify it
    pub fn classify(raw: &str) -> Self {
        Self::from_len(normalize(raw).len())
    }

    /// The matching identifier kind
    pub fn identifier_kind(self) -> IdentifierKind {
        match self {
            DocumentKind::Cpf => IdentifierKind::Cpf,
            DocumentKind::Cnpj => IdentifierKind::Cnpj,
            DocumentKind::Unknown => IdentifierKind::Unknown,
        }
    }
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn classify_document_ffi(raw: String) -> DocumentKind {
    DocumentKind::classify(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_for_len() {
        assert_eq!(
            IdentifierKind::candidates_for_len(11),
            vec![IdentifierKind::Cpf, IdentifierKind::Phone]
        );
        assert_eq!(
            IdentifierKind::candidates_for_len(14),
            vec![IdentifierKind::Cnpj]
        );
        assert_eq!(
            IdentifierKind::candidates_for_len(13),
            vec![IdentifierKind::StateRegistrationMg]
        );
        assert!(IdentifierKind::candidates_for_len(0).is_empty());
        assert!(IdentifierKind::candidates_for_len(12).is_empty());
    }

    #[test]
    fn test_unknown_accepts_nothing() {
        for len in 0..20 {
            assert!(!IdentifierKind::Unknown.accepts_len(len));
        }
    }

    #[test]
    fn test_document_kind_ignores_punctuation() {
        assert_eq!(DocumentKind::classify("529.982.247-25"), DocumentKind::Cpf);
        assert_eq!(DocumentKind::classify("52998224725"), DocumentKind::Cpf);
        // CNPJ-looking punctuation around 11 digits is still a CPF candidate
        assert_eq!(DocumentKind::classify("52.998.224/72-5"), DocumentKind::Cpf);
        assert_eq!(
            DocumentKind::classify("11.222.333/0001-81"),
            DocumentKind::Cnpj
        );
        assert_eq!(DocumentKind::classify("123"), DocumentKind::Unknown);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&IdentifierKind::StateRegistrationMg).unwrap(),
            "\"state_registration_mg\""
        );
        let kind: IdentifierKind = serde_json::from_str("\"ie_mg\"").unwrap();
        assert_eq!(kind, IdentifierKind::StateRegistrationMg);
        let kind: IdentifierKind = serde_json::from_str("\"cep\"").unwrap();
        assert_eq!(kind, IdentifierKind::Cep);
    }

    #[test]
    fn test_display() {
        assert_eq!(IdentifierKind::Phone.to_string(), "Telefone");
        assert_eq!(IdentifierKind::Phone.expected_description(), "10 or 11");
    }
}
