//! Declarative form rules, loaded from TOML or built in.

use std::collections::BTreeMap;
use std::path::Path;

use fiscal_identifiers::{
    format, format_document, normalize, validate, validate_document, validate_email,
    IdentifierError, IdentifierKind,
};
use serde::{Deserialize, Serialize};

use crate::{FormsError, Result};

/// What a form field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// CPF or CNPJ, chosen by digit count
    Document,
    Cpf,
    Cnpj,
    Cep,
    Phone,
    /// Minas Gerais state registration
    #[serde(alias = "ie_mg")]
    #[cfg_attr(feature = "cli", value(name = "ie-mg"))]
    StateRegistrationMg,
    Email,
}

impl FieldKind {
    /// The identifier kind behind digit-based fields
    pub fn identifier_kind(self) -> Option<IdentifierKind> {
        match self {
            FieldKind::Cpf => Some(IdentifierKind::Cpf),
            FieldKind::Cnpj => Some(IdentifierKind::Cnpj),
            FieldKind::Cep => Some(IdentifierKind::Cep),
            FieldKind::Phone => Some(IdentifierKind::Phone),
            FieldKind::StateRegistrationMg => Some(IdentifierKind::StateRegistrationMg),
            FieldKind::Document | FieldKind::Email => None,
        }
    }

    /// Validate `raw`, returning the value to store (digits, or the e-mail as typed)
    pub fn validate(self, raw: &str) -> std::result::Result<String, IdentifierError> {
        match self {
            FieldKind::Document => validate_document(raw).map(|_| normalize(raw)),
            FieldKind::Email => validate_email(raw),
            other => match other.identifier_kind() {
                Some(kind) => validate(kind, raw),
                None => Err(IdentifierError::UnsupportedKind),
            },
        }
    }

    /// Display form of `raw`
    pub fn format(self, raw: &str) -> String {
        match self {
            FieldKind::Document => format_document(raw),
            FieldKind::Email => raw.to_string(),
            other => match other.identifier_kind() {
                Some(kind) => format(kind, raw),
                None => raw.to_string(),
            },
        }
    }

    /// Inline error text shown under an invalid field
    pub fn invalid_message(self) -> &'static str {
        match self {
            FieldKind::Document => "CPF/CNPJ inválido",
            FieldKind::Cpf => "CPF inválido",
            FieldKind::Cnpj => "CNPJ inválido",
            FieldKind::Cep => "CEP inválido",
            FieldKind::Phone => "Telefone inválido",
            FieldKind::StateRegistrationMg => "Inscrição estadual inválida",
            FieldKind::Email => "E-mail inválido",
        }
    }
}

/// Rule for a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub kind: FieldKind,
    /// Whether an empty value blocks submission
    #[serde(default)]
    pub required: bool,
    /// Label used in `FormReport::messages`; the field name is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FieldRule {
    pub fn required(kind: FieldKind) -> Self {
        Self {
            kind,
            required: true,
            label: None,
        }
    }

    pub fn optional(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            label: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}

/// All field rules of one form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    #[serde(default)]
    pub fields: BTreeMap<String, FieldRule>,
}

impl FormSpec {
    pub fn field(mut self, name: &str, rule: FieldRule) -> Self {
        self.fields.insert(name.to_string(), rule);
        self
    }
}

/// Rules for every form of the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRules {
    #[serde(default)]
    pub forms: BTreeMap<String, FormSpec>,
}

impl Default for FormRules {
    fn default() -> Self {
        let client = FormSpec::default()
            .field(
                "document",
                FieldRule::required(FieldKind::Document).with_label("CPF/CNPJ"),
            )
            .field(
                "state_registration",
                FieldRule::optional(FieldKind::StateRegistrationMg)
                    .with_label("Inscrição estadual"),
            )
            .field("cep", FieldRule::optional(FieldKind::Cep).with_label("CEP"))
            .field(
                "phone",
                FieldRule::optional(FieldKind::Phone).with_label("Telefone"),
            )
            .field(
                "email",
                FieldRule::required(FieldKind::Email).with_label("E-mail"),
            );

        let freight = FormSpec::default()
            .field(
                "origin_cep",
                FieldRule::required(FieldKind::Cep).with_label("CEP de origem"),
            )
            .field(
                "destination_cep",
                FieldRule::required(FieldKind::Cep).with_label("CEP de destino"),
            );

        let notification = FormSpec::default()
            .field(
                "phone",
                FieldRule::optional(FieldKind::Phone).with_label("Telefone"),
            )
            .field(
                "email",
                FieldRule::optional(FieldKind::Email).with_label("E-mail"),
            );

        let mut forms = BTreeMap::new();
        forms.insert("client".to_string(), client);
        forms.insert("freight".to_string(), freight);
        forms.insert("notification".to_string(), notification);
        Self { forms }
    }
}

impl FormRules {
    /// Parse rules from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load rules from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| FormsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), forms = rules.forms.len(), "loaded form rules");
        Ok(rules)
    }

    /// Rules from `path` when given, built-in defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Look up a form by name
    pub fn form(&self, name: &str) -> Result<&FormSpec> {
        self.forms
            .get(name)
            .ok_or_else(|| FormsError::UnknownForm(name.to_string()))
    }
}
