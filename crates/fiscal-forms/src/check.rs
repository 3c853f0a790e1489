//! Field and form checks.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{FieldRule, FormRules, FormSpec, Result};

/// Shown under required fields left empty
pub const MISSING_MESSAGE: &str = "Campo obrigatório";

/// Result of checking one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FieldOutcome {
    /// Well formed; `normalized` is what gets submitted
    Valid { normalized: String, formatted: String },
    /// Optional and left empty
    Skipped,
    /// Required and left empty
    Missing,
    /// Provided but rejected
    Invalid { code: String, message: String },
}

impl FieldOutcome {
    /// Whether this outcome lets the form be submitted
    pub fn is_ok(&self) -> bool {
        matches!(self, FieldOutcome::Valid { .. } | FieldOutcome::Skipped)
    }

    /// Inline error text, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            FieldOutcome::Missing => Some(MISSING_MESSAGE),
            FieldOutcome::Invalid { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Check a single value against its rule.
///
/// Absent and whitespace-only values count as "not provided".
pub fn check_field(rule: &FieldRule, value: Option<&str>) -> FieldOutcome {
    let provided = value.filter(|v| !v.trim().is_empty());
    let Some(raw) = provided else {
        return if rule.required {
            FieldOutcome::Missing
        } else {
            FieldOutcome::Skipped
        };
    };

    match rule.kind.validate(raw) {
        Ok(normalized) => FieldOutcome::Valid {
            formatted: rule.kind.format(&normalized),
            normalized,
        },
        Err(err) => FieldOutcome::Invalid {
            code: err.code().to_string(),
            message: rule.kind.invalid_message().to_string(),
        },
    }
}

/// Per-field outcomes of a whole form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormReport {
    pub fields: BTreeMap<String, FieldOutcome>,
    /// Display labels of the checked fields, keyed by field name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl FormReport {
    /// True when every field is valid or an empty optional field
    pub fn is_ok(&self) -> bool {
        self.fields.values().all(FieldOutcome::is_ok)
    }

    /// Label shown for `field`: the rule's label, or the field name itself
    pub fn label<'a>(&'a self, field: &'a str) -> &'a str {
        self.labels.get(field).map(String::as_str).unwrap_or(field)
    }

    /// `(label, message)` pairs for every failing field, in field-name order
    pub fn messages(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter_map(|(name, outcome)| {
                outcome
                    .message()
                    .map(|message| (self.label(name).to_string(), message.to_string()))
            })
            .collect()
    }

    /// Normalized values of the valid fields, ready to submit
    pub fn values(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|(name, outcome)| match outcome {
                FieldOutcome::Valid { normalized, .. } => Some((name.clone(), normalized.clone())),
                _ => None,
            })
            .collect()
    }
}

impl FormSpec {
    /// Check submitted values. Keys without a rule are ignored.
    pub fn check(&self, values: &HashMap<String, String>) -> FormReport {
        let mut report = FormReport::default();
        for (name, rule) in &self.fields {
            let outcome = check_field(rule, values.get(name).map(String::as_str));
            tracing::debug!(field = %name, kind = ?rule.kind, ok = outcome.is_ok(), "checked field");
            report.fields.insert(name.clone(), outcome);
            if let Some(label) = &rule.label {
                report.labels.insert(name.clone(), label.clone());
            }
        }
        for name in values.keys().filter(|k| !self.fields.contains_key(*k)) {
            tracing::debug!(field = %name, "ignoring field without a rule");
        }
        report
    }
}

impl FormRules {
    /// Check values against the named form
    pub fn check(&self, form: &str, values: &HashMap<String, String>) -> Result<FormReport> {
        Ok(self.form(form)?.check(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldKind;

    #[test]
    fn empty_optional_is_skipped() {
        let rule = FieldRule::optional(FieldKind::Cep);
        assert_eq!(check_field(&rule, None), FieldOutcome::Skipped);
        assert_eq!(check_field(&rule, Some("  ")), FieldOutcome::Skipped);
    }

    #[test]
    fn empty_required_is_missing() {
        let rule = FieldRule::required(FieldKind::Document);
        let outcome = check_field(&rule, Some(""));
        assert_eq!(outcome, FieldOutcome::Missing);
        assert_eq!(outcome.message(), Some(MISSING_MESSAGE));
    }

    #[test]
    fn valid_value_is_normalized_and_formatted() {
        let rule = FieldRule::required(FieldKind::Document);
        assert_eq!(
            check_field(&rule, Some("11222333000181")),
            FieldOutcome::Valid {
                normalized: "11222333000181".to_string(),
                formatted: "11.222.333/0001-81".to_string(),
            }
        );
    }

    #[test]
    fn invalid_value_carries_reason() {
        let rule = FieldRule::optional(FieldKind::Phone);
        assert_eq!(
            check_field(&rule, Some("(11) 81234-5678")),
            FieldOutcome::Invalid {
                code: "mobile_prefix".to_string(),
                message: "Telefone inválido".to_string(),
            }
        );
    }

    #[test]
    fn messages_use_rule_label() {
        let spec = FormSpec::default()
            .field(
                "doc",
                FieldRule::required(FieldKind::Cpf).with_label("CPF do cliente"),
            )
            .field("cep", FieldRule::required(FieldKind::Cep));
        let values: HashMap<String, String> = [("doc".to_string(), "123".to_string())]
            .into_iter()
            .collect();

        let report = spec.check(&values);
        assert_eq!(
            report.messages(),
            vec![
                ("cep".to_string(), MISSING_MESSAGE.to_string()),
                ("CPF do cliente".to_string(), "CPF inválido".to_string()),
            ]
        );
        assert_eq!(report.label("doc"), "CPF do cliente");
        assert_eq!(report.label("cep"), "cep");
    }

    #[test]
    fn punctuation_only_is_provided_but_invalid() {
        let rule = FieldRule::optional(FieldKind::Cep);
        assert!(matches!(
            check_field(&rule, Some("--")),
            FieldOutcome::Invalid { ref code, .. } if code == "empty"
        ));
    }
}
