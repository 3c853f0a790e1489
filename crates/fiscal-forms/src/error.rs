//! Error types for fiscal-forms

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for form rule operations
pub type Result<T> = std::result::Result<T, FormsError>;

/// Errors raised while loading rules or checking a form
#[derive(Error, Debug)]
pub enum FormsError {
    /// Rules file could not be read
    #[error("Failed to read rules from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rules file is not valid TOML or does not match the schema
    #[error("Invalid rules: {0}")]
    Parse(#[from] toml::de::Error),

    /// No form with this name in the rules
    #[error("Unknown form: {0}")]
    UnknownForm(String),
}
