//! fiscal-forms: field rules and inline validation for console forms.
//!
//! The identifier validators only answer "is this well formed". Forms also
//! need to know whether an empty field is acceptable and what to show the
//! user. Rules are declared per form and per field:
//!
//! ```toml
//! [forms.client.fields.document]
//! kind = "document"
//! required = true
//!
//! [forms.client.fields.cep]
//! kind = "cep"
//! ```
//!
//! Empty optional fields are skipped, empty required fields are reported as
//! missing, everything else goes through `fiscal-identifiers`.

pub mod check;
pub mod error;
pub mod rules;

pub use check::*;
pub use error::*;
pub use rules::*;
