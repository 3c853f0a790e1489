// Allow manual modulo checks since .is_multiple_of() is nightly-only
#![allow(clippy::manual_is_multiple_of)]

//! Validation and canonical formatting for Brazilian fiscal identifiers
//!
//! This crate provides the checks the management console runs on every
//! client, freight and billing form before anything is submitted:
//! - Digit normalization of raw user input
//! - CPF and CNPJ check-digit (modulo 11) validation
//! - Minas Gerais state registration (IE-MG) validation
//! - CEP, phone and e-mail sanity checks
//! - Display masks (`529.982.247-25`, `11.222.333/0001-81`, ...)
//! - CPF/CNPJ extraction from pasted text
//!
//! Every function is pure: no I/O, no shared state, safe to call from any
//! thread. Boolean validators never fail; the `validate_*` variants return
//! the reason a value was rejected.

pub mod checksum;
pub mod digits;
pub mod error;
pub mod extractors;
pub mod formatters;
pub mod kind;
pub mod validators;

pub use checksum::*;
pub use digits::*;
pub use error::*;
pub use extractors::*;
pub use formatters::*;
pub use kind::*;
pub use validators::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
