//! fiscal-check
//!
//! Command-line front end for the identifier validators and form rules.
//! Exits with status 1 when the value (or form) is rejected.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fiscal_forms::{check_field, FieldKind, FieldOutcome, FieldRule, FormRules};
use fiscal_identifiers::{extract_documents, normalize, DocumentKind, IdentifierKind};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fiscal-check", version, about = "Validate and format Brazilian fiscal identifiers")]
struct Cli {
    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Form rules file (TOML); built-in rules are used when absent
    #[arg(long, env = "FISCAL_RULES", global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a value
    Validate { kind: FieldKind, value: String },
    /// Apply the display mask for a kind
    Format { kind: FieldKind, value: String },
    /// Show which kinds a value's digit count fits
    Classify { value: String },
    /// Find valid CPF/CNPJ numbers in a file (stdin when absent or `-`)
    Extract { path: Option<PathBuf> },
    /// Check `field=value` pairs against a form's rules
    CheckForm {
        form: String,
        #[arg(value_parser = parse_pair)]
        values: Vec<(String, String)>,
    },
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected field=value, got `{}`", s))
}

fn status(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Validate { kind, value } => {
            let outcome = check_field(&FieldRule::required(kind), Some(value.as_str()));
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                match &outcome {
                    FieldOutcome::Valid { formatted, .. } => println!("valid: {}", formatted),
                    other => println!("invalid: {}", other.message().unwrap_or_default()),
                }
            }
            Ok(status(outcome.is_ok()))
        }
        Command::Format { kind, value } => {
            let formatted = kind.format(&value);
            if cli.json {
                println!("{}", json!({ "input": value, "formatted": formatted }));
            } else {
                println!("{}", formatted);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Classify { value } => {
            let digits = normalize(&value);
            let document = DocumentKind::from_len(digits.len());
            let candidates = IdentifierKind::candidates_for_len(digits.len());
            if cli.json {
                println!(
                    "{}",
                    json!({ "digits": digits, "document": document, "candidates": candidates })
                );
            } else {
                let names: Vec<_> = candidates.iter().map(|k| k.label()).collect();
                println!("{} digits: {}", digits.len(), names.join(", "));
            }
            Ok(status(!candidates.is_empty()))
        }
        Command::Extract { path } => {
            let text = match path {
                Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
                _ => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let found = extract_documents(&text);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                for doc in &found {
                    println!("{}\t{}", doc.kind.identifier_kind(), doc.formatted);
                }
            }
            Ok(status(!found.is_empty()))
        }
        Command::CheckForm { form, values } => {
            let rules = FormRules::load_or_default(cli.rules.as_deref())?;
            let values: HashMap<String, String> = values.into_iter().collect();
            let report = rules.check(&form, &values)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for (label, message) in report.messages() {
                    println!("{}: {}", label, message);
                }
                if report.is_ok() {
                    println!("ok");
                }
            }
            Ok(status(report.is_ok()))
        }
    }
}
