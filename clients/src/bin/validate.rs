//! `ontoval-validate` validates linked-data documents against an ontology.
//!
//! The ontology is a Turtle file, a directory of them, or an ontology
//! artifact written by `ontoval-serialize`. Documents are Turtle files or
//! document artifacts.
//!
//! **Usage:**
//! ```
//! ontoval-validate <ontology> [document...] [--format text|json] [--parallel] [--config <path>]
//! ```
//!
//! Exits non-zero if any Error diagnostic is found or any document fails
//! to parse.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use ontoval_clients::inputs::load_ontology;
use ontoval_clients::{logging, ClientConfig, ReportFormat};
use ontoval_model::Severity;
use ontoval_validator::{validate_batch, BatchReport};

/// Validate documents against a compiled ontology.
#[derive(Parser)]
#[command(
    name = "ontoval-validate",
    about = "Validate linked-data documents against an ontology"
)]
struct Args {
    /// Ontology: a .ttl file, a directory of .ttl files, or an artifact.
    ontology: PathBuf,

    /// Documents to validate.
    documents: Vec<PathBuf>,

    /// Configuration file (default: ontoval.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report format; overrides the configuration file.
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Validate documents in parallel; overrides the configuration file.
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = ClientConfig::discover(args.config.as_deref())?;
    logging::init(config.logging.filter.as_deref());

    let (ontology, compile) = load_ontology(&args.ontology)?;
    let mut validation = config.validation;
    validation.parallel |= args.parallel;

    let mut report = BatchReport {
        compile,
        documents: Vec::new(),
    };
    report.extend(validate_batch(&ontology, &args.documents, validation));

    match args.format.unwrap_or(config.report.format) {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report.to_json())?),
        ReportFormat::Text => print_text(&report),
    }

    if !report.all_passed() {
        eprintln!(
            "Validation FAILED: {} error(s), {} document(s) failed.",
            report.error_count(),
            report.failed_documents()
        );
        process::exit(1);
    }
    Ok(())
}

fn print_text(report: &BatchReport) {
    println!("ontoval Validation Report");
    println!("=========================");
    println!();

    if !report.compile.is_empty() {
        println!("[ontology]");
        for diagnostic in &report.compile {
            println!("  {diagnostic}");
        }
    }

    for document in &report.documents {
        let status = if document.is_failure() { "FAIL" } else { "PASS" };
        println!("[{status}] {}", document.document);
        match &document.outcome {
            Ok(diagnostics) => {
                for diagnostic in diagnostics {
                    println!("  {diagnostic}");
                }
            }
            Err(error) => println!("  {error}"),
        }
    }

    println!();
    println!(
        "Summary: {} error(s), {} unsupported, {} info, {} of {} document(s) failed",
        report.error_count(),
        report.count(Severity::UnsupportedFeature),
        report.count(Severity::Info),
        report.documents.iter().filter(|d| d.is_failure()).count(),
        report.documents.len()
    );
}
