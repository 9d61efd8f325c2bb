//! `ontoval-serialize` compiles an ontology or parses a document and
//! writes it as a binary artifact.
//!
//! Loading an artifact skips compilation; `ontoval-validate` accepts one
//! anywhere it accepts Turtle. An artifact written by another toolkit
//! version is rejected on load.
//!
//! **Usage:**
//! ```
//! ontoval-serialize <input> -o <output> [--kind ontology|document] [--comment <text>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ontoval_clients::inputs::compile_input;
use ontoval_clients::{logging, ClientConfig};
use ontoval_compiler::parse_document;
use ontoval_model::serializer::save_artifact;
use ontoval_model::{Artifact, ArtifactKind};

/// What the input holds.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    /// Ontology source: a .ttl file or a directory of them.
    Ontology,
    /// Instance document.
    Document,
}

/// Serialize an ontology or document to an artifact.
#[derive(Parser)]
#[command(
    name = "ontoval-serialize",
    about = "Write a compiled ontology or parsed document as a binary artifact"
)]
struct Args {
    /// Input: a .ttl file or a directory of ontology files.
    input: PathBuf,

    /// Output artifact path.
    #[arg(short, long)]
    output: PathBuf,

    /// What the input holds.
    #[arg(long, value_enum, default_value = "ontology")]
    kind: Kind,

    /// Free-text comment stored in the artifact header.
    #[arg(long)]
    comment: Option<String>,

    /// Configuration file (default: ontoval.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = ClientConfig::discover(args.config.as_deref())?;
    logging::init(config.logging.filter.as_deref());

    let (kind, artifact, diagnostics) = match args.kind {
        Kind::Ontology => {
            let (model, diagnostics) = compile_input(&args.input)?;
            (ArtifactKind::Ontology, Artifact::Ontology(model), diagnostics)
        }
        Kind::Document => {
            let (graph, diagnostics) = parse_document(&args.input)
                .with_context(|| format!("Failed to parse {}", args.input.display()))?;
            (ArtifactKind::Document, Artifact::Document(graph), diagnostics)
        }
    };

    for diagnostic in &diagnostics {
        println!("  {diagnostic}");
    }
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();

    let bytes = save_artifact(kind, &artifact, args.comment.as_deref())?;
    fs::write(&args.output, &bytes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Wrote {} artifact: {} ({} bytes)",
        kind.as_str(),
        args.output.display(),
        bytes.len()
    );

    if errors > 0 {
        eprintln!("Input had {errors} error(s); the artifact was written anyway.");
        process::exit(1);
    }
    Ok(())
}
