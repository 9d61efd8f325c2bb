//! Locating and loading ontology inputs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ontoval_compiler::compile_ontology;
use ontoval_model::serializer::{is_artifact, load_artifact};
use ontoval_model::{Diagnostic, OntologyModel};
use tracing::info;
use walkdir::WalkDir;

/// Extension of Turtle sources.
pub const TURTLE_EXTENSION: &str = "ttl";

/// Every `.ttl` file under `dir`, sorted by path.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked.
pub fn turtle_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(TURTLE_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Compiles an ontology from a `.ttl` file or a directory of them.
///
/// # Errors
///
/// Returns an error if the input cannot be read or holds no `.ttl` files.
pub fn compile_input(input: &Path) -> Result<(OntologyModel, Vec<Diagnostic>)> {
    let sources = if input.is_dir() {
        turtle_files(input)?
    } else {
        vec![input.to_path_buf()]
    };
    if sources.is_empty() {
        bail!("No .{TURTLE_EXTENSION} files found in {}", input.display());
    }
    let compiled = compile_ontology(&sources)
        .with_context(|| format!("Failed to compile ontology {}", input.display()))?;
    info!(sources = sources.len(), input = %input.display(), "compiled ontology input");
    Ok(compiled)
}

/// Loads an ontology from a `.ttl` file, a directory, or an ontology
/// artifact. Artifacts carry no compile diagnostics.
///
/// # Errors
///
/// Returns an error if the input cannot be read, compiled or decoded, or
/// is an artifact of the wrong kind or toolkit version.
pub fn load_ontology(input: &Path) -> Result<(OntologyModel, Vec<Diagnostic>)> {
    if input.is_file() {
        let bytes =
            fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
        if is_artifact(&bytes) {
            let (_, artifact, header) = load_artifact(&bytes)
                .with_context(|| format!("Failed to load artifact {}", input.display()))?;
            info!(
                input = %input.display(),
                created_at = %header.created_at,
                comment = header.comment.as_deref().unwrap_or(""),
                "loaded ontology artifact"
            );
            return match artifact.into_ontology() {
                Some(model) => Ok((model, Vec::new())),
                None => bail!("{} is a document artifact, not an ontology", input.display()),
            };
        }
    }
    compile_input(input)
}
