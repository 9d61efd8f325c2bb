//! Batch validation of many documents against one ontology.
//!
//! Each document is parsed and validated independently. A document that
//! cannot be read or parsed fails on its own; the rest of the batch still
//! completes. Reports come back in input order, also when run in parallel.

use std::path::Path;

use ontoval_compiler::read_document;
use ontoval_model::OntologyModel;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::ValidatorConfig;
use crate::engine::validate;
use crate::report::{BatchReport, DocumentReport};

/// Parses and validates one document file.
#[must_use]
pub fn validate_path(ontology: &OntologyModel, path: &Path) -> DocumentReport {
    let name = path.display().to_string();
    match read_document(path) {
        // The parser's findings live on the graph and come back from validate.
        Ok((graph, _)) => DocumentReport::checked(name, validate(&graph, ontology)),
        Err(error) => {
            warn!(document = %name, %error, "document failed");
            DocumentReport::failed(name, error)
        }
    }
}

/// Validates every document in `paths` against `ontology`.
#[must_use]
pub fn validate_batch<P>(ontology: &OntologyModel, paths: &[P], config: ValidatorConfig) -> BatchReport
where
    P: AsRef<Path> + Sync,
{
    let mut report = BatchReport::new();
    if config.parallel {
        let documents: Vec<DocumentReport> = paths
            .par_iter()
            .map(|path| validate_path(ontology, path.as_ref()))
            .collect();
        for document in documents {
            report.push(document);
        }
    } else {
        for path in paths {
            report.push(validate_path(ontology, path.as_ref()));
        }
    }
    info!(
        documents = report.documents.len(),
        errors = report.error_count(),
        failed = report.failed_documents(),
        parallel = config.parallel,
        "batch validated"
    );
    report
}
