//! Validation report types: per-document outcomes and batch aggregation.

use ontoval_model::{Diagnostic, ModelError, Severity};
use serde_json::{json, Value};

/// The outcome of validating one document.
#[derive(Debug)]
pub struct DocumentReport {
    /// Document identifier, usually its path.
    pub document: String,
    /// Diagnostics, or the structural failure that ended this document.
    pub outcome: Result<Vec<Diagnostic>, ModelError>,
}

impl DocumentReport {
    /// A document that was parsed and validated.
    pub fn checked(document: impl Into<String>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            document: document.into(),
            outcome: Ok(diagnostics),
        }
    }

    /// A document that could not be read or parsed.
    pub fn failed(document: impl Into<String>, error: ModelError) -> Self {
        Self {
            document: document.into(),
            outcome: Err(error),
        }
    }

    /// Diagnostics of a checked document; empty for a failed one.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match &self.outcome {
            Ok(diagnostics) => diagnostics,
            Err(_) => &[],
        }
    }

    /// Returns the count of Error diagnostics.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics().iter().filter(|d| d.is_error()).count()
    }

    /// Returns true if the document failed or has any Error diagnostic.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.outcome.is_err() || self.error_count() > 0
    }

    fn to_json(&self) -> Value {
        match &self.outcome {
            Ok(diagnostics) => json!({
                "document": self.document,
                "diagnostics": diagnostics,
            }),
            Err(error) => json!({
                "document": self.document,
                "failure": error.to_string(),
            }),
        }
    }
}

/// Aggregated report over one ontology compile and a batch of documents.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Diagnostics from compiling the ontology.
    pub compile: Vec<Diagnostic>,
    /// One report per document, in input order.
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a document report.
    pub fn push(&mut self, report: DocumentReport) {
        self.documents.push(report);
    }

    /// Extends this report with the compile diagnostics and documents of
    /// another report.
    pub fn extend(&mut self, other: BatchReport) {
        self.compile.extend(other.compile);
        self.documents.extend(other.documents);
    }

    /// Returns the count of Error diagnostics, compile diagnostics included.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.compile.iter().filter(|d| d.is_error()).count()
            + self
                .documents
                .iter()
                .map(DocumentReport::error_count)
                .sum::<usize>()
    }

    /// Returns the count of documents that could not be read or parsed.
    #[must_use]
    pub fn failed_documents(&self) -> usize {
        self.documents.iter().filter(|d| d.outcome.is_err()).count()
    }

    /// Returns the count of diagnostics with `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.compile
            .iter()
            .chain(self.documents.iter().flat_map(|d| d.diagnostics()))
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Returns true if nothing failed and no Error diagnostic was found.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.error_count() == 0 && self.failed_documents() == 0
    }

    /// The report as JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "compile": self.compile,
            "documents": self.documents.iter().map(DocumentReport::to_json).collect::<Vec<_>>(),
            "summary": {
                "errors": self.error_count(),
                "unsupported": self.count(Severity::UnsupportedFeature),
                "info": self.count(Severity::Info),
                "failed_documents": self.failed_documents(),
            },
        })
    }
}
