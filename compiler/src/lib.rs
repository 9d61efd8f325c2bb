//! ontoval compiler.
//!
//! Reads the Turtle subset shared by ontologies and documents and turns it
//! into the data model:
//!
//! | Input | Entry point | Output |
//! |-------|-------------|--------|
//! | Ontology files | [`compile_ontology`] | [`OntologyModel`](ontoval_model::OntologyModel) + diagnostics |
//! | One document | [`parse_document`] | [`DocumentGraph`](ontoval_model::DocumentGraph) + diagnostics |
//! | Document or artifact | [`read_document`] | the same, loading cached artifacts |
//! | Parsed graph | [`parse_diagnostics`] | the parser's findings recorded on the graph |
//!
//! Malformed ontology statements become `parse-error` diagnostics and the
//! compile continues. A malformed document fails as a whole.
//!
//! # Example
//!
//! ```
//! use ontoval_compiler::{compile_sources, OntologySource};
//!
//! let source = OntologySource::new(
//!     "animals.ttl",
//!     "@prefix ex: <http://example.org/> .\n\
//!      @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
//!      ex:Animal a owl:Class .\n",
//! );
//! let (model, diagnostics) = compile_sources(&[source]);
//! assert!(diagnostics.is_empty());
//! assert!(model.find_class("http://example.org/Animal").is_some());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod document;
pub mod ontology;
pub mod turtle;

pub use document::{parse_diagnostics, parse_document, parse_document_str, read_document};
pub use ontology::{compile_ontology, compile_sources, OntologySource};
