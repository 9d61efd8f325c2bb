//! ontoval validation engine.
//!
//! Checks parsed documents against a compiled ontology and accumulates
//! [`Diagnostic`](ontoval_model::Diagnostic)s:
//!
//! | Check | Kinds |
//! |-------|-------|
//! | Types | `unknown-class`, `unresolvable-namespace`, `untyped-node` |
//! | Properties | `unknown-property`, `property-not-applicable`, `dangling-reference` |
//! | Ranges | `datatype-mismatch`, `range-mismatch` |
//! | Literals | `unknown-datatype`, `invalid-literal` |
//! | Cardinality | `cardinality-violation` |
//! | Prefixes | `namespace-conflict` |
//!
//! Constructs outside the supported subset are reported as
//! `unsupported-feature` and never checked.
//!
//! # Entry Point
//!
//! ```
//! use ontoval_compiler::{compile_sources, parse_document_str, OntologySource};
//! use ontoval_validator::validate;
//!
//! let (ontology, _) = compile_sources(&[OntologySource::new(
//!     "animals.ttl",
//!     "@prefix ex: <http://example.org/> .\n\
//!      @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
//!      ex:Dog a owl:Class .\n",
//! )]);
//! let (document, _) = parse_document_str("rex.ttl", "@prefix ex: <http://example.org/> .\n_:rex a ex:Dog .\n")?;
//! assert!(validate(&document, &ontology).is_empty());
//! # Ok::<(), ontoval_model::ModelError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod batch;
pub mod checks;
pub mod config;
pub mod engine;
pub mod report;
pub mod resolve;

pub use batch::{validate_batch, validate_path};
pub use config::ValidatorConfig;
pub use engine::{validate, Context};
pub use report::{BatchReport, DocumentReport};
pub use resolve::{Resolved, Resolver};
