//! Shared data model for the ontoval toolkit.
//!
//! The `ontoval-model` crate defines everything the compiler, the document
//! parser and the validation engine exchange:
//!
//! - [`OntologyModel`]: classes, properties, datatypes, the subclass lattice
//!   and the namespace table of a compiled ontology
//! - [`DocumentGraph`]: the nodes, assertions and markers of one parsed document
//! - [`Diagnostic`]: accumulated findings with stable kind tags
//! - [`serializer::artifact`]: version-stamped binary cache files
//!
//! # Example
//!
//! ```
//! use ontoval_model::{iris, OntologyModel};
//!
//! let model = OntologyModel::new();
//! assert!(model.is_subclass_of(iris::XSD_POSITIVE_INTEGER, iris::XSD_INTEGER));
//! assert_eq!(model.namespaces.iri_for("owl"), Some(iris::OWL));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod diagnostic;
pub mod document;
pub mod error;
pub mod iris;
pub mod lattice;
pub mod namespace;
pub mod ontology;
pub mod serializer;

pub use diagnostic::{sort_diagnostics, Diagnostic, DiagnosticKind, Severity};
pub use document::{
    Assertion, DocumentGraph, DocumentNode, Literal, LiteralType, Marker, PrefixDeclaration,
    Term, TypeAssertion, UnsupportedConstruct, Value,
};
pub use error::{ModelError, Result};
pub use lattice::{Cycle, Lattice};
pub use namespace::{Binding, Namespace, NamespaceTable};
pub use ontology::{
    Cardinality, Datatype, OntologyClass, OntologyModel, OntologyProperty, PropertyKind,
    RangeKind, Restriction,
};
pub use serializer::artifact::{Artifact, ArtifactHeader, ArtifactKind};

/// Version stamped into every artifact.
pub const TOOLKIT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OntologyModel>();
        assert_send_sync::<DocumentGraph>();
    }

    #[test]
    fn toolkit_version_is_stamped() {
        assert!(!TOOLKIT_VERSION.is_empty());
    }
}
