//! The validation engine.
//!
//! [`validate`] walks the nodes of one document in declaration order and
//! threads a diagnostic accumulator through the checks in [`crate::checks`].
//! Neither the document nor the ontology is mutated.

use ontoval_compiler::parse_diagnostics;
use ontoval_model::{
    sort_diagnostics, Diagnostic, DiagnosticKind, DocumentGraph, DocumentNode, OntologyModel, Term,
};
use tracing::debug;

use crate::checks::{cardinality, properties, types};
use crate::resolve::Resolver;

/// Everything a check needs to know about the document being validated.
#[derive(Debug)]
pub struct Context<'a> {
    /// The compiled ontology.
    pub ontology: &'a OntologyModel,
    /// The document.
    pub graph: &'a DocumentGraph,
    /// Term resolution for this document.
    pub resolver: Resolver<'a>,
}

impl<'a> Context<'a> {
    /// A context for validating `graph` against `ontology`.
    #[must_use]
    pub fn new(graph: &'a DocumentGraph, ontology: &'a OntologyModel) -> Self {
        Self {
            ontology,
            graph,
            resolver: Resolver::new(graph, ontology),
        }
    }

    /// Locates `diagnostic` at `node` and `line` in this document.
    #[must_use]
    pub fn locate(&self, diagnostic: Diagnostic, node: &Term, line: u32) -> Diagnostic {
        diagnostic
            .in_document(self.graph.source.clone())
            .at_node(node.to_string())
            .at_line(line)
    }

    /// Compact display form of an IRI.
    #[must_use]
    pub fn display(&self, iri: &str) -> String {
        self.resolver.display(iri)
    }
}

/// Validates one document against an ontology.
///
/// The parser's findings recorded on the graph are part of the result, so a
/// document restored from an artifact validates like its text. Diagnostics are returned ordered by line, unknown lines first, and in
/// discovery order within a line. The result depends only on the inputs.
#[must_use]
pub fn validate(document: &DocumentGraph, ontology: &OntologyModel) -> Vec<Diagnostic> {
    let cx = Context::new(document, ontology);
    let mut out = parse_diagnostics(document);

    for declaration in cx.resolver.conflicts() {
        let expected = ontology
            .namespaces
            .iri_for(&declaration.prefix)
            .unwrap_or_default();
        out.push(
            Diagnostic::error(
                DiagnosticKind::NamespaceConflict,
                format!(
                    "prefix '{}' is bound to <{}> here but to <{expected}> in the ontology",
                    declaration.prefix, declaration.iri
                ),
            )
            .in_document(document.source.clone())
            .at_node(format!("{}:", declaration.prefix))
            .at_line(declaration.line),
        );
    }

    for marker in &document.markers {
        out.push(
            Diagnostic::unsupported(format!("{} is not supported", marker.construct.describe()))
                .in_document(document.source.clone())
                .at_line(marker.line),
        );
    }

    for node in document.nodes() {
        check_node(&cx, node, &mut out);
    }

    sort_diagnostics(&mut out);
    debug!(
        document = %document.source,
        nodes = document.node_count(),
        diagnostics = out.len(),
        "validated document"
    );
    out
}

fn check_node(cx: &Context<'_>, node: &DocumentNode, out: &mut Vec<Diagnostic>) {
    if !node.markers.is_empty() {
        for marker in &node.markers {
            out.push(cx.locate(
                Diagnostic::unsupported(format!(
                    "{} is not supported; node is not checked",
                    marker.construct.describe()
                )),
                &node.id,
                marker.line,
            ));
        }
        return;
    }

    let node_types = types::check(cx, node, out);
    properties::check(cx, node, &node_types, out);
    cardinality::check(cx, node, &node_types, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontoval_model::{Marker, UnsupportedConstruct};

    #[test]
    fn empty_document_has_no_diagnostics() {
        let graph = DocumentGraph::new("empty.ttl");
        assert!(validate(&graph, &OntologyModel::new()).is_empty());
    }

    #[test]
    fn graph_markers_are_reported_without_errors() {
        let mut graph = DocumentGraph::new("doc.ttl");
        graph.markers.push(Marker {
            construct: UnsupportedConstruct::BaseDirective,
            line: 1,
        });
        let diagnostics = validate(&graph, &OntologyModel::new());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnsupportedFeature);
        assert_eq!(diagnostics[0].line, Some(1));
    }

    #[test]
    fn findings_recorded_by_the_parser_are_reported() {
        let mut graph = DocumentGraph::new("doc.ttl");
        graph.declare_prefix("ex", "http://example.org/", 1);
        graph.declare_prefix("ex", "http://other.example/", 2);
        let node = graph.node_entry(&Term::Blank("x".to_string()), 3);
        node.literal_types.push(ontoval_model::LiteralType {
            literal: ontoval_model::Literal::plain("Dog"),
            line: 3,
        });
        let diagnostics = validate(&graph, &OntologyModel::new());
        let kinds: Vec<DiagnosticKind> = diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::NamespaceConflict,
                DiagnosticKind::UnknownClass,
                DiagnosticKind::UntypedNode,
            ]
        );
        assert_eq!(diagnostics[0].line, Some(2));
    }

    #[test]
    fn marked_nodes_are_not_checked() {
        let mut graph = DocumentGraph::new("doc.ttl");
        let node = graph.node_entry(&Term::Blank("l".to_string()), 3);
        node.markers.push(Marker {
            construct: UnsupportedConstruct::ListVocabulary,
            line: 3,
        });
        let diagnostics = validate(&graph, &OntologyModel::new());
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].is_error());
    }
}
