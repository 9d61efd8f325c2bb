//! Document parser: Turtle text or a document artifact in, [`DocumentGraph`] out.
//!
//! Constructs the validator does not interpret are kept as [`Marker`]s so the
//! engine can report them at the right line. Parse-time findings are kept on
//! the graph too, so a cached document reports exactly what its text does;
//! [`parse_diagnostics`] renders them.

use std::path::Path;

use ontoval_model::iris;
use ontoval_model::serializer::{is_artifact, load_artifact};
use ontoval_model::{
    Assertion, Diagnostic, DiagnosticKind, DocumentGraph, LiteralType, Marker, ModelError, Result,
    Term, TypeAssertion, UnsupportedConstruct, Value,
};
use tracing::debug;

use crate::ontology::read_text;
use crate::turtle::{read, Object, Statement, Triple};

/// Parses a Turtle document from disk.
///
/// # Errors
///
/// Returns [`ModelError::Io`] if the file cannot be read and
/// [`ModelError::Format`] if it is not UTF-8 or contains any malformed
/// statement.
pub fn parse_document<P: AsRef<Path>>(path: P) -> Result<(DocumentGraph, Vec<Diagnostic>)> {
    let path = path.as_ref();
    let text = read_text(path)?;
    parse_document_str(&path.display().to_string(), &text)
}

/// Parses a document that is either Turtle text or a document artifact.
///
/// # Errors
///
/// As [`parse_document`], plus [`ModelError::VersionMismatch`] for an
/// artifact written by another toolkit version and [`ModelError::Format`]
/// for an ontology artifact.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<(DocumentGraph, Vec<Diagnostic>)> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| ModelError::io(&name, e))?;
    if !is_artifact(&bytes) {
        return parse_document(path);
    }
    let (_, artifact, header) = load_artifact(&bytes)?;
    debug!(document = %name, created_at = %header.created_at, "loaded document artifact");
    artifact
        .into_document()
        .map(|graph| {
            let diagnostics = parse_diagnostics(&graph);
            (graph, diagnostics)
        })
        .ok_or_else(|| ModelError::format(&name, "artifact holds an ontology, not a document"))
}

/// Parses Turtle text held in memory. `name` identifies the document in
/// errors and diagnostics.
///
/// # Errors
///
/// Returns [`ModelError::Format`] at the line of the first malformed
/// statement.
pub fn parse_document_str(name: &str, text: &str) -> Result<(DocumentGraph, Vec<Diagnostic>)> {
    let parsed = read(text);
    if let Some(error) = parsed.errors.first() {
        return Err(ModelError::format_at(name, error.line, error.message.clone()));
    }

    let mut graph = DocumentGraph::new(name);
    for statement in parsed.statements {
        match statement {
            Statement::Prefix { prefix, iri, line } => {
                graph.declare_prefix(&prefix, &iri, line);
            }
            Statement::Base { line, .. } => graph.markers.push(Marker {
                construct: UnsupportedConstruct::BaseDirective,
                line,
            }),
            Statement::CollectionSubject { subject, line, .. } => {
                graph.node_entry(&subject, line).markers.push(Marker {
                    construct: UnsupportedConstruct::OrderedList,
                    line,
                });
            }
            Statement::Triple(triple) => add_triple(&mut graph, triple),
        }
    }
    debug!(document = name, nodes = graph.node_count(), "parsed document");
    let diagnostics = parse_diagnostics(&graph);
    Ok((graph, diagnostics))
}

/// Errors the parser records on a graph: prefixes redeclared with another
/// IRI and literals used as types. The validation engine reports these as
/// well, so callers that validate should not add them a second time.
#[must_use]
pub fn parse_diagnostics(graph: &DocumentGraph) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = graph
        .redeclarations()
        .map(|(decl, kept)| {
            Diagnostic::error(
                DiagnosticKind::NamespaceConflict,
                format!("prefix '{}' redeclared as <{}>; keeping <{kept}>", decl.prefix, decl.iri),
            )
            .in_document(graph.source.clone())
            .at_node(format!("{}:", decl.prefix))
            .at_line(decl.line)
        })
        .collect();
    for node in graph.nodes() {
        for LiteralType { literal, line } in &node.literal_types {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticKind::UnknownClass,
                    format!("literal {literal} cannot be a type"),
                )
                .in_document(graph.source.clone())
                .at_node(node.id.to_string())
                .at_line(*line),
            );
        }
    }
    diagnostics
}

/// Whether `term` denotes the RDF vocabulary IRI `iri`, also when the
/// standard `rdf:` prefix is used without being declared.
fn denotes(graph: &DocumentGraph, term: &Term, iri: &str) -> bool {
    if graph.node_key(term) == iri {
        return true;
    }
    match term {
        Term::Prefixed { prefix, local } if graph.prefix_iri(prefix).is_none() => iris::STANDARD_PREFIXES
            .iter()
            .any(|(p, base)| *p == prefix.as_str() && format!("{base}{local}") == iri),
        _ => false,
    }
}

fn add_triple(graph: &mut DocumentGraph, triple: Triple) {
    let Triple {
        subject,
        subject_line,
        predicate,
        object,
        line,
    } = triple;

    if denotes(graph, &predicate, iris::RDF_TYPE) {
        let list_type = matches!(&object, Object::Term(t) if denotes(graph, t, iris::RDF_LIST));
        let node = graph.node_entry(&subject, subject_line);
        match object {
            Object::Term(_) if list_type => node.markers.push(Marker {
                construct: UnsupportedConstruct::ListVocabulary,
                line,
            }),
            Object::Term(class) => node.types.push(TypeAssertion { class, line }),
            Object::Literal(literal) => node.literal_types.push(LiteralType { literal, line }),
            Object::Collection(_) => node.markers.push(Marker {
                construct: UnsupportedConstruct::OrderedList,
                line,
            }),
        }
        return;
    }

    if denotes(graph, &predicate, iris::RDF_FIRST) || denotes(graph, &predicate, iris::RDF_REST) {
        graph.node_entry(&subject, subject_line).markers.push(Marker {
            construct: UnsupportedConstruct::ListVocabulary,
            line,
        });
        return;
    }

    let value = match object {
        Object::Term(term) => Value::Node(term),
        Object::Literal(literal) => Value::Literal(literal),
        Object::Collection(_) => Value::Unsupported(UnsupportedConstruct::OrderedList),
    };
    graph.node_entry(&subject, subject_line).assertions.push(Assertion {
        property: predicate,
        value,
        line,
    });
}
