//! Ontology and document fixtures shared by the integration tests.
//!
//! Each constant holds a Turtle graph. Documents start on line 1 with their
//! prefix declarations so line numbers in assertions can be read off the
//! text directly.

#![allow(dead_code)]

use ontoval_compiler::{compile_sources, parse_document_str, OntologySource};
use ontoval_model::{Diagnostic, DiagnosticKind, OntologyModel};

/// Animals, dogs, their owners and coats.
pub const ANIMALS: &str = r#"@prefix ex:   <http://example.org/> .
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd:  <http://www.w3.org/2001/XMLSchema#> .

ex:Animal a owl:Class ; rdfs:label "Animal" .
ex:Dog    a owl:Class ; rdfs:subClassOf ex:Animal .
ex:Person a owl:Class .

ex:owner a owl:ObjectProperty ;
    rdfs:domain ex:Animal ;
    rdfs:range  ex:Person .

ex:name a owl:DatatypeProperty , owl:FunctionalProperty ;
    rdfs:range xsd:string .

ex:age a owl:DatatypeProperty ;
    rdfs:domain ex:Animal ;
    rdfs:range  xsd:nonNegativeInteger .

ex:Dog rdfs:subClassOf [
    a owl:Restriction ;
    owl:onProperty ex:owner ;
    owl:maxCardinality 2
] .

ex:Colour a rdfs:Datatype ;
    owl:oneOf ( "black" "brown" "white" ) .

ex:coat a owl:DatatypeProperty ;
    rdfs:domain ex:Dog ;
    rdfs:range  ex:Colour .
"#;

/// A dog owned by a person; `ex:owner` is on line 4.
pub const OWNED_DOG: &str = r#"@prefix ex: <http://example.org/> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
_:d1 a ex:Dog ;
    ex:owner _:p1 .
_:p1 a ex:Person .
"#;

/// As [`OWNED_DOG`] but the owner's type is not declared.
pub const OWNED_BY_ROBOT: &str = r#"@prefix ex: <http://example.org/> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
_:d1 a ex:Dog ;
    ex:owner _:p1 .
_:p1 a ex:Robot .
"#;

/// Every supported feature used correctly.
pub const CONFORMANT: &str = r#"@prefix ex:  <http://example.org/> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .

<http://example.org/rex> a ex:Dog , owl:NamedIndividual ;
    ex:name  "Rex" ;
    ex:age   "3"^^xsd:positiveInteger ;
    ex:coat  "brown"^^ex:Colour ;
    ex:owner _:ann , [ a ex:Person ; ex:name "Bob"@en ] .

_:ann a ex:Person ;
    ex:name "Ann"^^xsd:string .
"#;

/// Compiles [`ANIMALS`], asserting it compiles cleanly.
pub fn animals() -> OntologyModel {
    let (model, diagnostics) = compile_sources(&[OntologySource::new("animals.ttl", ANIMALS)]);
    assert!(diagnostics.is_empty(), "fixture ontology has diagnostics: {diagnostics:?}");
    model
}

/// Parses and validates `text` against [`animals`]. The parser's findings
/// are part of what `validate` reports.
pub fn check(text: &str) -> Vec<Diagnostic> {
    let model = animals();
    let (graph, _) = match parse_document_str("doc.ttl", text) {
        Ok(parsed) => parsed,
        Err(error) => unreachable!("fixture document failed to parse: {error}"),
    };
    ontoval_validator::validate(&graph, &model)
}

/// Error diagnostics of `kind`.
pub fn errors_of(diagnostics: &[Diagnostic], kind: DiagnosticKind) -> Vec<&Diagnostic> {
    diagnostics
        .iter()
        .filter(|d| d.is_error() && d.kind == kind)
        .collect()
}

/// Number of Error diagnostics.
pub fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.is_error()).count()
}
