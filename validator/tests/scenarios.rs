//! End-to-end validation scenarios over the animals ontology.

mod fixtures;

use fixtures::{check, error_count, errors_of, CONFORMANT, OWNED_BY_ROBOT, OWNED_DOG};
use ontoval_model::{DiagnosticKind, Severity};

const HEADER: &str = "@prefix ex: <http://example.org/> .\n\
                      @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n";

/// Validates `body` placed after [`HEADER`], so its first line is line 3.
fn check_body(body: &str) -> Vec<ontoval_model::Diagnostic> {
    check(&format!("{HEADER}{body}"))
}

#[test]
fn owned_dog_is_conformant() {
    let diagnostics = check(OWNED_DOG);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn conformant_document_has_no_errors() {
    let diagnostics = check(CONFORMANT);
    assert_eq!(error_count(&diagnostics), 0, "{diagnostics:?}");
}

#[test]
fn undeclared_owner_type_is_unknown_class_and_range_mismatch() {
    let diagnostics = check(OWNED_BY_ROBOT);
    assert_eq!(error_count(&diagnostics), 2, "{diagnostics:?}");

    let unknown = errors_of(&diagnostics, DiagnosticKind::UnknownClass);
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].node.as_deref(), Some("_:p1"));
    assert_eq!(unknown[0].line, Some(5));

    let mismatch = errors_of(&diagnostics, DiagnosticKind::RangeMismatch);
    assert_eq!(mismatch.len(), 1);
    assert_eq!(mismatch[0].line, Some(4));
    assert_eq!(mismatch[0].node.as_deref(), Some("_:d1"));
}

#[test]
fn undeclared_property_is_reported_once_per_occurrence() {
    let diagnostics = check_body(
        "_:d1 a ex:Dog ;\n\
           ex:colour \"red\" ;\n\
           ex:colour \"blue\" .\n\
         _:x ex:colour \"green\" .\n",
    );
    let unknown = errors_of(&diagnostics, DiagnosticKind::UnknownProperty);
    let lines: Vec<Option<u32>> = unknown.iter().map(|d| d.line).collect();
    assert_eq!(lines, [Some(4), Some(5), Some(6)]);
    assert_eq!(errors_of(&diagnostics, DiagnosticKind::UntypedNode).len(), 1);
}

#[test]
fn unresolvable_property_prefix_is_unknown_property() {
    let diagnostics = check_body("_:d1 a ex:Dog ; nope:owner _:d1 .\n");
    let unknown = errors_of(&diagnostics, DiagnosticKind::UnknownProperty);
    assert_eq!(unknown.len(), 1);
    assert!(unknown[0].message.contains("nope"));
}

#[test]
fn domain_accepts_subclasses_only() {
    let diagnostics = check_body(
        "_:d a ex:Dog ; ex:age \"4\"^^xsd:nonNegativeInteger .\n\
         _:p a ex:Person ; ex:age \"40\"^^xsd:nonNegativeInteger .\n",
    );
    let not_applicable = errors_of(&diagnostics, DiagnosticKind::PropertyNotApplicable);
    assert_eq!(not_applicable.len(), 1);
    assert_eq!(not_applicable[0].line, Some(4));
    assert_eq!(error_count(&diagnostics), 1);
}

#[test]
fn datatype_range_accepts_subtypes() {
    let diagnostics = check_body(
        "_:a a ex:Dog ; ex:age \"4\"^^xsd:positiveInteger .\n\
         _:b a ex:Dog ; ex:age \"4\"^^xsd:integer .\n\
         _:c a ex:Dog ; ex:age \"4\" .\n",
    );
    let mismatch = errors_of(&diagnostics, DiagnosticKind::DatatypeMismatch);
    assert_eq!(mismatch.len(), 1);
    assert_eq!(mismatch[0].line, Some(4));
    assert_eq!(error_count(&diagnostics), 1);
}

#[test]
fn ordered_list_is_unsupported_not_an_error() {
    let diagnostics = check_body(
        "_:d1 a ex:Dog ;\n\
           ex:owner ( _:p1 _:p2 ) .\n",
    );
    assert_eq!(error_count(&diagnostics), 0);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::UnsupportedFeature);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnsupportedFeature);
    assert_eq!(diagnostics[0].line, Some(4));
}

#[test]
fn invalid_literals_are_reported() {
    let diagnostics = check_body(
        "_:d a ex:Dog ;\n\
           ex:age \"-3\"^^xsd:nonNegativeInteger ;\n\
           ex:coat \"purple\"^^ex:Colour ;\n\
           ex:name \"x\"^^ex:NoSuchType .\n",
    );
    let invalid = errors_of(&diagnostics, DiagnosticKind::InvalidLiteral);
    assert_eq!(invalid.len(), 2);
    assert!(invalid[1].message.contains("purple"));
    assert_eq!(errors_of(&diagnostics, DiagnosticKind::UnknownDatatype).len(), 1);
}

#[test]
fn cardinality_counts_distinct_values() {
    let diagnostics = check_body(
        "_:p1 a ex:Person . _:p2 a ex:Person . _:p3 a ex:Person .\n\
         _:d a ex:Dog ;\n\
           ex:name \"Rex\" ;\n\
           ex:name \"Rex\" ;\n\
           ex:owner _:p1 , _:p2 , _:p1 .\n",
    );
    assert_eq!(error_count(&diagnostics), 0, "{diagnostics:?}");

    let diagnostics = check_body(
        "_:p1 a ex:Person . _:p2 a ex:Person . _:p3 a ex:Person .\n\
         _:d a ex:Dog ;\n\
           ex:name \"Rex\" ;\n\
           ex:name \"Max\" ;\n\
           ex:owner _:p1 , _:p2 , _:p3 .\n",
    );
    let violations = errors_of(&diagnostics, DiagnosticKind::CardinalityViolation);
    let lines: Vec<Option<u32>> = violations.iter().map(|d| d.line).collect();
    assert_eq!(lines, [Some(6), Some(7)]);
}

#[test]
fn dangling_blank_references_are_reported() {
    let diagnostics = check_body("_:d a ex:Dog ; ex:owner _:ghost , [] .\n");
    let dangling = errors_of(&diagnostics, DiagnosticKind::DanglingReference);
    assert_eq!(dangling.len(), 1);
    assert!(dangling[0].message.contains("_:ghost"));
}

#[test]
fn value_kind_must_match_range_kind() {
    let diagnostics = check_body(
        "_:p a ex:Person .\n\
         _:d a ex:Dog ;\n\
           ex:owner \"Bob\" ;\n\
           ex:age _:p .\n",
    );
    let lines: Vec<Option<u32>> = errors_of(&diagnostics, DiagnosticKind::RangeMismatch)
        .iter()
        .map(|d| d.line)
        .collect();
    assert_eq!(lines, [Some(5), Some(6)]);
}

#[test]
fn contradicting_document_prefix_is_a_conflict() {
    let diagnostics = check(
        "@prefix ex: <http://elsewhere.example/> .\n\
         _:d a ex:Dog ; ex:owner _:d .\n",
    );
    let conflicts = errors_of(&diagnostics, DiagnosticKind::NamespaceConflict);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].line, Some(1));
    assert_eq!(
        errors_of(&diagnostics, DiagnosticKind::UnresolvableNamespace).len(),
        1
    );
    assert_eq!(errors_of(&diagnostics, DiagnosticKind::UnknownProperty).len(), 1);
}

#[test]
fn diagnostics_for_one_node_do_not_hide_later_nodes() {
    let diagnostics = check_body(
        "_:a a ex:Cat .\n\
         _:b a ex:Cow .\n",
    );
    let unknown = errors_of(&diagnostics, DiagnosticKind::UnknownClass);
    let nodes: Vec<Option<&str>> = unknown.iter().map(|d| d.node.as_deref()).collect();
    assert_eq!(nodes, [Some("_:a"), Some("_:b")]);
}

#[test]
fn diagnostics_render_with_kind_and_location() {
    let diagnostics = check(OWNED_BY_ROBOT);
    let rendered = diagnostics[0].to_string();
    assert!(rendered.starts_with("error[range-mismatch] doc.ttl:4 _:d1"), "{rendered}");
}
