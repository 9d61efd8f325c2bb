//! Property assertions: declaration, domain, range and references.

use ontoval_model::iris;
use ontoval_model::{
    Assertion, Diagnostic, DiagnosticKind, DocumentNode, Literal, OntologyProperty, RangeKind,
    Term, Value,
};

use super::literals;
use super::types::NodeTypes;
use crate::engine::Context;
use crate::resolve::Resolved;

/// Checks every property assertion of `node`.
///
/// An unknown property is reported once per occurrence whatever the node's
/// types. Domain checks need at least one known type.
pub fn check(cx: &Context<'_>, node: &DocumentNode, types: &NodeTypes, out: &mut Vec<Diagnostic>) {
    for assertion in &node.assertions {
        if let Value::Unsupported(construct) = assertion.value {
            out.push(cx.locate(
                Diagnostic::unsupported(format!(
                    "{} is not supported; statement is not checked",
                    construct.describe()
                )),
                &node.id,
                assertion.line,
            ));
            continue;
        }

        check_reference(cx, node, assertion, out);

        let iri = match cx.resolver.resolve(&assertion.property) {
            Resolved::Iri(iri) => iri,
            Resolved::Blank(_) => {
                out.push(cx.locate(
                    Diagnostic::error(
                        DiagnosticKind::UnknownProperty,
                        format!("blank node {} used as a property", assertion.property),
                    ),
                    &node.id,
                    assertion.line,
                ));
                continue;
            }
            Resolved::Unresolvable { reason, .. } => {
                out.push(cx.locate(
                    Diagnostic::error(
                        DiagnosticKind::UnknownProperty,
                        format!("unknown property {}: {reason}", assertion.property),
                    ),
                    &node.id,
                    assertion.line,
                ));
                continue;
            }
        };

        let Some(property) = cx.ontology.find_property(&iri) else {
            out.push(cx.locate(
                Diagnostic::error(
                    DiagnosticKind::UnknownProperty,
                    format!("unknown property {}", cx.display(&iri)),
                ),
                &node.id,
                assertion.line,
            ));
            if let Value::Literal(literal) = &assertion.value {
                literals::check(cx, &node.id, assertion.line, literal, None, out);
            }
            continue;
        };

        if types.is_checkable()
            && !cx
                .ontology
                .property_applies_to(property, types.known.iter().map(String::as_str))
        {
            out.push(cx.locate(
                Diagnostic::error(
                    DiagnosticKind::PropertyNotApplicable,
                    format!(
                        "{} does not apply to {}; its domain is {}",
                        cx.display(&iri),
                        list(cx, &types.known),
                        list(cx, &property.domains)
                    ),
                ),
                &node.id,
                assertion.line,
            ));
        }

        check_range(cx, node, assertion, property, types, out);
    }
}

fn list(cx: &Context<'_>, iris: &[String]) -> String {
    iris.iter()
        .map(|iri| cx.display(iri))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A written blank label must be described somewhere in the document.
fn check_reference(
    cx: &Context<'_>,
    node: &DocumentNode,
    assertion: &Assertion,
    out: &mut Vec<Diagnostic>,
) {
    if let Value::Node(target @ Term::Blank(_)) = &assertion.value {
        if !target.is_generated() && cx.graph.find_node(target).is_none() {
            out.push(cx.locate(
                Diagnostic::error(
                    DiagnosticKind::DanglingReference,
                    format!("{target} is referenced but never described"),
                ),
                &node.id,
                assertion.line,
            ));
        }
    }
}

/// The range a value must satisfy: a restriction on one of the node's
/// classes overrides the property's own range.
fn effective_range(
    cx: &Context<'_>,
    property: &OntologyProperty,
    types: &NodeTypes,
) -> Option<String> {
    types
        .known
        .iter()
        .find_map(|class| {
            cx.ontology
                .restriction(class, &property.id)
                .and_then(|r| r.range.clone())
        })
        .or_else(|| property.range.clone())
}

fn check_range(
    cx: &Context<'_>,
    node: &DocumentNode,
    assertion: &Assertion,
    property: &OntologyProperty,
    types: &NodeTypes,
    out: &mut Vec<Diagnostic>,
) {
    let range = effective_range(cx, property, types);
    let kind = range.as_deref().map(|r| cx.ontology.range_kind(r));
    match (&assertion.value, range.as_deref(), kind) {
        (Value::Literal(literal), Some(range), Some(RangeKind::Datatype)) => {
            literals::check(cx, &node.id, assertion.line, literal, Some(range), out);
        }
        (Value::Literal(literal), Some(range), Some(RangeKind::Class)) => {
            if range != iris::RDFS_RESOURCE {
                out.push(literal_for_class(cx, node, assertion, literal, range));
            }
            literals::check(cx, &node.id, assertion.line, literal, None, out);
        }
        (Value::Literal(literal), _, _) => {
            literals::check(cx, &node.id, assertion.line, literal, None, out);
        }
        (Value::Node(target), Some(range), Some(RangeKind::Datatype)) => {
            if range != iris::RDFS_RESOURCE {
                out.push(cx.locate(
                    Diagnostic::error(
                        DiagnosticKind::RangeMismatch,
                        format!(
                            "{} expects a {} literal but {target} is a node",
                            cx.display(&property.id),
                            cx.display(range)
                        ),
                    ),
                    &node.id,
                    assertion.line,
                ));
            }
        }
        (Value::Node(target), Some(range), Some(RangeKind::Class)) => {
            check_class_range(cx, node, assertion, target, range, out);
        }
        _ => {}
    }
}

fn literal_for_class(
    cx: &Context<'_>,
    node: &DocumentNode,
    assertion: &Assertion,
    literal: &Literal,
    range: &str,
) -> Diagnostic {
    cx.locate(
        Diagnostic::error(
            DiagnosticKind::RangeMismatch,
            format!(
                "{} expects an instance of {} but the value is the literal {literal}",
                assertion.property,
                cx.display(range)
            ),
        ),
        &node.id,
        assertion.line,
    )
}

/// The referenced node satisfies a class range when one of its asserted
/// types is the range or a subclass of it. Nodes the document does not
/// describe, or describes without types, are not judged here.
fn check_class_range(
    cx: &Context<'_>,
    node: &DocumentNode,
    assertion: &Assertion,
    target: &Term,
    range: &str,
    out: &mut Vec<Diagnostic>,
) {
    if range == iris::OWL_THING || range == iris::RDFS_RESOURCE {
        return;
    }
    let Some(described) = cx.graph.find_node(target) else {
        return;
    };
    if described.types.is_empty() {
        return;
    }
    let satisfied = described.types.iter().any(|ty| {
        cx.resolver
            .resolve(&ty.class)
            .iri()
            .is_some_and(|iri| cx.ontology.satisfies_range(iri, range))
    });
    if !satisfied {
        let asserted: Vec<String> = described.types.iter().map(|t| t.class.to_string()).collect();
        out.push(cx.locate(
            Diagnostic::error(
                DiagnosticKind::RangeMismatch,
                format!(
                    "{target} has type {} but {} expects {}",
                    asserted.join(", "),
                    assertion.property,
                    cx.display(range)
                ),
            ),
            &node.id,
            assertion.line,
        ));
    }
}
