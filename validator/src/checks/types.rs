//! Type assertions.

use ontoval_model::iris::UNIVERSAL_TYPES;
use ontoval_model::{Diagnostic, DiagnosticKind, DocumentNode};

use crate::engine::Context;
use crate::resolve::Resolved;

/// The classes a node was found to carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTypes {
    /// Whether the node asserts any type at all.
    pub asserted: bool,
    /// Asserted types that resolve to declared classes.
    pub known: Vec<String>,
}

impl NodeTypes {
    /// Whether domain and restriction checks can run for the node.
    #[must_use]
    pub fn is_checkable(&self) -> bool {
        !self.known.is_empty()
    }
}

/// Resolves every asserted type of `node` and reports those that name no
/// declared class.
pub fn check(cx: &Context<'_>, node: &DocumentNode, out: &mut Vec<Diagnostic>) -> NodeTypes {
    if node.types.is_empty() {
        out.push(cx.locate(
            Diagnostic::error(DiagnosticKind::UntypedNode, format!("{} has no type", node.id)),
            &node.id,
            node.line,
        ));
        return NodeTypes::default();
    }

    let mut known = Vec::new();
    for assertion in &node.types {
        match cx.resolver.resolve(&assertion.class) {
            Resolved::Iri(iri) if cx.ontology.find_class(&iri).is_some() => {
                if !known.contains(&iri) {
                    known.push(iri);
                }
            }
            Resolved::Iri(iri) if UNIVERSAL_TYPES.contains(&iri.as_str()) => {}
            Resolved::Iri(iri) => out.push(cx.locate(
                Diagnostic::error(
                    DiagnosticKind::UnknownClass,
                    format!("unknown class {}", cx.display(&iri)),
                ),
                &node.id,
                assertion.line,
            )),
            Resolved::Blank(_) => out.push(cx.locate(
                Diagnostic::error(
                    DiagnosticKind::UnknownClass,
                    format!("blank node {} used as a class", assertion.class),
                ),
                &node.id,
                assertion.line,
            )),
            Resolved::Unresolvable { reason, .. } => out.push(cx.locate(
                Diagnostic::error(
                    DiagnosticKind::UnresolvableNamespace,
                    format!("cannot resolve type {}: {reason}", assertion.class),
                ),
                &node.id,
                assertion.line,
            )),
        }
    }
    NodeTypes {
        asserted: true,
        known,
    }
}
