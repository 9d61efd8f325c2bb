//! Literal values.

use ontoval_model::{Diagnostic, DiagnosticKind, Literal, Term};

use super::lexical;
use crate::engine::Context;
use crate::resolve::Resolved;

/// Checks a literal written on `node` at `line`.
///
/// A literal without an explicit datatype is accepted as is. Otherwise the
/// datatype must be built in or declared, the lexical form must be valid
/// for it, and it must satisfy `range` when one applies.
pub fn check(
    cx: &Context<'_>,
    node: &Term,
    line: u32,
    literal: &Literal,
    range: Option<&str>,
    out: &mut Vec<Diagnostic>,
) {
    let Some(term) = &literal.datatype else {
        return;
    };
    let datatype = match cx.resolver.resolve(term) {
        Resolved::Iri(iri) => iri,
        Resolved::Blank(_) => {
            out.push(cx.locate(
                Diagnostic::error(
                    DiagnosticKind::UnknownDatatype,
                    format!("blank node {term} used as a datatype"),
                ),
                node,
                line,
            ));
            return;
        }
        Resolved::Unresolvable { reason, .. } => {
            out.push(cx.locate(
                Diagnostic::error(
                    DiagnosticKind::UnresolvableNamespace,
                    format!("cannot resolve datatype {term}: {reason}"),
                ),
                node,
                line,
            ));
            return;
        }
    };

    if cx.ontology.find_datatype(&datatype).is_none() {
        out.push(cx.locate(
            Diagnostic::error(
                DiagnosticKind::UnknownDatatype,
                format!(
                    "datatype {} is neither built in nor declared",
                    cx.display(&datatype)
                ),
            ),
            node,
            line,
        ));
        return;
    }

    if let Some(reason) = lexical::violation(cx.ontology, &datatype, &literal.lexical) {
        out.push(cx.locate(
            Diagnostic::error(DiagnosticKind::InvalidLiteral, reason),
            node,
            line,
        ));
    }

    if let Some(range) = range {
        if !cx.ontology.satisfies_range(&datatype, range) {
            out.push(cx.locate(
                Diagnostic::error(
                    DiagnosticKind::DatatypeMismatch,
                    format!(
                        "value has datatype {} but the range is {}",
                        cx.display(&datatype),
                        cx.display(range)
                    ),
                ),
                node,
                line,
            ));
        }
    }
}
