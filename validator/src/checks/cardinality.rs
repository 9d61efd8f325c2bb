//! Cardinality: class restrictions and functional properties.
//!
//! Counts are of distinct values. A value asserted through a subproperty
//! counts towards restrictions on its superproperties.

use std::collections::{BTreeMap, BTreeSet};

use ontoval_model::{Cardinality, Diagnostic, DiagnosticKind, DocumentNode, Value};

use super::types::NodeTypes;
use crate::engine::Context;
use crate::resolve::Resolved;

/// Distinct values per resolved property, each with the line it first
/// appeared on.
type ValueTable = BTreeMap<String, BTreeMap<String, u32>>;

fn value_key(cx: &Context<'_>, value: &Value) -> Option<String> {
    match value {
        Value::Node(term) => Some(match cx.resolver.resolve(term) {
            Resolved::Iri(iri) => format!("<{iri}>"),
            Resolved::Blank(key) => key,
            Resolved::Unresolvable { .. } => term.to_string(),
        }),
        Value::Literal(literal) => Some(literal.to_string()),
        Value::Unsupported(_) => None,
    }
}

fn collect(cx: &Context<'_>, node: &DocumentNode) -> ValueTable {
    let mut table = ValueTable::new();
    for assertion in &node.assertions {
        let Resolved::Iri(property) = cx.resolver.resolve(&assertion.property) else {
            continue;
        };
        let Some(key) = value_key(cx, &assertion.value) else {
            continue;
        };
        table
            .entry(property)
            .or_default()
            .entry(key)
            .or_insert(assertion.line);
    }
    table
}

/// Lines of the distinct values counting towards `property`, in order.
fn counted_lines(cx: &Context<'_>, table: &ValueTable, property: &str) -> Vec<u32> {
    let mut merged: BTreeMap<&str, u32> = BTreeMap::new();
    for (used, values) in table {
        if !cx.ontology.is_subproperty_of(used, property) {
            continue;
        }
        for (key, line) in values {
            let entry = merged.entry(key.as_str()).or_insert(*line);
            *entry = (*entry).min(*line);
        }
    }
    let mut lines: Vec<u32> = merged.into_values().collect();
    lines.sort_unstable();
    lines
}

/// Where to report a violation: the first excess value, or the node itself
/// when values are missing.
fn violation_line(node: &DocumentNode, lines: &[u32], cardinality: &Cardinality) -> u32 {
    cardinality
        .max
        .and_then(|max| lines.get(max as usize).copied())
        .unwrap_or(node.line)
}

/// Checks the restrictions of every known type of `node`, and the
/// functional properties it uses.
pub fn check(cx: &Context<'_>, node: &DocumentNode, types: &NodeTypes, out: &mut Vec<Diagnostic>) {
    let table = collect(cx, node);
    let mut seen: BTreeSet<(&str, &str)> = BTreeSet::new();

    for class in &types.known {
        let Some(class) = cx.ontology.find_class(class) else {
            continue;
        };
        for (property, restriction) in &class.restrictions {
            if restriction.cardinality.is_unbounded()
                || !seen.insert((restriction.declared_by.as_str(), property.as_str()))
            {
                continue;
            }
            let lines = counted_lines(cx, &table, property);
            if restriction.cardinality.admits(lines.len()) {
                continue;
            }
            let message = if lines.is_empty() {
                format!(
                    "missing {}: {} requires {}",
                    cx.display(property),
                    cx.display(&restriction.declared_by),
                    restriction.cardinality
                )
            } else {
                format!(
                    "{} has {} distinct value(s); {} requires {}",
                    cx.display(property),
                    lines.len(),
                    cx.display(&restriction.declared_by),
                    restriction.cardinality
                )
            };
            out.push(cx.locate(
                Diagnostic::error(DiagnosticKind::CardinalityViolation, message),
                &node.id,
                violation_line(node, &lines, &restriction.cardinality),
            ));
        }
    }

    for (used, values) in &table {
        let Some(property) = cx.ontology.find_property(used) else {
            continue;
        };
        if property.cardinality.is_unbounded() || property.cardinality.admits(values.len()) {
            continue;
        }
        let mut lines: Vec<u32> = values.values().copied().collect();
        lines.sort_unstable();
        out.push(cx.locate(
            Diagnostic::error(
                DiagnosticKind::CardinalityViolation,
                format!(
                    "{} has {} distinct values but allows {}",
                    cx.display(used),
                    values.len(),
                    property.cardinality
                ),
            ),
            &node.id,
            violation_line(node, &lines, &property.cardinality),
        ));
    }
}
