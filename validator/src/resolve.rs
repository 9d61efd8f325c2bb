//! Identifier resolution for one document against one ontology.
//!
//! A prefixed name resolves through the document's own declaration first,
//! then the ontology's namespace table. A document prefix whose IRI
//! contradicts the ontology's binding for the same prefix is a conflict:
//! every name using it is unresolvable.

use std::collections::BTreeMap;

use ontoval_model::{DocumentGraph, OntologyModel, PrefixDeclaration, Term};

/// The outcome of resolving one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A full IRI.
    Iri(String),
    /// A blank node, keyed the way the graph keys it.
    Blank(String),
    /// A prefixed name whose prefix cannot be used.
    Unresolvable {
        /// The offending prefix.
        prefix: String,
        /// Why it cannot be used.
        reason: String,
    },
}

impl Resolved {
    /// The IRI, if resolution produced one.
    #[must_use]
    pub fn iri(&self) -> Option<&str> {
        match self {
            Resolved::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

/// Resolves document terms. Built per document; holds no state shared
/// between documents.
#[derive(Debug)]
pub struct Resolver<'a> {
    ontology: &'a OntologyModel,
    graph: &'a DocumentGraph,
    conflicts: BTreeMap<String, &'a PrefixDeclaration>,
}

impl<'a> Resolver<'a> {
    /// Builds a resolver and detects prefix conflicts.
    #[must_use]
    pub fn new(graph: &'a DocumentGraph, ontology: &'a OntologyModel) -> Self {
        let mut conflicts = BTreeMap::new();
        for declaration in &graph.prefixes {
            if conflicts.contains_key(&declaration.prefix) {
                continue;
            }
            // Only the declaration in effect counts.
            if graph.prefix_iri(&declaration.prefix) != Some(declaration.iri.as_str()) {
                continue;
            }
            if let Some(expected) = ontology.namespaces.iri_for(&declaration.prefix) {
                if expected != declaration.iri {
                    conflicts.insert(declaration.prefix.clone(), declaration);
                }
            }
        }
        Self {
            ontology,
            graph,
            conflicts,
        }
    }

    /// Document declarations that contradict the ontology, one per prefix.
    pub fn conflicts(&self) -> impl Iterator<Item = &'a PrefixDeclaration> + '_ {
        self.conflicts.values().copied()
    }

    /// Resolves `term`.
    #[must_use]
    pub fn resolve(&self, term: &Term) -> Resolved {
        match term {
            Term::Iri(iri) => Resolved::Iri(iri.clone()),
            Term::Blank(_) => Resolved::Blank(self.graph.node_key(term)),
            Term::Prefixed { prefix, local } => {
                if let Some(declaration) = self.conflicts.get(prefix) {
                    let expected = self.ontology.namespaces.iri_for(prefix).unwrap_or_default();
                    return Resolved::Unresolvable {
                        prefix: prefix.clone(),
                        reason: format!(
                            "the document binds '{prefix}' to <{}> but the ontology binds it to <{expected}>",
                            declaration.iri
                        ),
                    };
                }
                if let Some(base) = self.graph.prefix_iri(prefix) {
                    return Resolved::Iri(format!("{base}{local}"));
                }
                match self.ontology.namespaces.expand(prefix, local) {
                    Some(iri) => Resolved::Iri(iri),
                    None => Resolved::Unresolvable {
                        prefix: prefix.clone(),
                        reason: format!("prefix '{prefix}' is not declared"),
                    },
                }
            }
        }
    }

    /// Compact display form of an IRI using the ontology's prefixes.
    #[must_use]
    pub fn display(&self, iri: &str) -> String {
        self.ontology.namespaces.display(iri)
    }
}
