//! Prefix-to-IRI bindings.
//!
//! A [`NamespaceTable`] maps each prefix to exactly one IRI base. The same
//! base may be reached through a second prefix, in which case the second
//! prefix is recorded as an alias of the first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::iris::STANDARD_PREFIXES;

/// A prefix bound to an IRI base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// The prefix (e.g., `"xsd"`). The empty prefix is allowed.
    pub prefix: String,
    /// The full IRI base (e.g., `"http://www.w3.org/2001/XMLSchema#"`).
    pub iri: String,
}

/// Outcome of [`NamespaceTable::bind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// The prefix was unbound and its IRI was new.
    New,
    /// The exact binding was already present.
    Duplicate,
    /// The prefix is already bound to a different IRI. The table is unchanged.
    PrefixConflict {
        /// The IRI the prefix keeps.
        existing: String,
    },
    /// The IRI was already reachable under another prefix. The new prefix is
    /// kept as an alias.
    Alias {
        /// The first prefix bound to this IRI.
        canonical: String,
    },
}

/// The namespace table of a compiled ontology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceTable {
    prefixes: BTreeMap<String, String>,
    canonical: BTreeMap<String, String>,
}

impl NamespaceTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table seeded with the `rdf`, `rdfs`, `xsd`, `owl` and `sh`
    /// bindings.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new();
        for (prefix, iri) in STANDARD_PREFIXES {
            table.bind(prefix, iri);
        }
        table
    }

    /// Binds `prefix` to `iri`. The first binding of a prefix wins.
    pub fn bind(&mut self, prefix: &str, iri: &str) -> Binding {
        if let Some(existing) = self.prefixes.get(prefix) {
            return if existing == iri {
                Binding::Duplicate
            } else {
                Binding::PrefixConflict {
                    existing: existing.clone(),
                }
            };
        }
        self.prefixes.insert(prefix.to_string(), iri.to_string());
        match self.canonical.get(iri) {
            Some(canonical) => Binding::Alias {
                canonical: canonical.clone(),
            },
            None => {
                self.canonical.insert(iri.to_string(), prefix.to_string());
                Binding::New
            }
        }
    }

    /// Returns the IRI base bound to `prefix`.
    #[must_use]
    pub fn iri_for(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Returns the first prefix bound to `iri`.
    #[must_use]
    pub fn prefix_for(&self, iri: &str) -> Option<&str> {
        self.canonical.get(iri).map(String::as_str)
    }

    /// Expands `prefix:local` into a full IRI.
    #[must_use]
    pub fn expand(&self, prefix: &str, local: &str) -> Option<String> {
        self.iri_for(prefix).map(|base| format!("{base}{local}"))
    }

    /// Compacts a full IRI into `prefix:local` using the longest matching
    /// base. Returns `None` when no base matches.
    #[must_use]
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.canonical
            .iter()
            .filter(|(base, _)| iri.starts_with(base.as_str()) && iri.len() > base.len())
            .max_by_key(|(base, _)| base.len())
            .map(|(base, prefix)| format!("{prefix}:{}", &iri[base.len()..]))
    }

    /// Compacts `iri` when possible, otherwise wraps it in angle brackets.
    #[must_use]
    pub fn display(&self, iri: &str) -> String {
        self.compact(iri).unwrap_or_else(|| format!("<{iri}>"))
    }

    /// Iterates over every binding, aliases included, ordered by prefix.
    pub fn iter(&self) -> impl Iterator<Item = Namespace> + '_ {
        self.prefixes.iter().map(|(prefix, iri)| Namespace {
            prefix: prefix.clone(),
            iri: iri.clone(),
        })
    }

    /// Number of bound prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether no prefix is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iris;

    #[test]
    fn standard_table_has_default_bindings() {
        let table = NamespaceTable::standard();
        assert_eq!(table.iri_for("xsd"), Some(iris::XSD));
        assert_eq!(table.iri_for("sh"), Some(iris::SH));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn first_binding_wins_on_conflict() {
        let mut table = NamespaceTable::new();
        assert_eq!(table.bind("ex", "http://a.example/"), Binding::New);
        assert_eq!(
            table.bind("ex", "http://b.example/"),
            Binding::PrefixConflict {
                existing: "http://a.example/".to_string()
            }
        );
        assert_eq!(table.iri_for("ex"), Some("http://a.example/"));
    }

    #[test]
    fn second_prefix_for_same_iri_is_alias() {
        let mut table = NamespaceTable::new();
        table.bind("ex", "http://a.example/");
        assert_eq!(
            table.bind("ex2", "http://a.example/"),
            Binding::Alias {
                canonical: "ex".to_string()
            }
        );
        assert_eq!(table.expand("ex2", "Dog").as_deref(), Some("http://a.example/Dog"));
        assert_eq!(table.prefix_for("http://a.example/"), Some("ex"));
    }

    #[test]
    fn rebinding_identically_is_duplicate() {
        let mut table = NamespaceTable::standard();
        assert_eq!(table.bind("owl", iris::OWL), Binding::Duplicate);
    }

    #[test]
    fn compact_prefers_longest_base() {
        let mut table = NamespaceTable::new();
        table.bind("ex", "http://a.example/");
        table.bind("sub", "http://a.example/sub/");
        assert_eq!(
            table.compact("http://a.example/sub/Thing").as_deref(),
            Some("sub:Thing")
        );
        assert_eq!(table.display("http://other.example/x"), "<http://other.example/x>");
    }
}
