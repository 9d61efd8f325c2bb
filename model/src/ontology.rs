//! Compiled ontology model.
//!
//! An [`OntologyModel`] is built once by the compiler and shared read-only
//! across every document validation of a run. All identifiers are full IRIs.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::iris;
use crate::lattice::Lattice;
use crate::namespace::NamespaceTable;

/// Whether a property relates resources, literals, or documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropertyKind {
    /// `owl:ObjectProperty`: relates two resources.
    Object,
    /// `owl:DatatypeProperty`: relates a resource to a literal.
    Datatype,
    /// `owl:AnnotationProperty`: documentation only.
    Annotation,
    /// `rdf:Property` or implied by a domain or range statement.
    #[default]
    Unspecified,
}

impl PropertyKind {
    /// Short lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::Object => "object",
            PropertyKind::Datatype => "datatype",
            PropertyKind::Annotation => "annotation",
            PropertyKind::Unspecified => "unspecified",
        }
    }
}

/// Inclusive bounds on the number of distinct values of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cardinality {
    /// Minimum count, if bounded.
    pub min: Option<u32>,
    /// Maximum count, if bounded.
    pub max: Option<u32>,
}

impl Cardinality {
    /// No bounds at all.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Exactly `n` values.
    #[must_use]
    pub fn exactly(n: u32) -> Self {
        Self {
            min: Some(n),
            max: Some(n),
        }
    }

    /// Whether neither bound is set.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether `count` distinct values satisfy both bounds.
    #[must_use]
    pub fn admits(&self, count: usize) -> bool {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.min.is_none_or(|min| count >= min) && self.max.is_none_or(|max| count <= max)
    }

    /// Whether the bounds can be satisfied at all.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }

    /// Whether every count admitted by `self` is admitted by `other`.
    #[must_use]
    pub fn is_within(&self, other: &Cardinality) -> bool {
        let min_ok = match (self.min, other.min) {
            (_, None) => true,
            (Some(mine), Some(theirs)) => mine >= theirs,
            (None, Some(theirs)) => theirs == 0,
        };
        let max_ok = match (self.max, other.max) {
            (_, None) => true,
            (Some(mine), Some(theirs)) => mine <= theirs,
            (None, Some(_)) => false,
        };
        min_ok && max_ok
    }

    /// The tightest bounds admitted by both.
    #[must_use]
    pub fn intersect(&self, other: &Cardinality) -> Cardinality {
        Cardinality {
            min: match (self.min, other.min) {
                (Some(a), Some(b)) => Some(a.max(b)),
                (a, b) => a.or(b),
            },
            max: match (self.max, other.max) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            },
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => write!(f, "exactly {min}"),
            (Some(min), Some(max)) => write!(f, "between {min} and {max}"),
            (Some(min), None) => write!(f, "at least {min}"),
            (None, Some(max)) => write!(f, "at most {max}"),
            (None, None) => write!(f, "any number of"),
        }
    }
}

/// A property restriction attached to a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    /// Full IRI of the restricted property.
    pub property: String,
    /// Count bounds for instances of the class.
    pub cardinality: Cardinality,
    /// Range that overrides the property's own range for instances of the class.
    pub range: Option<String>,
    /// The class whose definition introduced this restriction.
    pub declared_by: String,
}

/// An ontology class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyClass {
    /// Full IRI.
    pub id: String,
    /// Direct superclasses (`rdfs:subClassOf`).
    pub superclasses: Vec<String>,
    /// Effective restrictions keyed by property IRI, inherited ones included.
    pub restrictions: BTreeMap<String, Restriction>,
}

impl OntologyClass {
    /// A class with no superclasses or restrictions.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            superclasses: Vec::new(),
            restrictions: BTreeMap::new(),
        }
    }
}

/// An ontology property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyProperty {
    /// Full IRI.
    pub id: String,
    /// Object, datatype, annotation, or unspecified.
    pub kind: PropertyKind,
    /// Declared domain classes. Empty means any subject is admitted.
    pub domains: Vec<String>,
    /// Declared range, datatype or class.
    pub range: Option<String>,
    /// Count bounds that apply to every subject.
    pub cardinality: Cardinality,
    /// Direct superproperties (`rdfs:subPropertyOf`).
    pub superproperties: Vec<String>,
}

impl OntologyProperty {
    /// A property of the given kind with no domain or range.
    #[must_use]
    pub fn new(id: &str, kind: PropertyKind) -> Self {
        Self {
            id: id.to_string(),
            kind,
            domains: Vec::new(),
            range: None,
            cardinality: Cardinality::unbounded(),
            superproperties: Vec::new(),
        }
    }
}

/// A built-in or ontology-defined datatype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datatype {
    /// Full IRI.
    pub id: String,
    /// Whether this is one of the seeded XSD/RDF datatypes.
    pub builtin: bool,
    /// Direct base datatypes.
    pub bases: Vec<String>,
    /// Closed set of admitted lexical forms (`owl:oneOf`).
    pub vocabulary: Option<BTreeSet<String>>,
}

impl Datatype {
    /// An ontology-defined datatype with no base.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            builtin: false,
            bases: Vec::new(),
            vocabulary: None,
        }
    }
}

/// What a range identifier denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    /// A datatype: values must be literals.
    Datatype,
    /// A class: values must be node references.
    Class,
}

/// The compiled ontology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyModel {
    /// Namespace table, seeded with the standard bindings.
    pub namespaces: NamespaceTable,
    /// Classes keyed by IRI.
    pub classes: BTreeMap<String, OntologyClass>,
    /// Properties keyed by IRI.
    pub properties: BTreeMap<String, OntologyProperty>,
    /// Datatypes keyed by IRI, built-ins included.
    pub datatypes: BTreeMap<String, Datatype>,
    /// Class and datatype subsumption.
    pub lattice: Lattice,
    /// Property subsumption.
    pub property_lattice: Lattice,
    /// Names of the sources the model was compiled from.
    pub sources: Vec<String>,
}

impl Default for OntologyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl OntologyModel {
    /// An empty model with the standard namespaces and the built-in datatype
    /// lattice. The lattice closure is computed.
    #[must_use]
    pub fn new() -> Self {
        let mut model = Self {
            namespaces: NamespaceTable::standard(),
            classes: BTreeMap::new(),
            properties: BTreeMap::new(),
            datatypes: BTreeMap::new(),
            lattice: Lattice::new(),
            property_lattice: Lattice::new(),
            sources: Vec::new(),
        };
        for (id, bases) in iris::BUILTIN_DATATYPES {
            model.lattice.add_node(id);
            for base in *bases {
                model.lattice.add_edge(id, base);
            }
            model.datatypes.insert(
                (*id).to_string(),
                Datatype {
                    id: (*id).to_string(),
                    builtin: true,
                    bases: bases.iter().map(|b| (*b).to_string()).collect(),
                    vocabulary: None,
                },
            );
        }
        model.lattice.finish();
        model
    }

    /// Looks up a class by its full IRI.
    #[must_use]
    pub fn find_class(&self, iri: &str) -> Option<&OntologyClass> {
        self.classes.get(iri)
    }

    /// Looks up a property by its full IRI.
    #[must_use]
    pub fn find_property(&self, iri: &str) -> Option<&OntologyProperty> {
        self.properties.get(iri)
    }

    /// Looks up a datatype by its full IRI.
    #[must_use]
    pub fn find_datatype(&self, iri: &str) -> Option<&Datatype> {
        self.datatypes.get(iri)
    }

    /// Number of declared classes.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of declared properties.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Number of ontology-defined datatypes, built-ins excluded.
    #[must_use]
    pub fn datatype_count(&self) -> usize {
        self.datatypes.values().filter(|d| !d.builtin).count()
    }

    /// Whether `sub` equals `sup` or is a transitive subclass of it.
    ///
    /// `owl:Thing` and `rdfs:Resource` subsume every class; `rdfs:Literal`
    /// subsumes every datatype.
    #[must_use]
    pub fn is_subclass_of(&self, sub: &str, sup: &str) -> bool {
        if self.lattice.is_subclass_of(sub, sup) {
            return true;
        }
        match sup {
            iris::OWL_THING => self.classes.contains_key(sub),
            iris::RDFS_RESOURCE => true,
            iris::RDFS_LITERAL => self.datatypes.contains_key(sub),
            _ => false,
        }
    }

    /// Whether a value of type `value_type` is acceptable for `range`.
    #[must_use]
    pub fn satisfies_range(&self, value_type: &str, range: &str) -> bool {
        self.is_subclass_of(value_type, range)
    }

    /// Whether `sub` equals `sup` or is a transitive subproperty of it.
    #[must_use]
    pub fn is_subproperty_of(&self, sub: &str, sup: &str) -> bool {
        self.property_lattice.is_subclass_of(sub, sup)
    }

    /// Classifies a range identifier. Anything that is neither a known
    /// datatype nor in the XSD namespace is treated as a class.
    #[must_use]
    pub fn range_kind(&self, range: &str) -> RangeKind {
        if self.datatypes.contains_key(range) || range.starts_with(iris::XSD) {
            RangeKind::Datatype
        } else {
            RangeKind::Class
        }
    }

    /// Whether `property` admits a subject carrying any of `types`.
    ///
    /// A property without a declared domain admits every subject.
    #[must_use]
    pub fn property_applies_to<'a>(
        &self,
        property: &OntologyProperty,
        types: impl IntoIterator<Item = &'a str> + Clone,
    ) -> bool {
        property.domains.is_empty()
            || property.domains.iter().any(|domain| {
                types
                    .clone()
                    .into_iter()
                    .any(|ty| self.is_subclass_of(ty, domain))
            })
    }

    /// The restriction on `property` that applies to an instance of `class`.
    #[must_use]
    pub fn restriction(&self, class: &str, property: &str) -> Option<&Restriction> {
        self.classes
            .get(class)
            .and_then(|c| c.restrictions.get(property))
    }

    /// The datatype ancestors of `datatype`, itself included.
    pub fn datatype_lineage<'a>(&'a self, datatype: &'a str) -> impl Iterator<Item = &'a Datatype> {
        std::iter::once(datatype)
            .chain(self.lattice.ancestors(datatype))
            .filter_map(|id| self.datatypes.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> OntologyModel {
        let mut model = OntologyModel::new();
        for id in ["ex:Animal", "ex:Dog", "ex:Person"] {
            model.classes.insert(id.to_string(), OntologyClass::new(id));
            model.lattice.add_node(id);
        }
        model.lattice.add_edge("ex:Dog", "ex:Animal");
        model.lattice.finish();
        let mut owner = OntologyProperty::new("ex:owner", PropertyKind::Object);
        owner.domains.push("ex:Animal".to_string());
        owner.range = Some("ex:Person".to_string());
        model.properties.insert(owner.id.clone(), owner);
        model
    }

    #[test]
    fn builtin_datatypes_are_seeded() {
        let model = OntologyModel::new();
        assert!(model.find_datatype(iris::XSD_INTEGER).is_some());
        assert_eq!(model.datatype_count(), 0);
        assert!(model.is_subclass_of(iris::XSD_POSITIVE_INTEGER, iris::XSD_DECIMAL));
        assert!(model.is_subclass_of(iris::XSD_INT, iris::RDFS_LITERAL));
        assert!(!model.is_subclass_of(iris::XSD_DECIMAL, iris::XSD_INTEGER));
    }

    #[test]
    fn domain_admits_subclass() {
        let model = animals();
        let owner = model.find_property("ex:owner");
        assert!(owner.is_some_and(|p| model.property_applies_to(p, ["ex:Dog"])));
        assert!(owner.is_some_and(|p| !model.property_applies_to(p, ["ex:Person"])));
    }

    #[test]
    fn thing_subsumes_classes_only() {
        let model = animals();
        assert!(model.is_subclass_of("ex:Dog", iris::OWL_THING));
        assert!(!model.is_subclass_of(iris::XSD_STRING, iris::OWL_THING));
    }

    #[test]
    fn range_kind_classification() {
        let model = animals();
        assert_eq!(model.range_kind(iris::XSD_STRING), RangeKind::Datatype);
        assert_eq!(model.range_kind("ex:Person"), RangeKind::Class);
    }

    #[test]
    fn cardinality_bounds() {
        let exactly_one = Cardinality::exactly(1);
        assert!(exactly_one.admits(1));
        assert!(!exactly_one.admits(0));
        assert!(!exactly_one.admits(2));
        let at_least_one = Cardinality {
            min: Some(1),
            max: None,
        };
        assert!(exactly_one.is_within(&at_least_one));
        assert!(!at_least_one.is_within(&exactly_one));
        assert_eq!(at_least_one.intersect(&exactly_one), exactly_one);
        assert_eq!(at_least_one.to_string(), "at least 1");
        assert!(Cardinality::unbounded().is_unbounded());
        assert!(!at_least_one.is_unbounded());
    }

    #[test]
    fn lineage_includes_builtin_bases() {
        let model = OntologyModel::new();
        let lineage: Vec<&str> = model
            .datatype_lineage(iris::XSD_BYTE)
            .map(|d| d.id.as_str())
            .collect();
        assert!(lineage.contains(&iris::XSD_BYTE));
        assert!(lineage.contains(&iris::XSD_INTEGER));
    }
}
