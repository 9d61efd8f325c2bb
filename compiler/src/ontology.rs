//! Ontology compiler: Turtle sources in, [`OntologyModel`] out.
//!
//! Every triple is classified as a [`Construct`]. Recognized axioms are
//! applied in two phases, declarations before relations, so the order of
//! statements across files does not matter. The lattices are then finished
//! (cycles broken, closure memoized) and restrictions are inherited down the
//! class lattice.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ontoval_model::iris;
use ontoval_model::{
    sort_diagnostics, Binding, Cardinality, Datatype, Diagnostic, DiagnosticKind, Literal,
    ModelError, OntologyClass, OntologyModel, OntologyProperty, PropertyKind, Restriction, Result,
    Term,
};
use tracing::{debug, info};

use crate::turtle::{read, Object, Statement};

/// One ontology source held in memory.
#[derive(Debug, Clone)]
pub struct OntologySource {
    /// Name used in diagnostics, usually the path.
    pub name: String,
    /// Turtle text.
    pub text: String,
}

impl OntologySource {
    /// A named source.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Reads a UTF-8 text file, mapping failures onto [`ModelError`].
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let name = path.display().to_string();
    let bytes = fs::read(path).map_err(|e| ModelError::io(&name, e))?;
    String::from_utf8(bytes).map_err(|e| {
        ModelError::format(
            &name,
            format!("not valid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
        )
    })
}

/// Compiles the given ontology files into one model.
///
/// # Errors
///
/// Returns [`ModelError::Io`] if a file cannot be read and
/// [`ModelError::Format`] if a file is not UTF-8 text. Malformed statements
/// are reported as `parse-error` diagnostics instead.
pub fn compile_ontology<P: AsRef<Path>>(paths: &[P]) -> Result<(OntologyModel, Vec<Diagnostic>)> {
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        sources.push(OntologySource::new(path.display().to_string(), read_text(path)?));
    }
    Ok(compile_sources(&sources))
}

/// Compiles in-memory sources into one model.
#[must_use]
pub fn compile_sources(sources: &[OntologySource]) -> (OntologyModel, Vec<Diagnostic>) {
    let mut compiler = Compiler::default();
    for (index, source) in sources.iter().enumerate() {
        compiler.load(index, source);
    }
    compiler.finish()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Iri(String),
    /// Blank label scoped to its source file.
    Blank(String),
}

#[derive(Debug, Clone)]
enum Value {
    Node(Node),
    Literal(Literal),
    Collection(Vec<Value>),
}

#[derive(Debug, Clone)]
struct Fact {
    subject: Node,
    predicate: String,
    object: Value,
    source: usize,
    line: u32,
}

/// Where a fact came from, for diagnostics. Edges the lattice holds
/// without a fact behind them have no source or line.
#[derive(Debug, Clone)]
struct Site {
    source: Option<usize>,
    line: Option<u32>,
    subject: String,
}

impl Site {
    fn at(source: usize, line: u32, subject: String) -> Self {
        Self {
            source: Some(source),
            line: Some(line),
            subject,
        }
    }

    fn unknown(subject: String) -> Self {
        Self {
            source: None,
            line: None,
            subject,
        }
    }
}

/// How a triple contributes to the model.
#[derive(Debug, Clone)]
enum Construct {
    Recognized(Axiom),
    Ignored,
    Unsupported(String),
}

#[derive(Debug, Clone)]
enum Axiom {
    DeclareClass(String),
    DeclareDatatype(String),
    DeclareProperty(String, PropertyKind),
    Functional(String),
    SubClassOf(String, String),
    Restriction { class: String, node: String },
    SubPropertyOf(String, String),
    Domain(String, String),
    Range(String, String),
    OnDatatype(String, String),
    OneOf(String, Vec<Value>),
}

impl Axiom {
    fn is_declaration(&self) -> bool {
        matches!(
            self,
            Axiom::DeclareClass(_)
                | Axiom::DeclareDatatype(_)
                | Axiom::DeclareProperty(..)
                | Axiom::Functional(_)
        )
    }
}

struct Compiler {
    model: OntologyModel,
    diagnostics: Vec<Diagnostic>,
    source_names: Vec<String>,
    facts: Vec<Fact>,
    blank_facts: BTreeMap<String, Vec<usize>>,
    own_restrictions: BTreeMap<String, BTreeMap<String, Restriction>>,
    edge_sites: BTreeMap<(String, String), (Site, &'static str)>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            model: OntologyModel::new(),
            diagnostics: Vec::new(),
            source_names: Vec::new(),
            facts: Vec::new(),
            blank_facts: BTreeMap::new(),
            own_restrictions: BTreeMap::new(),
            edge_sites: BTreeMap::new(),
        }
    }
}

impl Compiler {
    fn display(&self, iri: &str) -> String {
        self.model.namespaces.display(iri)
    }

    fn node_display(&self, node: &Node) -> String {
        match node {
            Node::Iri(iri) => self.display(iri),
            Node::Blank(key) => format!("_:{}", key.split_once('/').map_or(key.as_str(), |(_, l)| l)),
        }
    }

    fn site(&self, fact: &Fact) -> Site {
        Site::at(fact.source, fact.line, self.node_display(&fact.subject))
    }

    fn report(&mut self, diagnostic: Diagnostic, site: &Site) {
        let mut diagnostic = diagnostic
            .at_node(site.subject.clone())
            .with_line(site.line);
        if let Some(document) = site.source.and_then(|i| self.source_names.get(i)) {
            diagnostic = diagnostic.in_document(document.clone());
        }
        self.diagnostics.push(diagnostic);
    }

    fn load(&mut self, index: usize, source: &OntologySource) {
        self.source_names.push(source.name.clone());
        let parsed = read(&source.text);
        for error in parsed.errors {
            self.diagnostics.push(
                Diagnostic::error(DiagnosticKind::ParseError, error.message)
                    .in_document(source.name.clone())
                    .at_line(error.line),
            );
        }

        let mut local: BTreeMap<String, String> = iris::STANDARD_PREFIXES
            .iter()
            .map(|(p, i)| ((*p).to_string(), (*i).to_string()))
            .collect();
        for statement in parsed.statements {
            match statement {
                Statement::Prefix { prefix, iri, line } => {
                    let bound = self.bind_prefix(index, &prefix, &iri, line);
                    local.insert(prefix, bound);
                }
                Statement::Base { line, .. } => {
                    let site = Site::at(index, line, "@base".to_string());
                    self.report(
                        Diagnostic::unsupported("base IRI directive is not supported in ontologies"),
                        &site,
                    );
                }
                Statement::CollectionSubject { line, .. } => {
                    let site = Site::at(index, line, "( ... )".to_string());
                    self.report(
                        Diagnostic::unsupported("collection in subject position is not supported"),
                        &site,
                    );
                }
                Statement::Triple(triple) => {
                    let resolved = resolve_term(&local, index, &triple.subject).and_then(|subject| {
                        let predicate = match resolve_term(&local, index, &triple.predicate)? {
                            Node::Iri(iri) => iri,
                            Node::Blank(_) => return Err("blank node used as predicate".to_string()),
                        };
                        let object = resolve_object(&local, index, &triple.object)?;
                        Ok((subject, predicate, object))
                    });
                    match resolved {
                        Ok((subject, predicate, object)) => {
                            let position = self.facts.len();
                            if let Node::Blank(key) = &subject {
                                self.blank_facts.entry(key.clone()).or_default().push(position);
                            }
                            self.facts.push(Fact {
                                subject,
                                predicate,
                                object,
                                source: index,
                                line: triple.line,
                            });
                        }
                        Err(reason) => {
                            self.diagnostics.push(
                                Diagnostic::error(DiagnosticKind::ParseError, reason)
                                    .in_document(source.name.clone())
                                    .at_line(triple.line),
                            );
                        }
                    }
                }
            }
        }
        debug!(source = %source.name, facts = self.facts.len(), "loaded ontology source");
    }

    /// Binds `prefix` in the model and returns the IRI it resolves to from
    /// here on, which is the first binding on a conflict.
    fn bind_prefix(&mut self, index: usize, prefix: &str, iri: &str, line: u32) -> String {
        let site = Site::at(index, line, format!("{prefix}:"));
        match self.model.namespaces.bind(prefix, iri) {
            Binding::New | Binding::Duplicate => iri.to_string(),
            Binding::PrefixConflict { existing } => {
                self.report(
                    Diagnostic::error(
                        DiagnosticKind::NamespaceConflict,
                        format!(
                            "prefix '{prefix}' is already bound to <{existing}>; <{iri}> is ignored"
                        ),
                    ),
                    &site,
                );
                existing
            }
            Binding::Alias { canonical } => {
                self.report(
                    Diagnostic::info(
                        DiagnosticKind::NamespaceConflict,
                        format!(
                            "<{iri}> is already bound to prefix '{canonical}'; '{prefix}' is kept \
                             as an alias (resolved by first-binding-wins)"
                        ),
                    ),
                    &site,
                );
                iri.to_string()
            }
        }
    }

    fn is_restriction_node(&self, key: &str) -> bool {
        self.blank_facts.get(key).is_some_and(|positions| {
            positions.iter().filter_map(|&p| self.facts.get(p)).any(|f| {
                f.predicate == iris::OWL_ON_PROPERTY
                    || (f.predicate == iris::RDF_TYPE
                        && matches!(&f.object, Value::Node(Node::Iri(o)) if o == iris::OWL_RESTRICTION))
            })
        })
    }

    fn unsupported_predicate(&self, predicate: &str) -> Construct {
        Construct::Unsupported(format!("{} is not supported", self.display(predicate)))
    }

    fn classify(&self, fact: &Fact) -> Construct {
        let Node::Iri(subject) = &fact.subject else {
            return Construct::Ignored;
        };
        let subject = subject.clone();
        let object_iri = match &fact.object {
            Value::Node(Node::Iri(iri)) => Some(iri.clone()),
            _ => None,
        };
        match fact.predicate.as_str() {
            iris::RDF_TYPE => match object_iri.as_deref() {
                Some(iris::OWL_CLASS | iris::RDFS_CLASS) => {
                    Construct::Recognized(Axiom::DeclareClass(subject))
                }
                Some(iris::RDFS_DATATYPE) => Construct::Recognized(Axiom::DeclareDatatype(subject)),
                Some(iris::OWL_OBJECT_PROPERTY) => {
                    Construct::Recognized(Axiom::DeclareProperty(subject, PropertyKind::Object))
                }
                Some(iris::OWL_DATATYPE_PROPERTY) => {
                    Construct::Recognized(Axiom::DeclareProperty(subject, PropertyKind::Datatype))
                }
                Some(iris::OWL_ANNOTATION_PROPERTY) => {
                    Construct::Recognized(Axiom::DeclareProperty(subject, PropertyKind::Annotation))
                }
                Some(iris::RDF_PROPERTY) => {
                    Construct::Recognized(Axiom::DeclareProperty(subject, PropertyKind::Unspecified))
                }
                Some(iris::OWL_FUNCTIONAL_PROPERTY) => {
                    Construct::Recognized(Axiom::Functional(subject))
                }
                Some(iris::OWL_RESTRICTION) => {
                    Construct::Unsupported("named owl:Restriction is not supported".to_string())
                }
                _ => Construct::Ignored,
            },
            iris::RDFS_SUBCLASS_OF => match &fact.object {
                Value::Node(Node::Iri(parent)) => {
                    Construct::Recognized(Axiom::SubClassOf(subject, parent.clone()))
                }
                Value::Node(Node::Blank(key)) if self.is_restriction_node(key) => {
                    Construct::Recognized(Axiom::Restriction {
                        class: subject,
                        node: key.clone(),
                    })
                }
                _ => Construct::Unsupported(
                    "anonymous class expression as superclass is not supported".to_string(),
                ),
            },
            iris::RDFS_SUBPROPERTY_OF => match object_iri {
                Some(parent) => Construct::Recognized(Axiom::SubPropertyOf(subject, parent)),
                None => Construct::Unsupported(
                    "property expression as superproperty is not supported".to_string(),
                ),
            },
            iris::RDFS_DOMAIN => match object_iri {
                Some(class) => Construct::Recognized(Axiom::Domain(subject, class)),
                None => Construct::Unsupported(
                    "class expression as domain is not supported".to_string(),
                ),
            },
            iris::RDFS_RANGE => match object_iri {
                Some(range) => Construct::Recognized(Axiom::Range(subject, range)),
                None => Construct::Unsupported(
                    "anonymous range expression is not supported".to_string(),
                ),
            },
            iris::OWL_ON_DATATYPE => match object_iri {
                Some(base) => Construct::Recognized(Axiom::OnDatatype(subject, base)),
                None => Construct::Ignored,
            },
            iris::OWL_ONE_OF => match &fact.object {
                Value::Collection(items) => {
                    Construct::Recognized(Axiom::OneOf(subject, items.clone()))
                }
                _ => Construct::Unsupported("owl:oneOf requires a collection".to_string()),
            },
            iris::OWL_WITH_RESTRICTIONS
            | iris::OWL_UNION_OF
            | iris::OWL_INTERSECTION_OF
            | iris::OWL_COMPLEMENT_OF
            | iris::OWL_EQUIVALENT_CLASS
            | iris::OWL_DISJOINT_UNION_OF => self.unsupported_predicate(&fact.predicate),
            _ => Construct::Ignored,
        }
    }

    fn ensure_class(&mut self, id: &str) {
        if !self.model.classes.contains_key(id) {
            self.model.classes.insert(id.to_string(), OntologyClass::new(id));
        }
        self.model.lattice.add_node(id);
    }

    fn ensure_datatype(&mut self, id: &str) {
        if !self.model.datatypes.contains_key(id) {
            self.model.datatypes.insert(id.to_string(), Datatype::new(id));
        }
        self.model.lattice.add_node(id);
    }

    fn ensure_property(&mut self, id: &str) -> &mut OntologyProperty {
        self.model.property_lattice.add_node(id);
        self.model
            .properties
            .entry(id.to_string())
            .or_insert_with(|| OntologyProperty::new(id, PropertyKind::Unspecified))
    }

    fn declare(&mut self, axiom: Axiom) {
        match axiom {
            Axiom::DeclareClass(id) => self.ensure_class(&id),
            Axiom::DeclareDatatype(id) => self.ensure_datatype(&id),
            Axiom::DeclareProperty(id, kind) => {
                let property = self.ensure_property(&id);
                if kind != PropertyKind::Unspecified {
                    property.kind = kind;
                }
            }
            Axiom::Functional(id) => {
                let property = self.ensure_property(&id);
                property.cardinality.max = Some(1);
            }
            _ => {}
        }
    }

    fn relate(&mut self, axiom: Axiom, site: &Site) {
        match axiom {
            Axiom::SubClassOf(child, parent) => {
                if let Some(datatype) = self.model.datatypes.get_mut(&child) {
                    if !datatype.bases.contains(&parent) {
                        datatype.bases.push(parent.clone());
                    }
                } else {
                    self.ensure_class(&child);
                    if let Some(class) = self.model.classes.get_mut(&child) {
                        if !class.superclasses.contains(&parent) {
                            class.superclasses.push(parent.clone());
                        }
                    }
                }
                self.model.lattice.add_edge(&child, &parent);
                self.edge_sites
                    .entry((child, parent))
                    .or_insert_with(|| (site.clone(), iris::RDFS_SUBCLASS_OF));
            }
            Axiom::Restriction { class, node } => {
                self.ensure_class(&class);
                if let Some(restriction) = self.build_restriction(&class, &node, site) {
                    self.add_own_restriction(&class, restriction, site);
                }
            }
            Axiom::SubPropertyOf(child, parent) => {
                let property = self.ensure_property(&child);
                if !property.superproperties.contains(&parent) {
                    property.superproperties.push(parent.clone());
                }
                self.model.property_lattice.add_edge(&child, &parent);
                self.edge_sites
                    .entry((child, parent))
                    .or_insert_with(|| (site.clone(), iris::RDFS_SUBPROPERTY_OF));
            }
            Axiom::Domain(property, class) => {
                let property = self.ensure_property(&property);
                if !property.domains.contains(&class) {
                    property.domains.push(class);
                }
            }
            Axiom::Range(property_id, range) => {
                let existing = self.ensure_property(&property_id).range.clone();
                match existing {
                    None => self.ensure_property(&property_id).range = Some(range),
                    Some(first) if first == range => {}
                    Some(first) => {
                        let message = format!(
                            "{} already has range {}; {} is ignored",
                            self.display(&property_id),
                            self.display(&first),
                            self.display(&range)
                        );
                        self.report(Diagnostic::error(DiagnosticKind::MultipleRanges, message), site);
                    }
                }
            }
            Axiom::OnDatatype(datatype, base) => {
                self.ensure_datatype(&datatype);
                if let Some(entry) = self.model.datatypes.get_mut(&datatype) {
                    if !entry.bases.contains(&base) {
                        entry.bases.push(base.clone());
                    }
                }
                self.model.lattice.add_edge(&datatype, &base);
                self.edge_sites
                    .entry((datatype, base))
                    .or_insert_with(|| (site.clone(), iris::OWL_ON_DATATYPE));
            }
            Axiom::OneOf(datatype, items) => self.vocabulary(&datatype, &items, site),
            _ => {}
        }
    }

    fn vocabulary(&mut self, datatype: &str, items: &[Value], site: &Site) {
        if !self.model.datatypes.contains_key(datatype) {
            self.report(
                Diagnostic::unsupported("owl:oneOf on a class (enumerated individuals) is not supported"),
                site,
            );
            return;
        }
        let mut lexicals = std::collections::BTreeSet::new();
        for item in items {
            match item {
                Value::Literal(literal) => {
                    lexicals.insert(literal.lexical.clone());
                }
                _ => {
                    self.report(
                        Diagnostic::unsupported("non-literal member in datatype owl:oneOf is not supported"),
                        site,
                    );
                    return;
                }
            }
        }
        if let Some(entry) = self.model.datatypes.get_mut(datatype) {
            entry.vocabulary = Some(lexicals);
        }
    }

    fn parse_count(&mut self, fact: &Fact, site: &Site) -> Option<u32> {
        let parsed = match &fact.object {
            Value::Literal(literal) => literal.lexical.trim_start_matches('+').parse::<u32>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.report(
                Diagnostic::error(
                    DiagnosticKind::ConstraintConflict,
                    format!(
                        "{} must be a non-negative integer",
                        self.display(&fact.predicate)
                    ),
                ),
                site,
            );
        }
        parsed
    }

    fn build_restriction(&mut self, class: &str, node: &str, site: &Site) -> Option<Restriction> {
        let facts: Vec<Fact> = self
            .blank_facts
            .get(node)
            .into_iter()
            .flatten()
            .filter_map(|&p| self.facts.get(p).cloned())
            .collect();
        let mut property = None;
        let mut cardinality = Cardinality::unbounded();
        let mut range = None;
        for fact in &facts {
            match fact.predicate.as_str() {
                iris::RDF_TYPE => {}
                iris::OWL_ON_PROPERTY => {
                    if let Value::Node(Node::Iri(iri)) = &fact.object {
                        property = Some(iri.clone());
                    }
                }
                iris::OWL_MIN_CARDINALITY | iris::OWL_MIN_QUALIFIED_CARDINALITY => {
                    cardinality.min = Some(self.parse_count(fact, site)?);
                }
                iris::OWL_MAX_CARDINALITY | iris::OWL_MAX_QUALIFIED_CARDINALITY => {
                    cardinality.max = Some(self.parse_count(fact, site)?);
                }
                iris::OWL_CARDINALITY | iris::OWL_QUALIFIED_CARDINALITY => {
                    cardinality = Cardinality::exactly(self.parse_count(fact, site)?);
                }
                iris::OWL_ON_CLASS | iris::OWL_ON_DATA_RANGE | iris::OWL_ALL_VALUES_FROM => {
                    match &fact.object {
                        Value::Node(Node::Iri(iri)) => range = Some(iri.clone()),
                        _ => {
                            self.report(
                                Diagnostic::unsupported(format!(
                                    "anonymous {} in restriction is not supported",
                                    self.display(&fact.predicate)
                                )),
                                site,
                            );
                            return None;
                        }
                    }
                }
                other => {
                    let message = format!(
                        "restriction predicate {} is not supported",
                        self.display(other)
                    );
                    self.report(Diagnostic::unsupported(message), site);
                    return None;
                }
            }
        }
        let Some(property) = property else {
            self.report(
                Diagnostic::error(
                    DiagnosticKind::ConstraintConflict,
                    format!("restriction on {} has no owl:onProperty", self.display(class)),
                ),
                site,
            );
            return None;
        };
        if !cardinality.is_consistent() {
            let message = format!(
                "restriction on {} for {} requires min > max",
                self.display(class),
                self.display(&property)
            );
            self.report(Diagnostic::error(DiagnosticKind::ConstraintConflict, message), site);
            return None;
        }
        Some(Restriction {
            property,
            cardinality,
            range,
            declared_by: class.to_string(),
        })
    }

    fn add_own_restriction(&mut self, class: &str, restriction: Restriction, site: &Site) {
        let existing = self
            .own_restrictions
            .get(class)
            .and_then(|r| r.get(&restriction.property))
            .cloned();
        let merged = match existing {
            None => restriction,
            Some(first) => {
                let cardinality = first.cardinality.intersect(&restriction.cardinality);
                let range_conflict = matches!(
                    (&first.range, &restriction.range),
                    (Some(a), Some(b)) if a != b
                );
                if !cardinality.is_consistent() || range_conflict {
                    let message = format!(
                        "conflicting restrictions on {} for {}",
                        self.display(class),
                        self.display(&restriction.property)
                    );
                    self.report(Diagnostic::error(DiagnosticKind::ConstraintConflict, message), site);
                    return;
                }
                Restriction {
                    cardinality,
                    range: first.range.clone().or(restriction.range),
                    ..first
                }
            }
        };
        self.own_restrictions
            .entry(class.to_string())
            .or_default()
            .insert(merged.property.clone(), merged);
    }

    /// Where the edge was stated and through which predicate.
    fn edge_site(&self, child: &str, parent: &str, default: &'static str) -> (Site, &'static str) {
        self.edge_sites
            .get(&(child.to_string(), parent.to_string()))
            .cloned()
            .unwrap_or_else(|| (Site::unknown(self.display(child)), default))
    }

    fn finish_lattices(&mut self) {
        for cycle in self.model.lattice.finish() {
            let Some((child, parent)) = cycle.dropped_edge() else {
                continue;
            };
            let (child, parent) = (child.to_string(), parent.to_string());
            if let Some(class) = self.model.classes.get_mut(&child) {
                class.superclasses.retain(|p| p != &parent);
            }
            if let Some(datatype) = self.model.datatypes.get_mut(&child) {
                datatype.bases.retain(|p| p != &parent);
            }
            let path: Vec<String> = cycle.members.iter().map(|m| self.display(m)).collect();
            let (site, predicate) = self.edge_site(&child, &parent, iris::RDFS_SUBCLASS_OF);
            let message = format!(
                "subclass cycle {} -> {}; dropping {} {} {}",
                path.join(" -> "),
                self.display(&cycle.members[0]),
                self.display(&child),
                self.display(predicate),
                self.display(&parent)
            );
            self.report(Diagnostic::error(DiagnosticKind::SubclassCycle, message), &site);
        }
        for cycle in self.model.property_lattice.finish() {
            let Some((child, parent)) = cycle.dropped_edge() else {
                continue;
            };
            let (child, parent) = (child.to_string(), parent.to_string());
            if let Some(property) = self.model.properties.get_mut(&child) {
                property.superproperties.retain(|p| p != &parent);
            }
            let (site, predicate) = self.edge_site(&child, &parent, iris::RDFS_SUBPROPERTY_OF);
            let message = format!(
                "subproperty cycle through {}; dropping {} {} {}",
                self.display(&child),
                self.display(&child),
                self.display(predicate),
                self.display(&parent)
            );
            self.report(Diagnostic::error(DiagnosticKind::SubclassCycle, message), &site);
        }
    }

    /// Subproperties without their own domain or range take their parents'.
    fn inherit_property_signatures(&mut self) {
        for id in self.model.property_lattice.topological_order() {
            let Some(property) = self.model.properties.get(&id) else {
                continue;
            };
            if !property.domains.is_empty() && property.range.is_some() {
                continue;
            }
            let parents: Vec<OntologyProperty> = property
                .superproperties
                .iter()
                .filter_map(|p| self.model.properties.get(p).cloned())
                .collect();
            if let Some(property) = self.model.properties.get_mut(&id) {
                if property.domains.is_empty() {
                    for parent in &parents {
                        for domain in &parent.domains {
                            if !property.domains.contains(domain) {
                                property.domains.push(domain.clone());
                            }
                        }
                    }
                }
                if property.range.is_none() {
                    property.range = parents.iter().find_map(|p| p.range.clone());
                }
            }
        }
    }

    fn inherit_restrictions(&mut self) {
        let mut effective: BTreeMap<String, BTreeMap<String, Restriction>> = BTreeMap::new();
        for class in self.model.lattice.topological_order() {
            if !self.model.classes.contains_key(&class) {
                continue;
            }
            let mut inherited: BTreeMap<String, Restriction> = BTreeMap::new();
            for parent in self.model.lattice.parents(&class) {
                for (property, restriction) in effective.get(parent).into_iter().flatten() {
                    match inherited.get_mut(property) {
                        None => {
                            inherited.insert(property.clone(), restriction.clone());
                        }
                        Some(current) => {
                            current.cardinality =
                                current.cardinality.intersect(&restriction.cardinality);
                            if let (Some(mine), Some(theirs)) = (&current.range, &restriction.range) {
                                if self.model.is_subclass_of(theirs, mine) {
                                    current.range = Some(theirs.clone());
                                }
                            }
                        }
                    }
                }
            }
            let own = self.own_restrictions.get(&class).cloned().unwrap_or_default();
            for (property, restriction) in own {
                if let Some(parent) = inherited.get(&property) {
                    self.check_tightening(&class, &restriction, parent);
                }
                inherited.insert(property, restriction);
            }
            effective.insert(class, inherited);
        }
        for (class, restrictions) in effective {
            if let Some(entry) = self.model.classes.get_mut(&class) {
                entry.restrictions = restrictions;
            }
        }
    }

    fn check_tightening(&mut self, class: &str, own: &Restriction, parent: &Restriction) {
        let mut problems = Vec::new();
        if !own.cardinality.is_within(&parent.cardinality) {
            problems.push(format!(
                "cardinality {} is looser than {} from {}",
                own.cardinality,
                parent.cardinality,
                self.display(&parent.declared_by)
            ));
        }
        if let (Some(mine), Some(theirs)) = (&own.range, &parent.range) {
            if !self.model.is_subclass_of(mine, theirs) {
                problems.push(format!(
                    "range {} is not within {} from {}",
                    self.display(mine),
                    self.display(theirs),
                    self.display(&parent.declared_by)
                ));
            }
        }
        if problems.is_empty() {
            return;
        }
        let site = self.restriction_site(class);
        let message = format!(
            "restriction on {} in {}: {}",
            self.display(&own.property),
            self.display(class),
            problems.join("; ")
        );
        self.report(Diagnostic::error(DiagnosticKind::ConstraintConflict, message), &site);
    }

    fn restriction_site(&self, class: &str) -> Site {
        self.facts
            .iter()
            .find(|f| {
                f.predicate == iris::RDFS_SUBCLASS_OF
                    && matches!(&f.subject, Node::Iri(s) if s == class)
                    && matches!(&f.object, Value::Node(Node::Blank(_)))
            })
            .map(|f| self.site(f))
            .unwrap_or_else(|| Site::unknown(self.display(class)))
    }

    /// A restriction's range must fit within the property's declared range.
    fn check_restriction_ranges(&mut self) {
        let mut conflicts = Vec::new();
        for (class, restrictions) in &self.own_restrictions {
            for restriction in restrictions.values() {
                let declared = self
                    .model
                    .find_property(&restriction.property)
                    .and_then(|p| p.range.clone());
                if let (Some(range), Some(declared)) = (&restriction.range, declared) {
                    if !self.model.is_subclass_of(range, &declared) {
                        conflicts.push((class.clone(), restriction.property.clone(), range.clone(), declared));
                    }
                }
            }
        }
        for (class, property, range, declared) in conflicts {
            let message = format!(
                "restriction range {} for {} in {} is not within the property's range {}",
                self.display(&range),
                self.display(&property),
                self.display(&class),
                self.display(&declared)
            );
            let site = self.restriction_site(&class);
            self.report(Diagnostic::error(DiagnosticKind::ConstraintConflict, message), &site);
        }
    }

    fn finish(mut self) -> (OntologyModel, Vec<Diagnostic>) {
        let classified: Vec<(Site, Construct)> = self
            .facts
            .iter()
            .map(|fact| (self.site(fact), self.classify(fact)))
            .collect();

        let mut relations = Vec::new();
        let mut ignored = 0usize;
        for (site, construct) in classified {
            match construct {
                Construct::Recognized(axiom) if axiom.is_declaration() => self.declare(axiom),
                Construct::Recognized(axiom) => relations.push((site, axiom)),
                Construct::Ignored => ignored += 1,
                Construct::Unsupported(message) => {
                    self.report(Diagnostic::unsupported(message), &site);
                }
            }
        }
        for (site, axiom) in relations {
            self.relate(axiom, &site);
        }

        self.finish_lattices();
        self.inherit_property_signatures();
        self.inherit_restrictions();
        self.check_restriction_ranges();

        self.model.sources = self.source_names.clone();
        sort_diagnostics(&mut self.diagnostics);
        info!(
            classes = self.model.class_count(),
            properties = self.model.property_count(),
            datatypes = self.model.datatype_count(),
            ignored,
            diagnostics = self.diagnostics.len(),
            "compiled ontology"
        );
        (self.model, self.diagnostics)
    }
}

fn resolve_term(
    prefixes: &BTreeMap<String, String>,
    source: usize,
    term: &Term,
) -> std::result::Result<Node, String> {
    match term {
        Term::Iri(iri) => Ok(Node::Iri(iri.clone())),
        Term::Prefixed { prefix, local } => prefixes
            .get(prefix)
            .map(|base| Node::Iri(format!("{base}{local}")))
            .ok_or_else(|| format!("undeclared prefix '{prefix}' in {term}")),
        Term::Blank(label) => Ok(Node::Blank(format!("{source}/{label}"))),
    }
}

fn resolve_object(
    prefixes: &BTreeMap<String, String>,
    source: usize,
    object: &Object,
) -> std::result::Result<Value, String> {
    match object {
        Object::Term(term) => resolve_term(prefixes, source, term).map(Value::Node),
        Object::Literal(literal) => Ok(Value::Literal(literal.clone())),
        Object::Collection(items) => items
            .iter()
            .map(|item| resolve_object(prefixes, source, item))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Value::Collection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "@prefix ex: <http://example.org/> .\n\
                          @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
                          @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
                          @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n";

    fn compile(body: &str) -> (OntologyModel, Vec<Diagnostic>) {
        compile_sources(&[OntologySource::new("onto.ttl", format!("{HEADER}{body}"))])
    }

    fn kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
        diagnostics.iter().map(|d| d.kind).collect()
    }

    fn ex(local: &str) -> String {
        format!("http://example.org/{local}")
    }

    #[test]
    fn classes_properties_and_lattice() {
        let (model, diagnostics) = compile(
            "ex:Animal a owl:Class .\n\
             ex:Dog a owl:Class ; rdfs:subClassOf ex:Animal .\n\
             ex:owner a owl:ObjectProperty ; rdfs:domain ex:Animal ; rdfs:range ex:Person .\n",
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(model.class_count(), 2);
        assert!(model.is_subclass_of(&ex("Dog"), &ex("Animal")));
        let owner = model.find_property(&ex("owner"));
        assert!(owner.is_some_and(|p| p.kind == PropertyKind::Object));
        assert!(owner.is_some_and(|p| p.range.as_deref() == Some(ex("Person").as_str())));
    }

    #[test]
    fn empty_ontology_is_valid() {
        let (model, diagnostics) = compile("");
        assert_eq!(model.class_count(), 0);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn labels_and_comments_are_ignored_silently() {
        let (_, diagnostics) = compile(
            "ex:Dog a owl:Class ; rdfs:label \"Dog\" ; rdfs:comment \"A dog.\" .\n\
             <http://example.org/> a owl:Ontology ; owl:versionInfo \"1\" .\n",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unsupported_constructs_are_flagged() {
        let (_, diagnostics) = compile(
            "ex:Pet a owl:Class ; owl:unionOf ( ex:Dog ex:Cat ) .\n\
             ex:Dog a owl:Class ; rdfs:subClassOf [ owl:complementOf ex:Cat ] .\n",
        );
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::UnsupportedFeature, DiagnosticKind::UnsupportedFeature]
        );
        assert!(diagnostics.iter().all(|d| !d.is_error()));
    }

    #[test]
    fn subclass_cycle_is_diagnosed_and_broken() {
        let (model, diagnostics) = compile(
            "ex:A a owl:Class ; rdfs:subClassOf ex:B .\n\
             ex:B a owl:Class ; rdfs:subClassOf ex:A .\n",
        );
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::SubclassCycle]);
        assert!(model.is_subclass_of(&ex("A"), &ex("B")) != model.is_subclass_of(&ex("B"), &ex("A")));
    }

    #[test]
    fn prefix_conflicts_and_aliases() {
        let (model, diagnostics) = compile_sources(&[
            OntologySource::new("a.ttl", "@prefix ex: <http://example.org/> .\n"),
            OntologySource::new(
                "b.ttl",
                "@prefix ex: <http://other.example/> .\n@prefix ex2: <http://example.org/> .\n",
            ),
        ]);
        assert_eq!(model.namespaces.iri_for("ex"), Some("http://example.org/"));
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].is_error());
        assert_eq!(diagnostics[0].kind, DiagnosticKind::NamespaceConflict);
        assert_eq!(diagnostics[1].severity, ontoval_model::Severity::Info);
        assert_eq!(diagnostics[1].line, Some(2));
    }

    #[test]
    fn redeclared_prefix_keeps_first_binding_for_later_statements() {
        let (model, diagnostics) = compile_sources(&[OntologySource::new(
            "onto.ttl",
            "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
             @prefix ex: <http://a.example/> .\n\
             @prefix ex: <http://b.example/> .\n\
             ex:Dog a owl:Class .\n",
        )]);
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::NamespaceConflict]);
        assert_eq!(diagnostics[0].line, Some(3));
        assert_eq!(model.namespaces.iri_for("ex"), Some("http://a.example/"));
        assert!(model.find_class("http://a.example/Dog").is_some());
        assert!(model.find_class("http://b.example/Dog").is_none());
    }

    #[test]
    fn prefix_rebound_in_later_file_resolves_to_first_binding() {
        let (model, _) = compile_sources(&[
            OntologySource::new("a.ttl", "@prefix ex: <http://a.example/> .\n"),
            OntologySource::new(
                "b.ttl",
                "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
                 @prefix ex: <http://b.example/> .\n\
                 ex:Cat a owl:Class .\n",
            ),
        ]);
        assert!(model.find_class("http://a.example/Cat").is_some());
        assert_eq!(model.class_count(), 1);
    }

    #[test]
    fn datatype_cycle_names_its_file_line_and_predicate() {
        let (_, diagnostics) = compile_sources(&[
            OntologySource::new("a.ttl", "@prefix ex: <http://example.org/> .\n"),
            OntologySource::new(
                "b.ttl",
                "@prefix ex: <http://example.org/> .\n\
                 @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
                 ex:A owl:onDatatype ex:B .\n\
                 ex:B owl:onDatatype ex:A .\n",
            ),
        ]);
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::SubclassCycle]);
        let cycle = &diagnostics[0];
        assert_eq!(cycle.document.as_deref(), Some("b.ttl"));
        assert!(matches!(cycle.line, Some(3 | 4)), "{cycle}");
        assert!(cycle.message.contains("owl:onDatatype"), "{cycle}");
        assert!(!cycle.message.contains("rdfs:subClassOf"), "{cycle}");
    }

    #[test]
    fn malformed_triple_reports_file_and_line_and_continues() {
        let (model, diagnostics) = compile("ex:A a .\nex:B a owl:Class .\n");
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::ParseError]);
        assert_eq!(diagnostics[0].line, Some(5));
        assert_eq!(diagnostics[0].document.as_deref(), Some("onto.ttl"));
        assert!(model.find_class(&ex("B")).is_some());
    }

    #[test]
    fn multiple_ranges_keep_the_first() {
        let (model, diagnostics) = compile(
            "ex:age a owl:DatatypeProperty ; rdfs:range xsd:integer .\n\
             ex:age rdfs:range xsd:string .\n",
        );
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::MultipleRanges]);
        assert_eq!(
            model.find_property(&ex("age")).and_then(|p| p.range.clone()),
            Some(iris::XSD_INTEGER.to_string())
        );
    }

    #[test]
    fn restrictions_are_compiled_and_inherited() {
        let (model, diagnostics) = compile(
            "ex:Animal a owl:Class ;\n\
               rdfs:subClassOf [ a owl:Restriction ; owl:onProperty ex:name ; owl:maxCardinality 1 ] .\n\
             ex:Dog a owl:Class ; rdfs:subClassOf ex:Animal ;\n\
               rdfs:subClassOf [ a owl:Restriction ; owl:onProperty ex:owner ;\n\
                                 owl:minQualifiedCardinality 1 ; owl:onClass ex:Person ] .\n",
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let inherited = model.restriction(&ex("Dog"), &ex("name"));
        assert!(inherited.is_some_and(|r| r.cardinality.max == Some(1)));
        assert!(inherited.is_some_and(|r| r.declared_by == ex("Animal")));
        let owner = model.restriction(&ex("Dog"), &ex("owner"));
        assert!(owner.is_some_and(|r| r.cardinality.min == Some(1)
            && r.range.as_deref() == Some(ex("Person").as_str())));
    }

    #[test]
    fn looser_child_restriction_conflicts() {
        let (_, diagnostics) = compile(
            "ex:Animal a owl:Class ;\n\
               rdfs:subClassOf [ owl:onProperty ex:name ; owl:maxCardinality 1 ] .\n\
             ex:Dog a owl:Class ; rdfs:subClassOf ex:Animal ;\n\
               rdfs:subClassOf [ owl:onProperty ex:name ; owl:maxCardinality 3 ] .\n",
        );
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::ConstraintConflict]);
    }

    #[test]
    fn unsupported_restriction_predicate() {
        let (model, diagnostics) = compile(
            "ex:Dog a owl:Class ;\n\
               rdfs:subClassOf [ owl:onProperty ex:owner ; owl:someValuesFrom ex:Person ] .\n",
        );
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::UnsupportedFeature]);
        assert!(model.restriction(&ex("Dog"), &ex("owner")).is_none());
    }

    #[test]
    fn functional_property_has_max_one() {
        let (model, _) = compile("ex:name a owl:DatatypeProperty , owl:FunctionalProperty .\n");
        let name = model.find_property(&ex("name"));
        assert!(name.is_some_and(|p| p.cardinality.max == Some(1) && p.kind == PropertyKind::Datatype));
    }

    #[test]
    fn vocabulary_datatypes() {
        let (model, diagnostics) = compile(
            "ex:Colour a rdfs:Datatype ; owl:oneOf ( \"red\" \"green\" ) .\n\
             ex:Score a rdfs:Datatype ; owl:onDatatype xsd:integer .\n",
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let colour = model.find_datatype(&ex("Colour"));
        assert!(colour.is_some_and(|d| d.vocabulary.as_ref().is_some_and(|v| v.contains("red"))));
        assert!(model.is_subclass_of(&ex("Score"), iris::XSD_DECIMAL));
        assert_eq!(model.datatype_count(), 2);
    }

    #[test]
    fn subproperties_inherit_domain_and_range() {
        let (model, _) = compile(
            "ex:owner a owl:ObjectProperty ; rdfs:domain ex:Animal ; rdfs:range ex:Person .\n\
             ex:breeder rdfs:subPropertyOf ex:owner .\n",
        );
        let breeder = model.find_property(&ex("breeder"));
        assert!(breeder.is_some_and(|p| p.domains == vec![ex("Animal")]));
        assert!(model.is_subproperty_of(&ex("breeder"), &ex("owner")));
    }

    #[test]
    fn undeclared_prefix_is_a_parse_error() {
        let (_, diagnostics) = compile("nope:A a owl:Class .\n");
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::ParseError]);
        assert!(diagnostics[0].message.contains("nope"));
    }
}
