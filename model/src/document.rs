//! Parsed linked-data documents.
//!
//! Terms are stored as written. Prefixed names are resolved against the
//! ontology only at validation time, so a graph carries no ontology state.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Label prefix for blank nodes generated from `[ ... ]`. A `:` can never
/// appear in a written blank label, so generated labels never collide.
pub const GENERATED_BLANK_PREFIX: &str = "anon:";

/// An identifier as written in a document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    /// A full IRI, `<...>`.
    Iri(String),
    /// A prefixed name, `prefix:local`.
    Prefixed {
        /// The prefix, possibly empty.
        prefix: String,
        /// The local part.
        local: String,
    },
    /// A blank node label, `_:label`.
    Blank(String),
}

impl Term {
    /// Builds a prefixed name.
    #[must_use]
    pub fn prefixed(prefix: &str, local: &str) -> Self {
        Term::Prefixed {
            prefix: prefix.to_string(),
            local: local.to_string(),
        }
    }

    /// Whether this is a blank node.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    /// Whether this blank node was generated from `[ ... ]`.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self, Term::Blank(label) if label.starts_with(GENERATED_BLANK_PREFIX))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Prefixed { prefix, local } => write!(f, "{prefix}:{local}"),
            Term::Blank(label) => write!(f, "_:{label}"),
        }
    }
}

/// A structural construct the validator records but does not interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsupportedConstruct {
    /// A `( ... )` collection.
    OrderedList,
    /// A node typed `rdf:List` or described with `rdf:first` / `rdf:rest`.
    ListVocabulary,
    /// An `@base` or `BASE` directive.
    BaseDirective,
}

impl UnsupportedConstruct {
    /// Human-readable name used in diagnostics.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            UnsupportedConstruct::OrderedList => "ordered list collection",
            UnsupportedConstruct::ListVocabulary => "rdf:List vocabulary",
            UnsupportedConstruct::BaseDirective => "base IRI directive",
        }
    }
}

/// An unsupported construct and where it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// The construct.
    pub construct: UnsupportedConstruct,
    /// 1-based source line.
    pub line: u32,
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// Lexical form, escapes decoded.
    pub lexical: String,
    /// Explicit datatype, if any.
    pub datatype: Option<Term>,
    /// Language tag, if any.
    pub language: Option<String>,
}

impl Literal {
    /// A plain literal with no datatype or language.
    #[must_use]
    pub fn plain(lexical: &str) -> Self {
        Self {
            lexical: lexical.to_string(),
            datatype: None,
            language: None,
        }
    }

    /// A literal with an explicit datatype.
    #[must_use]
    pub fn typed(lexical: &str, datatype: Term) -> Self {
        Self {
            lexical: lexical.to_string(),
            datatype: Some(datatype),
            language: None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.lexical)?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")?;
        }
        if let Some(datatype) = &self.datatype {
            write!(f, "^^{datatype}")?;
        }
        Ok(())
    }
}

/// The object of a property assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// A literal.
    Literal(Literal),
    /// A reference to another node.
    Node(Term),
    /// A construct the validator does not interpret.
    Unsupported(UnsupportedConstruct),
}

/// One `(property, value)` pair on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    /// The property as written.
    pub property: Term,
    /// The value.
    pub value: Value,
    /// Line of the value.
    pub line: u32,
}

/// An `rdf:type` assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAssertion {
    /// The asserted class as written.
    pub class: Term,
    /// Line of the class term.
    pub line: u32,
}

/// A literal written in the object position of `rdf:type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralType {
    /// The literal.
    pub literal: Literal,
    /// Line of the literal.
    pub line: u32,
}

/// A described node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Identifier as written at first occurrence.
    pub id: Term,
    /// Asserted types in order.
    pub types: Vec<TypeAssertion>,
    /// Literals asserted as types. They never resolve to a class.
    pub literal_types: Vec<LiteralType>,
    /// Property assertions in order.
    pub assertions: Vec<Assertion>,
    /// Node-level unsupported constructs.
    pub markers: Vec<Marker>,
    /// Line where the node first appears as a subject.
    pub line: u32,
}

impl DocumentNode {
    /// A node with nothing asserted yet.
    #[must_use]
    pub fn new(id: Term, line: u32) -> Self {
        Self {
            id,
            types: Vec::new(),
            literal_types: Vec::new(),
            assertions: Vec::new(),
            markers: Vec::new(),
            line,
        }
    }
}

/// A prefix declared by a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixDeclaration {
    /// The prefix.
    pub prefix: String,
    /// The IRI base.
    pub iri: String,
    /// Line of the declaration.
    pub line: u32,
}

/// Everything parsed from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentGraph {
    /// Document identifier, usually its path.
    pub source: String,
    /// Prefix declarations in source order, redeclarations included.
    pub prefixes: Vec<PrefixDeclaration>,
    /// Graph-level unsupported constructs.
    pub markers: Vec<Marker>,
    nodes: Vec<DocumentNode>,
    index: BTreeMap<String, usize>,
}

impl DocumentGraph {
    /// An empty graph for `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            prefixes: Vec::new(),
            markers: Vec::new(),
            nodes: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    /// Records a prefix declaration. Returns the IRI the prefix was already
    /// bound to, if it differs; the first declaration stays in effect.
    pub fn declare_prefix(&mut self, prefix: &str, iri: &str, line: u32) -> Option<String> {
        let previous = self.prefix_iri(prefix).map(str::to_string);
        self.prefixes.push(PrefixDeclaration {
            prefix: prefix.to_string(),
            iri: iri.to_string(),
            line,
        });
        previous.filter(|existing| existing != iri)
    }

    /// Declarations that tried to rebind an already declared prefix to a
    /// different IRI, each with the IRI that stays in effect.
    #[must_use]
    pub fn redeclarations(&self) -> impl Iterator<Item = (&PrefixDeclaration, &str)> + '_ {
        self.prefixes.iter().filter_map(move |decl| {
            self.prefix_iri(&decl.prefix)
                .filter(|kept| *kept != decl.iri)
                .map(|kept| (decl, kept))
        })
    }

    /// The IRI the document binds `prefix` to, first declaration first.
    #[must_use]
    pub fn prefix_iri(&self, prefix: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|decl| decl.prefix == prefix)
            .map(|decl| decl.iri.as_str())
    }

    /// Identity key for a term. Prefixed names declared by the document are
    /// expanded so `ex:a` and `<http://example.org/a>` denote the same node.
    #[must_use]
    pub fn node_key(&self, term: &Term) -> String {
        match term {
            Term::Iri(iri) => iri.clone(),
            Term::Prefixed { prefix, local } => match self.prefix_iri(prefix) {
                Some(base) => format!("{base}{local}"),
                None => term.to_string(),
            },
            Term::Blank(_) => term.to_string(),
        }
    }

    /// The node for `term`, created at `line` if it was not described yet.
    pub fn node_entry(&mut self, term: &Term, line: u32) -> &mut DocumentNode {
        let key = self.node_key(term);
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                self.nodes.push(DocumentNode::new(term.clone(), line));
                let position = self.nodes.len() - 1;
                self.index.insert(key, position);
                position
            }
        };
        &mut self.nodes[position]
    }

    /// The described node for `term`, if any.
    #[must_use]
    pub fn find_node(&self, term: &Term) -> Option<&DocumentNode> {
        self.index
            .get(&self.node_key(term))
            .and_then(|&position| self.nodes.get(position))
    }

    /// Nodes in declaration order.
    #[must_use]
    pub fn nodes(&self) -> &[DocumentNode] {
        &self.nodes
    }

    /// Number of described nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
