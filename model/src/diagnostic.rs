//! Diagnostics: severity levels, stable kind tags, and ordering.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// A real violation; blocks conformance.
    Error,
    /// A construct the validator records but does not check.
    UnsupportedFeature,
    /// A non-blocking note.
    Info,
}

impl Severity {
    /// Lowercase label used in text reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::UnsupportedFeature => "unsupported",
            Severity::Info => "info",
        }
    }
}

/// Stable machine-readable diagnostic kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A type resolves into a known namespace but names no class.
    UnknownClass,
    /// A property is unresolvable or not declared.
    UnknownProperty,
    /// A property's domain admits none of the node's types.
    PropertyNotApplicable,
    /// A literal's datatype does not satisfy the property's datatype range.
    DatatypeMismatch,
    /// A value's kind or class does not satisfy the property's range.
    RangeMismatch,
    /// A prefixed name whose prefix cannot be resolved.
    UnresolvableNamespace,
    /// A prefix bound to two IRIs, or an IRI reached by two prefixes.
    NamespaceConflict,
    /// A literal's datatype is neither built-in nor declared.
    UnknownDatatype,
    /// A literal's lexical form is invalid for its datatype.
    InvalidLiteral,
    /// A property occurs too few or too many times.
    CardinalityViolation,
    /// A described node has no type.
    UntypedNode,
    /// A reference to a blank node that is never described.
    DanglingReference,
    /// A malformed ontology statement.
    ParseError,
    /// A cycle in the subclass or subproperty graph.
    SubclassCycle,
    /// A property with more than one declared range.
    MultipleRanges,
    /// Restrictions that contradict each other.
    ConstraintConflict,
    /// A construct outside the supported subset.
    UnsupportedFeature,
}

impl DiagnosticKind {
    /// The kebab-case tag, e.g. `"unknown-class"`.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            DiagnosticKind::UnknownClass => "unknown-class",
            DiagnosticKind::UnknownProperty => "unknown-property",
            DiagnosticKind::PropertyNotApplicable => "property-not-applicable",
            DiagnosticKind::DatatypeMismatch => "datatype-mismatch",
            DiagnosticKind::RangeMismatch => "range-mismatch",
            DiagnosticKind::UnresolvableNamespace => "unresolvable-namespace",
            DiagnosticKind::NamespaceConflict => "namespace-conflict",
            DiagnosticKind::UnknownDatatype => "unknown-datatype",
            DiagnosticKind::InvalidLiteral => "invalid-literal",
            DiagnosticKind::CardinalityViolation => "cardinality-violation",
            DiagnosticKind::UntypedNode => "untyped-node",
            DiagnosticKind::DanglingReference => "dangling-reference",
            DiagnosticKind::ParseError => "parse-error",
            DiagnosticKind::SubclassCycle => "subclass-cycle",
            DiagnosticKind::MultipleRanges => "multiple-ranges",
            DiagnosticKind::ConstraintConflict => "constraint-conflict",
            DiagnosticKind::UnsupportedFeature => "unsupported-feature",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single finding about an ontology or document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Stable kind tag.
    pub kind: DiagnosticKind,
    /// Human-readable message naming the offending identifier.
    pub message: String,
    /// Document or ontology source the finding belongs to.
    pub document: Option<String>,
    /// Node or subject the finding is about.
    pub node: Option<String>,
    /// 1-based source line. `None` renders as `unknown`.
    pub line: Option<u32>,
}

impl Diagnostic {
    fn new(severity: Severity, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            document: None,
            node: None,
            line: None,
        }
    }

    /// Creates an error.
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, kind, message)
    }

    /// Creates an unsupported-feature diagnostic.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(
            Severity::UnsupportedFeature,
            DiagnosticKind::UnsupportedFeature,
            message,
        )
    }

    /// Creates an informational note.
    pub fn info(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, kind, message)
    }

    /// Sets the document.
    #[must_use]
    pub fn in_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    /// Sets the node.
    #[must_use]
    pub fn at_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Sets the line.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Sets the line, or marks it unknown.
    #[must_use]
    pub fn with_line(mut self, line: Option<u32>) -> Self {
        self.line = line;
        self
    }

    /// Returns true if this diagnostic is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] ", self.severity.as_str(), self.kind)?;
        let document = self.document.as_deref().unwrap_or("<input>");
        match self.line {
            Some(line) => write!(f, "{document}:{line}")?,
            None => write!(f, "{document}:unknown")?,
        }
        if let Some(node) = &self.node {
            write!(f, " {node}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Orders by document, then line with unknown lines first. Equal keys keep
/// discovery order.
fn location_order(a: &Diagnostic, b: &Diagnostic) -> Ordering {
    a.document.cmp(&b.document).then(a.line.cmp(&b.line))
}

/// Stable-sorts diagnostics by document then line.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(location_order);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_tag_location_and_node() {
        let diagnostic = Diagnostic::error(DiagnosticKind::UnknownClass, "ex:Cat is not declared")
            .in_document("doc.ttl")
            .at_node("_:p1")
            .at_line(4);
        assert_eq!(
            diagnostic.to_string(),
            "error[unknown-class] doc.ttl:4 _:p1: ex:Cat is not declared"
        );
    }

    #[test]
    fn unknown_line_renders_explicitly() {
        let diagnostic = Diagnostic::unsupported("ordered list").in_document("doc.ttl");
        assert!(diagnostic.to_string().contains("doc.ttl:unknown"));
        assert!(!diagnostic.is_error());

        let cleared = Diagnostic::error(DiagnosticKind::SubclassCycle, "cycle")
            .at_line(7)
            .with_line(None);
        assert_eq!(cleared.line, None);
        assert!(cleared.to_string().contains("<input>:unknown"));
    }

    #[test]
    fn sort_is_stable_with_unknown_lines_first() {
        let mut diagnostics = vec![
            Diagnostic::error(DiagnosticKind::UnknownProperty, "b").in_document("d").at_line(5),
            Diagnostic::error(DiagnosticKind::UnknownProperty, "a").in_document("d").at_line(2),
            Diagnostic::info(DiagnosticKind::NamespaceConflict, "x").in_document("d"),
            Diagnostic::error(DiagnosticKind::UnknownClass, "c").in_document("d").at_line(2),
        ];
        sort_diagnostics(&mut diagnostics);
        let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["x", "a", "c", "b"]);
    }

    #[test]
    fn kind_tags_serialize_kebab_case() {
        assert_eq!(DiagnosticKind::PropertyNotApplicable.tag(), "property-not-applicable");
        assert_eq!(Severity::UnsupportedFeature.as_str(), "unsupported");
    }
}
