//! Statement reader for the Turtle subset.
//!
//! Statements are atomic: a malformed statement contributes no triples, is
//! reported as a [`SyntaxError`], and reading resumes after the next `.`.

use ontoval_model::document::GENERATED_BLANK_PREFIX;
use ontoval_model::iris;
use ontoval_model::{Literal, Term};

use super::lexer::{tokenize, Token, TokenKind};

/// The object of a triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    /// An IRI, prefixed name, or blank node.
    Term(Term),
    /// A literal.
    Literal(Literal),
    /// A `( ... )` collection.
    Collection(Vec<Object>),
}

/// A triple with the lines of its subject and object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    /// Subject as written.
    pub subject: Term,
    /// Line of the statement that introduced the subject.
    pub subject_line: u32,
    /// Predicate as written; `a` becomes `rdf:type`.
    pub predicate: Term,
    /// Object.
    pub object: Object,
    /// Line of the object.
    pub line: u32,
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `@prefix p: <iri> .` or `PREFIX p: <iri>`
    Prefix {
        /// Prefix, possibly empty.
        prefix: String,
        /// IRI base.
        iri: String,
        /// Line.
        line: u32,
    },
    /// `@base <iri> .` or `BASE <iri>`
    Base {
        /// IRI.
        iri: String,
        /// Line.
        line: u32,
    },
    /// A triple.
    Triple(Triple),
    /// A `( ... )` collection in subject position.
    CollectionSubject {
        /// Generated blank node standing for the collection.
        subject: Term,
        /// Members.
        items: Vec<Object>,
        /// Line.
        line: u32,
    },
}

/// A malformed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Line of the offending token.
    pub line: u32,
    /// What was expected or found.
    pub message: String,
}

/// Everything read from one input.
#[derive(Debug, Default)]
pub struct Parsed {
    /// Well-formed statements in source order.
    pub statements: Vec<Statement>,
    /// Malformed statements in source order.
    pub errors: Vec<SyntaxError>,
}

/// Reads every statement in `input`.
#[must_use]
pub fn read(input: &str) -> Parsed {
    let mut reader = Reader {
        tokens: tokenize(input),
        pos: 0,
        anon: 0,
        pending: Vec::new(),
    };
    let mut parsed = Parsed::default();
    while reader.pos < reader.tokens.len() {
        let start = reader.pos;
        match reader.statement() {
            Ok(()) => parsed.statements.append(&mut reader.pending),
            Err(error) => {
                reader.pending.clear();
                parsed.errors.push(error);
                if !reader.terminated_since(start) {
                    reader.recover();
                }
            }
        }
    }
    parsed
}

type ReadResult<T> = Result<T, SyntaxError>;

struct Reader {
    tokens: Vec<Token>,
    pos: usize,
    anon: usize,
    pending: Vec<Statement>,
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Iri(iri) => format!("<{iri}>"),
        TokenKind::PrefixedName { prefix, local } => format!("'{prefix}:{local}'"),
        TokenKind::BlankLabel(label) => format!("'_:{label}'"),
        TokenKind::String(_) => "string literal".to_string(),
        TokenKind::LangTag(tag) => format!("'@{tag}'"),
        TokenKind::DatatypeMarker => "'^^'".to_string(),
        TokenKind::Integer(n) | TokenKind::Decimal(n) | TokenKind::Double(n) => format!("'{n}'"),
        TokenKind::Boolean(b) => format!("'{b}'"),
        TokenKind::A => "'a'".to_string(),
        TokenKind::PrefixDirective | TokenKind::SparqlPrefix => "prefix directive".to_string(),
        TokenKind::BaseDirective | TokenKind::SparqlBase => "base directive".to_string(),
        TokenKind::Dot => "'.'".to_string(),
        TokenKind::Semicolon => "';'".to_string(),
        TokenKind::Comma => "','".to_string(),
        TokenKind::LBracket => "'['".to_string(),
        TokenKind::RBracket => "']'".to_string(),
        TokenKind::LParen => "'('".to_string(),
        TokenKind::RParen => "')'".to_string(),
        TokenKind::Invalid(reason) => reason.clone(),
    }
}

fn xsd(local: &str) -> Term {
    Term::Iri(format!("{}{local}", iris::XSD))
}

impl Reader {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn line(&self) -> u32 {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError {
            line: self.line(),
            message: message.into(),
        }
    }

    /// Takes the next token, failing at end of input or on an invalid token.
    fn advance(&mut self, expected: &str) -> ReadResult<Token> {
        let Some(token) = self.tokens.get(self.pos).cloned() else {
            return Err(self.error(format!("expected {expected}, found end of input")));
        };
        if let TokenKind::Invalid(reason) = &token.kind {
            return Err(SyntaxError {
                line: token.line,
                message: reason.clone(),
            });
        }
        self.pos += 1;
        Ok(token)
    }

    fn unexpected(token: &Token, expected: &str) -> SyntaxError {
        SyntaxError {
            line: token.line,
            message: format!("expected {expected}, found {}", describe(&token.kind)),
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> ReadResult<()> {
        let token = self.advance(expected)?;
        if &token.kind == kind {
            Ok(())
        } else {
            Err(Self::unexpected(&token, expected))
        }
    }

    /// Whether the failing statement already consumed its closing `.`.
    fn terminated_since(&self, start: usize) -> bool {
        self.pos > start
            && self
                .tokens
                .get(self.pos - 1)
                .is_some_and(|t| t.kind == TokenKind::Dot)
    }

    fn recover(&mut self) {
        while let Some(kind) = self.peek() {
            let at_dot = *kind == TokenKind::Dot;
            self.pos += 1;
            if at_dot {
                break;
            }
        }
    }

    fn fresh_blank(&mut self) -> Term {
        self.anon += 1;
        Term::Blank(format!("{GENERATED_BLANK_PREFIX}{}", self.anon))
    }

    fn statement(&mut self) -> ReadResult<()> {
        let line = self.line();
        match self.peek() {
            Some(TokenKind::PrefixDirective) => {
                self.pos += 1;
                self.prefix_body(line)?;
                self.expect(&TokenKind::Dot, "'.' after prefix declaration")
            }
            Some(TokenKind::SparqlPrefix) => {
                self.pos += 1;
                self.prefix_body(line)
            }
            Some(TokenKind::BaseDirective) => {
                self.pos += 1;
                self.base_body(line)?;
                self.expect(&TokenKind::Dot, "'.' after base declaration")
            }
            Some(TokenKind::SparqlBase) => {
                self.pos += 1;
                self.base_body(line)
            }
            _ => self.triples(),
        }
    }

    fn prefix_body(&mut self, line: u32) -> ReadResult<()> {
        let token = self.advance("prefix name")?;
        let prefix = match token.kind {
            TokenKind::PrefixedName { prefix, local } if local.is_empty() => prefix,
            _ => return Err(Self::unexpected(&token, "prefix name ending in ':'")),
        };
        let token = self.advance("IRI")?;
        let TokenKind::Iri(iri) = token.kind else {
            return Err(Self::unexpected(&token, "IRI"));
        };
        self.pending.push(Statement::Prefix { prefix, iri, line });
        Ok(())
    }

    fn base_body(&mut self, line: u32) -> ReadResult<()> {
        let token = self.advance("IRI")?;
        let TokenKind::Iri(iri) = token.kind else {
            return Err(Self::unexpected(&token, "IRI"));
        };
        self.pending.push(Statement::Base { iri, line });
        Ok(())
    }

    fn triples(&mut self) -> ReadResult<()> {
        let token = self.advance("subject")?;
        let line = token.line;
        let subject = match token.kind {
            TokenKind::Iri(iri) => Term::Iri(iri),
            TokenKind::PrefixedName { prefix, local } => Term::Prefixed { prefix, local },
            TokenKind::BlankLabel(label) => Term::Blank(label),
            TokenKind::LBracket => {
                let subject = self.fresh_blank();
                if !self.eat(&TokenKind::RBracket) {
                    self.predicate_object_list(&subject, line)?;
                    self.expect(&TokenKind::RBracket, "']'")?;
                }
                if self.eat(&TokenKind::Dot) {
                    return Ok(());
                }
                subject
            }
            TokenKind::LParen => {
                let items = self.collection()?;
                let subject = self.fresh_blank();
                self.pending.push(Statement::CollectionSubject {
                    subject: subject.clone(),
                    items,
                    line,
                });
                subject
            }
            _ => return Err(Self::unexpected(&token, "subject")),
        };
        self.predicate_object_list(&subject, line)?;
        self.expect(&TokenKind::Dot, "'.' at end of statement")
    }

    fn predicate_object_list(&mut self, subject: &Term, subject_line: u32) -> ReadResult<()> {
        loop {
            let predicate = self.predicate()?;
            self.object_list(subject, subject_line, &predicate)?;
            if !self.eat(&TokenKind::Semicolon) {
                return Ok(());
            }
            while self.eat(&TokenKind::Semicolon) {}
            if matches!(
                self.peek(),
                None | Some(TokenKind::Dot) | Some(TokenKind::RBracket)
            ) {
                return Ok(());
            }
        }
    }

    fn predicate(&mut self) -> ReadResult<Term> {
        let token = self.advance("predicate")?;
        match token.kind {
            TokenKind::A => Ok(Term::Iri(iris::RDF_TYPE.to_string())),
            TokenKind::Iri(iri) => Ok(Term::Iri(iri)),
            TokenKind::PrefixedName { prefix, local } => Ok(Term::Prefixed { prefix, local }),
            _ => Err(Self::unexpected(&token, "predicate")),
        }
    }

    fn object_list(&mut self, subject: &Term, subject_line: u32, predicate: &Term) -> ReadResult<()> {
        loop {
            // The triple goes ahead of any triples nested inside its object.
            let at = self.pending.len();
            let (object, line) = self.object()?;
            self.pending.insert(
                at,
                Statement::Triple(Triple {
                    subject: subject.clone(),
                    subject_line,
                    predicate: predicate.clone(),
                    object,
                    line,
                }),
            );
            if !self.eat(&TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    fn object(&mut self) -> ReadResult<(Object, u32)> {
        let token = self.advance("object")?;
        let line = token.line;
        let object = match token.kind {
            TokenKind::Iri(iri) => Object::Term(Term::Iri(iri)),
            TokenKind::PrefixedName { prefix, local } => Object::Term(Term::Prefixed { prefix, local }),
            TokenKind::BlankLabel(label) => Object::Term(Term::Blank(label)),
            TokenKind::String(lexical) => Object::Literal(self.literal_suffix(lexical)?),
            TokenKind::Integer(n) => Object::Literal(Literal::typed(&n, xsd("integer"))),
            TokenKind::Decimal(n) => Object::Literal(Literal::typed(&n, xsd("decimal"))),
            TokenKind::Double(n) => Object::Literal(Literal::typed(&n, xsd("double"))),
            TokenKind::Boolean(b) => Object::Literal(Literal::typed(&b.to_string(), xsd("boolean"))),
            TokenKind::LBracket => {
                let node = self.fresh_blank();
                if !self.eat(&TokenKind::RBracket) {
                    self.predicate_object_list(&node, line)?;
                    self.expect(&TokenKind::RBracket, "']'")?;
                }
                Object::Term(node)
            }
            TokenKind::LParen => Object::Collection(self.collection()?),
            _ => return Err(Self::unexpected(&token, "object")),
        };
        Ok((object, line))
    }

    fn literal_suffix(&mut self, lexical: String) -> ReadResult<Literal> {
        match self.peek() {
            Some(TokenKind::LangTag(tag)) => {
                let language = Some(tag.clone());
                self.pos += 1;
                Ok(Literal {
                    lexical,
                    datatype: None,
                    language,
                })
            }
            Some(TokenKind::DatatypeMarker) => {
                self.pos += 1;
                let token = self.advance("datatype")?;
                let datatype = match token.kind {
                    TokenKind::Iri(iri) => Term::Iri(iri),
                    TokenKind::PrefixedName { prefix, local } => Term::Prefixed { prefix, local },
                    _ => return Err(Self::unexpected(&token, "datatype IRI")),
                };
                Ok(Literal {
                    lexical,
                    datatype: Some(datatype),
                    language: None,
                })
            }
            _ => Ok(Literal {
                lexical,
                datatype: None,
                language: None,
            }),
        }
    }

    fn collection(&mut self) -> ReadResult<Vec<Object>> {
        let mut items = Vec::new();
        while !self.eat(&TokenKind::RParen) {
            let (item, _) = self.object()?;
            items.push(item);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triples(parsed: &Parsed) -> Vec<&Triple> {
        parsed
            .statements
            .iter()
            .filter_map(|s| match s {
                Statement::Triple(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn reads_prefixes_and_predicate_lists() {
        let parsed = read(
            "@prefix ex: <http://example.org/> .\n\
             _:d1 a ex:Dog ;\n\
                  ex:name \"Rex\" , \"Rexy\" .\n",
        );
        assert!(parsed.errors.is_empty());
        assert!(matches!(
            &parsed.statements[0],
            Statement::Prefix { prefix, line: 1, .. } if prefix == "ex"
        ));
        let triples = triples(&parsed);
        assert_eq!(triples.len(), 3);
        assert_eq!(triples[0].predicate, Term::Iri(iris::RDF_TYPE.to_string()));
        assert_eq!(triples[0].line, 2);
        assert_eq!(triples[1].line, 3);
        assert_eq!(triples[2].subject_line, 2);
    }

    #[test]
    fn object_line_is_reported_for_multiline_statements() {
        let parsed = read("_:a <http://x/p>\n\n  <http://x/o> .");
        assert_eq!(triples(&parsed)[0].line, 3);
    }

    #[test]
    fn anonymous_nodes_follow_their_parent_triple() {
        let parsed = read("_:a <http://x/p> [ <http://x/q> 1 ] .");
        let triples = triples(&parsed);
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].subject, Term::Blank("a".into()));
        assert_eq!(triples[0].object, Object::Term(Term::Blank("anon:1".into())));
        assert_eq!(triples[1].subject, Term::Blank("anon:1".into()));
    }

    #[test]
    fn collections_are_objects() {
        let parsed = read("_:a <http://x/p> ( 1 2 <http://x/o> ) .");
        let triples = triples(&parsed);
        assert!(matches!(&triples[0].object, Object::Collection(items) if items.len() == 3));
    }

    #[test]
    fn malformed_statement_is_skipped_and_reading_resumes() {
        let parsed = read(
            "_:a <http://x/p> .\n\
             _:b <http://x/p> <http://x/o> .\n",
        );
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].line, 1);
        assert_eq!(triples(&parsed).len(), 1);
    }

    #[test]
    fn malformed_statement_contributes_no_triples() {
        let parsed = read("_:a <http://x/p> 1 ; <http://x/q> { .");
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.statements.is_empty());
    }

    #[test]
    fn literal_suffixes() {
        let parsed = read("_:a <http://x/p> \"chat\"@fr , \"4\"^^<http://x/t> , 2.5 .");
        let objects: Vec<&Object> = triples(&parsed).iter().map(|t| &t.object).collect();
        assert!(matches!(objects[0], Object::Literal(l) if l.language.as_deref() == Some("fr")));
        assert!(matches!(
            objects[1],
            Object::Literal(l) if l.datatype == Some(Term::Iri("http://x/t".into()))
        ));
        assert!(matches!(
            objects[2],
            Object::Literal(l) if l.datatype == Some(Term::Iri(iris::XSD_DECIMAL.into()))
        ));
    }

    #[test]
    fn base_and_sparql_prefix() {
        let parsed = read("BASE <http://x/>\nPREFIX ex: <http://example.org/>\n@base <http://y/> .");
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.statements.len(), 3);
        assert!(matches!(parsed.statements[2], Statement::Base { line: 3, .. }));
    }

    #[test]
    fn missing_final_dot_is_an_error() {
        let parsed = read("_:a <http://x/p> <http://x/o>");
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.errors[0].message.contains("end of input"));
    }
}
