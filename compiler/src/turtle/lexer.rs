//! Tokenizer for the Turtle subset.
//!
//! Tokenizing never fails: malformed input becomes [`TokenKind::Invalid`]
//! tokens, which the reader reports against the statement that holds them.

/// A lexical token kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `<...>`
    Iri(String),
    /// `prefix:local`
    PrefixedName {
        /// Prefix, possibly empty.
        prefix: String,
        /// Local part, possibly empty.
        local: String,
    },
    /// `_:label`
    BlankLabel(String),
    /// A quoted string, escapes decoded.
    String(String),
    /// `@en`
    LangTag(String),
    /// `^^`
    DatatypeMarker,
    /// Integer shorthand.
    Integer(String),
    /// Decimal shorthand.
    Decimal(String),
    /// Double shorthand.
    Double(String),
    /// `true` or `false`.
    Boolean(bool),
    /// The `a` keyword.
    A,
    /// `@prefix`
    PrefixDirective,
    /// `@base`
    BaseDirective,
    /// `PREFIX`
    SparqlPrefix,
    /// `BASE`
    SparqlBase,
    /// `.`
    Dot,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// Unlexable input, with a description.
    Invalid(String),
}

/// A token and the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Kind and payload.
    pub kind: TokenKind,
    /// 1-based line.
    pub line: u32,
}

/// Splits `input` into tokens.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer {
        chars: input.chars().collect(),
        pos: 0,
        line: 1,
    };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token);
    }
    tokens
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':' | '%')
}

impl Lexer {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_trivia();
        let line = self.line;
        let c = self.peek()?;
        let next = self.peek_at(1);
        let kind = match c {
            '<' => self.iri(),
            '"' | '\'' => self.string(c),
            '@' => self.at_word(),
            '^' if next == Some('^') => {
                self.bump();
                self.single(TokenKind::DatatypeMarker)
            }
            '_' if next == Some(':') => self.blank_label(),
            '.' if next.is_some_and(|d| d.is_ascii_digit()) => self.number(),
            '+' | '-' if next.is_some_and(|d| d.is_ascii_digit() || d == '.') => self.number(),
            c if c.is_ascii_digit() => self.number(),
            '.' => self.single(TokenKind::Dot),
            ';' => self.single(TokenKind::Semicolon),
            ',' => self.single(TokenKind::Comma),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            c if c.is_alphabetic() || c == ':' || c == '_' => self.name(),
            other => self.single(TokenKind::Invalid(format!("unexpected character '{other}'"))),
        };
        Some(Token { kind, line })
    }

    fn iri(&mut self) -> TokenKind {
        self.bump();
        let mut iri = String::new();
        loop {
            match self.peek() {
                Some('>') => {
                    self.bump();
                    return TokenKind::Iri(iri);
                }
                Some(c) if !c.is_whitespace() && c != '<' => {
                    iri.push(c);
                    self.bump();
                }
                _ => return TokenKind::Invalid("unterminated IRI".to_string()),
            }
        }
    }

    fn string(&mut self, quote: char) -> TokenKind {
        let long = self.peek_at(1) == Some(quote) && self.peek_at(2) == Some(quote);
        let open = if long { 3 } else { 1 };
        for _ in 0..open {
            self.bump();
        }
        // An empty short string: `""`.
        if !long && self.peek() == Some(quote) {
            self.bump();
            return TokenKind::String(String::new());
        }
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return TokenKind::Invalid("unterminated string".to_string()),
                Some(c) if c == quote => {
                    if !long {
                        self.bump();
                        return TokenKind::String(value);
                    }
                    if self.peek_at(1) == Some(quote) && self.peek_at(2) == Some(quote) {
                        for _ in 0..3 {
                            self.bump();
                        }
                        return TokenKind::String(value);
                    }
                    value.push(c);
                    self.bump();
                }
                Some('\n') if !long => {
                    return TokenKind::Invalid("line break in short string".to_string())
                }
                Some('\\') => match self.escape() {
                    Ok(decoded) => value.push(decoded),
                    Err(reason) => return TokenKind::Invalid(reason),
                },
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }

    fn escape(&mut self) -> Result<char, String> {
        self.bump();
        let c = self.bump().ok_or_else(|| "unterminated escape".to_string())?;
        match c {
            't' => Ok('\t'),
            'b' => Ok('\u{8}'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            'f' => Ok('\u{c}'),
            '"' | '\'' | '\\' => Ok(c),
            'u' => self.hex_escape(4),
            'U' => self.hex_escape(8),
            other => Err(format!("invalid escape '\\{other}'")),
        }
    }

    fn hex_escape(&mut self, digits: usize) -> Result<char, String> {
        let mut code = 0u32;
        for _ in 0..digits {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| "invalid unicode escape".to_string())?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| format!("invalid code point U+{code:X}"))
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek().filter(|&c| accept(c)) {
            out.push(c);
            self.bump();
        }
        out
    }

    /// Gives back trailing dots so they terminate the statement.
    fn release_trailing_dots(&mut self, word: &mut String) {
        while word.ends_with('.') {
            word.pop();
            self.pos -= 1;
        }
    }

    fn at_word(&mut self) -> TokenKind {
        self.bump();
        let word = self.take_while(|c| c.is_ascii_alphanumeric() || c == '-');
        match word.as_str() {
            "prefix" => TokenKind::PrefixDirective,
            "base" => TokenKind::BaseDirective,
            w if w.starts_with(|c: char| c.is_ascii_alphabetic()) => TokenKind::LangTag(word),
            _ => TokenKind::Invalid("expected language tag or directive after '@'".to_string()),
        }
    }

    fn blank_label(&mut self) -> TokenKind {
        self.bump();
        self.bump();
        let mut label = self.take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
        self.release_trailing_dots(&mut label);
        if label.is_empty() {
            TokenKind::Invalid("empty blank node label".to_string())
        } else {
            TokenKind::BlankLabel(label)
        }
    }

    fn number(&mut self) -> TokenKind {
        let mut text = String::new();
        if let Some(sign) = self.peek().filter(|c| matches!(c, '+' | '-')) {
            text.push(sign);
            self.bump();
        }
        let whole = self.take_while(|c| c.is_ascii_digit());
        text.push_str(&whole);
        let mut fraction = false;
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            fraction = true;
            self.bump();
            text.push('.');
            text.push_str(&self.take_while(|c| c.is_ascii_digit()));
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let sign = self.peek_at(1).filter(|c| matches!(c, '+' | '-'));
            let digit_at = if sign.is_some() { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    if let Some(c) = self.bump() {
                        text.push(c);
                    }
                }
                text.push_str(&self.take_while(|c| c.is_ascii_digit()));
                return TokenKind::Double(text);
            }
        }
        if whole.is_empty() && !fraction {
            TokenKind::Invalid(format!("malformed number '{text}'"))
        } else if fraction {
            TokenKind::Decimal(text)
        } else {
            TokenKind::Integer(text)
        }
    }

    fn name(&mut self) -> TokenKind {
        let mut word = self.take_while(is_name_char);
        self.release_trailing_dots(&mut word);
        if let Some((prefix, local)) = word.split_once(':') {
            return TokenKind::PrefixedName {
                prefix: prefix.to_string(),
                local: local.to_string(),
            };
        }
        match word.as_str() {
            "a" => TokenKind::A,
            "true" => TokenKind::Boolean(true),
            "false" => TokenKind::Boolean(false),
            w if w.eq_ignore_ascii_case("prefix") => TokenKind::SparqlPrefix,
            w if w.eq_ignore_ascii_case("base") => TokenKind::SparqlBase,
            _ => TokenKind::Invalid(format!("unexpected word '{word}'")),
        }
    }
}
