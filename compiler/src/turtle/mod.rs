//! Reader for the Turtle subset shared by ontologies and documents.
//!
//! Supported: `@prefix`/`PREFIX`, `@base`/`BASE`, IRIs, prefixed names, `a`,
//! blank labels, `[ ... ]`, `( ... )`, quoted strings with escapes, language
//! tags, `^^` datatypes, numeric and boolean shorthand, `;` and `,` lists,
//! and `#` comments.

pub mod lexer;
pub mod reader;

pub use reader::{read, Object, Parsed, Statement, SyntaxError, Triple};
