//! JSX front end
//!
//! The front end turns a source string into a [`Document`](ast::Document):
//!
//! 1. [`lexer::tokenize`] produces logos tokens paired with byte ranges.
//! 2. [`parser::parse`] builds the AST with chumsky, keeping byte spans on every
//!    node a rule can report on.
//!
//! Only JSX markup is understood: a source is a sequence of top-level elements.
//! Attribute expressions are modelled just far enough for rules to tell literal
//! values from dynamic ones.

pub mod ast;
pub mod lexer;
pub mod location;
pub mod parser;
pub mod tokens;

pub use ast::Document;
pub use parser::ParseError;

/// Tokenize and parse a source in one step
pub fn parse_source(source: &str) -> Result<Document, Vec<ParseError>> {
    let tokens = lexer::tokenize(source);
    tracing::trace!(tokens = tokens.len(), "tokenized JSX source");
    parser::parse(tokens, source)
}
