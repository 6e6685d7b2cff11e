//! Token definitions for JSX sources
//!
//! JSX has two lexical contexts. Inside tags and `{...}` expressions, source is
//! split into [`Token`]s. Between an opening tag's `>` and the next `<` or `{`,
//! it is plain text, lexed with [`TextToken`] so that quotes and slashes in
//! prose (`Don't`, `and/or`) never act as delimiters. The lexer driver in
//! [`super::lexer`] morphs between the two.
//!
//! String tokens keep their value without the delimiters. Inside a tag they are
//! JSX attribute strings: they may span lines and have no escapes. Inside
//! expressions they are JavaScript strings: single line, with escapes resolved.
//! Template literals resolve escapes but keep `${...}` substitutions verbatim.
use logos::{FilterResult, Lexer, Logos};
use serde::Serialize;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// Lexer state shared by [`Token`] and [`TextToken`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerState {
    /// Lexing between a tag's `<` and `>`, outside any `{...}`
    pub in_tag: bool,
}

/// Tokens of tags and expressions
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Serialize)]
#[logos(extras = LexerState)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Markup punctuation
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("/")]
    Slash,
    #[token("=")]
    Eq,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // Expression punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("?")]
    Question,
    #[token("...")]
    Spread,
    #[token("=>")]
    Arrow,

    // Operators
    #[token("||")]
    OrOr,
    #[token("&&")]
    AndAnd,
    #[token("??")]
    Nullish,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("!")]
    Bang,
    #[regex(r"===|!==|==|!=|<=|>=|\*|%", |lex| lex.slice().to_string())]
    Operator(String),

    /// `/* ... */`, skipped by its callback
    #[token("/*", block_comment)]
    Comment,

    // Literals
    #[token("null")]
    Null,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),
    #[token("\"", string_literal)]
    #[token("'", string_literal)]
    Str(String),
    #[token("`", template_literal)]
    Template(String),

    // Names: JSX allows dashes inside element and attribute names
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*(-[A-Za-z0-9_$]+)*", |lex| lex.slice().to_string())]
    Ident(String),

    /// A run of text between tags, produced from [`TextToken::Text`]
    Text(String),

    /// A byte sequence no other token matches (`#`, `@`, an unterminated quote, ...)
    Unknown(String),
}

/// Tokens of JSX text children
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(extras = LexerState)]
pub enum TextToken {
    #[token("<")]
    Lt,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[regex(r"[^<{}]+")]
    Text,
}

fn block_comment(lex: &mut Lexer<Token>) -> FilterResult<(), ()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => FilterResult::Error(()),
    }
}

fn string_literal(lex: &mut Lexer<Token>) -> Option<String> {
    let quote = lex.slice().chars().next()?;
    let (value, consumed) = if lex.extras.in_tag {
        let end = lex.remainder().find(quote)?;
        (lex.remainder()[..end].to_string(), end + quote.len_utf8())
    } else {
        cook(lex.remainder(), quote, false)?
    };
    lex.bump(consumed);
    Some(value)
}

fn template_literal(lex: &mut Lexer<Token>) -> Option<String> {
    let (value, consumed) = cook(lex.remainder(), '`', true)?;
    lex.bump(consumed);
    Some(value)
}

/// Read a JavaScript string body up to `terminator`, resolving escapes.
///
/// Returns the value and the bytes consumed, closing delimiter included.
fn cook(body: &str, terminator: char, multiline: bool) -> Option<(String, usize)> {
    let mut value = String::new();
    let mut chars = body.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        match c {
            c if c == terminator => return Some((value, index + c.len_utf8())),
            '\n' if !multiline => return None,
            '\\' => {
                let (_, escaped) = chars.next()?;
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    'b' => value.push('\u{8}'),
                    'f' => value.push('\u{c}'),
                    'v' => value.push('\u{b}'),
                    '0' => value.push('\0'),
                    'x' => value.push(hex_escape(&mut chars, 2)?),
                    'u' if chars.peek().is_some_and(|(_, c)| *c == '{') => {
                        chars.next();
                        value.push(braced_escape(&mut chars)?);
                    }
                    'u' => value.push(hex_escape(&mut chars, 4)?),
                    // Line continuation
                    '\r' => {
                        if chars.peek().is_some_and(|(_, c)| *c == '\n') {
                            chars.next();
                        }
                    }
                    '\n' => {}
                    other => value.push(other),
                }
            }
            c => value.push(c),
        }
    }

    None
}

fn hex_escape(chars: &mut Peekable<CharIndices<'_>>, digits: usize) -> Option<char> {
    let hex: String = (0..digits)
        .map(|_| chars.next().map(|(_, c)| c))
        .collect::<Option<_>>()?;
    char::from_u32(u32::from_str_radix(&hex, 16).ok()?)
}

fn braced_escape(chars: &mut Peekable<CharIndices<'_>>) -> Option<char> {
    let mut hex = String::new();
    loop {
        match chars.next()? {
            (_, '}') => break,
            (_, c) => hex.push(c),
        }
    }
    char::from_u32(u32::from_str_radix(&hex, 16).ok()?)
}

impl Token {
    /// Check if this token opens or closes a brace group
    pub fn is_brace(&self) -> bool {
        matches!(self, Token::LBrace | Token::RBrace)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::Slash => write!(f, "/"),
            Token::Eq => write!(f, "="),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Dot => write!(f, "."),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Semicolon => write!(f, ";"),
            Token::Question => write!(f, "?"),
            Token::Spread => write!(f, "..."),
            Token::Arrow => write!(f, "=>"),
            Token::OrOr => write!(f, "||"),
            Token::AndAnd => write!(f, "&&"),
            Token::Nullish => write!(f, "??"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Bang => write!(f, "!"),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Comment => write!(f, "comment"),
            Token::Null => write!(f, "null"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Number(n) => write!(f, "{}", n),
            Token::Str(s) => write!(f, "\"{}\"", s),
            Token::Template(t) => write!(f, "`{}`", t),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Text(text) => write!(f, "text `{}`", text.trim()),
            Token::Unknown(s) => write!(f, "{}", s),
        }
    }
}
