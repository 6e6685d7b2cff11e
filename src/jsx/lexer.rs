//! Core tokenization for JSX sources
//!
//! The driver tracks which lexical context it is in with a stack of modes:
//!
//! ```text
//! <div title="a/b">Don't {open && <b />}</div>
//! ^^^^^^^^^^^^^^^^^ tag
//!                  ^^^^^^ children (text)
//!                        ^^^^^^^^^^^^^^^^ expression, holding a tag
//! ```
//!
//! Tags and expressions are lexed with [`Token`]; children with [`TextToken`],
//! via `Lexer::morph`. An opening tag's `>` enters children, the matching
//! closing tag's `>` leaves them, and a self-closing `/>` returns to the
//! surrounding context.
//!
//! Bytes that match no token are not dropped: they become [`Token::Unknown`],
//! which the parser reports at the right location.

use crate::jsx::tokens::{Token, TextToken};
use logos::{Lexer, Logos};
use std::ops::Range;

/// Token paired with its byte range in the source
pub type TokenLocation = (Token, Range<usize>);

#[derive(Debug, Clone, Copy, Default)]
struct TagState {
    /// Tokens seen since `<`
    seen: usize,
    /// `</...>`
    closing: bool,
    /// The previous token was `/`
    after_slash: bool,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Tag(TagState),
    Expression,
    Children,
}

/// Tokenize a source with location information
pub fn tokenize(source: &str) -> Vec<TokenLocation> {
    let mut tokens = Vec::new();
    // Empty at top level, which lexes like an expression
    let mut modes: Vec<Mode> = Vec::new();
    let mut lexer = Token::lexer(source);

    loop {
        if matches!(modes.last(), Some(Mode::Children)) {
            let mut text = lexer.morph::<TextToken>();
            let next = text.next();
            let span = text.span();
            lexer = text.morph();

            match next {
                None => break,
                Some(Ok(TextToken::Text)) => {
                    let slice = &source[span.clone()];
                    if !slice.trim().is_empty() {
                        tokens.push((Token::Text(slice.to_string()), span));
                    }
                }
                Some(Ok(TextToken::Lt)) => {
                    modes.push(Mode::Tag(TagState::default()));
                    tokens.push((Token::Lt, span));
                }
                Some(Ok(TextToken::LBrace)) => {
                    modes.push(Mode::Expression);
                    tokens.push((Token::LBrace, span));
                }
                Some(Ok(TextToken::RBrace)) => tokens.push((Token::RBrace, span)),
                Some(Err(())) => tokens.push((Token::Unknown(source[span.clone()].to_string()), span)),
            }
            continue;
        }

        let Some((token, span)) = next_token(&mut lexer, &modes) else {
            break;
        };
        transition(&mut modes, &token);
        tokens.push((token, span));
    }

    tokens
}

fn next_token(lexer: &mut Lexer<'_, Token>, modes: &[Mode]) -> Option<TokenLocation> {
    lexer.extras.in_tag = matches!(modes.last(), Some(Mode::Tag(_)));
    let token = match lexer.next()? {
        Ok(token) => token,
        Err(()) => Token::Unknown(lexer.slice().to_string()),
    };
    Some((token, lexer.span()))
}

/// Update the mode stack after lexing `token` outside of text
fn transition(modes: &mut Vec<Mode>, token: &Token) {
    match modes.last_mut() {
        Some(Mode::Tag(tag)) => match token {
            Token::Gt => {
                let tag = *tag;
                modes.pop();
                if tag.closing {
                    if matches!(modes.last(), Some(Mode::Children)) {
                        modes.pop();
                    }
                } else if !tag.after_slash {
                    modes.push(Mode::Children);
                }
            }
            _ => {
                tag.closing |= tag.seen == 0 && *token == Token::Slash;
                tag.after_slash = *token == Token::Slash;
                tag.seen += 1;
                if *token == Token::LBrace {
                    modes.push(Mode::Expression);
                }
            }
        },
        Some(Mode::Expression) | None => match token {
            Token::Lt => modes.push(Mode::Tag(TagState::default())),
            Token::LBrace => modes.push(Mode::Expression),
            Token::RBrace => {
                modes.pop();
            }
            _ => {}
        },
        Some(Mode::Children) => {}
    }
}
