//! Parser for JSX sources using chumsky
//!
//! The parser consumes `(Token, byte range)` pairs from the lexer and builds the
//! [`Document`] AST. Byte ranges are taken from the token tuples themselves, so
//! every node span points straight back into the source.
//!
//! Grammar (informal):
//!
//! ```text
//! document    = element*
//! element     = "<" name attribute* "/" ">"
//!             | "<" name? attribute* ">" child* "<" "/" name? ">"
//! name        = ident (":" ident | ("." ident)+)?
//! attribute   = ident (":" ident)? ("=" (string | container))?
//!             | "{" "..." balanced* "}"
//! child       = element | container | text
//! container   = "{" (expression | balanced*) "}"
//! ```
//!
//! Expression containers first try the modelled expression subset; when that
//! fails they fall back to skipping a balanced token group, which becomes
//! [`Expression::Other`].

use chumsky::error::SimpleReason;
use chumsky::prelude::*;
use std::fmt;
use std::ops::Range;

use crate::jsx::ast::{
    Document, Expression, JsxAttribute, JsxAttributeItem, JsxAttributeValue, JsxChild,
    JsxElement, JsxElementName, JsxOpeningElement, Span,
};
use crate::jsx::lexer::TokenLocation;
use crate::jsx::location::{Location, SourceLocation};
use crate::jsx::tokens::Token;

/// Type alias for parser error
type ParserError = Simple<TokenLocation>;

/// A syntax error with its position in the source
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub location: Location,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.location.start.line + 1,
            self.location.start.column + 1,
            self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Parse tokens into a document
///
/// `source` is only used to compute line/column locations for errors.
pub fn parse(tokens: Vec<TokenLocation>, source: &str) -> Result<Document, Vec<ParseError>> {
    let ranges: Vec<Range<usize>> = tokens.iter().map(|(_, range)| range.clone()).collect();

    document().parse(tokens).map_err(|errors| {
        let source_location = SourceLocation::new(source);
        errors
            .into_iter()
            .map(|error| convert_error(error, &ranges, source.len(), &source_location))
            .collect()
    })
}

/// Convert a chumsky error, whose span counts tokens, into a byte-located [`ParseError`]
fn convert_error(
    error: ParserError,
    ranges: &[Range<usize>],
    eoi: usize,
    source_location: &SourceLocation,
) -> ParseError {
    let span = match error.found() {
        Some((_, range)) => range.clone(),
        None => token_span_to_bytes(&error.span(), ranges, eoi),
    };

    let message = match error.reason() {
        SimpleReason::Custom(message) => message.clone(),
        SimpleReason::Unclosed { delimiter, .. } => {
            format!("unclosed delimiter `{}`", delimiter.0)
        }
        SimpleReason::Unexpected => match error.found() {
            Some((token, _)) => format!("unexpected `{}`", token),
            None => "unexpected end of input".to_string(),
        },
    };

    ParseError {
        message,
        location: source_location.range_to_location(&span),
        span,
    }
}

fn token_span_to_bytes(span: &Range<usize>, ranges: &[Range<usize>], eoi: usize) -> Range<usize> {
    let start = ranges.get(span.start).map(|r| r.start).unwrap_or(eoi);
    let end = span
        .end
        .checked_sub(1)
        .and_then(|last| ranges.get(last))
        .map(|r| r.end)
        .unwrap_or(eoi)
        .max(start);
    start..end
}

/// Match a specific token, returning its byte range
pub(crate) fn token(t: Token) -> impl Parser<TokenLocation, Span, Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenLocation| tok == &t).map(|(_, range)| range)
}

/// Match an identifier, returning its name and byte range
pub(crate) fn ident() -> impl Parser<TokenLocation, (String, Span), Error = ParserError> + Clone {
    filter_map(|span, (tok, range): TokenLocation| match tok {
        Token::Ident(name) => Ok((name, range)),
        other => Err(Simple::expected_input_found(span, None, Some((other, range)))),
    })
}

/// Skip one token or one `{ ... }` group, honouring nesting
fn balanced() -> impl Parser<TokenLocation, (), Error = ParserError> + Clone {
    recursive(|balanced| {
        choice((
            token(Token::LBrace)
                .ignore_then(balanced.repeated())
                .then_ignore(token(Token::RBrace))
                .ignored(),
            filter(|(tok, _): &TokenLocation| !tok.is_brace()).ignored(),
        ))
    })
}

enum NameSuffix {
    Namespace(String),
    Member(Vec<String>),
}

/// Element names: `div`, `svg:rect`, `Foo.Bar`
fn element_name(
) -> impl Parser<TokenLocation, (JsxElementName, Span), Error = ParserError> + Clone {
    ident()
        .then(
            choice((
                token(Token::Colon)
                    .ignore_then(ident())
                    .map(|(name, range)| (NameSuffix::Namespace(name), range)),
                token(Token::Dot)
                    .ignore_then(ident())
                    .repeated()
                    .at_least(1)
                    .map(|parts: Vec<(String, Span)>| {
                        let end = parts.last().map(|(_, r)| r.end).unwrap_or(0);
                        let names = parts.into_iter().map(|(name, _)| name).collect();
                        (NameSuffix::Member(names), end..end)
                    }),
            ))
            .or_not(),
        )
        .map(|((first, first_range), suffix)| match suffix {
            None => (JsxElementName::Identifier(first), first_range),
            Some((NameSuffix::Namespace(name), range)) => (
                JsxElementName::Namespaced {
                    namespace: first,
                    name,
                },
                first_range.start..range.end,
            ),
            Some((NameSuffix::Member(rest), range)) => {
                let mut parts = vec![first];
                parts.extend(rest);
                (JsxElementName::Member(parts), first_range.start..range.end)
            }
        })
}

enum Postfix {
    Member(String),
    Call(Vec<Expression>),
}

/// The modelled expression subset: literals, identifiers, member access, calls,
/// unary, `+`/`-`, comparisons, `&&`, `||`/`??`, conditionals and nested JSX
fn expression<P>(element: P) -> impl Parser<TokenLocation, Expression, Error = ParserError> + Clone
where
    P: Parser<TokenLocation, JsxElement, Error = ParserError> + Clone + 'static,
{
    recursive(move |expr| {
        let literal = filter_map(|span, (tok, range): TokenLocation| match tok {
            Token::Str(value) => Ok(Expression::StringLiteral(value)),
            Token::Template(raw) => Ok(Expression::TemplateLiteral(raw)),
            Token::Number(value) => Ok(Expression::NumberLiteral(value)),
            Token::True => Ok(Expression::BooleanLiteral(true)),
            Token::False => Ok(Expression::BooleanLiteral(false)),
            Token::Null => Ok(Expression::NullLiteral),
            Token::Ident(name) => Ok(Expression::Identifier(name)),
            other => Err(Simple::expected_input_found(span, None, Some((other, range)))),
        });

        let parenthesized = token(Token::LParen)
            .ignore_then(expr.clone())
            .then_ignore(token(Token::RParen));

        let atom = choice((
            literal,
            parenthesized,
            element.clone().map(|e| Expression::Jsx(Box::new(e))),
        ));

        let arguments = token(Token::LParen)
            .ignore_then(
                expr.clone()
                    .separated_by(token(Token::Comma))
                    .allow_trailing(),
            )
            .then_ignore(token(Token::RParen));

        let postfix = atom
            .then(
                choice((
                    token(Token::Dot)
                        .ignore_then(ident())
                        .map(|(name, _)| Postfix::Member(name)),
                    arguments.map(Postfix::Call),
                ))
                .repeated(),
            )
            .foldl(|object, op| match op {
                Postfix::Member(property) => Expression::Member {
                    object: Box::new(object),
                    property,
                },
                Postfix::Call(arguments) => Expression::Call {
                    callee: Box::new(object),
                    arguments,
                },
            });

        let unary = choice((
            token(Token::Bang).to("!"),
            token(Token::Minus).to("-"),
            token(Token::Plus).to("+"),
        ))
        .repeated()
        .then(postfix)
        .foldr(|operator, argument| Expression::Unary {
            operator: operator.to_string(),
            argument: Box::new(argument),
        })
        .boxed();

        let additive = binary_level(
            unary,
            choice((
                token(Token::Plus).to("+".to_string()),
                token(Token::Minus).to("-".to_string()),
            )),
            false,
        );

        let comparison = binary_level(
            additive,
            filter_map(|span, (tok, range): TokenLocation| match tok {
                Token::Operator(op) => Ok(op),
                other => Err(Simple::expected_input_found(span, None, Some((other, range)))),
            }),
            false,
        );

        let logical_and = binary_level(comparison, token(Token::AndAnd).to("&&".to_string()), true);

        let logical_or = binary_level(
            logical_and,
            choice((
                token(Token::OrOr).to("||".to_string()),
                token(Token::Nullish).to("??".to_string()),
            )),
            true,
        );

        logical_or
            .then(
                token(Token::Question)
                    .ignore_then(expr.clone())
                    .then_ignore(token(Token::Colon))
                    .then(expr)
                    .or_not(),
            )
            .map(|(test, branches)| match branches {
                None => test,
                Some((consequent, alternate)) => Expression::Conditional {
                    test: Box::new(test),
                    consequent: Box::new(consequent),
                    alternate: Box::new(alternate),
                },
            })
    })
}

/// One left-associative precedence level
fn binary_level<O>(
    operand: BoxedParser<'static, TokenLocation, Expression, ParserError>,
    operator: O,
    logical: bool,
) -> BoxedParser<'static, TokenLocation, Expression, ParserError>
where
    O: Parser<TokenLocation, String, Error = ParserError> + Clone + 'static,
{
    operand
        .clone()
        .then(operator.then(operand).repeated())
        .foldl(move |left, (operator, right)| {
            let left = Box::new(left);
            let right = Box::new(right);
            if logical {
                Expression::Logical {
                    operator,
                    left,
                    right,
                }
            } else {
                Expression::Binary {
                    operator,
                    left,
                    right,
                }
            }
        })
        .boxed()
}

/// `{ ... }` holding an expression, returning the expression and the braces' span
fn container<E>(expr: E) -> impl Parser<TokenLocation, (Expression, Span), Error = ParserError> + Clone
where
    E: Parser<TokenLocation, Expression, Error = ParserError> + Clone,
{
    token(Token::LBrace)
        .then(choice((
            expr.then_ignore(token(Token::RBrace).rewind()),
            balanced().repeated().at_least(1).to(Expression::Other),
            empty().to(Expression::Empty),
        )))
        .then(token(Token::RBrace))
        .map(|((open, expression), close)| (expression, open.start..close.end))
}

fn attribute<E>(expr: E) -> impl Parser<TokenLocation, JsxAttributeItem, Error = ParserError> + Clone
where
    E: Parser<TokenLocation, Expression, Error = ParserError> + Clone,
{
    let string_value = filter_map(|span, (tok, range): TokenLocation| match tok {
        Token::Str(value) => Ok(JsxAttributeValue::StringLiteral { value, span: range }),
        other => Err(Simple::expected_input_found(span, None, Some((other, range)))),
    });

    let value = choice((
        string_value,
        container(expr).map(|(expression, span)| JsxAttributeValue::Expression { expression, span }),
    ));

    let plain = ident()
        .then(token(Token::Colon).ignore_then(ident()).or_not())
        .then(token(Token::Eq).ignore_then(value).or_not())
        .map(|(((first, first_range), local), value)| {
            let (namespace, name, name_end) = match local {
                Some((local, range)) => (Some(first), local, range.end),
                None => (None, first, first_range.end),
            };
            let end = match &value {
                Some(JsxAttributeValue::StringLiteral { span, .. })
                | Some(JsxAttributeValue::Expression { span, .. }) => span.end,
                None => name_end,
            };
            JsxAttributeItem::Attribute(JsxAttribute {
                namespace,
                name,
                value,
                span: first_range.start..end,
            })
        });

    let spread = token(Token::LBrace)
        .then_ignore(token(Token::Spread))
        .then_ignore(balanced().repeated())
        .then(token(Token::RBrace))
        .map(|(open, close)| JsxAttributeItem::Spread(open.start..close.end));

    choice((plain, spread))
}

/// Parse a single element or fragment, including its descendants
pub(crate) fn element() -> impl Parser<TokenLocation, JsxElement, Error = ParserError> + Clone {
    recursive(|element| {
        let expr = expression(element.clone()).boxed();
        let attributes = attribute(expr.clone()).repeated();

        let self_closing = token(Token::Lt)
            .then(element_name())
            .then(attributes.clone())
            .then_ignore(token(Token::Slash))
            .then(token(Token::Gt))
            .map(|(((lt, (name, _)), attributes), gt)| {
                let span = lt.start..gt.end;
                JsxElement {
                    opening: JsxOpeningElement {
                        name,
                        attributes,
                        self_closing: true,
                        span: span.clone(),
                    },
                    children: Vec::new(),
                    closing: None,
                    span,
                }
            });

        let text = filter_map(|span, (tok, range): TokenLocation| match tok {
            Token::Text(_) => Ok(JsxChild::Text(range)),
            other => Err(Simple::expected_input_found(span, None, Some((other, range)))),
        });

        let child = choice((
            element.clone().map(JsxChild::Element),
            container(expr).map(|(expression, span)| JsxChild::Expression { expression, span }),
            text,
        ));

        let closing_tag = token(Token::Lt)
            .then_ignore(token(Token::Slash))
            .then(element_name().or_not())
            .then(token(Token::Gt))
            .map_with_span(|((lt, name), gt), token_span| {
                let name = name.map(|(name, _)| name).unwrap_or(JsxElementName::Fragment);
                (name, lt.start..gt.end, token_span)
            });

        let with_children = token(Token::Lt)
            .then(element_name().or_not())
            .then(attributes)
            .then(token(Token::Gt))
            .then(child.repeated())
            .then(closing_tag)
            .try_map(
                |(((((lt, name), attributes), gt), children), (closing_name, closing, token_span)),
                 _| {
                    let name = name.map(|(name, _)| name).unwrap_or(JsxElementName::Fragment);
                    if name != closing_name {
                        return Err(Simple::custom(
                            token_span,
                            format!(
                                "expected closing tag for <{}>, found </{}>",
                                name, closing_name
                            ),
                        ));
                    }
                    Ok(JsxElement {
                        opening: JsxOpeningElement {
                            name,
                            attributes,
                            self_closing: false,
                            span: lt.start..gt.end,
                        },
                        children,
                        span: lt.start..closing.end,
                        closing: Some(closing),
                    })
                },
            );

        choice((self_closing, with_children))
    })
}

/// Parse a whole document
pub fn document() -> impl Parser<TokenLocation, Document, Error = ParserError> {
    element()
        .repeated()
        .then_ignore(end())
        .map(|elements| Document { elements })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsx::lexer::tokenize;

    fn parse_str(source: &str) -> Result<Document, Vec<ParseError>> {
        parse(tokenize(source), source)
    }

    fn role_value(source: &str) -> Option<JsxAttributeValue> {
        let doc = parse_str(source).expect("source to parse");
        doc.elements[0]
            .opening
            .attribute("role")
            .and_then(|attr| attr.value.clone())
    }

    fn role_expression(source: &str) -> Expression {
        match role_value(source) {
            Some(JsxAttributeValue::Expression { expression, .. }) => expression,
            other => panic!("expected an expression container, found {:?}", other),
        }
    }

    #[test]
    fn test_self_closing_element() {
        let source = r#"<div role="button" />"#;
        let doc = parse_str(source).unwrap();

        assert_eq!(doc.elements.len(), 1);
        let element = &doc.elements[0];
        assert_eq!(element.name(), &JsxElementName::Identifier("div".to_string()));
        assert!(element.opening.self_closing);
        assert_eq!(element.span, 0..source.len());

        let attr = element.opening.attribute("role").unwrap();
        assert_eq!(attr.span, 5..18);
        assert_eq!(
            attr.value,
            Some(JsxAttributeValue::StringLiteral {
                value: "button".to_string(),
                span: 10..18
            })
        );
    }

    #[test]
    fn test_element_with_children() {
        let doc = parse_str(r#"<ul role="list"><li>One</li><li role="listitem">Two</li></ul>"#)
            .unwrap();

        let list = &doc.elements[0];
        assert!(!list.opening.self_closing);
        assert_eq!(list.children.len(), 2);
        match &list.children[1] {
            JsxChild::Element(item) => {
                assert!(item.opening.attribute("role").is_some());
                assert!(matches!(item.children[0], JsxChild::Text(_)));
            }
            other => panic!("expected element child, found {:?}", other),
        }
    }

    #[test]
    fn test_boolean_shorthand_attribute() {
        let doc = parse_str("<div role />").unwrap();
        let attr = doc.elements[0].opening.attribute("role").unwrap();
        assert_eq!(attr.value, None);
        assert_eq!(attr.span, 5..9);
    }

    #[test]
    fn test_expression_values() {
        assert_eq!(
            role_expression("<div role={role} />"),
            Expression::Identifier("role".to_string())
        );
        assert_eq!(role_expression("<div role={null}></div>"), Expression::NullLiteral);
        assert_eq!(
            role_expression(r#"<div role={"row"} />"#),
            Expression::StringLiteral("row".to_string())
        );
        assert!(matches!(
            role_expression(r#"<div role={role || "button"} />"#),
            Expression::Logical { ref operator, .. } if operator == "||"
        ));
        assert!(matches!(
            role_expression(r#"<div role={"tab" + "panel"} />"#),
            Expression::Binary { ref operator, .. } if operator == "+"
        ));
        assert!(matches!(
            role_expression(r#"<div role={open ? "dialog" : "none"} />"#),
            Expression::Conditional { .. }
        ));
        assert!(matches!(
            role_expression("<div role={getRole(props.kind)} />"),
            Expression::Call { .. }
        ));
    }

    #[test]
    fn test_unmodelled_expression_falls_back_to_other() {
        assert_eq!(
            role_expression("<div role={roles[0]} />"),
            Expression::Other
        );
        assert_eq!(
            role_expression("<div onClick={() => { go(); }} role={x => x} />"),
            Expression::Other
        );
        assert_eq!(role_expression("<div role={} />"), Expression::Empty);
        assert_eq!(role_expression("<div role={/* todo */} />"), Expression::Empty);
    }

    #[test]
    fn test_spread_and_namespaced_attributes() {
        let doc = parse_str(r##"<svg {...props} xlink:href="#a" role="img" />"##).unwrap();
        let opening = &doc.elements[0].opening;

        assert!(matches!(opening.attributes[0], JsxAttributeItem::Spread(_)));
        match &opening.attributes[1] {
            JsxAttributeItem::Attribute(attr) => {
                assert_eq!(attr.namespace.as_deref(), Some("xlink"));
                assert_eq!(attr.name, "href");
            }
            other => panic!("expected attribute, found {:?}", other),
        }
        assert!(opening.attribute("role").is_some());
    }

    #[test]
    fn test_element_names() {
        let doc = parse_str("<Foo.Bar /><svg:rect /><Bar baz />").unwrap();
        assert_eq!(
            doc.elements[0].name(),
            &JsxElementName::Member(vec!["Foo".to_string(), "Bar".to_string()])
        );
        assert_eq!(
            doc.elements[1].name(),
            &JsxElementName::Namespaced {
                namespace: "svg".to_string(),
                name: "rect".to_string()
            }
        );
        assert_eq!(doc.elements[2].name(), &JsxElementName::Identifier("Bar".to_string()));
    }

    #[test]
    fn test_fragment() {
        let doc = parse_str(r#"<><div role="row" /></>"#).unwrap();
        let fragment = &doc.elements[0];
        assert_eq!(fragment.name(), &JsxElementName::Fragment);
        assert_eq!(fragment.children.len(), 1);
    }

    #[test]
    fn test_nested_jsx_in_expression_child() {
        let doc = parse_str(r#"<div>{open && <span role="status" />}</div>"#).unwrap();
        match &doc.elements[0].children[0] {
            JsxChild::Expression {
                expression: Expression::Logical { right, .. },
                ..
            } => assert!(matches!(**right, Expression::Jsx(_))),
            other => panic!("expected logical expression child, found {:?}", other),
        }
    }

    #[test]
    fn test_text_with_apostrophe() {
        let doc = parse_str("<p>Don't panic</p>").unwrap();
        assert_eq!(doc.elements[0].children.len(), 1);
    }

    #[test]
    fn test_quoted_text_around_elements() {
        let source = r#"<p>Don't <span role="foobar">x</span> won't</p>"#;
        let doc = parse_str(source).unwrap();
        let children = &doc.elements[0].children;

        assert_eq!(children.len(), 3);
        assert_eq!(children[0], JsxChild::Text(3..9));
        match &children[1] {
            JsxChild::Element(el) => assert_eq!(
                el.opening.attribute("role").and_then(|attr| attr.value.clone()),
                Some(JsxAttributeValue::StringLiteral {
                    value: "foobar".to_string(),
                    span: 20..28,
                })
            ),
            other => panic!("expected element, found {:?}", other),
        }
    }

    #[test]
    fn test_sibling_after_text_with_apostrophe() {
        let doc = parse_str(r#"<div><p>It's fine</p><span role="range" /></div>"#).unwrap();
        let children = &doc.elements[0].children;
        assert_eq!(children.len(), 2);
        assert!(matches!(&children[1], JsxChild::Element(el) if el.opening.attribute("role").is_some()));
    }

    #[test]
    fn test_comment_between_attributes() {
        let value = role_value(r#"<div /* note */ role="foobar" />"#);
        assert!(matches!(value, Some(JsxAttributeValue::StringLiteral { value, .. }) if value == "foobar"));
    }

    #[test]
    fn test_attribute_string_across_lines() {
        let value = role_value("<div role=\"tabpanel\n  row\" />");
        assert!(
            matches!(value, Some(JsxAttributeValue::StringLiteral { value, .. }) if value == "tabpanel\n  row")
        );
        let value = role_value("<div role=\"a\\\" />");
        assert!(matches!(value, Some(JsxAttributeValue::StringLiteral { value, .. }) if value == "a\\"));
    }

    #[test]
    fn test_multiline_source() {
        let doc = parse_str("<div>\n  <span\n    role=\"note\"\n  />\n</div>\n").unwrap();
        assert_eq!(doc.elements.len(), 1);
        assert_eq!(doc.elements[0].children.len(), 1);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse_str("").unwrap(), Document::default());
    }

    #[test]
    fn test_mismatched_closing_tag_is_an_error() {
        assert!(parse_str("<div><span></div>").is_err());
    }

    #[test]
    fn test_unclosed_element_is_an_error() {
        let errors = parse_str("<div role=\"row\">").unwrap_err();
        assert!(!errors.is_empty());
        assert!(errors[0].span.end <= "<div role=\"row\">".len());
    }

    #[test]
    fn test_garbage_inside_tag_is_located() {
        let source = "<div\n  # />";
        let errors = parse_str(source).unwrap_err();
        assert!(errors.iter().any(|error| error.location.start.line == 1));
    }
}
