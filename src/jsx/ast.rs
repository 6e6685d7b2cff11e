//! AST for JSX sources
//!
//! Every node that a rule can report on keeps its byte `span`; diagnostics turn
//! spans into line/column locations with [`SourceLocation`](super::location::SourceLocation).
//!
//! Expressions only model the subset of JavaScript a rule needs to classify
//! attribute values. Anything outside that subset parses as
//! [`Expression::Other`].

use serde::Serialize;
use std::fmt;
use std::ops::Range;

pub type Span = Range<usize>;

/// A parsed source: the top-level elements in document order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    pub elements: Vec<JsxElement>,
}

impl Document {
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        for element in &self.elements {
            element.accept(visitor);
        }
    }
}

/// An element or fragment with its children
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsxElement {
    pub opening: JsxOpeningElement,
    pub children: Vec<JsxChild>,
    /// Name span of the closing tag, absent for self-closing elements
    pub closing: Option<Span>,
    pub span: Span,
}

impl JsxElement {
    pub fn name(&self) -> &JsxElementName {
        &self.opening.name
    }

    /// Visit this element, its attribute expressions and its children in document order
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_element(self);
        for item in &self.opening.attributes {
            if let JsxAttributeItem::Attribute(attribute) = item {
                if let Some(JsxAttributeValue::Expression { expression, .. }) = &attribute.value {
                    expression.accept(visitor);
                }
            }
        }
        for child in &self.children {
            child.accept(visitor);
        }
        visitor.leave_element(self);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsxOpeningElement {
    pub name: JsxElementName,
    pub attributes: Vec<JsxAttributeItem>,
    pub self_closing: bool,
    pub span: Span,
}

impl JsxOpeningElement {
    /// Find an attribute by name, ignoring spreads and namespaced attributes
    pub fn attribute(&self, name: &str) -> Option<&JsxAttribute> {
        self.attributes().find(|attr| attr.namespace.is_none() && attr.name == name)
    }

    /// Find an attribute by name, comparing ASCII case-insensitively
    pub fn attribute_ignore_case(&self, name: &str) -> Option<&JsxAttribute> {
        self.attributes()
            .find(|attr| attr.namespace.is_none() && attr.name.eq_ignore_ascii_case(name))
    }

    /// Plain attributes in source order
    pub fn attributes(&self) -> impl Iterator<Item = &JsxAttribute> {
        self.attributes.iter().filter_map(|item| match item {
            JsxAttributeItem::Attribute(attr) => Some(attr),
            JsxAttributeItem::Spread(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum JsxElementName {
    /// `div`, `my-element`, `Bar`
    Identifier(String),
    /// `svg:rect`
    Namespaced { namespace: String, name: String },
    /// `Foo.Bar.Baz`
    Member(Vec<String>),
    /// `<>...</>`
    Fragment,
}

impl JsxElementName {
    /// Whether the element renders a DOM node directly.
    ///
    /// Lowercase tag names are DOM elements; capitalised names and member
    /// expressions are components.
    pub fn is_dom_element(&self) -> bool {
        match self {
            JsxElementName::Identifier(name) => name
                .chars()
                .next()
                .is_some_and(|first| first.is_ascii_lowercase()),
            JsxElementName::Namespaced { .. } => true,
            JsxElementName::Member(_) | JsxElementName::Fragment => false,
        }
    }
}

impl fmt::Display for JsxElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsxElementName::Identifier(name) => write!(f, "{}", name),
            JsxElementName::Namespaced { namespace, name } => write!(f, "{}:{}", namespace, name),
            JsxElementName::Member(parts) => write!(f, "{}", parts.join(".")),
            JsxElementName::Fragment => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum JsxAttributeItem {
    Attribute(JsxAttribute),
    /// `{...props}`
    Spread(Span),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsxAttribute {
    pub namespace: Option<String>,
    pub name: String,
    /// `None` for the boolean shorthand (`<input disabled />`)
    pub value: Option<JsxAttributeValue>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum JsxAttributeValue {
    /// `role="button"`
    StringLiteral { value: String, span: Span },
    /// `role={expr}`
    Expression { expression: Expression, span: Span },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum JsxChild {
    Text(Span),
    Element(JsxElement),
    Expression { expression: Expression, span: Span },
}

impl JsxChild {
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            JsxChild::Text(_) => {}
            JsxChild::Element(element) => element.accept(visitor),
            JsxChild::Expression { expression, .. } => expression.accept(visitor),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    StringLiteral(String),
    /// Raw text between the backticks
    TemplateLiteral(String),
    NumberLiteral(String),
    BooleanLiteral(bool),
    NullLiteral,
    Identifier(String),
    Member {
        object: Box<Expression>,
        property: String,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Unary {
        operator: String,
        argument: Box<Expression>,
    },
    Binary {
        operator: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Logical {
        operator: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Conditional {
        test: Box<Expression>,
        consequent: Box<Expression>,
        alternate: Box<Expression>,
    },
    Jsx(Box<JsxElement>),
    /// `{}` or `{/* comment */}`
    Empty,
    /// Anything outside the modelled subset (arrow functions, arrays, objects, ...)
    Other,
}

impl Expression {
    /// Whether a template literal contains a `${...}` substitution
    pub fn has_interpolation(&self) -> bool {
        matches!(self, Expression::TemplateLiteral(raw) if raw.contains("${"))
    }

    /// Visit the JSX elements nested inside this expression
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Expression::Jsx(element) => element.accept(visitor),
            Expression::Member { object, .. } => object.accept(visitor),
            Expression::Call { callee, arguments } => {
                callee.accept(visitor);
                for argument in arguments {
                    argument.accept(visitor);
                }
            }
            Expression::Unary { argument, .. } => argument.accept(visitor),
            Expression::Binary { left, right, .. } | Expression::Logical { left, right, .. } => {
                left.accept(visitor);
                right.accept(visitor);
            }
            Expression::Conditional {
                test,
                consequent,
                alternate,
            } => {
                test.accept(visitor);
                consequent.accept(visitor);
                alternate.accept(visitor);
            }
            Expression::StringLiteral(_)
            | Expression::TemplateLiteral(_)
            | Expression::NumberLiteral(_)
            | Expression::BooleanLiteral(_)
            | Expression::NullLiteral
            | Expression::Identifier(_)
            | Expression::Empty
            | Expression::Other => {}
        }
    }
}

/// Visitor trait for traversing the AST
///
/// Default implementations are empty, so implementors only override what they need.
/// `visit_element` runs before the element's attribute expressions and children,
/// `leave_element` after them.
pub trait Visitor {
    fn visit_element(&mut self, _element: &JsxElement) {}
    fn leave_element(&mut self, _element: &JsxElement) {}
}
