//! `aria-role`: elements with ARIA roles must use a valid, non-abstract ARIA role
//!
//! The rule looks only at the `role` attribute of each opening element. Its value
//! is first classified into a [`RoleValue`]; only statically known values are
//! checked against the [`RoleRegistry`].
//!
//! ```text
//! <div role="tabpanel row" />        ok: every token is a concrete role
//! <div role={role || "foobar"} />    ok: not statically known
//! <div role="tabpanel row range" />  error: `range` is abstract
//! <div role="" />                    error: no tokens
//! <div role />                       error: no value
//! <div role={null} />                error: null is not a role
//! ```
//!
//! Tokens are matched case-sensitively, as in the ARIA token grammar.

use serde::Deserialize;

use crate::aria::RoleRegistry;
use crate::jsx::ast::{Expression, JsxAttribute, JsxAttributeValue, JsxOpeningElement};
use crate::lint::rule::{Rule, RuleContext};

pub const NAME: &str = "aria-role";
pub const MESSAGE: &str = "Elements with ARIA roles must use a valid, non-abstract ARIA role.";

/// What is statically known about a `role` attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleValue {
    /// No `role` attribute on the element
    Absent,
    /// `role` written without a value
    NoValue,
    /// `role={null}`
    NullLiteral,
    /// A value known at lint time
    StringLiteral(String),
    /// A value only known at runtime
    Unresolvable,
}

/// Classify the value of a (possibly missing) `role` attribute
pub fn classify_value(attribute: Option<&JsxAttribute>) -> RoleValue {
    let Some(attribute) = attribute else {
        return RoleValue::Absent;
    };

    match &attribute.value {
        None => RoleValue::NoValue,
        Some(JsxAttributeValue::StringLiteral { value, .. }) => {
            RoleValue::StringLiteral(value.clone())
        }
        Some(JsxAttributeValue::Expression { expression, .. }) => classify_expression(expression),
    }
}

fn classify_expression(expression: &Expression) -> RoleValue {
    match expression {
        Expression::NullLiteral => RoleValue::NullLiteral,
        // The DOM stringifies these
        Expression::NumberLiteral(number) => RoleValue::StringLiteral(number.clone()),
        Expression::BooleanLiteral(flag) => RoleValue::StringLiteral(flag.to_string()),
        other => match static_string(other) {
            Some(value) => RoleValue::StringLiteral(value),
            None => RoleValue::Unresolvable,
        },
    }
}

/// Evaluate string literals, plain templates and `+` concatenations of them
fn static_string(expression: &Expression) -> Option<String> {
    match expression {
        Expression::StringLiteral(value) => Some(value.clone()),
        Expression::TemplateLiteral(raw) if !expression.has_interpolation() => Some(raw.clone()),
        Expression::Binary {
            operator,
            left,
            right,
        } if operator == "+" => {
            let mut value = static_string(left)?;
            value.push_str(&static_string(right)?);
            Some(value)
        }
        _ => None,
    }
}

/// Rule options
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AriaRoleOptions {
    /// Skip components (`<Foo />`, `<Foo.Bar />`); only check DOM elements
    pub ignore_non_dom: bool,
    /// Tokens accepted even when unknown or abstract
    pub allowed_invalid_roles: Vec<String>,
}

/// The `aria-role` rule, bound to a registry
#[derive(Debug, Clone)]
pub struct AriaRole<'r> {
    registry: &'r RoleRegistry,
    options: AriaRoleOptions,
}

impl AriaRole<'static> {
    /// The rule over the bundled registry with default options
    pub fn bundled() -> Self {
        Self::new(RoleRegistry::bundled(), AriaRoleOptions::default())
    }
}

impl<'r> AriaRole<'r> {
    pub fn new(registry: &'r RoleRegistry, options: AriaRoleOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &AriaRoleOptions {
        &self.options
    }

    /// Whether a classified value is acceptable
    pub fn is_valid(&self, value: &RoleValue) -> bool {
        match value {
            RoleValue::Absent | RoleValue::Unresolvable => true,
            RoleValue::NoValue | RoleValue::NullLiteral => false,
            RoleValue::StringLiteral(value) => {
                let mut tokens = value.split_whitespace().peekable();
                tokens.peek().is_some() && tokens.all(|token| self.is_allowed(token))
            }
        }
    }

    fn is_allowed(&self, token: &str) -> bool {
        self.registry.is_concrete(token)
            || self
                .options
                .allowed_invalid_roles
                .iter()
                .any(|allowed| allowed == token)
    }

    /// Return the offending `role` attribute of `element`, if any
    pub fn check<'e>(&self, element: &'e JsxOpeningElement) -> Option<&'e JsxAttribute> {
        if self.options.ignore_non_dom && !element.name.is_dom_element() {
            return None;
        }

        let attribute = element.attribute_ignore_case("role")?;
        let value = classify_value(Some(attribute));
        tracing::trace!(element = %element.name, ?value, "classified role attribute");

        if self.is_valid(&value) {
            None
        } else {
            Some(attribute)
        }
    }
}

impl Rule for AriaRole<'_> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Elements with ARIA roles must use a valid, non-abstract ARIA role"
    }

    fn check_element(&self, element: &JsxOpeningElement, ctx: &mut RuleContext<'_>) {
        if let Some(attribute) = self.check(element) {
            ctx.report(MESSAGE, attribute.span.clone());
        }
    }
}
