//! Linting: rules, the driver that runs them, and diagnostic output
//!
//! A [`Linter`](linter::Linter) walks a parsed [`Document`](crate::jsx::Document)
//! in document order and hands every opening element to each registered
//! [`Rule`](rule::Rule). Rules report through a [`RuleContext`](rule::RuleContext),
//! which turns byte spans into [`Diagnostic`](diagnostic::Diagnostic)s.

pub mod diagnostic;
pub mod formats;
pub mod linter;
pub mod rule;
pub mod rules;

pub use diagnostic::{Diagnostic, FileReport};
pub use linter::{LintError, Linter};
pub use rule::{Rule, RuleContext};
