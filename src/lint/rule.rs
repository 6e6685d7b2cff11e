//! The rule interface
//!
//! A rule is handed each opening element exactly once per run, in document
//! order, and reports zero or more findings through a [`RuleContext`]. Rules
//! hold no per-run state, so one rule value can lint any number of sources.

use crate::jsx::ast::{JsxOpeningElement, Span};
use crate::jsx::location::SourceLocation;
use crate::lint::diagnostic::Diagnostic;

/// Trait for lint rules
pub trait Rule: Send + Sync {
    /// Identifier used in reports and configuration (e.g. "aria-role")
    fn name(&self) -> &'static str;

    /// One-line description of what the rule checks
    fn description(&self) -> &'static str {
        ""
    }

    /// Inspect one opening element
    fn check_element(&self, element: &JsxOpeningElement, ctx: &mut RuleContext<'_>);
}

/// Collects diagnostics for one source
pub struct RuleContext<'a> {
    rule: &'static str,
    source_location: &'a SourceLocation,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    pub fn new(source_location: &'a SourceLocation) -> Self {
        Self {
            rule: "",
            source_location,
            diagnostics: Vec::new(),
        }
    }

    /// Attribute subsequent reports to `rule`
    pub(crate) fn enter_rule(&mut self, rule: &'static str) {
        self.rule = rule;
    }

    /// Report a finding located at `span`
    pub fn report(&mut self, message: impl Into<String>, span: Span) {
        let location = self.source_location.range_to_location(&span);
        self.diagnostics.push(Diagnostic {
            rule: self.rule.to_string(),
            message: message.into(),
            span,
            location,
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsx::location::Position;

    #[test]
    fn test_report_converts_span_to_location() {
        let source = "<a />\n<b role />";
        let source_location = SourceLocation::new(source);
        let mut ctx = RuleContext::new(&source_location);

        ctx.enter_rule("test-rule");
        ctx.report("found it", 9..13);

        let diagnostics = ctx.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "test-rule");
        assert_eq!(diagnostics[0].message, "found it");
        assert_eq!(diagnostics[0].location.start, Position::new(1, 3));
        assert_eq!(diagnostics[0].location.end, Position::new(1, 7));
    }
}
