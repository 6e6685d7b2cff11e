//! Diagnostics reported by rules

use serde::Serialize;

use crate::jsx::ast::Span;
use crate::jsx::location::Location;

/// One finding, located at the node the rule reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule: String,
    pub message: String,
    pub span: Span,
    pub location: Location,
}

/// Diagnostics for one linted source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn new(path: impl Into<String>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            path: path.into(),
            diagnostics,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
