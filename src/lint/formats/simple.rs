//! Compiler-style one-line-per-diagnostic output
//!
//! ```text
//! src/app.jsx:3:8: Elements with ARIA roles must use a valid, non-abstract ARIA role. [aria-role]
//!
//! 1 problem
//! ```
//!
//! Lines and columns are 1-based. Clean runs render as an empty string.

use super::registry::{DiagnosticFormatter, FormatError};
use crate::lint::diagnostic::FileReport;

pub struct SimpleFormatter;

impl DiagnosticFormatter for SimpleFormatter {
    fn name(&self) -> &str {
        "simple"
    }

    fn format(&self, reports: &[FileReport]) -> Result<String, FormatError> {
        let mut output = String::new();
        let mut count = 0;

        for report in reports {
            for diagnostic in &report.diagnostics {
                output.push_str(&format!(
                    "{}:{}:{}: {} [{}]\n",
                    report.path,
                    diagnostic.location.start.line + 1,
                    diagnostic.location.start.column + 1,
                    diagnostic.message,
                    diagnostic.rule
                ));
                count += 1;
            }
        }

        if count > 0 {
            let noun = if count == 1 { "problem" } else { "problems" };
            output.push_str(&format!("\n{} {}\n", count, noun));
        }

        Ok(output)
    }

    fn description(&self) -> &str {
        "One line per diagnostic: path:line:column: message [rule]"
    }
}
