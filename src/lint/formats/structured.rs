//! Machine-readable report formats
//!
//! Both formats serialize the full `[FileReport]` list: path, then per
//! diagnostic the rule, message, byte span and 0-based location.

use super::registry::{DiagnosticFormatter, FormatError};
use crate::lint::diagnostic::FileReport;

pub struct JsonFormatter;

impl DiagnosticFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn format(&self, reports: &[FileReport]) -> Result<String, FormatError> {
        serde_json::to_string_pretty(reports)
            .map_err(|e| FormatError::Serialize(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON array of file reports"
    }
}

pub struct YamlFormatter;

impl DiagnosticFormatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn format(&self, reports: &[FileReport]) -> Result<String, FormatError> {
        serde_yaml::to_string(reports).map_err(|e| FormatError::Serialize(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML sequence of file reports"
    }
}
