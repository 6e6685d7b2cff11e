//! Named report formats
//!
//! The CLI picks a [`DiagnosticFormatter`] by name from a [`FormatRegistry`].

use crate::lint::diagnostic::FileReport;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    UnknownFormat(String),
    Serialize(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat(name) => write!(f, "unknown format '{name}'"),
            FormatError::Serialize(msg) => write!(f, "could not serialize reports: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Renders the reports of one run as a single string
pub trait DiagnosticFormatter: Send + Sync {
    fn name(&self) -> &str;

    fn format(&self, reports: &[FileReport]) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

/// Formatters keyed by name, iterated in name order
pub struct FormatRegistry {
    formatters: BTreeMap<String, Box<dyn DiagnosticFormatter>>,
}

impl FormatRegistry {
    pub fn empty() -> Self {
        FormatRegistry {
            formatters: BTreeMap::new(),
        }
    }

    /// Add `formatter`, replacing any formatter of the same name
    pub fn register(&mut self, formatter: impl DiagnosticFormatter + 'static) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DiagnosticFormatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.formatters.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn DiagnosticFormatter> + '_ {
        self.formatters.values().map(|f| f.as_ref())
    }

    pub fn format(&self, reports: &[FileReport], name: &str) -> Result<String, FormatError> {
        self.get(name)
            .ok_or_else(|| FormatError::UnknownFormat(name.to_string()))?
            .format(reports)
    }
}

impl Default for FormatRegistry {
    /// `simple`, `json` and `yaml`
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(super::SimpleFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountFormatter;

    impl DiagnosticFormatter for CountFormatter {
        fn name(&self) -> &str {
            "count"
        }

        fn format(&self, reports: &[FileReport]) -> Result<String, FormatError> {
            let total: usize = reports.iter().map(|r| r.diagnostics.len()).sum();
            Ok(format!("{} files, {} problems", reports.len(), total))
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = FormatRegistry::empty();
        assert_eq!(registry.names().count(), 0);
        assert!(!registry.contains("simple"));
    }

    #[test]
    fn test_register_custom_format() {
        let mut registry = FormatRegistry::default();
        registry.register(CountFormatter);

        assert!(registry.contains("count"));
        assert_eq!(registry.get("count").map(|f| f.description()), Some(""));

        let reports = vec![FileReport::new("a.jsx", vec![])];
        assert_eq!(registry.format(&reports, "count").unwrap(), "1 files, 0 problems");
    }

    #[test]
    fn test_unknown_format() {
        let err = FormatRegistry::default().format(&[], "xml").unwrap_err();
        assert_eq!(err, FormatError::UnknownFormat("xml".to_string()));
        assert_eq!(err.to_string(), "unknown format 'xml'");
    }

    #[test]
    fn test_builtin_formats_in_name_order() {
        let registry = FormatRegistry::default();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["json", "simple", "yaml"]);
        assert!(registry.iter().all(|f| !f.description().is_empty()));
    }
}
