//! The lint driver
//!
//! A [`Linter`] owns a set of rules and runs them over documents, sources or
//! files. Traversal is depth-first in document order: each element's opening
//! tag is checked before its attribute expressions and children, so
//! diagnostics come out sorted by position of the element they belong to.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::aria::RoleRegistry;
use crate::config::LintConfig;
use crate::jsx::ast::{Document, JsxElement, Visitor};
use crate::jsx::location::SourceLocation;
use crate::jsx::{parse_source, ParseError};
use crate::lint::diagnostic::{Diagnostic, FileReport};
use crate::lint::rule::{Rule, RuleContext};
use crate::lint::rules::AriaRole;

/// File extensions picked up when a directory is linted
pub const SOURCE_EXTENSIONS: &[&str] = &["jsx", "tsx", "js"];

/// Errors raised while linting a source or file
#[derive(Debug, Clone, PartialEq)]
pub enum LintError {
    /// The file could not be read
    Io { path: String, message: String },
    /// The source is not valid JSX
    Parse {
        path: Option<String>,
        errors: Vec<ParseError>,
    },
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintError::Io { path, message } => write!(f, "{}: {}", path, message),
            LintError::Parse { path, errors } => {
                let prefix = path.as_deref().unwrap_or("<source>");
                let messages: Vec<String> = errors
                    .iter()
                    .map(|error| format!("{}:{}", prefix, error))
                    .collect();
                write!(f, "{}", messages.join("\n"))
            }
        }
    }
}

impl std::error::Error for LintError {}

/// Runs rules over JSX documents
pub struct Linter<'r> {
    rules: Vec<Box<dyn Rule + 'r>>,
}

impl Linter<'static> {
    /// A linter with the built-in rules over the bundled role table
    pub fn new(config: &LintConfig) -> Self {
        Linter::with_registry(RoleRegistry::bundled(), config)
    }
}

impl<'r> Linter<'r> {
    /// A linter with the built-in rules over `registry`
    pub fn with_registry(registry: &'r RoleRegistry, config: &LintConfig) -> Self {
        let mut linter = Linter::empty();
        linter.register(AriaRole::new(registry, config.rules.aria_role.clone()));
        linter
    }

    /// A linter with no rules
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn register(&mut self, rule: impl Rule + 'r) {
        self.rules.push(Box::new(rule));
    }

    pub fn rules(&self) -> impl Iterator<Item = &(dyn Rule + 'r)> + '_ {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// Run every rule over a parsed document
    pub fn lint_document(&self, document: &Document, source: &str) -> Vec<Diagnostic> {
        let source_location = SourceLocation::new(source);
        let mut runner = RuleRunner {
            rules: &self.rules,
            ctx: RuleContext::new(&source_location),
        };
        document.accept(&mut runner);
        runner.ctx.into_diagnostics()
    }

    /// Parse and lint a source string
    pub fn lint_source(&self, source: &str) -> Result<Vec<Diagnostic>, LintError> {
        let document =
            parse_source(source).map_err(|errors| LintError::Parse { path: None, errors })?;
        Ok(self.lint_document(&document, source))
    }

    /// Read, parse and lint one file
    pub fn lint_file(&self, path: impl AsRef<Path>) -> Result<FileReport, LintError> {
        let path = path.as_ref();
        let path_name = path.display().to_string();
        tracing::debug!(path = %path_name, "linting file");

        let source = fs::read_to_string(path).map_err(|e| LintError::Io {
            path: path_name.clone(),
            message: e.to_string(),
        })?;

        let diagnostics = self.lint_source(&source).map_err(|err| match err {
            LintError::Parse { errors, .. } => LintError::Parse {
                path: Some(path_name.clone()),
                errors,
            },
            other => other,
        })?;

        tracing::debug!(path = %path_name, diagnostics = diagnostics.len(), "linted file");
        Ok(FileReport::new(path_name, diagnostics))
    }
}

struct RuleRunner<'a, 'r> {
    rules: &'a [Box<dyn Rule + 'r>],
    ctx: RuleContext<'a>,
}

impl Visitor for RuleRunner<'_, '_> {
    fn visit_element(&mut self, element: &JsxElement) {
        for rule in self.rules {
            self.ctx.enter_rule(rule.name());
            rule.check_element(&element.opening, &mut self.ctx);
        }
    }
}

/// Expand `paths` into the list of files to lint
///
/// Files are kept as given. Directories are walked recursively for
/// [`SOURCE_EXTENSIONS`]; their entries are sorted so output is stable.
pub fn collect_sources(paths: &[PathBuf]) -> Result<Vec<PathBuf>, LintError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(path, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), LintError> {
    let io_error = |e: std::io::Error| LintError::Io {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    let mut entries = fs::read_dir(dir)
        .map_err(io_error)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error)?;
    entries.sort();

    for entry in entries {
        if entry.is_dir() {
            walk(&entry, files)?;
        } else if has_source_extension(&entry) {
            files.push(entry);
        }
    }
    Ok(())
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}
