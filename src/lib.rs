//! # aria-role-lint
//!
//! Checks that the `role` attribute of JSX elements names valid, non-abstract
//! ARIA roles.
//!
//! The crate is split into:
//!
//! - [`aria`]: the role registry (bundled ARIA 1.1 + DPUB-ARIA table)
//! - [`jsx`]: a lexer and parser for JSX markup
//! - [`lint`]: the rule interface, the `aria-role` rule, the driver and report formats
//! - [`config`]: layered configuration over embedded defaults
//!
//! ```ignore
//! use aria_role_lint::config::LintConfig;
//! use aria_role_lint::lint::Linter;
//!
//! let linter = Linter::new(&LintConfig::default());
//! let diagnostics = linter.lint_source(r#"<div role="range" />"#)?;
//! assert_eq!(diagnostics.len(), 1);
//! ```

pub mod aria;
pub mod config;
pub mod jsx;
pub mod lint;
