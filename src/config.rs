//! Configuration loader
//!
//! `defaults/aria-role-lint.default.toml` is embedded into the binary so the
//! documented defaults and runtime behavior stay in sync. Callers layer user
//! files and CLI overrides on top with [`Loader`] before deserializing into
//! [`LintConfig`].

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::lint::rules::AriaRoleOptions;

pub use ::config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/aria-role-lint.default.toml");

/// Name of the per-project configuration file picked up by the CLI
pub const PROJECT_CONFIG_FILE: &str = "aria-role-lint.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LintConfig {
    pub rules: RulesConfig,
}

/// Per-rule options, keyed by rule name with dashes as underscores
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RulesConfig {
    pub aria_role: AriaRoleOptions,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `rules.aria_role.ignore_non_dom`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<LintConfig, ConfigError> {
        let config: LintConfig = self.builder.build()?.try_deserialize()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<LintConfig, ConfigError> {
    Loader::new().build()
}
