//! Configuration loader for jlindent.
//!
//! `defaults/jlindent.default.toml` is embedded into the crate so that the documented
//! defaults and runtime behavior stay in sync. Callers layer user files and single-key
//! overrides on top of those defaults via [`Loader`] before deserializing into
//! [`JlindentConfig`].

use crate::julia::error::IndentError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/jlindent.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JlindentConfig {
    pub indent: IndentSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndentSettings {
    /// Columns per nesting level.
    pub unit: usize,
}

impl JlindentConfig {
    pub fn indent_unit(&self) -> usize {
        self.indent.unit
    }
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

    /// Apply a single key/value override, such as `--indent-unit` from the command line.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and validate.
    pub fn build(self) -> Result<JlindentConfig, IndentError> {
        let config: JlindentConfig = self.builder.build()?.try_deserialize()?;
        if config.indent.unit == 0 {
            return Err(IndentError::InvalidIndentUnit(config.indent.unit));
        }
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<JlindentConfig, IndentError> {
    Loader::new().build()
}
