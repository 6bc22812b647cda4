//! Error types
//!
//! The analysis itself never fails. Errors come only from the surfaces around it: loading
//! configuration and reading or writing files.

use config::ConfigError;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum IndentError {
    Config(ConfigError),
    InvalidIndentUnit(usize),
    Io { path: PathBuf, source: io::Error },
    /// A dump could not be rendered in the requested format.
    Render(String),
}

impl IndentError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IndentError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for IndentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentError::Config(err) => write!(f, "Invalid configuration: {}", err),
            IndentError::InvalidIndentUnit(unit) => {
                write!(f, "Indent unit must be at least 1, got {}", unit)
            }
            IndentError::Io { path, source } => {
                write!(f, "Cannot access '{}': {}", path.display(), source)
            }
            IndentError::Render(msg) => write!(f, "Cannot render output: {}", msg),
        }
    }
}

impl std::error::Error for IndentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndentError::Config(err) => Some(err),
            IndentError::InvalidIndentUnit(_) | IndentError::Render(_) => None,
            IndentError::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for IndentError {
    fn from(err: ConfigError) -> Self {
        IndentError::Config(err)
    }
}

impl From<serde_json::Error> for IndentError {
    fn from(err: serde_json::Error) -> Self {
        IndentError::Render(err.to_string())
    }
}

impl From<serde_yaml::Error> for IndentError {
    fn from(err: serde_yaml::Error) -> Self {
        IndentError::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display() {
        assert_eq!(
            IndentError::InvalidIndentUnit(0).to_string(),
            "Indent unit must be at least 1, got 0"
        );
        let err = IndentError::io(
            "src/a.jl",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.to_string(), "Cannot access 'src/a.jl': no such file");
        assert!(err.source().is_some());
    }
}
