//! Curated Julia samples
//!
//!     Files live in `samples/` at the crate root and are named `NNN-topic.jl`. Each one is
//!     indented exactly as the engine would indent it with a unit of 4.

use crate::julia::error::IndentError;
use std::fs;
use std::path::PathBuf;

pub struct Samples;

impl Samples {
    pub fn dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples")
    }

    pub fn path(name: &str) -> PathBuf {
        Self::dir().join(name)
    }

    /// Contents of one sample.
    pub fn get(name: &str) -> Result<String, IndentError> {
        let path = Self::path(name);
        fs::read_to_string(&path).map_err(|err| IndentError::io(path, err))
    }

    /// Contents of one sample; panics when it cannot be read.
    pub fn source(name: &str) -> String {
        Self::get(name).unwrap_or_else(|err| panic!("sample {}: {}", name, err))
    }

    /// Names of all samples, sorted.
    pub fn names() -> Result<Vec<String>, IndentError> {
        let dir = Self::dir();
        let entries = fs::read_dir(&dir).map_err(|err| IndentError::io(&dir, err))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| IndentError::io(&dir, err))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".jl") {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Every sample as `(name, contents)`.
    pub fn all() -> Result<Vec<(String, String)>, IndentError> {
        Self::names()?
            .into_iter()
            .map(|name| Self::get(&name).map(|source| (name, source)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_listed() {
        let names = Samples::names().expect("samples dir");
        assert!(names.iter().any(|name| name == "000-blocks.jl"));
    }

    #[test]
    fn test_missing_sample_is_an_io_error() {
        assert!(matches!(
            Samples::get("999-nope.jl"),
            Err(IndentError::Io { .. })
        ));
    }
}
