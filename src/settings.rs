//! Layered configuration
//!
//! `defaults/abbrev.default.toml` is embedded into the crate so that docs and
//! runtime behavior stay in sync. Callers layer user files and overrides on
//! top via [`Loader`] before deserializing into [`AbbrevConfig`].

use crate::compiling::CompileOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/abbrev.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AbbrevConfig {
    pub compile: CompileOptions,
    pub output: OutputConfig,
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub tokens_dir: String,
}

impl SourceConfig {
    /// The configured table directory, if one is set.
    pub fn tokens_dir(&self) -> Option<PathBuf> {
        (!self.tokens_dir.is_empty()).then(|| PathBuf::from(&self.tokens_dir))
    }
}

/// File name picked up from the working directory when present.
pub const PROJECT_FILE: &str = "abbrev.toml";

/// Builds an [`AbbrevConfig`] from layers, later layers winning:
/// embedded defaults, a project file, an explicit file, then overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Layer a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a TOML file if it exists.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Layer `<dir>/abbrev.toml` if it exists.
    pub fn with_project_file(self, dir: impl AsRef<Path>) -> Self {
        self.with_optional_file(dir.as_ref().join(PROJECT_FILE))
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }

    /// Override one dotted key, e.g. `compile.advanced`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<AbbrevConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_default_config() {
        let config = Loader::new().build().expect("defaults to deserialize");
        assert_eq!(config.compile, CompileOptions::default());
        assert_eq!(config.output.format, "json");
        assert_eq!(config.source.tokens_dir(), None);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("compile.advanced", true)
            .expect("override to apply")
            .set_override("source.tokens_dir", "/srv/tokens")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.compile.advanced);
        assert!(!config.compile.include_singletons);
        assert_eq!(config.source.tokens_dir(), Some(PathBuf::from("/srv/tokens")));
    }

    #[test]
    fn layers_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abbrev.toml");
        fs::write(&path, "[output]\nformat = \"yaml\"\n").unwrap();

        let config = Loader::new().with_file(&path).build().unwrap();
        assert_eq!(config.output.format, "yaml");
        assert!(config.compile.parallel);
    }

    #[test]
    fn project_file_is_optional() {
        let empty = tempfile::tempdir().unwrap();
        let config = Loader::new().with_project_file(empty.path()).build().unwrap();
        assert_eq!(config.output.format, "json");

        fs::write(
            empty.path().join(PROJECT_FILE),
            "[compile]\ninclude_singletons = true\n",
        )
        .unwrap();
        let config = Loader::new().with_project_file(empty.path()).build().unwrap();
        assert!(config.compile.include_singletons);
    }

    #[test]
    fn explicit_file_wins_over_project_file() {
        let project = tempfile::tempdir().unwrap();
        fs::write(project.path().join(PROJECT_FILE), "[output]\nformat = \"yaml\"\n").unwrap();
        let explicit = project.path().join("ci.toml");
        fs::write(&explicit, "[output]\nformat = \"json-compact\"\n").unwrap();

        let config = Loader::new()
            .with_project_file(project.path())
            .with_file(&explicit)
            .build()
            .unwrap();
        assert_eq!(config.output.format, "json-compact");
    }

    #[test]
    fn missing_required_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Loader::new().with_file(dir.path().join("absent.toml")).build();
        assert!(result.is_err());
    }
}
