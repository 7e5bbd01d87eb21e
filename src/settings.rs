//! Configuration loading.
//!
//! Settings come from up to four layers, later ones winning:
//!
//! 1. `defaults/simcsv.default.toml`, embedded into the crate.
//! 2. A project file, `simcsv.toml` in the working directory, when one exists.
//! 3. A file named explicitly (`--config`), which must exist.
//! 4. Single keys set from command-line flags.
//!
//! [`Loader::build`] also rejects reader options the scanner could not tell apart.

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::csv::ReaderOptions;
use crate::error::SimCsvError;
use crate::output::OutputFormat;

const DEFAULT_TOML: &str = include_str!("../defaults/simcsv.default.toml");

/// File name looked up by [`Loader::with_project_file`].
pub const PROJECT_FILE: &str = "simcsv.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SimCsvConfig {
    pub reader: ReaderOptions,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
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

    /// Layer `simcsv.toml` from `dir`, skipped when the directory has none.
    pub fn with_project_file(mut self, dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(PROJECT_FILE);
        tracing::debug!(path = %path.display(), exists = path.is_file(), "project configuration");
        let source = File::from(path.as_path())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `("reader.trim", true)` from a CLI flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, SimCsvError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and check the reader options.
    pub fn build(self) -> Result<SimCsvConfig, SimCsvError> {
        let config: SimCsvConfig = self.builder.build()?.try_deserialize()?;
        config.reader.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
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
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = Loader::default().build().expect("defaults to deserialize");
        assert_eq!(config.reader, ReaderOptions::default());
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("reader.comment_char", "%")
            .expect("override to apply")
            .set_override("reader.trim", true)
            .expect("override to apply")
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.reader.comment_char, '%');
        assert!(config.reader.trim);
        assert_eq!(config.output.format, OutputFormat::Yaml);
    }

    #[test]
    fn layers_user_file_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[reader]\ndelimiter = \";\"").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.reader.delimiter, ';');
        assert_eq!(config.reader.comment_char, '#');
    }

    #[test]
    fn project_file_may_be_missing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Loader::new()
            .with_project_file(dir.path())
            .build()
            .expect("config to build");
        assert!(config.reader.skip_empty);
    }

    #[test]
    fn explicit_file_wins_over_project_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join(PROJECT_FILE),
            "[reader]\ncomment_char = \"%\"\ntrim = true\n",
        )
        .expect("write project config");
        let explicit = dir.path().join("explicit.toml");
        std::fs::write(&explicit, "[reader]\ncomment_char = \"!\"\n").expect("write config");

        let config = Loader::new()
            .with_project_file(dir.path())
            .with_file(&explicit)
            .build()
            .expect("config to build");
        assert_eq!(config.reader.comment_char, '!');
        assert!(config.reader.trim);
    }

    #[test]
    fn required_file_must_exist() {
        let result = Loader::new()
            .with_file("/definitely/not/here/simcsv.toml")
            .build();
        assert!(matches!(result, Err(SimCsvError::Config(_))));
    }

    #[test]
    fn rejects_conflicting_reader_options() {
        let result = Loader::new()
            .set_override("reader.delimiter", "#")
            .expect("override to apply")
            .build();
        assert!(matches!(result, Err(SimCsvError::InvalidOption(_))));
    }
}
