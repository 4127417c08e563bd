//! Itinerary settings
//!
//! Two things vary between runs: which header names in the airport lookup
//! hold the codes and the display text, and whether blank-line runs are
//! collapsed. Both start from `defaults/itinerary.default.toml`, compiled in,
//! and can be changed by a user TOML file or command-line flags through
//! [`Loader`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/itinerary.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItineraryConfig {
    pub table: TableConfig,
    pub output: OutputConfig,
}

/// Where to find things in the airport code table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableConfig {
    pub three_letter_column: String,
    pub four_letter_column: String,
    pub name_column: String,
    pub delimiter: char,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            three_letter_column: "iata_code".to_string(),
            four_letter_column: "icao_code".to_string(),
            name_column: "name".to_string(),
            delimiter: ',',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    pub collapse_blank_lines: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            collapse_blank_lines: true,
        }
    }
}

/// Builds an [`ItineraryConfig`] from the embedded defaults, an optional
/// user file and per-run flags, in that order of precedence (later wins).
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a user TOML file, e.g. one naming the columns of a differently
    /// shaped airport lookup. The file must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.add_source(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(true),
        );
        self
    }

    /// Like [`Loader::with_file`], but an absent file is skipped.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.add_source(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(false),
        );
        self
    }

    /// Override one dotted key such as `table.delimiter`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Take airport display text from another lookup column (e.g. `municipality`).
    pub fn name_column(self, column: &str) -> Result<Self, ConfigError> {
        self.set_override("table.name_column", column)
    }

    /// Emit every blank input line instead of collapsing runs of them.
    pub fn keep_blank_lines(self) -> Result<Self, ConfigError> {
        self.set_override("output.collapse_blank_lines", false)
    }

    pub fn build(self) -> Result<ItineraryConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone: `iata_code` / `icao_code` / `name` columns,
/// comma-delimited, blank runs collapsed.
pub fn load_defaults() -> Result<ItineraryConfig, ConfigError> {
    Loader::new().build()
}
