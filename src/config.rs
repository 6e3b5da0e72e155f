//! Configuration loading via `ortho-config`.

use std::ffi::OsString;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::engine::Journal;

/// Prompt printed before each interactive read.
pub const DEFAULT_PROMPT: &str = "ublksh > ";

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Shell settings derived from configuration files and environment
/// variables. Command-line flags are applied on top by the binary.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "UBLKSH",
    discovery(
        app_name = "ublksh",
        env_var = "UBLKSH_CONFIG_PATH",
        config_file_name = "ublksh.toml",
        dotfile_name = ".ublksh.toml",
        project_file_name = "ublksh.toml"
    )
)]
pub struct ShellConfig {
    /// Prompt shown when standard input is a terminal.
    #[ortho_config(default = DEFAULT_PROMPT.to_owned())]
    pub prompt: String,
    /// Journal file that persists the target registry between sessions.
    /// When unset, targets live only for the duration of the session.
    pub journal_path: Option<String>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[ortho_config(default = DEFAULT_LOG_FILTER.to_owned())]
    pub log_filter: String,
}

impl ShellConfig {
    /// Returns the built-in defaults without consulting any source.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_owned(),
            journal_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from("ublksh")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Replaces the journal path when `journal` is provided.
    #[must_use]
    pub fn with_journal_override(mut self, journal: Option<String>) -> Self {
        if journal.is_some() {
            self.journal_path = journal;
        }
        self
    }

    /// Returns the configured journal, if any.
    #[must_use]
    pub fn journal(&self) -> Option<Journal> {
        self.journal_path
            .as_deref()
            .map(|path| Journal::new(Utf8PathBuf::from(path.trim())))
    }

    /// Performs semantic validation on configured values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a value is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_field(&self.prompt, "prompt")?;
        Self::require_field(&self.log_filter, "log_filter")?;
        if let Some(path) = &self.journal_path {
            Self::require_field(path, "journal_path")?;
        }
        Ok(())
    }

    fn require_field(value: &str, field: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "{field} must not be blank: set UBLKSH_{} or add {field} to ublksh.toml",
                field.to_uppercase()
            )));
        }
        Ok(())
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a configuration field is blank.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
