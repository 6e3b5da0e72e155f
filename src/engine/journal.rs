//! JSON journal holding a [`Registry`] between shell sessions.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use thiserror::Error;

use super::Registry;

const TMP_SUFFIX: &str = ".tmp";

/// Errors raised while reading or writing the journal.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum JournalError {
    /// Raised when file system operations fail.
    #[error("failed to access {path}: {message}")]
    Io {
        /// Path that could not be accessed.
        path: Utf8PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// Raised when the journal content is not a valid registry.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Path that could not be parsed.
        path: Utf8PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// Raised when the journal path has no file name.
    #[error("journal path {0} is missing a filename")]
    InvalidPath(Utf8PathBuf),
}

/// File-backed registry store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Journal {
    path: Utf8PathBuf,
}

impl Journal {
    /// Creates a journal at `path`; the file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the journal file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Reads the registry, returning an empty one when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`] when the file cannot be read or parsed.
    pub fn load(&self) -> Result<Registry, JournalError> {
        let (dir, file_name) = match self.open_parent() {
            Ok(opened) => opened,
            Err(JournalError::Io { .. }) if !self.parent().exists() => {
                return Ok(Registry::default());
            }
            Err(err) => return Err(err),
        };

        let contents = match dir.read_to_string(file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Registry::default()),
            Err(err) => return Err(self.io_error(&err)),
        };

        if contents.trim().is_empty() {
            return Ok(Registry::default());
        }

        serde_json::from_str(&contents).map_err(|err| JournalError::Parse {
            path: self.path.clone(),
            message: err.to_string(),
        })
    }

    /// Writes the registry, replacing the previous file in one rename.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`] when serialising or writing fails.
    pub fn store(&self, registry: &Registry) -> Result<(), JournalError> {
        let parent = self.parent();
        Dir::create_ambient_dir_all(parent, ambient_authority()).map_err(|err| {
            JournalError::Io {
                path: parent.to_path_buf(),
                message: err.to_string(),
            }
        })?;

        let (dir, file_name) = self.open_parent()?;
        let rendered = serde_json::to_string_pretty(registry).map_err(|err| JournalError::Parse {
            path: self.path.clone(),
            message: err.to_string(),
        })?;

        let staging = format!("{file_name}{TMP_SUFFIX}");
        dir.write(&staging, rendered)
            .map_err(|err| self.io_error(&err))?;
        if let Err(err) = dir.rename(&staging, &dir, file_name) {
            dir.remove_file(&staging).ok();
            return Err(self.io_error(&err));
        }
        tracing::debug!(path = %self.path, targets = registry.len(), "journal written");
        Ok(())
    }

    fn parent(&self) -> &Utf8Path {
        self.path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."))
    }

    fn open_parent(&self) -> Result<(Dir, &str), JournalError> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| JournalError::InvalidPath(self.path.clone()))?;
        let parent = self.parent();
        let dir =
            Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| JournalError::Io {
                path: parent.to_path_buf(),
                message: err.to_string(),
            })?;
        Ok((dir, file_name))
    }

    fn io_error(&self, err: &io::Error) -> JournalError {
        JournalError::Io {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}
