//! Argument parsing and validation errors.
//!
//! Every failure is detected before an engine is contacted, so these errors
//! only ever abort the command being parsed.

use thiserror::Error;

/// Errors raised while turning command arguments into typed requests.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// Raised when a required field is absent or empty.
    #[error("no '{0}' given in the arguments")]
    MissingArgument(String),
    /// Raised when a field cannot be converted to the expected number.
    #[error("'{field}' given as '{value}' is not a valid value")]
    InvalidNumericValue {
        /// Name of the offending field.
        field: String,
        /// Raw value supplied by the user.
        value: String,
    },
    /// Raised when `type` names no known target kind.
    #[error("unknown target type '{0}'")]
    UnknownTargetType(String),
    /// Raised when a path is used twice where distinct devices are required.
    #[error("'{field}' reuses path '{path}'")]
    DuplicatePath {
        /// Field holding the repeated path.
        field: String,
        /// Path given more than once.
        path: String,
    },
    /// Raised when one leg of a composite topology fails to parse.
    #[error("{field} leg #{position}: {source}")]
    NestedParseFailure {
        /// Field holding the leg list (for example `raid1s`).
        field: String,
        /// Zero-based index of the failing leg.
        position: usize,
        /// Failure reported by the leg builder.
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingArgument(field.to_owned())
    }

    pub(crate) fn invalid(field: &str, value: &str) -> Self {
        Self::InvalidNumericValue {
            field: field.to_owned(),
            value: value.to_owned(),
        }
    }

    /// Returns the innermost failure, unwrapping nested leg errors.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::NestedParseFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
