//! Parses one input line into a [`Command`].

use thiserror::Error;

use crate::error::ParseError;
use crate::request::{BdevMapRequest, BdevUnmapRequest, TargetDestroyRequest};
use crate::target::{TargetConfiguration, build_target_create};
use crate::tokenize::{ARG_DELIMITER, ArgMap, tokenize};

/// Errors raised while parsing a command line.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CommandError {
    /// Raised when the first word names no command.
    #[error("unknown command '{0}'; type 'help' to list commands")]
    UnknownCommand(String),
    /// Raised when a command's arguments are invalid.
    #[error("{command}: {source}")]
    Arguments {
        /// Command whose arguments failed.
        command: &'static str,
        /// Underlying argument failure.
        #[source]
        source: ParseError,
    },
}

/// A parsed shell command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// `target_create`
    TargetCreate(TargetConfiguration),
    /// `target_destroy`
    TargetDestroy(TargetDestroyRequest),
    /// `target_list`
    TargetList,
    /// `bdev_map`
    BdevMap(BdevMapRequest),
    /// `bdev_unmap`
    BdevUnmap(BdevUnmapRequest),
    /// `help`, optionally about one command.
    Help(Option<String>),
    /// `exit`, `x`, or `q`.
    Exit,
}

impl Command {
    /// Parses `line`, returning `None` for blank input.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when the command is unknown or its arguments
    /// are invalid.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let (name, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));

        let command = match name {
            "target_create" => {
                Self::TargetCreate(with_args("target_create", rest, build_target_create)?)
            }
            "target_destroy" => Self::TargetDestroy(with_args(
                "target_destroy",
                rest,
                TargetDestroyRequest::from_args,
            )?),
            "target_list" => Self::TargetList,
            "bdev_map" => Self::BdevMap(with_args("bdev_map", rest, BdevMapRequest::from_args)?),
            "bdev_unmap" => {
                Self::BdevUnmap(with_args("bdev_unmap", rest, BdevUnmapRequest::from_args)?)
            }
            "help" | "?" => Self::Help(rest.split_whitespace().next().map(str::to_owned)),
            "exit" | "x" | "q" => Self::Exit,
            other => return Err(CommandError::UnknownCommand(other.to_owned())),
        };
        Ok(Some(command))
    }
}

fn with_args<T>(
    command: &'static str,
    rest: &str,
    build: impl FnOnce(&ArgMap) -> Result<T, ParseError>,
) -> Result<T, CommandError> {
    build(&tokenize(rest, ARG_DELIMITER))
        .map_err(|source| CommandError::Arguments { command, source })
}
