//! Requests that address live targets and mappings by name.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::tokenize::ArgMap;
use crate::value::{optional_bool, require_non_empty};

/// Request to destroy a live target.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TargetDestroyRequest {
    /// Name of the target to destroy.
    pub name: String,
}

impl TargetDestroyRequest {
    /// Builds the request from `target_destroy` arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingArgument`] when `name` is absent.
    pub fn from_args(args: &ArgMap) -> Result<Self, ParseError> {
        Ok(Self {
            name: require_non_empty(args, "name")?.to_owned(),
        })
    }
}

/// Request to expose a target as a block device.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BdevMapRequest {
    /// Suffix of the block device node to create.
    pub bdev_suffix: String,
    /// Name of the live target to expose.
    pub target_name: String,
    /// Whether the device is exposed read-only.
    pub read_only: bool,
}

impl BdevMapRequest {
    /// Builds the request from `bdev_map` arguments; `read_only` defaults to
    /// false.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when a required field is absent or `read_only`
    /// is not an integer.
    pub fn from_args(args: &ArgMap) -> Result<Self, ParseError> {
        Ok(Self {
            bdev_suffix: require_non_empty(args, "bdev_suffix")?.to_owned(),
            target_name: require_non_empty(args, "target_name")?.to_owned(),
            read_only: optional_bool(args, "read_only", false)?,
        })
    }
}

/// Request to remove a block device mapping.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BdevUnmapRequest {
    /// Suffix of the mapped block device node.
    pub bdev_suffix: String,
}

impl BdevUnmapRequest {
    /// Builds the request from `bdev_unmap` arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingArgument`] when `bdev_suffix` is absent.
    pub fn from_args(args: &ArgMap) -> Result<Self, ParseError> {
        Ok(Self {
            bdev_suffix: require_non_empty(args, "bdev_suffix")?.to_owned(),
        })
    }
}
