//! Lifecycle engine abstraction.
//!
//! An [`Engine`] owns the set of live targets and block device mappings.
//! Callers hand it fully validated requests and treat it as an opaque,
//! fallible service: an operation either takes effect completely or reports
//! an error and leaves no trace.

mod journal;
mod memory;

use serde::{Deserialize, Serialize};

use crate::request::{BdevMapRequest, BdevUnmapRequest, TargetDestroyRequest};
use crate::target::{TargetConfiguration, TargetKind};

pub use journal::{Journal, JournalError};
pub use memory::{MemoryEngine, MemoryEngineError, Registry};

/// Summary of a live target as reported by [`Engine::list`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargetSummary {
    /// Target name.
    pub name: String,
    /// Target topology kind.
    pub kind: TargetKind,
    /// Exposed capacity in sectors.
    pub capacity_sectors: u64,
    /// Number of block devices currently mapped to the target.
    pub mappings: usize,
}

/// A live block device mapping.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Mapping {
    /// Name of the mapped target.
    pub target_name: String,
    /// Whether the device is read-only.
    pub read_only: bool,
}

/// Operations every lifecycle engine provides.
pub trait Engine {
    /// Engine specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Creates a target. The name must not already be in use.
    ///
    /// # Errors
    ///
    /// Returns [`Engine::Error`] when the target cannot be created.
    fn create(&mut self, config: &TargetConfiguration) -> Result<(), Self::Error>;

    /// Destroys a target that has no active mappings.
    ///
    /// # Errors
    ///
    /// Returns [`Engine::Error`] when the target is unknown or busy.
    fn destroy(&mut self, request: &TargetDestroyRequest) -> Result<(), Self::Error>;

    /// Maps a block device onto a live target.
    ///
    /// # Errors
    ///
    /// Returns [`Engine::Error`] when the target is unknown or the suffix is
    /// already mapped.
    fn map(&mut self, request: &BdevMapRequest) -> Result<(), Self::Error>;

    /// Removes a block device mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Engine::Error`] when the suffix is not mapped.
    fn unmap(&mut self, request: &BdevUnmapRequest) -> Result<(), Self::Error>;

    /// Lists live targets ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`Engine::Error`] when the engine state cannot be read.
    fn list(&self) -> Result<Vec<TargetSummary>, Self::Error>;
}
