//! In-process reference engine.
//!
//! [`MemoryEngine`] keeps the registry of targets and mappings, enforces the
//! lifecycle pre-conditions, and optionally mirrors the registry into a
//! [`Journal`] so consecutive shell sessions observe the same state. It does
//! not perform block I/O.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::request::{BdevMapRequest, BdevUnmapRequest, TargetDestroyRequest};
use crate::target::TargetConfiguration;

use super::{Engine, Journal, JournalError, Mapping, TargetSummary};

/// Errors raised by [`MemoryEngine`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum MemoryEngineError {
    /// Raised when creating a target whose name is taken.
    #[error("target '{0}' already exists")]
    TargetExists(String),
    /// Raised when addressing a target that does not exist.
    #[error("target '{0}' does not exist")]
    TargetNotFound(String),
    /// Raised when destroying a target that still has mappings.
    #[error("target '{name}' has {mappings} active mapping(s)")]
    TargetBusy {
        /// Target name.
        name: String,
        /// Number of mappings referencing the target.
        mappings: usize,
    },
    /// Raised when mapping a suffix that is already in use.
    #[error("block device suffix '{0}' is already mapped")]
    BdevAlreadyMapped(String),
    /// Raised when unmapping a suffix that is not mapped.
    #[error("block device suffix '{0}' is not mapped")]
    BdevNotMapped(String),
    /// Raised when the journal cannot be read or written.
    #[error("journal error: {0}")]
    Journal(#[from] JournalError),
}

/// Live targets and mappings, keyed by target name and device suffix.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Registry {
    targets: BTreeMap<String, TargetConfiguration>,
    mappings: BTreeMap<String, Mapping>,
}

impl Registry {
    /// Returns the number of live targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` when no target is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Looks up a live target by name.
    #[must_use]
    pub fn target(&self, name: &str) -> Option<&TargetConfiguration> {
        self.targets.get(name)
    }

    /// Looks up a mapping by device suffix.
    #[must_use]
    pub fn mapping(&self, bdev_suffix: &str) -> Option<&Mapping> {
        self.mappings.get(bdev_suffix)
    }

    fn mappings_of(&self, name: &str) -> usize {
        self.mappings
            .values()
            .filter(|mapping| mapping.target_name == name)
            .count()
    }

    fn create(&mut self, config: &TargetConfiguration) -> Result<(), MemoryEngineError> {
        if self.targets.contains_key(&config.name) {
            return Err(MemoryEngineError::TargetExists(config.name.clone()));
        }
        self.targets.insert(config.name.clone(), config.clone());
        Ok(())
    }

    fn destroy(&mut self, request: &TargetDestroyRequest) -> Result<(), MemoryEngineError> {
        if !self.targets.contains_key(&request.name) {
            return Err(MemoryEngineError::TargetNotFound(request.name.clone()));
        }
        let mappings = self.mappings_of(&request.name);
        if mappings > 0 {
            return Err(MemoryEngineError::TargetBusy {
                name: request.name.clone(),
                mappings,
            });
        }
        self.targets.remove(&request.name);
        Ok(())
    }

    fn map(&mut self, request: &BdevMapRequest) -> Result<(), MemoryEngineError> {
        if !self.targets.contains_key(&request.target_name) {
            return Err(MemoryEngineError::TargetNotFound(
                request.target_name.clone(),
            ));
        }
        if self.mappings.contains_key(&request.bdev_suffix) {
            return Err(MemoryEngineError::BdevAlreadyMapped(
                request.bdev_suffix.clone(),
            ));
        }
        self.mappings.insert(
            request.bdev_suffix.clone(),
            Mapping {
                target_name: request.target_name.clone(),
                read_only: request.read_only,
            },
        );
        Ok(())
    }

    fn unmap(&mut self, request: &BdevUnmapRequest) -> Result<(), MemoryEngineError> {
        self.mappings
            .remove(&request.bdev_suffix)
            .map(drop)
            .ok_or_else(|| MemoryEngineError::BdevNotMapped(request.bdev_suffix.clone()))
    }

    fn summaries(&self) -> Vec<TargetSummary> {
        self.targets
            .values()
            .map(|config| TargetSummary {
                name: config.name.clone(),
                kind: config.target.kind(),
                capacity_sectors: config.capacity_sectors,
                mappings: self.mappings_of(&config.name),
            })
            .collect()
    }
}

/// Registry-backed engine with optional journal persistence.
#[derive(Clone, Debug, Default)]
pub struct MemoryEngine {
    registry: Registry,
    journal: Option<Journal>,
}

impl MemoryEngine {
    /// Creates an engine with an empty registry and no journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine whose registry is loaded from, and written back to,
    /// `journal`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryEngineError::Journal`] when an existing journal cannot
    /// be read.
    pub fn with_journal(journal: Journal) -> Result<Self, MemoryEngineError> {
        let registry = journal.load()?;
        tracing::debug!(path = %journal.path(), targets = registry.len(), "journal loaded");
        Ok(Self {
            registry,
            journal: Some(journal),
        })
    }

    /// Returns the current registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Applies `change` to a copy of the registry and commits it only after
    /// the journal, if any, accepted the new state.
    fn commit<F>(&mut self, change: F) -> Result<(), MemoryEngineError>
    where
        F: FnOnce(&mut Registry) -> Result<(), MemoryEngineError>,
    {
        let mut next = self.registry.clone();
        change(&mut next)?;
        if let Some(journal) = &self.journal {
            journal.store(&next)?;
        }
        self.registry = next;
        Ok(())
    }
}

impl Engine for MemoryEngine {
    type Error = MemoryEngineError;

    fn create(&mut self, config: &TargetConfiguration) -> Result<(), Self::Error> {
        self.commit(|registry| registry.create(config))
    }

    fn destroy(&mut self, request: &TargetDestroyRequest) -> Result<(), Self::Error> {
        self.commit(|registry| registry.destroy(request))
    }

    fn map(&mut self, request: &BdevMapRequest) -> Result<(), Self::Error> {
        self.commit(|registry| registry.map(request))
    }

    fn unmap(&mut self, request: &BdevUnmapRequest) -> Result<(), Self::Error> {
        self.commit(|registry| registry.unmap(request))
    }

    fn list(&self) -> Result<Vec<TargetSummary>, Self::Error> {
        Ok(self.registry.summaries())
    }
}
