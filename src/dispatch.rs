//! Hands validated requests to an injected [`Engine`].
//!
//! The dispatcher holds no state of its own beyond the engine handle: every
//! call is checked by the engine against its current state, and engine
//! failures are reported as-is without attempting repair.

use thiserror::Error;

use crate::engine::{Engine, TargetSummary};
use crate::request::{BdevMapRequest, BdevUnmapRequest, TargetDestroyRequest};
use crate::target::TargetConfiguration;

/// Engine operation failures, tagged with the operation that failed.
#[derive(Debug, Error)]
pub enum DispatchError<EngineError>
where
    EngineError: std::error::Error + 'static,
{
    /// Raised when the engine rejects a create.
    #[error("failed to create target '{name}': {source}")]
    Create {
        /// Target name.
        name: String,
        /// Engine specific error.
        #[source]
        source: EngineError,
    },
    /// Raised when the engine rejects a destroy.
    #[error("failed to destroy target '{name}': {source}")]
    Destroy {
        /// Target name.
        name: String,
        /// Engine specific error.
        #[source]
        source: EngineError,
    },
    /// Raised when the engine rejects a mapping.
    #[error("failed to map block device '{bdev_suffix}' to target '{target_name}': {source}")]
    Map {
        /// Block device suffix.
        bdev_suffix: String,
        /// Target name.
        target_name: String,
        /// Engine specific error.
        #[source]
        source: EngineError,
    },
    /// Raised when the engine rejects an unmap.
    #[error("failed to unmap block device '{bdev_suffix}': {source}")]
    Unmap {
        /// Block device suffix.
        bdev_suffix: String,
        /// Engine specific error.
        #[source]
        source: EngineError,
    },
    /// Raised when the engine cannot list targets.
    #[error("failed to list targets: {0}")]
    List(#[source] EngineError),
}

/// Dispatches lifecycle operations to an engine.
#[derive(Debug)]
pub struct Dispatcher<E> {
    engine: E,
}

impl<E: Engine> Dispatcher<E> {
    /// Wraps `engine`.
    #[must_use]
    pub const fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Returns the wrapped engine.
    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Creates the target described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Create`] when the engine rejects the target.
    pub fn create(&mut self, config: &TargetConfiguration) -> Result<(), DispatchError<E::Error>> {
        match self.engine.create(config) {
            Ok(()) => {
                tracing::info!(
                    name = %config.name,
                    kind = %config.target.kind(),
                    capacity_sectors = config.capacity_sectors,
                    cached = config.cache.is_some(),
                    "target created"
                );
                Ok(())
            }
            Err(source) => {
                tracing::warn!(name = %config.name, error = %source, "target create rejected");
                Err(DispatchError::Create {
                    name: config.name.clone(),
                    source,
                })
            }
        }
    }

    /// Destroys the named target.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Destroy`] when the engine rejects the request.
    pub fn destroy(
        &mut self,
        request: &TargetDestroyRequest,
    ) -> Result<(), DispatchError<E::Error>> {
        match self.engine.destroy(request) {
            Ok(()) => {
                tracing::info!(name = %request.name, "target destroyed");
                Ok(())
            }
            Err(source) => {
                tracing::warn!(name = %request.name, error = %source, "target destroy rejected");
                Err(DispatchError::Destroy {
                    name: request.name.clone(),
                    source,
                })
            }
        }
    }

    /// Maps a block device onto a target.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Map`] when the engine rejects the request.
    pub fn map(&mut self, request: &BdevMapRequest) -> Result<(), DispatchError<E::Error>> {
        match self.engine.map(request) {
            Ok(()) => {
                tracing::info!(
                    bdev_suffix = %request.bdev_suffix,
                    target_name = %request.target_name,
                    read_only = request.read_only,
                    "block device mapped"
                );
                Ok(())
            }
            Err(source) => {
                tracing::warn!(
                    bdev_suffix = %request.bdev_suffix,
                    error = %source,
                    "block device map rejected"
                );
                Err(DispatchError::Map {
                    bdev_suffix: request.bdev_suffix.clone(),
                    target_name: request.target_name.clone(),
                    source,
                })
            }
        }
    }

    /// Removes a block device mapping.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Unmap`] when the engine rejects the request.
    pub fn unmap(&mut self, request: &BdevUnmapRequest) -> Result<(), DispatchError<E::Error>> {
        match self.engine.unmap(request) {
            Ok(()) => {
                tracing::info!(bdev_suffix = %request.bdev_suffix, "block device unmapped");
                Ok(())
            }
            Err(source) => {
                tracing::warn!(
                    bdev_suffix = %request.bdev_suffix,
                    error = %source,
                    "block device unmap rejected"
                );
                Err(DispatchError::Unmap {
                    bdev_suffix: request.bdev_suffix.clone(),
                    source,
                })
            }
        }
    }

    /// Lists live targets.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::List`] when the engine cannot report state.
    pub fn list(&self) -> Result<Vec<TargetSummary>, DispatchError<E::Error>> {
        self.engine.list().map_err(DispatchError::List)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::TargetVariant;
    use crate::test_support::{EngineCall, ScriptedEngine};

    fn null_target(name: &str) -> TargetConfiguration {
        TargetConfiguration {
            name: name.to_owned(),
            capacity_sectors: 8,
            cache: None,
            target: TargetVariant::Null,
        }
    }

    #[test]
    fn create_forwards_configuration() {
        let engine = ScriptedEngine::new();
        let mut dispatcher = Dispatcher::new(engine.clone());

        dispatcher
            .create(&null_target("t1"))
            .unwrap_or_else(|err| panic!("create: {err}"));

        assert_eq!(engine.calls(), vec![EngineCall::Create(null_target("t1"))]);
    }

    #[test]
    fn engine_failures_carry_operation_context() {
        let engine = ScriptedEngine::new();
        engine.fail_next("device busy");
        let mut dispatcher = Dispatcher::new(engine);

        let err = dispatcher
            .destroy(&TargetDestroyRequest {
                name: String::from("t1"),
            })
            .expect_err("scripted failure");

        assert!(matches!(err, DispatchError::Destroy { ref name, .. } if name == "t1"));
        assert_eq!(err.to_string(), "failed to destroy target 't1': device busy");
    }

    #[test]
    fn map_failure_names_suffix_and_target() {
        let engine = ScriptedEngine::new();
        engine.fail_next("no such target");
        let mut dispatcher = Dispatcher::new(engine);

        let err = dispatcher
            .map(&BdevMapRequest {
                bdev_suffix: String::from("0"),
                target_name: String::from("t9"),
                read_only: true,
            })
            .expect_err("scripted failure");

        assert_eq!(
            err.to_string(),
            "failed to map block device '0' to target 't9': no such target"
        );
    }
}
