//! Test support utilities shared across unit and integration tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use thiserror::Error;

use crate::engine::{Engine, TargetSummary};
use crate::request::{BdevMapRequest, BdevUnmapRequest, TargetDestroyRequest};
use crate::target::TargetConfiguration;

/// Records a single call made through [`ScriptedEngine`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineCall {
    /// `create` with the configuration received.
    Create(TargetConfiguration),
    /// `destroy` with the request received.
    Destroy(TargetDestroyRequest),
    /// `map` with the request received.
    Map(BdevMapRequest),
    /// `unmap` with the request received.
    Unmap(BdevUnmapRequest),
    /// `list`.
    List,
}

/// Failure returned by [`ScriptedEngine`] when a failure was queued.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("{0}")]
pub struct ScriptedEngineError(pub String);

/// Scripted engine that records calls and returns queued failures in FIFO
/// order. Clones share state so tests can inspect calls after handing the
/// engine to a dispatcher.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEngine {
    state: Rc<RefCell<State>>,
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<EngineCall>,
    failures: VecDeque<String>,
    listing: Vec<TargetSummary>,
}

impl ScriptedEngine {
    /// Creates an engine that accepts every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next call fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.state.borrow_mut().failures.push_back(message.into());
    }

    /// Adds a summary returned by `list`.
    pub fn push_listing(&self, summary: TargetSummary) {
        self.state.borrow_mut().listing.push(summary);
    }

    /// Returns a snapshot of all calls recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.borrow().calls.clone()
    }

    fn record(&self, call: EngineCall) -> Result<(), ScriptedEngineError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        state
            .failures
            .pop_front()
            .map_or(Ok(()), |message| Err(ScriptedEngineError(message)))
    }
}

impl Engine for ScriptedEngine {
    type Error = ScriptedEngineError;

    fn create(&mut self, config: &TargetConfiguration) -> Result<(), Self::Error> {
        self.record(EngineCall::Create(config.clone()))
    }

    fn destroy(&mut self, request: &TargetDestroyRequest) -> Result<(), Self::Error> {
        self.record(EngineCall::Destroy(request.clone()))
    }

    fn map(&mut self, request: &BdevMapRequest) -> Result<(), Self::Error> {
        self.record(EngineCall::Map(request.clone()))
    }

    fn unmap(&mut self, request: &BdevUnmapRequest) -> Result<(), Self::Error> {
        self.record(EngineCall::Unmap(request.clone()))
    }

    fn list(&self) -> Result<Vec<TargetSummary>, Self::Error> {
        self.record(EngineCall::List)?;
        Ok(self.state.borrow().listing.clone())
    }
}
