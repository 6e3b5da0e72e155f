//! Core library for the `ublksh` block-storage administration shell.
//!
//! The crate turns compact `key=value` command arguments into typed target
//! configurations (plain, in-memory, and nested RAID topologies), validates
//! them completely, and hands them to a lifecycle [`Engine`] through a
//! [`Dispatcher`]. A line-oriented [`Shell`] ties the pieces together.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod request;
pub mod shell;
pub mod target;
pub mod test_support;
pub mod tokenize;
pub mod value;

pub use config::{ConfigError, ShellConfig};
pub use dispatch::{DispatchError, Dispatcher};
pub use engine::{Engine, Journal, JournalError, MemoryEngine, MemoryEngineError, TargetSummary};
pub use error::ParseError;
pub use request::{BdevMapRequest, BdevUnmapRequest, TargetDestroyRequest};
pub use shell::{Command, CommandError, Flow, SessionSummary, Shell, ShellError};
pub use target::{
    CacheConfig, DefaultConfig, Raid0Config, Raid1Config, Raid4Config, Raid5Config, Raid10Config,
    Raid40Config, Raid50Config, TargetConfiguration, TargetKind, TargetVariant,
    build_target_create,
};
pub use tokenize::{ArgMap, tokenize};
