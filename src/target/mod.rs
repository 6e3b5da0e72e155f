//! Typed configuration for virtual block-storage targets.
//!
//! A [`TargetConfiguration`] names a target, sizes it, optionally fronts it
//! with a cache, and selects exactly one [`TargetVariant`]. Composite RAID
//! variants (`raid10`, `raid40`, `raid50`) stripe across legs that are
//! themselves RAID1, RAID4, or RAID5 configurations.
//!
//! Values are produced by [`build_target_create`] from tokenized command
//! arguments; every field is validated before the configuration exists.

mod create;
mod variant;

use std::fmt;
use std::str::FromStr;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

pub use create::build_target_create;

/// Optional write-back or write-through cache placed in front of a target.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CacheConfig {
    /// Cache size in sectors; always greater than zero.
    pub len_sectors: u64,
    /// Whether writes go straight through to the backing target.
    pub write_through_enable: bool,
}

/// Plain target backed by a single file or device.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DefaultConfig {
    /// Backing file or device.
    pub path: Utf8PathBuf,
}

/// Striped target without redundancy.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Raid0Config {
    /// Strip size in sectors.
    pub strip_len_sectors: u64,
    /// Backing paths in stripe order.
    pub paths: Vec<Utf8PathBuf>,
}

/// Mirrored target.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Raid1Config {
    /// Sectors read from one mirror before moving on; `0` reads whole
    /// requests from a single mirror.
    pub read_len_sectors_per_path: u64,
    /// Mirror paths.
    pub paths: Vec<Utf8PathBuf>,
}

/// Striped target with a dedicated parity path.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Raid4Config {
    /// Strip size in sectors.
    pub strip_len_sectors: u64,
    /// Data paths in stripe order.
    pub data_paths: Vec<Utf8PathBuf>,
    /// Path holding parity strips.
    pub parity_path: Utf8PathBuf,
}

/// Striped target with distributed parity.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Raid5Config {
    /// Strip size in sectors.
    pub strip_len_sectors: u64,
    /// Member paths in stripe order.
    pub paths: Vec<Utf8PathBuf>,
}

/// Stripe across RAID1 legs.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Raid10Config {
    /// Strip size in sectors for the outer stripe.
    pub strip_len_sectors: u64,
    /// Mirrored legs in stripe order.
    pub raid1s: Vec<Raid1Config>,
}

/// Stripe across RAID4 legs.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Raid40Config {
    /// Strip size in sectors for the outer stripe.
    pub strip_len_sectors: u64,
    /// Parity legs in stripe order.
    pub raid4s: Vec<Raid4Config>,
}

/// Stripe across RAID5 legs.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Raid50Config {
    /// Strip size in sectors for the outer stripe.
    pub strip_len_sectors: u64,
    /// Parity legs in stripe order.
    pub raid5s: Vec<Raid5Config>,
}

/// Topology of a target. Exactly one shape is populated.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TargetVariant {
    /// Discards writes and reads zeroes.
    Null,
    /// Keeps data in process memory.
    InMem,
    /// Single backing path.
    Default(DefaultConfig),
    /// RAID0 stripe.
    Raid0(Raid0Config),
    /// RAID1 mirror.
    Raid1(Raid1Config),
    /// RAID4 dedicated parity.
    Raid4(Raid4Config),
    /// RAID5 distributed parity.
    Raid5(Raid5Config),
    /// RAID0 over RAID1 legs.
    Raid10(Raid10Config),
    /// RAID0 over RAID4 legs.
    Raid40(Raid40Config),
    /// RAID0 over RAID5 legs.
    Raid50(Raid50Config),
}

impl TargetVariant {
    /// Returns the kind tag for this variant.
    #[must_use]
    pub const fn kind(&self) -> TargetKind {
        match self {
            Self::Null => TargetKind::Null,
            Self::InMem => TargetKind::InMem,
            Self::Default(_) => TargetKind::Default,
            Self::Raid0(_) => TargetKind::Raid0,
            Self::Raid1(_) => TargetKind::Raid1,
            Self::Raid4(_) => TargetKind::Raid4,
            Self::Raid5(_) => TargetKind::Raid5,
            Self::Raid10(_) => TargetKind::Raid10,
            Self::Raid40(_) => TargetKind::Raid40,
            Self::Raid50(_) => TargetKind::Raid50,
        }
    }
}

/// Closed set of target kinds accepted by `type=`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TargetKind {
    /// `null`
    Null,
    /// `inmem`
    InMem,
    /// `default`
    Default,
    /// `raid0`
    Raid0,
    /// `raid1`
    Raid1,
    /// `raid4`
    Raid4,
    /// `raid5`
    Raid5,
    /// `raid10`
    Raid10,
    /// `raid40`
    Raid40,
    /// `raid50`
    Raid50,
}

impl TargetKind {
    /// Every kind, in the order shown by help output.
    pub const ALL: [Self; 10] = [
        Self::Null,
        Self::InMem,
        Self::Default,
        Self::Raid0,
        Self::Raid1,
        Self::Raid4,
        Self::Raid5,
        Self::Raid10,
        Self::Raid40,
        Self::Raid50,
    ];

    /// Returns the name used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::InMem => "inmem",
            Self::Default => "default",
            Self::Raid0 => "raid0",
            Self::Raid1 => "raid1",
            Self::Raid4 => "raid4",
            Self::Raid5 => "raid5",
            Self::Raid10 => "raid10",
            Self::Raid40 => "raid40",
            Self::Raid50 => "raid50",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "null" => Ok(Self::Null),
            "inmem" => Ok(Self::InMem),
            "default" => Ok(Self::Default),
            "raid0" => Ok(Self::Raid0),
            "raid1" => Ok(Self::Raid1),
            "raid4" => Ok(Self::Raid4),
            "raid5" => Ok(Self::Raid5),
            "raid10" => Ok(Self::Raid10),
            "raid40" => Ok(Self::Raid40),
            "raid50" => Ok(Self::Raid50),
            other => Err(ParseError::UnknownTargetType(other.to_owned())),
        }
    }
}

/// Complete, validated description of a target to create.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TargetConfiguration {
    /// Unique target name.
    pub name: String,
    /// Exposed capacity in sectors; always greater than zero.
    pub capacity_sectors: u64,
    /// Cache placed in front of the target, if any.
    pub cache: Option<CacheConfig>,
    /// Target topology.
    pub target: TargetVariant,
}
