//! Assembles a [`TargetConfiguration`] from `target_create` arguments.

use crate::error::ParseError;
use crate::tokenize::ArgMap;
use crate::value::{optional_bool, optional_sectors, require, require_non_empty, require_positive_sectors};

use super::{CacheConfig, TargetConfiguration, TargetKind, TargetVariant};

/// Builds a complete target configuration.
///
/// Fields are checked in order: `name`, `capacity_sectors`, the optional
/// cache fields, `type`, then the kind-specific fields. A cache is attached
/// only when `cache_len_sectors` is greater than zero; write-through defaults
/// to enabled.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered. No partial configuration is
/// ever produced.
pub fn build_target_create(args: &ArgMap) -> Result<TargetConfiguration, ParseError> {
    let name = require_non_empty(args, "name")?.to_owned();
    let capacity_sectors = require_positive_sectors(args, "capacity_sectors")?;
    let cache = cache_from_args(args)?;
    let kind: TargetKind = require(args, "type")?.parse()?;
    let target = TargetVariant::from_args(kind, args)?;

    Ok(TargetConfiguration {
        name,
        capacity_sectors,
        cache,
        target,
    })
}

fn cache_from_args(args: &ArgMap) -> Result<Option<CacheConfig>, ParseError> {
    let len_sectors = optional_sectors(args, "cache_len_sectors", 0)?;
    let write_through_enable = optional_bool(args, "cache_write_through_enable", true)?;
    Ok((len_sectors > 0).then_some(CacheConfig {
        len_sectors,
        write_through_enable,
    }))
}
