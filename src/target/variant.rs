//! Builders for each target kind.
//!
//! Composite kinds carry a leg list using nested delimiters: legs are split
//! on `:`, quotes are stripped from each leg, and the leg's own fields are
//! split on `;`.

use camino::Utf8PathBuf;

use crate::error::ParseError;
use crate::tokenize::{ArgMap, FIELD_DELIMITER, GROUP_DELIMITER, tokenize};
use crate::value::{optional_sectors, require_non_empty, require_paths, require_positive_sectors};

use super::{
    DefaultConfig, Raid0Config, Raid1Config, Raid4Config, Raid5Config, Raid10Config, Raid40Config,
    Raid50Config, TargetKind, TargetVariant,
};

const STRIP_LEN_SECTORS: &str = "strip_len_sectors";

impl TargetVariant {
    /// Builds the variant selected by `kind` from the fields in `args`.
    ///
    /// Fields that belong to other kinds are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] raised by the kind's builder.
    pub fn from_args(kind: TargetKind, args: &ArgMap) -> Result<Self, ParseError> {
        let variant = match kind {
            TargetKind::Null => Self::Null,
            TargetKind::InMem => Self::InMem,
            TargetKind::Default => Self::Default(DefaultConfig::from_args(args)?),
            TargetKind::Raid0 => Self::Raid0(Raid0Config::from_args(args)?),
            TargetKind::Raid1 => Self::Raid1(Raid1Config::from_args(args)?),
            TargetKind::Raid4 => Self::Raid4(Raid4Config::from_args(args)?),
            TargetKind::Raid5 => Self::Raid5(Raid5Config::from_args(args)?),
            TargetKind::Raid10 => Self::Raid10(Raid10Config::from_args(args)?),
            TargetKind::Raid40 => Self::Raid40(Raid40Config::from_args(args)?),
            TargetKind::Raid50 => Self::Raid50(Raid50Config::from_args(args)?),
        };
        Ok(variant)
    }
}

impl DefaultConfig {
    /// Requires `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingArgument`] when `path` is absent or empty.
    pub fn from_args(args: &ArgMap) -> Result<Self, ParseError> {
        Ok(Self {
            path: Utf8PathBuf::from(require_non_empty(args, "path")?),
        })
    }
}

impl Raid0Config {
    /// Requires `strip_len_sectors` and `paths`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when either field is missing or invalid.
    pub fn from_args(args: &ArgMap) -> Result<Self, ParseError> {
        Ok(Self {
            strip_len_sectors: require_positive_sectors(args, STRIP_LEN_SECTORS)?,
            paths: path_list(args, "paths")?,
        })
    }
}

impl Raid1Config {
    /// Requires `paths`; `read_len_sectors_per_path` defaults to `0`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when `paths` is missing or the read length is
    /// not a number.
    pub fn from_args(args: &ArgMap) -> Result<Self, ParseError> {
        Ok(Self {
            read_len_sectors_per_path: optional_sectors(args, "read_len_sectors_per_path", 0)?,
            paths: path_list(args, "paths")?,
        })
    }
}

impl Raid4Config {
    /// Requires `strip_len_sectors`, `data_paths`, and a `parity_path` that
    /// is not also a data path.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when any field is missing or invalid, and
    /// [`ParseError::DuplicatePath`] when the parity path is among the data
    /// paths.
    pub fn from_args(args: &ArgMap) -> Result<Self, ParseError> {
        let strip_len_sectors = require_positive_sectors(args, STRIP_LEN_SECTORS)?;
        let data_paths = path_list(args, "data_paths")?;
        let parity_path = Utf8PathBuf::from(require_non_empty(args, "parity_path")?);
        if data_paths.contains(&parity_path) {
            return Err(ParseError::DuplicatePath {
                field: String::from("parity_path"),
                path: parity_path.into_string(),
            });
        }
        Ok(Self {
            strip_len_sectors,
            data_paths,
            parity_path,
        })
    }
}

impl Raid5Config {
    /// Requires `strip_len_sectors` and `paths`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when either field is missing or invalid.
    pub fn from_args(args: &ArgMap) -> Result<Self, ParseError> {
        Ok(Self {
            strip_len_sectors: require_positive_sectors(args, STRIP_LEN_SECTORS)?,
            paths: path_list(args, "paths")?,
        })
    }
}

impl Raid10Config {
    /// Requires `strip_len_sectors` and a `raid1s` leg list.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NestedParseFailure`] when a leg is invalid.
    pub fn from_args(args: &ArgMap) -> Result<Self, ParseError> {
        Ok(Self {
            strip_len_sectors: require_positive_sectors(args, STRIP_LEN_SECTORS)?,
            raid1s: legs(args, "raid1s", Raid1Config::from_args)?,
        })
    }
}

impl Raid40Config {
    /// Requires `strip_len_sectors` and a `raid4s` leg list.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NestedParseFailure`] when a leg is invalid.
    pub fn from_args(args: &ArgMap) -> Result<Self, ParseError> {
        Ok(Self {
            strip_len_sectors: require_positive_sectors(args, STRIP_LEN_SECTORS)?,
            raid4s: legs(args, "raid4s", Raid4Config::from_args)?,
        })
    }
}

impl Raid50Config {
    /// Requires `strip_len_sectors` and a `raid5s` leg list.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NestedParseFailure`] when a leg is invalid.
    pub fn from_args(args: &ArgMap) -> Result<Self, ParseError> {
        Ok(Self {
            strip_len_sectors: require_positive_sectors(args, STRIP_LEN_SECTORS)?,
            raid5s: legs(args, "raid5s", Raid5Config::from_args)?,
        })
    }
}

fn path_list(args: &ArgMap, field: &str) -> Result<Vec<Utf8PathBuf>, ParseError> {
    Ok(require_paths(args, field)?
        .into_iter()
        .map(Utf8PathBuf::from)
        .collect())
}

fn legs<T>(
    args: &ArgMap,
    field: &str,
    build: fn(&ArgMap) -> Result<T, ParseError>,
) -> Result<Vec<T>, ParseError> {
    require_non_empty(args, field)?
        .split(GROUP_DELIMITER)
        .enumerate()
        .map(|(position, group)| {
            let fields = tokenize(&strip_quotes(group), FIELD_DELIMITER);
            build(&fields).map_err(|source| ParseError::NestedParseFailure {
                field: field.to_owned(),
                position,
                source: Box::new(source),
            })
        })
        .collect()
}

fn strip_quotes(group: &str) -> String {
    group.chars().filter(|ch| !matches!(ch, '"' | '\'')).collect()
}
