//! Command-line interface definitions for the `ublksh` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::Parser;

/// Top-level CLI for the `ublksh` binary.
#[derive(Debug, Parser)]
#[command(
    name = "ublksh",
    about = "Compose virtual block-storage targets and map them to block devices",
    after_help = "Without a COMMAND, commands are read one per line from standard input \
                  (or --script). Type 'help' inside the shell to list commands."
)]
pub(crate) struct Cli {
    /// Read commands from a file instead of standard input.
    #[arg(long, value_name = "PATH", conflicts_with = "command")]
    pub(crate) script: Option<String>,
    /// Persist the target registry to this journal file, overriding the
    /// configured `journal_path`.
    #[arg(long, value_name = "PATH")]
    pub(crate) journal: Option<String>,
    /// Run a single shell command and exit (for example
    /// `target_create name=t1 capacity_sectors=8 type=null`).
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub(crate) command: Vec<String>,
}
