//! Build script that renders the `ublksh(1)` man page from the clap
//! definitions so packaging can pick it up from `OUT_DIR`.

use std::env;
use std::io::{self, Write};

use camino::Utf8PathBuf;
use cap_std::{ambient_authority, fs_utf8::Dir};
use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli/mod.rs"]
mod cli;

use cli::Cli;

const MAN_PAGE: &str = "ublksh.1";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout();
    for watched in ["build.rs", "src/cli/mod.rs"] {
        writeln!(stdout, "cargo:rerun-if-changed={watched}")?;
    }

    let out_dir = env::var("OUT_DIR")
        .map(Utf8PathBuf::from)
        .map_err(|err| io::Error::new(io::ErrorKind::NotFound, format!("OUT_DIR: {err}")))?;

    let mut page = Vec::new();
    Man::new(Cli::command()).render(&mut page)?;

    Dir::open_ambient_dir(&out_dir, ambient_authority())?.write(MAN_PAGE, page)?;
    Ok(())
}
