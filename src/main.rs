//! Binary entry point for the `ublksh` shell.

use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::process;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use ublksh::{Engine, Flow, MemoryEngine, Shell, ShellConfig};

mod cli;

use cli::Cli;

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ublksh::ConfigError),
    #[error("engine error: {0}")]
    Engine(#[from] ublksh::MemoryEngineError),
    #[error("failed to open script {path}: {message}")]
    Script { path: String, message: String },
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32, CliError> {
    let config = ShellConfig::load_without_cli_args()?.with_journal_override(cli.journal);
    config.validate()?;
    init_tracing(&config.log_filter);

    let engine = match config.journal() {
        Some(journal) => MemoryEngine::with_journal(journal)?,
        None => MemoryEngine::new(),
    };
    let mut shell = Shell::new(engine);

    if !cli.command.is_empty() {
        let line = cli.command.join(" ");
        return Ok(execute_once(&mut shell, &line, io::stdout(), io::stderr())?);
    }

    if let Some(path) = cli.script {
        let script = open_script(&path)?;
        shell.run(script, io::stdout(), io::stderr())?;
        return Ok(0);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        shell = shell.with_prompt(config.prompt);
    }
    shell.run(stdin.lock(), io::stdout(), io::stderr())?;
    Ok(0)
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new(ublksh::config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Executes a single command line, returning the process exit code.
fn execute_once<E: Engine>(
    shell: &mut Shell<E>,
    line: &str,
    mut output: impl Write,
    mut errors: impl Write,
) -> io::Result<i32> {
    match shell.execute(line) {
        Ok(Flow::Continue(Some(reply))) => {
            writeln!(output, "{reply}")?;
            Ok(0)
        }
        Ok(Flow::Continue(None)) => Ok(0),
        Ok(Flow::Exit) => {
            writeln!(output, "Bye")?;
            Ok(0)
        }
        Err(err) => {
            writeln!(errors, "{err}")?;
            Ok(1)
        }
    }
}

fn open_script(path: &str) -> Result<impl BufRead, CliError> {
    let script_error = |message: String| CliError::Script {
        path: path.to_owned(),
        message,
    };
    let file_path = Utf8Path::new(path);
    let file_name = file_path
        .file_name()
        .ok_or_else(|| script_error(String::from("path has no file name")))?;
    let parent = match file_path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };

    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|err| script_error(err.to_string()))?;
    let file = dir
        .open(file_name)
        .map_err(|err| script_error(err.to_string()))?;
    Ok(BufReader::new(file))
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
