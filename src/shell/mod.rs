//! Line-oriented command shell.
//!
//! The shell reads one command per line, dispatches it to completion, and
//! reports the outcome before reading the next line. A failing command never
//! ends the session; only `exit`, `x`, `q`, or end of input do.

mod command;
mod help;

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::dispatch::{DispatchError, Dispatcher};
use crate::engine::{Engine, TargetSummary};

pub use command::{Command, CommandError};

/// Errors raised while executing a single command line.
#[derive(Debug, Error)]
pub enum ShellError<EngineError>
where
    EngineError: std::error::Error + 'static,
{
    /// Raised when the line cannot be parsed.
    #[error(transparent)]
    Command(#[from] CommandError),
    /// Raised when the engine rejects the operation.
    #[error(transparent)]
    Dispatch(#[from] DispatchError<EngineError>),
}

/// What the session does after a line has been executed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Flow {
    /// Keep reading, optionally printing a reply first.
    Continue(Option<String>),
    /// End the session.
    Exit,
}

/// Counters reported when a session ends.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SessionSummary {
    /// Non-blank lines executed.
    pub commands: usize,
    /// Lines that failed.
    pub failures: usize,
}

/// Interactive or scripted shell over an [`Engine`].
#[derive(Debug)]
pub struct Shell<E> {
    dispatcher: Dispatcher<E>,
    prompt: Option<String>,
}

impl<E: Engine> Shell<E> {
    /// Creates a shell without a prompt.
    #[must_use]
    pub const fn new(engine: E) -> Self {
        Self {
            dispatcher: Dispatcher::new(engine),
            prompt: None,
        }
    }

    /// Prints `prompt` before reading each line.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Returns the dispatcher driving the engine.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<E> {
        &self.dispatcher
    }

    /// Parses and executes a single line.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError`] when parsing fails or the engine rejects the
    /// operation. Parsing failures never reach the engine.
    pub fn execute(&mut self, line: &str) -> Result<Flow, ShellError<E::Error>> {
        let Some(command) = Command::parse(line)? else {
            return Ok(Flow::Continue(None));
        };
        tracing::debug!(?command, "dispatching command");

        let reply = match command {
            Command::TargetCreate(config) => {
                self.dispatcher.create(&config)?;
                None
            }
            Command::TargetDestroy(request) => {
                self.dispatcher.destroy(&request)?;
                None
            }
            Command::TargetList => render_listing(&self.dispatcher.list()?),
            Command::BdevMap(request) => {
                self.dispatcher.map(&request)?;
                None
            }
            Command::BdevUnmap(request) => {
                self.dispatcher.unmap(&request)?;
                None
            }
            Command::Help(None) => Some(help::overview()),
            Command::Help(Some(topic)) => Some(
                help::topic(&topic).unwrap_or_else(|| format!("no help on '{topic}'")),
            ),
            Command::Exit => return Ok(Flow::Exit),
        };
        Ok(Flow::Continue(reply))
    }

    /// Runs a session over `input`, writing replies to `output` and failures
    /// to `errors`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when reading input or writing output fails.
    pub fn run<R, W, V>(
        &mut self,
        input: R,
        mut output: W,
        mut errors: V,
    ) -> io::Result<SessionSummary>
    where
        R: BufRead,
        W: Write,
        V: Write,
    {
        let mut summary = SessionSummary::default();
        let mut lines = input.lines();

        loop {
            if let Some(prompt) = &self.prompt {
                write!(output, "{prompt}")?;
                output.flush()?;
            }
            let Some(next) = lines.next() else {
                break;
            };
            let line = next?;
            if line.trim().is_empty() {
                continue;
            }

            summary.commands += 1;
            match self.execute(&line) {
                Ok(Flow::Continue(Some(reply))) => writeln!(output, "{reply}")?,
                Ok(Flow::Continue(None)) => {}
                Ok(Flow::Exit) => break,
                Err(err) => {
                    summary.failures += 1;
                    tracing::warn!(error = %err, "command failed");
                    writeln!(errors, "{err}")?;
                }
            }
        }

        writeln!(output, "Bye")?;
        tracing::debug!(
            commands = summary.commands,
            failures = summary.failures,
            "session ended"
        );
        Ok(summary)
    }
}

fn render_listing(summaries: &[TargetSummary]) -> Option<String> {
    if summaries.is_empty() {
        return None;
    }
    let lines: Vec<String> = summaries
        .iter()
        .map(|summary| {
            format!(
                "name={} type={} capacity_sectors={} mappings={}",
                summary.name, summary.kind, summary.capacity_sectors, summary.mappings
            )
        })
        .collect();
    Some(lines.join("\n"))
}
