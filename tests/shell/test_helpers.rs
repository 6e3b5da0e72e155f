//! Shared fixtures for shell BDD scenarios.

use rstest::fixture;
use ublksh::{MemoryEngine, SessionSummary, Shell};

#[derive(Clone, Debug, Default)]
pub struct SessionOutcome {
    pub summary: SessionSummary,
    pub output: String,
    pub errors: String,
    pub remaining_targets: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ShellContext {
    pub lines: Vec<String>,
    pub outcome: Option<SessionOutcome>,
}

#[fixture]
pub fn shell_context() -> ShellContext {
    ShellContext::default()
}

/// Runs `lines` as one session against a fresh in-memory engine.
pub fn run_lines(lines: &[String]) -> Result<SessionOutcome, String> {
    let mut shell = Shell::new(MemoryEngine::new());
    let script = lines.join("\n");
    let mut output = Vec::new();
    let mut errors = Vec::new();

    let summary = shell
        .run(script.as_bytes(), &mut output, &mut errors)
        .map_err(|err| format!("session io: {err}"))?;
    let remaining_targets = shell.dispatcher().engine().registry().len();

    Ok(SessionOutcome {
        summary,
        output: String::from_utf8(output).map_err(|err| err.to_string())?,
        errors: String::from_utf8(errors).map_err(|err| err.to_string())?,
        remaining_targets,
    })
}
