//! BDD step definitions for shell sessions.

use rstest_bdd_macros::{given, then, when};

use super::test_helpers::{SessionOutcome, ShellContext, run_lines};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
}

fn outcome(shell_context: &ShellContext) -> Result<&SessionOutcome, StepError> {
    shell_context
        .outcome
        .as_ref()
        .ok_or_else(|| StepError::Assertion(String::from("the session has not run")))
}

#[given("a shell session")]
fn shell_session(shell_context: ShellContext) -> ShellContext {
    shell_context
}

#[given("the line \"{line}\"")]
fn the_line(mut shell_context: ShellContext, line: String) -> ShellContext {
    shell_context.lines.push(line);
    shell_context
}

#[when("the session runs")]
fn session_runs(mut shell_context: ShellContext) -> Result<ShellContext, StepError> {
    let result = run_lines(&shell_context.lines).map_err(StepError::Assertion)?;
    shell_context.outcome = Some(result);
    Ok(shell_context)
}

#[then("the session reports {failures} failures")]
fn session_failures(shell_context: &ShellContext, failures: usize) -> Result<(), StepError> {
    let actual = outcome(shell_context)?.summary.failures;
    if actual == failures {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {failures} failures, got {actual}"
        )))
    }
}

#[then("the output contains \"{text}\"")]
fn output_contains(shell_context: &ShellContext, text: String) -> Result<(), StepError> {
    let output = &outcome(shell_context)?.output;
    if output.contains(&text) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "output should contain {text:?}: {output:?}"
        )))
    }
}

#[then("the output ends with \"{text}\"")]
fn output_ends_with(shell_context: &ShellContext, text: String) -> Result<(), StepError> {
    let output = &outcome(shell_context)?.output;
    if output.trim_end().ends_with(&text) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "output should end with {text:?}: {output:?}"
        )))
    }
}

#[then("the errors contain \"{text}\"")]
fn errors_contain(shell_context: &ShellContext, text: String) -> Result<(), StepError> {
    let errors = &outcome(shell_context)?.errors;
    if errors.contains(&text) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "errors should contain {text:?}: {errors:?}"
        )))
    }
}

#[then("the engine holds no targets")]
fn engine_holds_no_targets(shell_context: &ShellContext) -> Result<(), StepError> {
    let remaining = outcome(shell_context)?.remaining_targets;
    if remaining == 0 {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected no targets, found {remaining}"
        )))
    }
}
