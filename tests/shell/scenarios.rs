//! BDD scenarios for shell sessions.

use rstest_bdd_macros::scenario;

use super::test_helpers::{ShellContext, shell_context};

#[scenario(
    path = "tests/features/shell.feature",
    name = "Compose a nested RAID target and map it"
)]
fn scenario_nested_raid_lifecycle(shell_context: ShellContext) {
    let _ = shell_context;
}

#[scenario(
    path = "tests/features/shell.feature",
    name = "Invalid arguments are reported without ending the session"
)]
fn scenario_invalid_arguments(shell_context: ShellContext) {
    let _ = shell_context;
}

#[scenario(
    path = "tests/features/shell.feature",
    name = "A nested leg failure names the leg"
)]
fn scenario_nested_leg_failure(shell_context: ShellContext) {
    let _ = shell_context;
}

#[scenario(
    path = "tests/features/shell.feature",
    name = "A mapped target cannot be destroyed"
)]
fn scenario_mapped_target_is_busy(shell_context: ShellContext) {
    let _ = shell_context;
}

#[scenario(
    path = "tests/features/shell.feature",
    name = "Unknown commands are reported"
)]
fn scenario_unknown_command(shell_context: ShellContext) {
    let _ = shell_context;
}
