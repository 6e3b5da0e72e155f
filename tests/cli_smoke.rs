//! Behavioural smoke test for the CLI entrypoint.

use assert_cmd::cargo::cargo_bin_cmd;

#[test]
fn cli_says_bye_at_end_of_input() {
    let mut cmd = cargo_bin_cmd!("ublksh");
    cmd.write_stdin("");
    cmd.assert().success().stdout("Bye\n").stderr("");
}

#[test]
fn cli_stops_reading_at_exit() {
    let mut cmd = cargo_bin_cmd!("ublksh");
    cmd.write_stdin("x\ntarget_resize\n");
    cmd.assert().success().stdout("Bye\n").stderr("");
}
