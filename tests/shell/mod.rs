//! Step definitions, fixtures, and scenarios for shell sessions.

mod bdd_steps;
mod scenarios;
mod test_helpers;
