//! Command implementations.
//!
//! Every action receives the execution context, the options parsed from
//! its arguments and the writer that stands in for standard output.

pub mod auth;
pub mod environments;
pub mod policies;

/// How a command that reached the server ended.
///
/// Error responses are reported to the user by the command itself, so they
/// are not `CliError`s; the binary still exits with a failure code for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Completed,
    ApiFailure,
}
