//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the
//! clap builder API, one submodule per command group.

use clap::Command;

pub mod auth;
pub mod environment;
pub mod export;
pub mod get;
pub mod params;

pub use params::{
    COMMAND_ADD, COMMAND_API, COMMAND_ENV, COMMAND_ENVS, COMMAND_EXPORT, COMMAND_GET,
    COMMAND_LOGIN, COMMAND_LOGOUT, COMMAND_POLICIES, COMMAND_POLICY, COMMAND_REMOVE,
    PARAMETER_INSECURE, PARAMETER_VERBOSE,
};

/// Create the command-line interface.
///
/// The returned command is not parsed yet; the binary calls
/// `try_get_matches` on it and tests use `try_get_matches_from`.
pub fn create_cli_commands() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(params::verbose_parameter())
        .arg(params::insecure_parameter())
        .subcommand(export::export_command())
        .subcommand(get::get_command())
        .subcommand(environment::add_command())
        .subcommand(environment::remove_command())
        .subcommand(auth::login_command())
        .subcommand(auth::logout_command())
}
