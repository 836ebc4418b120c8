//! `get` command definitions.

use crate::commands::params::{
    all_parameter, environment_parameter, format_parameter, limit_parameter, COMMAND_API,
    COMMAND_ENVS, COMMAND_GET, COMMAND_POLICIES,
};
use clap::Command;

/// Create the `get` command with all its subcommands.
pub fn get_command() -> Command {
    Command::new(COMMAND_GET)
        .about("Get a list of artifacts in an environment")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_POLICIES)
                .about("Get policy list")
                .subcommand_required(true)
                .subcommand(
                    Command::new(COMMAND_API)
                        .about("Display a list of API Policies")
                        .long_about("Display a list of API Policies in the environment")
                        .after_help(
                            "Examples:\n  apictl get policies api -e dev\n  \
                             apictl get policies api -e dev --all\n  \
                             apictl get policies api -e dev -l 30\n\n\
                             NOTE: The flag (--environment (-e)) is mandatory\n\
                             NOTE: Flags (--all) and (--limit (-l)) cannot be used \
                             at the same time",
                        )
                        .arg(environment_parameter("Environment to be searched"))
                        .arg(format_parameter(
                            "Pretty-print API Policies using templates. \
                             Use \"{{ jsonPretty . }}\" to list all fields",
                        ))
                        .arg(limit_parameter("Maximum number of API Policies to return"))
                        .arg(all_parameter("Get all API Policies")),
                ),
        )
        .subcommand(
            Command::new(COMMAND_ENVS)
                .about("Display the list of environments")
                .after_help("Examples:\n  apictl get envs")
                .arg(format_parameter(
                    "Pretty-print environments using templates. \
                     Use \"{{ jsonPretty . }}\" to list all fields",
                )),
        )
}
