//! Export command definitions.

use crate::commands::params::{
    environment_parameter, policy_name_parameter, COMMAND_API, COMMAND_EXPORT, COMMAND_POLICY,
};
use clap::Command;

/// Create the `export` command with all its subcommands.
pub fn export_command() -> Command {
    Command::new(COMMAND_EXPORT)
        .about("Export an artifact from an environment")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_POLICY)
                .about("Export policies from an environment")
                .subcommand_required(true)
                .subcommand(
                    Command::new(COMMAND_API)
                        .about("Export API Policies")
                        .long_about("Export API Policies from an environment")
                        .after_help(
                            "Examples:\n  apictl export policy api -n AddHeader -e dev\n\n\
                             NOTE: Both flags (--name (-n) and --environment (-e)) are mandatory.",
                        )
                        .arg(policy_name_parameter())
                        .arg(environment_parameter(
                            "Environment from which the API Policy should be exported",
                        )),
                ),
        )
}
