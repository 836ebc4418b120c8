//! Environment command definitions (`add env`, `remove env`).

use crate::commands::params::{
    endpoint_parameter, environment_name_parameter, COMMAND_ADD, COMMAND_ENV, COMMAND_REMOVE,
    PARAMETER_APIM, PARAMETER_PUBLISHER, PARAMETER_REGISTRATION, PARAMETER_TOKEN,
};
use clap::Command;

/// Create the `add` command with all its subcommands.
pub fn add_command() -> Command {
    Command::new(COMMAND_ADD)
        .about("Add an environment")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_ENV)
                .about("Add an environment to the config file")
                .after_help(
                    "Examples:\n  apictl add env dev --apim https://localhost:9443\n  \
                     apictl add env prod --apim https://apim.example.com \
                     --token https://sts.example.com/oauth2/token",
                )
                .arg(environment_name_parameter())
                .arg(endpoint_parameter(
                    PARAMETER_APIM,
                    true,
                    "API Manager endpoint for the environment",
                ))
                .arg(endpoint_parameter(
                    PARAMETER_PUBLISHER,
                    false,
                    "Publisher REST API endpoint. Derived from --apim when omitted",
                ))
                .arg(endpoint_parameter(
                    PARAMETER_TOKEN,
                    false,
                    "OAuth token endpoint. Derived from --apim when omitted",
                ))
                .arg(endpoint_parameter(
                    PARAMETER_REGISTRATION,
                    false,
                    "Client registration endpoint. Derived from --apim when omitted",
                )),
        )
}

/// Create the `remove` command with all its subcommands.
pub fn remove_command() -> Command {
    Command::new(COMMAND_REMOVE)
        .about("Remove an environment")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_ENV)
                .about("Remove an environment from the config file")
                .after_help("Examples:\n  apictl remove env dev")
                .arg(environment_name_parameter()),
        )
}
