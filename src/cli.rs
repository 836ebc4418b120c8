use std::io;

use apictl::{
    actions::{
        auth::{login, logout, LoginOptions},
        environments::{
            add_environment, environment_name, list_environments, remove_environment,
            AddEnvironmentOptions,
        },
        policies::{
            export_api_policy, list_api_policies, ExportApiPolicyOptions, ListApiPoliciesOptions,
        },
        CommandOutcome,
    },
    commands::{
        COMMAND_ADD, COMMAND_API, COMMAND_ENV, COMMAND_ENVS, COMMAND_EXPORT, COMMAND_GET,
        COMMAND_LOGIN, COMMAND_LOGOUT, COMMAND_POLICIES, COMMAND_POLICY, COMMAND_REMOVE,
        PARAMETER_INSECURE,
    },
    context::ExecutionContext,
    error::CliError,
};
use clap::ArgMatches;
use tracing::trace;

fn extract_subcommand_name(sub_matches: &ArgMatches) -> String {
    let message = match sub_matches.subcommand() {
        Some(m) => m.0,
        None => "unknown",
    };

    message.to_string()
}

fn unsupported(sub_matches: &ArgMatches) -> CliError {
    CliError::UnsupportedSubcommand(extract_subcommand_name(sub_matches))
}

/// Run the command selected by `matches`, writing its output to stdout.
pub async fn execute_command(matches: &ArgMatches) -> Result<CommandOutcome, CliError> {
    let mut context = ExecutionContext::load_default(matches.get_flag(PARAMETER_INSECURE))?;
    let mut out = io::stdout();

    match matches.subcommand() {
        Some((COMMAND_EXPORT, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_POLICY, sub_matches)) => match sub_matches.subcommand() {
                Some((COMMAND_API, sub_matches)) => {
                    trace!("Command: export policy api");
                    let options = ExportApiPolicyOptions::from_matches(sub_matches)?;
                    export_api_policy(&context, &options, &mut out).await
                }
                _ => Err(unsupported(sub_matches)),
            },
            _ => Err(unsupported(sub_matches)),
        },
        Some((COMMAND_GET, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_POLICIES, sub_matches)) => match sub_matches.subcommand() {
                Some((COMMAND_API, sub_matches)) => {
                    trace!("Command: get policies api");
                    let options = ListApiPoliciesOptions::from_matches(sub_matches)?;
                    list_api_policies(&context, &options, &mut out).await
                }
                _ => Err(unsupported(sub_matches)),
            },
            Some((COMMAND_ENVS, sub_matches)) => {
                trace!("Command: get envs");
                list_environments(&context, sub_matches, &mut out)
            }
            _ => Err(unsupported(sub_matches)),
        },
        Some((COMMAND_ADD, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_ENV, sub_matches)) => {
                trace!("Command: add env");
                let options = AddEnvironmentOptions::from_matches(sub_matches)?;
                add_environment(&mut context, &options, &mut out)
            }
            _ => Err(unsupported(sub_matches)),
        },
        Some((COMMAND_REMOVE, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_ENV, sub_matches)) => {
                trace!("Command: remove env");
                let name = environment_name(sub_matches)?;
                remove_environment(&mut context, &name, &mut out)
            }
            _ => Err(unsupported(sub_matches)),
        },
        Some((COMMAND_LOGIN, sub_matches)) => {
            trace!("Command: login");
            let options = LoginOptions::from_matches(sub_matches)?;
            login(&context, &options, &mut out).await
        }
        Some((COMMAND_LOGOUT, sub_matches)) => {
            trace!("Command: logout");
            let name = environment_name(sub_matches)?;
            logout(&context, &name, &mut out)
        }
        _ => Err(unsupported(matches)),
    }
}
