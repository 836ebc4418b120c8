use apictl::{
    actions::CommandOutcome,
    commands::{create_cli_commands, PARAMETER_VERBOSE},
    exit_codes::ApictlExitCode,
};
use color_print::ceprintln;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::execute_command;

/// Logging goes to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("apictl=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main entry point for the program
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = match create_cli_commands().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            // --help and --version also end up here
            let code = if e.use_stderr() {
                ApictlExitCode::UsageError.code()
            } else {
                ApictlExitCode::Success.code()
            };
            let _ = e.print();
            ::std::process::exit(code);
        }
    };

    init_logging(matches.get_flag(PARAMETER_VERBOSE));

    match execute_command(&matches).await {
        Ok(CommandOutcome::Completed) => {}
        Ok(CommandOutcome::ApiFailure) => {
            ::std::process::exit(ApictlExitCode::ApiError.code());
        }
        Err(e) => {
            let exit_code = e.exit_code();
            debug!("{}: {:?}", exit_code.message(), e);
            ceprintln!("<r>ERROR:</r> {}", e);
            ::std::process::exit(exit_code.code());
        }
    }
}
