use std::process::ExitCode;

use clap::Parser;
use helm_unused_values::{
    cli::{Arguments, ExitStatus},
    error::AnalyzerError,
    state,
};

fn main() -> ExitCode {
    let args = Arguments::parse();

    if let Err(err) = state::setup_shutdown_handler() {
        helm_unused_values::warn!("failed to install Ctrl-C handler: {}", err);
    }

    match helm_unused_values::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if matches!(
                err.downcast_ref::<AnalyzerError>(),
                Some(AnalyzerError::Interrupted)
            ) {
                ExitStatus::Interrupted.into()
            } else {
                ExitStatus::Error.into()
            }
        }
    }
}
