//! Lattice inference CLI

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use lattice_inference::cli::Cli;
use lattice_inference::telemetry::{init_logging, LoggingConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        format: cli.log_format,
        ..Default::default()
    };
    if let Err(e) = init_logging(logging) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match cli.run() {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, field = e.field().unwrap_or_default(), "command failed");
            ExitCode::FAILURE
        }
    }
}
