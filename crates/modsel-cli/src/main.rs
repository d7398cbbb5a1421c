//! modsel - runtime module selection CLI

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use modsel_cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable in cmake-dump mode
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match modsel_cli::run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            // One line, context chain included
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
