//! Main entry point for esarank.

use clap::Parser;
use esarank_cli::{run_cli, Cli, CliError};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}", CliError::Runtime(e));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_cli(cli)) {
        Ok(outcome) => {
            info!(
                ranking = %outcome.ranking_path.display(),
                ranking_all = %outcome.ranking_all_path.display(),
                "Finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Logging may not be up yet when configuration itself failed
            if e.is_config() {
                eprintln!("esarank: {e}");
            }
            error!("esarank failed: {e}");
            ExitCode::FAILURE
        }
    }
}
