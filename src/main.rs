mod access_oracle;
mod account_id;
mod config;
mod discover_account_id;
mod probe_outcome;
mod resource_account_policy;
mod resource_prober;
mod role_assumer;
mod s3_path;
mod s3_resource_prober;
mod search_command;
mod search_state;
mod sts_role_assumer;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::search_command::{search_command, SearchCommand};

/// Finds the account id that owns an S3 bucket, using a role that can read the bucket.
/// Set `RUST_LOG=debug` to see every request.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the account id one digit at a time with `s3:ResourceAccount` session policies
    Search(SearchCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so that stdout only has the search output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match Cli::parse().command {
        Command::Search(command) => search_command(command).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
