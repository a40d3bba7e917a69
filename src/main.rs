//! out - report CI build results to a GitLab merge request

mod cli;

use clap::Parser;
use gitlab_mr_resource::build::BuildEnvironment;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Set commit status, comment, label and merge a GitLab merge request
#[derive(Parser)]
#[command(name = "out", version, about)]
struct Cli {
    /// Directory holding the step's inputs; the repository lives below it
    destination: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let build = BuildEnvironment::from_env();
    let result = cli::run_out(
        &cli.destination,
        io::stdin().lock(),
        io::stdout().lock(),
        &build,
    )
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "out step failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; stdout carries the response.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
