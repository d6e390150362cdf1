//! Taxon CLI binary.

use anyhow::Result;
use std::process::ExitCode;
use taxon::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the taxon CLI.
///
/// Uses tokio's current_thread runtime. Every command does one snapshot read
/// followed by in-memory queries.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so stdout stays clean for --json output
    // Example: RUST_LOG=taxon=debug,taxon_snapshot=trace taxon scheme
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taxon=info,taxon_snapshot=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting taxon CLI");

    let cli = Cli::parse_args();
    let code = cli.execute().await?;

    tracing::debug!("Taxon CLI completed");
    Ok(code)
}
