//! CLI entry point for the gallerygrab tool.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use gallerygrab_core::{Credentials, DownloadOutcome, Pipeline, RunConfig};
use tracing::{debug, error, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Load a .env file when present; a missing file is not an error
    dotenvy::dotenv().ok();

    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("Gallerygrab starting");

    // Validate configuration before touching the network
    let config = RunConfig::new(
        &args.entry_url,
        args.query,
        args.max_downloads,
        args.output_dir,
        Duration::from_millis(args.delay_ms),
    )?;
    let credentials = Credentials::from_env();

    let pipeline = Pipeline::new(config, credentials);

    // Single failure boundary: fatal stage errors are reported, not re-thrown.
    // The session is released inside run() on every path.
    match pipeline.run().await {
        Ok(report) => {
            for outcome in &report.outcomes {
                if let DownloadOutcome::Failed { url, reason, .. } = outcome {
                    warn!(url = %url, reason = %reason, "asset was not downloaded");
                }
            }
            info!(
                discovered = report.discovered,
                attempted = report.attempted(),
                succeeded = report.succeeded(),
                failed = report.failed(),
                "Download complete"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "run failed");
            std::process::exit(1);
        }
    }
}
