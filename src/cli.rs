//! CLI argument definitions using clap derive macros.
//!
//! The search query and the download bound are two distinct inputs here:
//! the query is positional, the bound is `--max-downloads`. A negative or
//! non-numeric bound is rejected by clap before any work starts.

use std::path::PathBuf;

use clap::Parser;

use gallerygrab_core::{DEFAULT_DELAY_MS, DEFAULT_ENTRY_URL, DEFAULT_OUTPUT_DIR};

/// Authenticated gallery search and batch image downloader.
///
/// Signs in to the gallery site, walks every result page for the query, and
/// downloads the linked full-resolution images one at a time. Credentials
/// come from the USER_NAME and PASSWORD environment variables.
#[derive(Parser, Debug)]
#[command(name = "gallerygrab")]
#[command(author, version, about)]
pub struct Args {
    /// Search query (tags) to crawl
    pub query: String,

    /// Maximum number of images to download (omit for unbounded)
    #[arg(short = 'n', long)]
    pub max_downloads: Option<u64>,

    /// Directory to save downloaded images into
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Entry URL of the site's sign-in page
    #[arg(long, default_value = DEFAULT_ENTRY_URL)]
    pub entry_url: String,

    /// Fixed pause between downloads in milliseconds (0 to disable, max 60000)
    #[arg(short = 'd', long, default_value_t = DEFAULT_DELAY_MS, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub delay_ms: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
