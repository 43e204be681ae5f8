//! Gallerygrab Core Library
//!
//! Core functionality for the gallerygrab tool: sign in to a gated gallery
//! site, discover every result page for a search query, and download the
//! linked full-resolution images sequentially to local storage.
//!
//! # Architecture
//!
//! The library is organized into the following modules, composed strictly
//! downstream (no module calls back upstream):
//! - [`config`] - Run configuration and environment credentials
//! - [`session`] - Authenticated session establishment
//! - [`crawl`] - Pagination-aware discovery of asset references
//! - [`retrieve`] - Bounded sequential asset retrieval
//! - [`pipeline`] - Orchestration and the top-level failure boundary

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod crawl;
pub mod pipeline;
pub mod retrieve;
pub mod session;
pub mod user_agent;

// Re-export commonly used types
pub use config::{
    ConfigError, Credentials, DEFAULT_DELAY_MS, DEFAULT_ENTRY_URL, DEFAULT_OUTPUT_DIR,
    PASSWORD_ENV, RunConfig, USERNAME_ENV,
};
pub use crawl::{CrawlError, discover_assets};
pub use pipeline::{Pipeline, PipelineError, RunReport};
pub use retrieve::{DownloadOutcome, FetchError, Retriever, Throttle, asset_file_name};
pub use session::{AuthError, Session};
