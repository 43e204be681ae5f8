//! Pipeline orchestration: validate, authenticate, discover, retrieve.
//!
//! The pipeline owns the session for the whole run. Each stage borrows it in
//! turn; no stage calls back upstream. Stage errors converge into one
//! [`PipelineError`], and the session's connection pool and cookie store are
//! released by RAII on every path out of [`Pipeline::run`] — success,
//! validation failure, or mid-pipeline error alike.

use tracing::{info, instrument};

use crate::config::{ConfigError, Credentials, RunConfig};
use crate::crawl::{self, CrawlError};
use crate::retrieve::{DownloadOutcome, FetchError, Retriever, Throttle};
use crate::session::{AuthError, Session};

/// Fatal errors from any pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Pre-flight configuration failure; no network activity occurred.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Session establishment failed.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Result-set discovery failed.
    #[error("crawl failed: {0}")]
    Crawl(#[from] CrawlError),

    /// Retrieval could not start (output directory creation failed).
    #[error("retrieval failed: {0}")]
    Retrieve(#[from] FetchError),
}

/// Summary of one completed run.
#[derive(Debug)]
pub struct RunReport {
    /// Asset references discovered across all listing pages.
    pub discovered: usize,
    /// Per-asset outcomes for every attempted download, in order.
    pub outcomes: Vec<DownloadOutcome>,
}

impl RunReport {
    /// Number of download attempts made.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of assets persisted.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_saved()).count()
    }

    /// Number of failed attempts.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }
}

/// Composes the three stages over one shared session.
#[derive(Debug)]
pub struct Pipeline {
    config: RunConfig,
    credentials: Credentials,
}

impl Pipeline {
    /// Creates a pipeline for the given configuration and credentials.
    #[must_use]
    pub fn new(config: RunConfig, credentials: Credentials) -> Self {
        Self {
            config,
            credentials,
        }
    }

    /// Runs the full pipeline: validate, authenticate, discover, retrieve.
    ///
    /// Validation happens first and aborts before any network call. Download
    /// failures for individual assets do not error the run; they appear in
    /// the report's outcome list instead.
    ///
    /// # Errors
    ///
    /// Any stage-fatal failure surfaces as a [`PipelineError`]. The session,
    /// when one was created, is released before this returns.
    #[instrument(skip(self), fields(query = %self.config.query))]
    pub async fn run(&self) -> Result<RunReport, PipelineError> {
        self.config.validate()?;

        let session = Session::authenticate(&self.config.entry_url, &self.credentials).await?;

        let assets = crawl::discover_assets(&session, &self.config.query).await?;

        let retriever = Retriever::new(&self.config.output_dir, Throttle::new(self.config.delay));
        let outcomes = retriever
            .retrieve_all(&session, &assets, self.config.max_downloads)
            .await?;

        let report = RunReport {
            discovered: assets.len(),
            outcomes,
        };
        info!(
            discovered = report.discovered,
            attempted = report.attempted(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            "run complete"
        );
        Ok(report)
    }
}
