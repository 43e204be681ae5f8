//! Bounded, sequential retrieval of discovered assets.
//!
//! The retriever walks the discovered URL sequence in order, one download at
//! a time, stopping early when the configured bound is reached. Each asset
//! streams to a file named by its 0-based position in the sequence, so output
//! names tie back to discovery order regardless of which downloads fail.
//!
//! Per-item isolation is the key property here: a failed download is recorded
//! and skipped, never allowed to abort the batch. The fixed inter-request
//! throttle applies after every attempt, success or failure.

mod throttle;

pub use throttle::Throttle;

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};

use crate::session::Session;

/// Fixed extension applied to every saved asset, regardless of content type.
const ASSET_EXTENSION: &str = "jpg";

/// Errors for a single download attempt.
///
/// Only [`FetchError::CreateDir`] aborts the batch; every other variant is
/// recorded as a per-item [`DownloadOutcome::Failed`] and skipped.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Network-level failure fetching the asset.
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The asset URL answered with an error status.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that failed.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while persisting the asset.
    #[error("IO error writing {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Per-asset result of one retrieval attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The asset was fetched and persisted.
    Saved {
        /// 0-based position in the discovered sequence.
        index: usize,
        /// Source URL.
        url: String,
        /// Destination file.
        path: PathBuf,
        /// Bytes written.
        bytes: u64,
    },
    /// The attempt failed; later attempts were unaffected.
    Failed {
        /// 0-based position in the discovered sequence.
        index: usize,
        /// Source URL.
        url: String,
        /// Human-readable failure reason.
        reason: String,
    },
}

impl DownloadOutcome {
    /// Returns true for a persisted asset.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Returns the deterministic file name for the asset at `index`.
#[must_use]
pub fn asset_file_name(index: usize) -> String {
    format!("image_{index}.{ASSET_EXTENSION}")
}

/// Sequential asset retriever with a fixed inter-request throttle.
#[derive(Debug)]
pub struct Retriever {
    output_dir: PathBuf,
    throttle: Throttle,
}

impl Retriever {
    /// Creates a retriever writing into `output_dir`, pausing per `throttle`
    /// after each attempt.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, throttle: Throttle) -> Self {
        Self {
            output_dir: output_dir.into(),
            throttle,
        }
    }

    /// Returns the destination directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Retrieves at most `bound` entries of `urls`, in order.
    ///
    /// The output directory is created first (idempotent), even when `bound`
    /// is zero. Entries past the bound are never attempted. The returned
    /// list holds one outcome per attempted URL, in original order; any mix
    /// of successes and failures is tolerated.
    ///
    /// # Errors
    ///
    /// Only a failure to create the output directory errors the whole call.
    /// Individual download failures are recorded as outcomes instead.
    #[instrument(skip(self, session, urls), fields(total = urls.len()))]
    pub async fn retrieve_all(
        &self,
        session: &Session,
        urls: &[String],
        bound: Option<u64>,
    ) -> Result<Vec<DownloadOutcome>, FetchError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| FetchError::CreateDir {
                path: self.output_dir.clone(),
                source,
            })?;

        let mut outcomes = Vec::new();
        for (index, url) in urls.iter().enumerate() {
            if let Some(max) = bound {
                if index as u64 >= max {
                    info!(max, "reached download bound");
                    break;
                }
            }

            match self.fetch_one(session, index, url).await {
                Ok((path, bytes)) => {
                    info!(url = %url, file = %path.display(), bytes, "downloaded asset");
                    outcomes.push(DownloadOutcome::Saved {
                        index,
                        url: url.clone(),
                        path,
                        bytes,
                    });
                }
                Err(error) => {
                    warn!(url = %url, error = %error, "download failed, continuing");
                    outcomes.push(DownloadOutcome::Failed {
                        index,
                        url: url.clone(),
                        reason: error.to_string(),
                    });
                }
            }

            self.throttle.pause().await;
        }

        Ok(outcomes)
    }

    /// Downloads one asset, streaming the body to its indexed file.
    async fn fetch_one(
        &self,
        session: &Session,
        index: usize,
        url: &str,
    ) -> Result<(PathBuf, u64), FetchError> {
        debug!(index, url = %url, "fetching asset");

        let response = session
            .client()
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let path = self.output_dir.join(asset_file_name(index));
        let file = File::create(&path)
            .await
            .map_err(|source| FetchError::Io {
                path: path.clone(),
                source,
            })?;

        match stream_to_file(file, response, url, &path).await {
            Ok(bytes_written) => Ok((path, bytes_written)),
            Err(error) => {
                // A body that errors mid-stream leaves a truncated file; remove
                // it so a failed attempt cannot be mistaken for a download.
                if let Err(remove_error) = tokio::fs::remove_file(&path).await {
                    warn!(
                        path = %path.display(),
                        error = %remove_error,
                        "failed to remove partial file"
                    );
                }
                Err(error)
            }
        }
    }
}

/// Streams response body to file, returning bytes written.
///
/// This is extracted to enable cleanup on error in the caller.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    path: &Path,
) -> Result<u64, FetchError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|source| FetchError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk
    writer.flush().await.map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(bytes_written)
}
