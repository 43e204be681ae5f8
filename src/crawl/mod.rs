//! Pagination-aware discovery of asset references.
//!
//! The crawl issues the search, reads the paginator to learn how many
//! listing pages exist, then walks pages 1 through the last index strictly
//! in order, one request at a time, collecting the full-resolution asset URL
//! from every listing entry. The output sequence preserves page order and,
//! within a page, DOM order; duplicates are kept.
//!
//! Any navigation or parse failure here is fatal to discovery — there is no
//! per-page retry or skip, and no partial sequence is returned.

mod listing;
mod pagination;

pub use listing::{extract_asset_urls, has_results_container};
pub use pagination::{last_page_index, with_page_index};

use tracing::{debug, info, instrument};
use url::Url;

use crate::session::Session;

/// Listing path the search lands on.
const POSTS_PATH: &str = "/posts";

/// Query parameter carrying the search terms.
const TAGS_PARAM: &str = "tags";

/// Errors raised during result-set discovery. All are fatal to the crawl.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// Network-level failure fetching a listing page.
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// A listing page answered with an error status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that failed.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The search response carried no results container.
    #[error("results container missing at {url}")]
    ResultsContainerMissing {
        /// The search URL that was inspected.
        url: String,
    },

    /// The listing path did not resolve against the session's base URL.
    #[error("could not build search URL from {base}: {source}")]
    SearchUrl {
        /// The session base URL.
        base: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

/// Discovers the full asset-reference sequence for `query`.
///
/// Visits pages `1..=last_page_index` in strictly increasing order with one
/// navigation per page; a page yielding zero entries contributes nothing but
/// never terminates the loop early.
///
/// # Errors
///
/// Any page fetch or parse failure aborts the whole discovery with a
/// [`CrawlError`]; no partial sequence is returned.
#[instrument(skip(session))]
pub async fn discover_assets(session: &Session, query: &str) -> Result<Vec<String>, CrawlError> {
    let mut search_url =
        session
            .base_url()
            .join(POSTS_PATH)
            .map_err(|source| CrawlError::SearchUrl {
                base: session.base_url().to_string(),
                source,
            })?;
    search_url.query_pairs_mut().append_pair(TAGS_PARAM, query);

    let search_page = fetch_listing(session, &search_url).await?;
    if !listing::has_results_container(&search_page) {
        return Err(CrawlError::ResultsContainerMissing {
            url: search_url.to_string(),
        });
    }

    let last_page = pagination::last_page_index(&search_page);
    info!(last_page, "pagination discovered");

    let mut assets = Vec::new();
    for page in 1..=last_page {
        let page_url = pagination::with_page_index(&search_url, page);
        debug!(url = %page_url, "visiting listing page");

        let page_html = fetch_listing(session, &page_url).await?;
        let urls = listing::extract_asset_urls(&page_html);
        debug!(page, entries = urls.len(), "extracted asset references");
        assets.extend(urls);
    }

    info!(discovered = assets.len(), "discovery complete");
    Ok(assets)
}

/// Fetches one listing page as text, mapping transport and status failures.
async fn fetch_listing(session: &Session, url: &Url) -> Result<String, CrawlError> {
    let response = session
        .client()
        .get(url.clone())
        .send()
        .await
        .map_err(|source| CrawlError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| CrawlError::Network {
        url: url.to_string(),
        source,
    })
}
