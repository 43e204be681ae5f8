//! Run configuration and environment credentials.
//!
//! All user-supplied inputs are validated here, before any network activity:
//! a run with an empty query or an unparsable entry URL never creates a
//! session. Credentials come from the process environment; a missing variable
//! degrades to an empty string (matching the site tooling this replaces)
//! rather than aborting, with a warning logged so the gap is visible.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;
use url::Url;

/// Environment variable holding the sign-in username.
pub const USERNAME_ENV: &str = "USER_NAME";

/// Environment variable holding the sign-in password.
pub const PASSWORD_ENV: &str = "PASSWORD";

/// Default entry URL: the gated site's sign-in page.
pub const DEFAULT_ENTRY_URL: &str = "https://e621.net/session/new";

/// Default output directory for downloaded assets.
pub const DEFAULT_OUTPUT_DIR: &str = "./img";

/// Default inter-download delay in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 2000;

/// Errors raised while validating run configuration.
///
/// All variants are pre-flight: they abort the run before any network call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The search query was empty or whitespace-only.
    #[error("search query must not be empty")]
    EmptyQuery,

    /// The entry URL could not be parsed.
    #[error("invalid entry URL {url}: {source}")]
    InvalidEntryUrl {
        /// The unparsable URL string.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

/// Sign-in credentials for the gated site.
///
/// The password is intentionally redacted in Debug output and is never
/// logged anywhere in the crate.
#[derive(Clone)]
pub struct Credentials {
    /// Account username.
    pub username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials from explicit values.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads credentials from `USER_NAME` and `PASSWORD`.
    ///
    /// Missing variables yield empty strings instead of an error; the site
    /// simply rejects the login later. A warning is logged so an operator can
    /// tell why a run came back empty-handed.
    #[must_use]
    pub fn from_env() -> Self {
        let username = std::env::var(USERNAME_ENV).unwrap_or_default();
        let password = std::env::var(PASSWORD_ENV).unwrap_or_default();
        if username.is_empty() {
            warn!(var = USERNAME_ENV, "credential variable unset or empty");
        }
        if password.is_empty() {
            warn!(var = PASSWORD_ENV, "credential variable unset or empty");
        }
        Self { username, password }
    }

    /// Returns the password.
    ///
    /// Sensitive — avoid logging the return value.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

// Custom Debug impl that redacts the password.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Validated configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Entry URL of the gated site's sign-in page.
    pub entry_url: Url,
    /// Search query driving the crawl.
    pub query: String,
    /// Maximum number of assets to download; `None` means unbounded.
    pub max_downloads: Option<u64>,
    /// Directory downloaded assets are written to.
    pub output_dir: PathBuf,
    /// Fixed pause between download attempts; zero disables throttling.
    pub delay: Duration,
}

impl RunConfig {
    /// Builds a validated run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyQuery`] when `query` is empty or
    /// whitespace-only, and [`ConfigError::InvalidEntryUrl`] when `entry_url`
    /// does not parse.
    pub fn new(
        entry_url: &str,
        query: impl Into<String>,
        max_downloads: Option<u64>,
        output_dir: impl Into<PathBuf>,
        delay: Duration,
    ) -> Result<Self, ConfigError> {
        let entry_url = Url::parse(entry_url).map_err(|source| ConfigError::InvalidEntryUrl {
            url: entry_url.to_string(),
            source,
        })?;
        let config = Self {
            entry_url,
            query: query.into(),
            max_downloads,
            output_dir: output_dir.into(),
            delay,
        };
        config.validate()?;
        Ok(config)
    }

    /// Re-checks the configuration invariants.
    ///
    /// Called again at the top of the pipeline so that a hand-constructed
    /// config gets the same pre-flight guarantee as one built by [`new`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyQuery`] when the query is empty.
    ///
    /// [`new`]: RunConfig::new
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query.trim().is_empty() {
            return Err(ConfigError::EmptyQuery);
        }
        Ok(())
    }
}
