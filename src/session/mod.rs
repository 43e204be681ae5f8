//! Authenticated session establishment.
//!
//! A [`Session`] wraps one `reqwest::Client` with a shared cookie jar. The
//! sign-in flow runs once, up front: fetch the entry page, acknowledge the
//! content-warning interstitial if one is shown, then submit the credentials
//! through the sign-in form. Authentication cookies land in the jar and ride
//! along on every later crawl and download request.
//!
//! The submit step does not inspect the response for login success: the site
//! reports a bad password inside the page body, and all later requests work
//! (degraded to guest access) either way. Keeping the submit explicit here
//! leaves room for a verified-login variant without restructuring callers.
//!
//! Dropping the `Session` releases the connection pool and cookie store; the
//! pipeline relies on that on every exit path.

mod login;

pub use login::{LoginForm, guest_warning_present, parse_login_form};

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::cookie::Jar;
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::Credentials;
use crate::user_agent::BROWSER_USER_AGENT;

/// Connect timeout for all session requests.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Overall request timeout; generous because asset bodies can be large.
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Cookie recording that the content-warning interstitial was acknowledged.
const GUEST_WARNING_COOKIE: &str = "gw=1; Path=/";

/// Errors raised while establishing the authenticated session.
///
/// All variants are fatal to the run: nothing crawls or downloads without a
/// session.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Network-level failure talking to the sign-in flow.
    #[error("network error during sign-in at {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The entry page carried no recognizable sign-in form.
    #[error("no sign-in form found at {url}")]
    LoginFormMissing {
        /// The entry URL that was inspected.
        url: String,
    },

    /// The sign-in form's action attribute did not resolve to a URL.
    #[error("sign-in form action {action:?} did not resolve against {url}: {source}")]
    InvalidFormAction {
        /// The entry URL the action was resolved against.
        url: String,
        /// The raw action attribute.
        action: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

/// An authenticated browsing context: HTTP client plus cookie jar.
///
/// Created once by [`Session::authenticate`] and shared read-only by the
/// crawl and retrieval stages. No stage mutates the session after
/// authentication completes.
#[derive(Debug)]
pub struct Session {
    client: Client,
    base_url: Url,
}

impl Session {
    /// Signs in at `entry_url` and returns the authenticated session.
    ///
    /// Steps, in order:
    /// 1. GET the entry page.
    /// 2. If the content-warning interstitial is present, set its
    ///    acknowledgement cookie (absence is not an error).
    /// 3. Locate the sign-in form and POST the credentials (plus the hidden
    ///    CSRF token when present) to its resolved action URL.
    ///
    /// The login response is not verified; see the module docs.
    ///
    /// # Errors
    ///
    /// Any client-construction, navigation, or form-location failure is an
    /// [`AuthError`]. Credentials never appear in errors or logs.
    #[instrument(skip(credentials), fields(entry_url = %entry_url))]
    pub async fn authenticate(
        entry_url: &Url,
        credentials: &Credentials,
    ) -> Result<Self, AuthError> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .user_agent(BROWSER_USER_AGENT)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(AuthError::ClientBuild)?;

        let mut base_url = entry_url.clone();
        base_url.set_path("/");
        base_url.set_query(None);

        let session = Self { client, base_url };

        let entry_page = session
            .client
            .get(entry_url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| AuthError::Network {
                url: entry_url.to_string(),
                source,
            })?
            .text()
            .await
            .map_err(|source| AuthError::Network {
                url: entry_url.to_string(),
                source,
            })?;

        if login::guest_warning_present(&entry_page) {
            debug!("acknowledging content-warning interstitial");
            jar.add_cookie_str(GUEST_WARNING_COOKIE, &session.base_url);
        }

        let form =
            login::parse_login_form(&entry_page).ok_or_else(|| AuthError::LoginFormMissing {
                url: entry_url.to_string(),
            })?;

        let action_url =
            entry_url
                .join(&form.action)
                .map_err(|source| AuthError::InvalidFormAction {
                    url: entry_url.to_string(),
                    action: form.action.clone(),
                    source,
                })?;

        let mut fields: Vec<(&str, &str)> = vec![
            ("name", credentials.username.as_str()),
            ("password", credentials.password()),
        ];
        if let Some(token) = form.authenticity_token.as_deref() {
            fields.push(("authenticity_token", token));
        }

        debug!(action = %action_url, "submitting sign-in form");
        session
            .client
            .post(action_url.clone())
            .form(&fields)
            .send()
            .await
            .map_err(|source| AuthError::Network {
                url: action_url.to_string(),
                source,
            })?;

        info!("session established");
        Ok(session)
    }

    /// Returns the site root the session was established against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the underlying HTTP client.
    ///
    /// The client carries the session cookies; the crawl and retrieval
    /// stages issue all their requests through it.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }
}
