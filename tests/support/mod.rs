//! Shared fixtures for integration tests: canned site markup, the mock
//! sign-in flow, and a listing responder that serves per-page bodies.
#![allow(dead_code)]

use gallerygrab_core::{Credentials, Session};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// CSRF token embedded in the canned sign-in page.
pub const LOGIN_TOKEN: &str = "tok123";

/// Sign-in page markup: content-warning interstitial plus the login form.
#[must_use]
pub fn login_page() -> String {
    format!(
        r#"<html><body>
        <div id="guest-warning">
            <button id="guest-warning-accept">I am over 18</button>
        </div>
        <form action="/session" method="post">
            <input type="hidden" name="authenticity_token" value="{LOGIN_TOKEN}">
            <input id="name" name="name" type="text">
            <input id="password" name="password" type="password">
            <input type="submit" value="Submit">
        </form>
        </body></html>"#
    )
}

/// Listing page markup. `numbered_pages` fills the paginator's numbered
/// links; `entries` become `article` elements, `Some(url)` carrying the
/// large-file attribute and `None` an entry without it.
#[must_use]
pub fn listing_page(numbered_pages: &[&str], entries: &[Option<&str>]) -> String {
    let paginator: String = numbered_pages
        .iter()
        .map(|text| {
            format!(r#"<span class="numbered-page"><a href="?page={text}">{text}</a></span>"#)
        })
        .collect();
    let articles: String = entries
        .iter()
        .map(|entry| match entry {
            Some(url) => format!(r#"<article data-large-file-url="{url}"></article>"#),
            None => "<article class=\"blocked\"></article>".to_string(),
        })
        .collect();
    format!(
        r#"<html><body><div id="posts">{articles}<div class="paginator">{paginator}</div></div></body></html>"#
    )
}

/// Serves the search request and numbered listing pages from one mock.
///
/// Requests without a `page` parameter get `search`; `page=N` gets the
/// N-th entry of `pages` (1-based). Anything else is a 404.
pub struct ListingResponder {
    pub search: String,
    pub pages: Vec<String>,
}

impl Respond for ListingResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let page = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse::<usize>().ok());
        match page {
            None => ResponseTemplate::new(200).set_body_string(self.search.clone()),
            Some(n) if (1..=self.pages.len()).contains(&n) => {
                ResponseTemplate::new(200).set_body_string(self.pages[n - 1].clone())
            }
            Some(_) => ResponseTemplate::new(404),
        }
    }
}

/// Mounts the sign-in flow: GET of the entry page and the form POST.
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/session/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_page()))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// Entry URL for the mock site's sign-in page.
#[must_use]
pub fn entry_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/session/new", server.uri())).expect("mock server URI must parse")
}

/// Signs in against the mock site and returns the session.
pub async fn authenticated_session(server: &MockServer) -> Session {
    mount_login(server).await;
    Session::authenticate(&entry_url(server), &Credentials::new("tester", "secret"))
        .await
        .expect("sign-in against mock server must succeed")
}

/// Paths of all requests the server has received, in arrival order.
pub async fn received_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}
