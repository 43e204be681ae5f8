//! Sign-in page parsing.
//!
//! The sign-in page carries a form with `#name`/`#password` inputs and,
//! when the site's CSRF protection is active, a hidden `authenticity_token`
//! input. Unauthenticated visitors may additionally get a content-warning
//! interstitial whose accept control carries the id `guest-warning-accept`.
//!
//! Parsing is synchronous on purpose: `scraper::Html` is not `Send`, so the
//! session fetches page text first and hands a `&str` to these helpers.

use scraper::{Html, Selector};

/// Id of the content-warning interstitial's accept control.
const GUEST_WARNING_ACCEPT_ID: &str = "#guest-warning-accept";

/// The sign-in form as found on the entry page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    /// Form action, as written in the markup (resolved against the entry URL
    /// by the caller).
    pub action: String,
    /// Hidden CSRF token, when the form carries one.
    pub authenticity_token: Option<String>,
}

/// Returns true when the page carries the content-warning interstitial.
#[must_use]
pub fn guest_warning_present(html: &str) -> bool {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse(GUEST_WARNING_ACCEPT_ID) else {
        return false;
    };
    document.select(&selector).next().is_some()
}

/// Locates the sign-in form: the first `form` containing both `#name` and
/// `#password` inputs. Returns `None` when no such form exists.
#[must_use]
pub fn parse_login_form(html: &str) -> Option<LoginForm> {
    let document = Html::parse_document(html);
    let form_selector = Selector::parse("form").ok()?;
    let name_selector = Selector::parse("input#name").ok()?;
    let password_selector = Selector::parse("input#password").ok()?;
    let token_selector = Selector::parse(r#"input[name="authenticity_token"]"#).ok()?;

    for form in document.select(&form_selector) {
        if form.select(&name_selector).next().is_none() {
            continue;
        }
        if form.select(&password_selector).next().is_none() {
            continue;
        }

        let action = form.value().attr("action").unwrap_or("").to_string();
        let authenticity_token = form
            .select(&token_selector)
            .next()
            .and_then(|input| input.value().attr("value"))
            .map(ToString::to_string);

        return Some(LoginForm {
            action,
            authenticity_token,
        });
    }

    None
}
