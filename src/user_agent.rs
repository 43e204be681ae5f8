//! Shared User-Agent string for all session traffic.
//!
//! The gated site rejects requests carrying an obvious tool User-Agent, so the
//! session presents a browser-like one on every request (login, listing pages,
//! and asset downloads alike).

/// Browser-like User-Agent presented by the session's HTTP client.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:109.0) \
    Gecko/20100101 Firefox/117.0";
