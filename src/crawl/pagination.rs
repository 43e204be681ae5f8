//! Pagination-control inspection and page-parameter rewriting.

use scraper::{Html, Selector};
use url::Url;

/// Class carried by the paginator's numbered page links.
const NUMBERED_PAGE_SELECTOR: &str = ".numbered-page";

/// Query parameter selecting a listing page.
const PAGE_PARAM: &str = "page";

/// Derives the last page index from a rendered listing.
///
/// Takes the last `.numbered-page` element and parses the leading digit run
/// of its link text, so "7" and "7 of 12" both resolve to 7. Falls back to 1
/// when no such element exists, when the last one carries no link, or when
/// the link text does not start with a digit. The fallback is a deliberate
/// policy, not an accident: an ambiguous paginator is treated as "single
/// page" rather than failing the crawl.
#[must_use]
pub fn last_page_index(html: &str) -> u32 {
    let document = Html::parse_document(html);
    let Ok(page_selector) = Selector::parse(NUMBERED_PAGE_SELECTOR) else {
        return 1;
    };
    let Some(last) = document.select(&page_selector).last() else {
        return 1;
    };
    let Ok(link_selector) = Selector::parse("a") else {
        return 1;
    };
    let Some(link) = last.select(&link_selector).next() else {
        return 1;
    };
    let text: String = link.text().collect();
    leading_integer(&text).unwrap_or(1)
}

/// Parses the leading digit run of `text`, ignoring leading whitespace and
/// any trailing non-digit suffix.
fn leading_integer(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Rewrites the `page` query parameter of a listing URL, preserving every
/// other parameter. An existing `page` parameter is replaced.
#[must_use]
pub fn with_page_index(url: &Url, page: u32) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut rewritten = url.clone();
    rewritten.set_query(None);
    {
        let mut pairs = rewritten.query_pairs_mut();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(PAGE_PARAM, &page.to_string());
    }
    rewritten
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn paginator(last_entry: &str) -> String {
        format!(
            r#"<div class="paginator">
                <span class="numbered-page"><a href="?page=1">1</a></span>
                <span class="numbered-page">{last_entry}</span>
            </div>"#
        )
    }

    #[test]
    fn test_last_page_index_reads_last_numbered_page() {
        let html = paginator(r#"<a href="?page=7">7</a>"#);
        assert_eq!(last_page_index(&html), 7);
    }

    #[test]
    fn test_last_page_index_defaults_without_paginator() {
        assert_eq!(last_page_index("<div id='posts'></div>"), 1);
    }

    #[test]
    fn test_last_page_index_defaults_on_non_numeric_text() {
        let html = paginator(r#"<a href="?page=next">next</a>"#);
        assert_eq!(last_page_index(&html), 1);
    }

    #[test]
    fn test_last_page_index_defaults_when_last_entry_has_no_link() {
        let html = paginator("<b>current</b>");
        assert_eq!(last_page_index(&html), 1);
    }

    #[test]
    fn test_last_page_index_trims_whitespace() {
        let html = paginator("<a> 12 </a>");
        assert_eq!(last_page_index(&html), 12);
    }

    #[test]
    fn test_last_page_index_accepts_trailing_suffix() {
        let html = paginator("<a>7 of 12</a>");
        assert_eq!(last_page_index(&html), 7);
    }

    #[test]
    fn test_leading_integer_parsing() {
        assert_eq!(leading_integer("7"), Some(7));
        assert_eq!(leading_integer(" 42..."), Some(42));
        assert_eq!(leading_integer("next"), None);
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn test_with_page_index_appends_parameter() {
        let url = Url::parse("https://example.com/posts?tags=fox").unwrap();
        let rewritten = with_page_index(&url, 3);
        assert_eq!(rewritten.as_str(), "https://example.com/posts?tags=fox&page=3");
    }

    #[test]
    fn test_with_page_index_replaces_existing_parameter() {
        let url = Url::parse("https://example.com/posts?tags=fox&page=2").unwrap();
        let rewritten = with_page_index(&url, 5);
        assert_eq!(rewritten.as_str(), "https://example.com/posts?tags=fox&page=5");
    }

    #[test]
    fn test_with_page_index_without_existing_query() {
        let url = Url::parse("https://example.com/posts").unwrap();
        let rewritten = with_page_index(&url, 1);
        assert_eq!(rewritten.as_str(), "https://example.com/posts?page=1");
    }
}
