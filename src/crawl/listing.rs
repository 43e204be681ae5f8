//! Asset-reference extraction from listing pages.

use scraper::{Html, Selector};

/// Container that signals the results listing has rendered.
const RESULTS_CONTAINER_SELECTOR: &str = "#posts > div.paginator";

/// Listing entry element.
const ENTRY_SELECTOR: &str = "article";

/// Entry attribute carrying the full-resolution asset URL.
const LARGE_FILE_URL_ATTR: &str = "data-large-file-url";

/// Returns true when the page contains the results container the crawl
/// waits on before inspecting pagination.
#[must_use]
pub fn has_results_container(html: &str) -> bool {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse(RESULTS_CONTAINER_SELECTOR) else {
        return false;
    };
    document.select(&selector).next().is_some()
}

/// Extracts asset-reference URLs from one listing page, in DOM order.
///
/// Entries without the large-file-URL attribute are dropped, never emitted
/// as empty strings. A page with no qualifying entries yields an empty
/// vector; that is not an error.
#[must_use]
pub fn extract_asset_urls(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse(ENTRY_SELECTOR) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .filter_map(|entry| entry.value().attr(LARGE_FILE_URL_ATTR))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_preserves_dom_order() {
        let html = r#"
            <article data-large-file-url="https://cdn.example.com/a.png"></article>
            <article data-large-file-url="https://cdn.example.com/b.png"></article>
            <article data-large-file-url="https://cdn.example.com/c.png"></article>
        "#;
        assert_eq!(
            extract_asset_urls(html),
            vec![
                "https://cdn.example.com/a.png",
                "https://cdn.example.com/b.png",
                "https://cdn.example.com/c.png",
            ]
        );
    }

    #[test]
    fn test_extract_drops_entries_without_attribute() {
        let html = r#"
            <article data-large-file-url="https://cdn.example.com/a.png"></article>
            <article class="blocked"></article>
            <article data-large-file-url="https://cdn.example.com/b.png"></article>
        "#;
        let urls = extract_asset_urls(html);
        assert_eq!(urls.len(), 2);
        assert!(urls.iter().all(|url| !url.is_empty()));
    }

    #[test]
    fn test_extract_empty_page_yields_nothing() {
        assert!(extract_asset_urls("<div id='posts'></div>").is_empty());
    }

    #[test]
    fn test_results_container_detection() {
        let with = r#"<div id="posts"><div class="paginator"></div></div>"#;
        let without = r#"<div id="posts"><p>maintenance</p></div>"#;
        assert!(has_results_container(with));
        assert!(!has_results_container(without));
    }
}
