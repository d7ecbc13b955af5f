//! Content extraction from fetched documents

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::Result;

/// The replaceable region and title of a fetched document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedPage {
    /// Inner markup of the container, empty if the document had none
    pub content_markup: String,
    /// Text of `<title>`, empty if the document had none
    pub title: String,
}

/// Parse `html` as a full document and pull out the container's inner markup
/// and the title. Everything outside the container is dropped.
pub fn extract_page(html: &str, container_selector: &str) -> Result<FetchedPage> {
    let container_sel = Selector::parse(container_selector)
        .map_err(|e| FetchError::InvalidSelector(format!("{container_selector}: {e}")))?;
    let title_sel =
        Selector::parse("title").map_err(|e| FetchError::InvalidSelector(e.to_string()))?;

    let doc = Html::parse_document(html);

    let content_markup = doc
        .select(&container_sel)
        .next()
        .map(|el| el.inner_html())
        .unwrap_or_default();

    let title = doc
        .select(&title_sel)
        .next()
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default();

    Ok(FetchedPage {
        content_markup,
        title,
    })
}

fn normalize_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(ch);
            last_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract() {
        let html = r#"<!doctype html><html><head><title>About Us</title>
            <script src="/head.js"></script><style>body{}</style></head>
            <body><header>chrome</header><main><h1>About</h1></main>
            <script>trackPageview()</script></body></html>"#;

        let page = extract_page(html, "main").unwrap();
        assert_eq!(page.content_markup, "<h1>About</h1>");
        assert_eq!(page.title, "About Us");
    }

    #[test]
    fn test_missing_parts_are_empty() {
        let page = extract_page("<html><body><p>bare</p></body></html>", "main").unwrap();
        assert_eq!(page.content_markup, "");
        assert_eq!(page.title, "");
    }

    #[test]
    fn test_first_container_wins() {
        let html = "<body><main>one</main><main>two</main></body>";
        assert_eq!(extract_page(html, "main").unwrap().content_markup, "one");
    }

    #[test]
    fn test_title_whitespace() {
        let html = "<head><title>\n  Events\n   &amp; Dates </title></head>";
        assert_eq!(extract_page(html, "main").unwrap().title, "Events & Dates");
    }

    #[test]
    fn test_invalid_selector() {
        assert!(matches!(
            extract_page("<main></main>", "main[["),
            Err(FetchError::InvalidSelector(_))
        ));
    }
}
