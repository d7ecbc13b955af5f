//! Fetcher abstraction

use std::collections::HashMap;

use futures_util::future::BoxFuture;
use url::{Origin, Url};

use crate::error::FetchError;
use crate::page::{extract_page, FetchedPage};
use crate::Result;

/// Retrieves a document and extracts the part a swap needs.
///
/// Boxed futures keep the trait object-safe so the navigator can hold any
/// fetcher behind an `Arc<dyn PageFetcher>`.
pub trait PageFetcher: Send + Sync + 'static {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<FetchedPage>>;
}

pub(crate) fn ensure_same_origin(origin: &Origin, url: &Url) -> Result<()> {
    if url.origin() != *origin {
        return Err(FetchError::CrossOrigin(url.to_string()));
    }
    Ok(())
}

/// Serves documents from memory, keyed by path.
///
/// Useful for prerendered snapshots and for exercising the engine offline.
/// Unknown paths answer 404.
pub struct StaticFetcher {
    origin: Origin,
    container_selector: String,
    responses: HashMap<String, StaticResponse>,
}

enum StaticResponse {
    Document(String),
    Status(u16),
}

impl StaticFetcher {
    pub fn new(base: &Url, container_selector: impl Into<String>) -> Self {
        Self {
            origin: base.origin(),
            container_selector: container_selector.into(),
            responses: HashMap::new(),
        }
    }

    /// Serve `html` with status 200 at `path`.
    pub fn with_page(mut self, path: impl Into<String>, html: impl Into<String>) -> Self {
        self.responses
            .insert(path.into(), StaticResponse::Document(html.into()));
        self
    }

    /// Answer requests for `path` with a bodiless `status`.
    pub fn with_status(mut self, path: impl Into<String>, status: u16) -> Self {
        self.responses
            .insert(path.into(), StaticResponse::Status(status));
        self
    }

    fn respond(&self, url: &Url) -> Result<FetchedPage> {
        ensure_same_origin(&self.origin, url)?;
        match self.responses.get(url.path()) {
            Some(StaticResponse::Document(html)) => extract_page(html, &self.container_selector),
            Some(StaticResponse::Status(status)) if (200..400).contains(status) => {
                Ok(FetchedPage {
                    content_markup: String::new(),
                    title: String::new(),
                })
            }
            Some(StaticResponse::Status(status)) => Err(FetchError::Status(*status)),
            None => Err(FetchError::Status(404)),
        }
    }
}

impl PageFetcher for StaticFetcher {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<FetchedPage>> {
        Box::pin(async move {
            let result = self.respond(url);
            tracing::debug!(url = %url, ok = result.is_ok(), "Served static page");
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> StaticFetcher {
        let base = Url::parse("https://site.test/").unwrap();
        StaticFetcher::new(&base, "main")
            .with_page(
                "/about",
                "<title>About Us</title><main><h1>About</h1></main>",
            )
            .with_status("/gone", 410)
    }

    #[tokio::test]
    async fn test_serves_pages() {
        let url = Url::parse("https://site.test/about?ref=nav").unwrap();
        let page = fetcher().fetch(&url).await.unwrap();
        assert_eq!(page.content_markup, "<h1>About</h1>");
        assert_eq!(page.title, "About Us");
    }

    #[tokio::test]
    async fn test_failure_statuses() {
        let f = fetcher();
        let gone = Url::parse("https://site.test/gone").unwrap();
        assert_eq!(f.fetch(&gone).await, Err(FetchError::Status(410)));

        let missing = Url::parse("https://site.test/missing").unwrap();
        assert_eq!(f.fetch(&missing).await, Err(FetchError::Status(404)));
    }

    #[tokio::test]
    async fn test_cross_origin_refused() {
        let other = Url::parse("https://elsewhere.test/about").unwrap();
        assert!(matches!(
            fetcher().fetch(&other).await,
            Err(FetchError::CrossOrigin(_))
        ));
    }
}
