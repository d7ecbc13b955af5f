//! HTTP fetcher

use futures_util::future::BoxFuture;
use reqwest::redirect::Policy;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use url::{Origin, Url};

use crate::error::FetchError;
use crate::fetcher::{ensure_same_origin, PageFetcher};
use crate::page::{extract_page, FetchedPage};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    /// Redirects followed before the request fails
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("pageswap/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 5,
        }
    }
}

/// Fetches pages over HTTP with a cookie-carrying client bound to one origin.
///
/// No request timeout is set; the transport default applies.
pub struct HttpFetcher {
    client: reqwest::Client,
    origin: Origin,
    container_selector: String,
}

impl HttpFetcher {
    /// Build a fetcher for documents of `base`'s origin.
    pub fn new(base: &Url, container_selector: &str, config: &FetchConfig) -> Result<Self> {
        Selector::parse(container_selector)
            .map_err(|e| FetchError::InvalidSelector(format!("{container_selector}: {e}")))?;

        let origin = base.origin();
        if !origin.is_tuple() {
            return Err(FetchError::InvalidUrl(format!(
                "{base} has an opaque origin"
            )));
        }

        let policy_origin = origin.clone();
        let max_redirects = config.max_redirects;
        let policy = Policy::custom(move |attempt| {
            if attempt.previous().len() >= max_redirects {
                attempt.error("too many redirects")
            } else if attempt.url().origin() != policy_origin {
                attempt.error("redirect leaves the page origin")
            } else {
                attempt.follow()
            }
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(policy)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            origin,
            container_selector: container_selector.to_string(),
        })
    }

    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage> {
        ensure_same_origin(&self.origin, url)?;

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "text/html")
            .send()
            .await?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        extract_page(&body, &self.container_selector)
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<FetchedPage>> {
        Box::pin(async move {
            let result = self.fetch_page(url).await;
            match &result {
                Ok(page) => tracing::debug!(
                    url = %url,
                    bytes = page.content_markup.len(),
                    "Fetched page"
                ),
                Err(e) => tracing::warn!(url = %url, error = %e, "Page fetch failed"),
            }
            result
        })
    }
}
