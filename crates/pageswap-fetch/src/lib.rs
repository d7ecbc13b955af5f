//! pageswap Page Fetcher
//!
//! Retrieves a document in the background and keeps only what a swap needs:
//! - the inner markup of the container element
//! - the document title
//!
//! Requests are credentialed and restricted to the origin of the current page.

mod error;
mod fetcher;
mod http;
mod page;

pub use error::FetchError;
pub use fetcher::{PageFetcher, StaticFetcher};
pub use http::{FetchConfig, HttpFetcher};
pub use page::{extract_page, FetchedPage};

pub type Result<T> = std::result::Result<T, FetchError>;
