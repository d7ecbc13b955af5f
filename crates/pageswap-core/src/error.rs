//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Document error: {0}")]
    Dom(#[from] pageswap_dom::DomError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] pageswap_fetch::FetchError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] pageswap_navigation::NavigationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
