//! Fetch error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Cross-origin request refused: {0}")]
    CrossOrigin(String),

    #[error("Invalid container selector: {0}")]
    InvalidSelector(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Network error ({kind}): {message}")]
    Network { kind: String, message: String },

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        let message = e.to_string();
        let mut kind = if e.is_timeout() {
            "timeout"
        } else if e.is_redirect() {
            "redirect"
        } else if e.is_connect() {
            "connect"
        } else if e.is_request() {
            "request"
        } else {
            "unknown"
        }
        .to_string();

        if kind == "connect" {
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                kind = "dns".to_string();
            } else if lowered.contains("tls") || lowered.contains("certificate") {
                kind = "tls".to_string();
            }
        }

        FetchError::Network { kind, message }
    }
}
