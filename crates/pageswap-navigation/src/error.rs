//! Navigation error types

use pageswap_fetch::FetchError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Container element not found")]
    MissingContainer,

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

/// A post-swap hook that did not complete. Never fatal to a transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HookError {
    #[error("Hook '{name}' failed: {message}")]
    Failed { name: String, message: String },

    #[error("Hook '{name}' panicked")]
    Panicked { name: String },
}

impl HookError {
    pub fn hook_name(&self) -> &str {
        match self {
            HookError::Failed { name, .. } | HookError::Panicked { name } => name,
        }
    }
}
