//! Navigation requests

use tokio::sync::mpsc;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub target_url: Url,
    /// Push a history record once the swap completes
    pub record_in_history: bool,
}

impl NavigationRequest {
    /// A request from a link click: recorded in history.
    pub fn push(target_url: Url) -> Self {
        Self {
            target_url,
            record_in_history: true,
        }
    }

    /// A request replaying a history record: never pushes a duplicate.
    pub fn replay(target_url: Url) -> Self {
        Self {
            target_url,
            record_in_history: false,
        }
    }
}

/// Anything that accepts navigation requests.
pub trait RequestSink: Send + Sync {
    fn submit(&self, request: NavigationRequest);
}

impl RequestSink for mpsc::UnboundedSender<NavigationRequest> {
    fn submit(&self, request: NavigationRequest) {
        if self.send(request).is_err() {
            tracing::warn!("Navigation request dropped, receiver closed");
        }
    }
}
