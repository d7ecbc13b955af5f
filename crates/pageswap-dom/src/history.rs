//! Session history records

use serde::{Deserialize, Serialize};
use url::Url;

/// Payload stored with every history record the engine pushes.
///
/// On back/forward it carries the URL to restore, so the handler never has to
/// re-derive it from the address bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
}

impl HistoryEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Serialized form handed to [`SessionHistory::push_state`].
    pub fn to_state(&self) -> serde_json::Value {
        serde_json::json!({ "url": self.url })
    }

    /// Recover an entry from a popped state, if it has the expected shape.
    pub fn from_state(state: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(state.clone()).ok()
    }
}

pub trait SessionHistory: Send + 'static {
    /// Push a new record carrying `state` and make `url` the current address.
    fn push_state(&mut self, state: serde_json::Value, url: &Url);
}
