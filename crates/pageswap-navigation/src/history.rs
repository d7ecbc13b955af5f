//! History and active-link synchronization

use pageswap_dom::{Document, HistoryEntry, SessionHistory};
use url::Url;

/// Keeps session history records and the nav list's active marker in line
/// with the content on display.
#[derive(Debug, Clone)]
pub struct HistoryBridge {
    active_class: String,
}

impl HistoryBridge {
    pub fn new(active_class: impl Into<String>) -> Self {
        Self {
            active_class: active_class.into(),
        }
    }

    pub fn active_class(&self) -> &str {
        &self.active_class
    }

    /// Push a `{url}` record only when asked. Back/forward replays pass
    /// `false` so they never duplicate the record they came from.
    pub fn record_if_requested<H: SessionHistory + ?Sized>(
        &self,
        history: &mut H,
        url: &Url,
        should_record: bool,
    ) -> bool {
        if !should_record {
            return false;
        }
        history.push_state(HistoryEntry::new(url.as_str()).to_state(), url);
        tracing::debug!(url = %url, "Pushed history record");
        true
    }

    /// Mark the nav links whose path equals `url`'s path as active and clear
    /// the marker everywhere else. Query and fragment are ignored; relative
    /// hrefs resolve against the document location.
    pub fn sync_active_link<D: Document + ?Sized>(&self, doc: &mut D, url: &Url) {
        let target = url.path().to_string();
        let base = doc.location().clone();

        for (index, link) in doc.nav_links().into_iter().enumerate() {
            let href = match base.join(&link.href) {
                Ok(href) => href,
                Err(e) => {
                    tracing::debug!(href = %link.href, error = %e, "Skipping unparseable nav link");
                    continue;
                }
            };
            let active = href.path() == target;
            if active != link.active {
                doc.set_nav_link_active(index, active);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{page, url};

    #[test]
    fn test_sync_round_trip() {
        let mut doc = page();
        let bridge = HistoryBridge::new("active");

        bridge.sync_active_link(&mut doc, &url("/events"));
        assert_eq!(doc.active_nav_hrefs(), vec!["/events".to_string()]);

        bridge.sync_active_link(&mut doc, &url("/"));
        assert_eq!(doc.active_nav_hrefs(), vec!["/".to_string()]);
    }

    #[test]
    fn test_sync_ignores_query_and_fragment() {
        let mut doc = page();
        let bridge = HistoryBridge::new("active");

        bridge.sync_active_link(&mut doc, &url("/about?tab=team#history"));
        assert_eq!(
            doc.active_nav_hrefs(),
            vec!["https://site.test/about".to_string()]
        );
    }

    #[test]
    fn test_sync_unknown_path_clears_all() {
        let mut doc = page();
        HistoryBridge::new("active").sync_active_link(&mut doc, &url("/nowhere"));
        assert!(doc.active_nav_hrefs().is_empty());
    }

    #[test]
    fn test_record_only_when_requested() {
        let mut doc = page();
        let bridge = HistoryBridge::new("active");

        assert!(!bridge.record_if_requested(&mut doc, &url("/events"), false));
        assert_eq!(doc.history_len(), 1);

        assert!(bridge.record_if_requested(&mut doc, &url("/events"), true));
        assert_eq!(doc.history_len(), 2);
        let state = doc.history_states().pop().flatten().unwrap();
        assert_eq!(state, serde_json::json!({ "url": "https://site.test/events" }));
        assert_eq!(doc.location().path(), "/events");
    }
}
