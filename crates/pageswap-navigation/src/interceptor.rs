//! Link and history interception

use pageswap_dom::{ClickEvent, ElementInfo, HistoryEntry, Markers, PopStateEvent};
use url::Url;

use crate::request::{NavigationRequest, RequestSink};

/// Turns qualifying clicks and back/forward traversals into navigation
/// requests. It never touches the document or history itself.
pub struct LinkInterceptor<S: RequestSink> {
    sink: S,
    markers: Markers,
}

impl<S: RequestSink> LinkInterceptor<S> {
    pub fn new(sink: S, markers: Markers) -> Self {
        Self { sink, markers }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The request a click should produce, or `None` to let the browser
    /// handle it.
    pub fn classify(&self, event: &ClickEvent, location: &Url) -> Option<NavigationRequest> {
        let path = event.path();
        let anchor_index = path.iter().position(|el| el.tag == "a")?;
        let anchor = &path[anchor_index];

        if self.is_excluded(anchor) {
            return None;
        }

        let href = anchor.attr("href")?;
        let internal = anchor.attr(&self.markers.internal_attribute) == Some("true");
        let in_nav_list = path[anchor_index + 1..]
            .iter()
            .any(|el| el.has_class(&self.markers.nav_list_class));
        if !internal || !in_nav_list {
            return None;
        }

        match location.join(href) {
            Ok(target) => Some(NavigationRequest::push(target)),
            Err(e) => {
                tracing::debug!(href = %href, error = %e, "Leaving unresolvable link to the browser");
                None
            }
        }
    }

    fn is_excluded(&self, anchor: &ElementInfo) -> bool {
        anchor
            .attr("target")
            .map(|t| t.eq_ignore_ascii_case("_blank"))
            .unwrap_or(false)
            || anchor.has_attr("download")
            || anchor
                .attr("href")
                .map(|href| href.starts_with('#'))
                .unwrap_or(false)
            || anchor.has_attr(&self.markers.opt_out_attribute)
    }

    /// Handle a click. Returns true if it was intercepted, in which case the
    /// event's default action has been prevented.
    pub fn on_click(&self, event: &mut ClickEvent, location: &Url) -> bool {
        let Some(request) = self.classify(event, location) else {
            return false;
        };

        event.prevent_default();
        tracing::debug!(url = %request.target_url, "Intercepted link click");
        self.sink.submit(request);
        true
    }

    /// Handle a back/forward traversal. The URL comes from the restored
    /// record's state, or from the current path for records this engine did
    /// not create.
    pub fn on_pop_state(&self, event: &PopStateEvent, location: &Url) {
        let url = event
            .state
            .as_ref()
            .and_then(HistoryEntry::from_state)
            .map(|entry| entry.url)
            .unwrap_or_else(|| location.path().to_string());

        match location.join(&url) {
            Ok(target) => {
                tracing::debug!(url = %target, "Replaying history record");
                self.sink.submit(NavigationRequest::replay(target));
            }
            Err(e) => tracing::warn!(url = %url, error = %e, "Ignoring unparseable history record"),
        }
    }
}
