//! Transition timing and the busy indicator
//!
//! The stylesheet owns the visual fade; this only sequences the class markers
//! on the container and the lifetime of the busy indicator element.

use std::sync::Arc;
use std::time::Duration;

use pageswap_dom::{Document, Markers, NodeId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

/// Inner markup of the busy indicator element.
pub const BUSY_INDICATOR_HTML: &str = r#"<div class="spinner" aria-hidden="true"></div>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionTiming {
    /// Settle time after the exit marker is set, before fetching
    pub exit_delay_ms: u64,
    /// Time the enter marker stays on the container
    pub enter_delay_ms: u64,
}

impl TransitionTiming {
    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_delay_ms)
    }

    pub fn enter_delay(&self) -> Duration {
        Duration::from_millis(self.enter_delay_ms)
    }
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            exit_delay_ms: 220,
            enter_delay_ms: 360,
        }
    }
}

pub struct TransitionAnimator<D: Document> {
    doc: Arc<Mutex<D>>,
    timing: TransitionTiming,
    exit_class: String,
    enter_class: String,
    busy_class: String,
    /// The one busy indicator on the page, if shown. Locked after the
    /// document, never before.
    busy: Mutex<Option<NodeId>>,
    /// Pending removal of the enter marker
    enter_timer: Mutex<Option<JoinHandle<()>>>,
}

impl<D: Document> TransitionAnimator<D> {
    pub fn new(doc: Arc<Mutex<D>>, markers: &Markers, timing: TransitionTiming) -> Self {
        Self {
            doc,
            timing,
            exit_class: markers.exit_class.clone(),
            enter_class: markers.enter_class.clone(),
            busy_class: markers.busy_indicator_class.clone(),
            busy: Mutex::new(None),
            enter_timer: Mutex::new(None),
        }
    }

    pub fn timing(&self) -> TransitionTiming {
        self.timing
    }

    /// Show the busy indicator. Returns false if it was already shown.
    pub fn show(&self) -> bool {
        let mut doc = self.doc.lock();
        self.show_on(&mut *doc)
    }

    /// [`TransitionAnimator::show`] for a caller already holding the document.
    pub fn show_on(&self, doc: &mut D) -> bool {
        let mut busy = self.busy.lock();
        if busy.is_some() {
            return false;
        }
        *busy = Some(doc.append_body_element(&self.busy_class, BUSY_INDICATOR_HTML));
        true
    }

    /// Remove the busy indicator. Returns false if none was shown.
    pub fn hide(&self) -> bool {
        let mut doc = self.doc.lock();
        self.hide_on(&mut *doc)
    }

    pub fn hide_on(&self, doc: &mut D) -> bool {
        let Some(node) = self.busy.lock().take() else {
            return false;
        };
        doc.remove_body_element(node);
        true
    }

    pub fn is_busy(&self) -> bool {
        self.busy.lock().is_some()
    }

    /// Set the exit marker and wait out the settle delay.
    pub async fn begin_exit(&self) {
        {
            let mut doc = self.doc.lock();
            self.mark_exit(&mut *doc);
        }
        self.settle().await;
    }

    /// Set the exit marker, dropping any enter marker and its pending clear.
    pub fn mark_exit(&self, doc: &mut D) {
        self.cancel_enter_timer();
        doc.remove_container_class(&self.enter_class);
        doc.add_container_class(&self.exit_class);
    }

    /// Wait out the exit settle delay.
    pub async fn settle(&self) {
        tokio::time::sleep(self.timing.exit_delay()).await;
    }

    /// Swap the exit marker for the enter marker and clear it after the enter
    /// delay, without waiting. A later exit cancels the pending clear.
    pub fn begin_enter(&self) {
        let mut doc = self.doc.lock();
        self.begin_enter_on(&mut *doc);
    }

    pub fn begin_enter_on(&self, doc: &mut D) {
        doc.remove_container_class(&self.exit_class);
        doc.add_container_class(&self.enter_class);

        let shared = Arc::clone(&self.doc);
        let enter_class = self.enter_class.clone();
        let delay = self.timing.enter_delay();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.lock().remove_container_class(&enter_class);
        });

        if let Some(previous) = self.enter_timer.lock().replace(handle) {
            previous.abort();
        }
    }

    fn cancel_enter_timer(&self) {
        if let Some(timer) = self.enter_timer.lock().take() {
            timer.abort();
        }
    }
}

impl<D: Document> Drop for TransitionAnimator<D> {
    fn drop(&mut self) {
        self.cancel_enter_timer();
    }
}
