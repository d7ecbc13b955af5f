//! Document surface used by the navigation engine

use serde::{Deserialize, Serialize};
use url::Url;

/// Opaque handle to an element the engine appended to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// A `<script>` element inside the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptElement {
    /// External resource reference, if any
    pub src: Option<String>,
    /// Inline source text
    pub text: String,
    /// Whether the script may run out of order
    pub is_async: bool,
}

impl ScriptElement {
    /// External script that runs in insertion order relative to its siblings.
    pub fn external(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            text: String::new(),
            is_async: false,
        }
    }

    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            src: None,
            text: text.into(),
            is_async: false,
        }
    }
}

/// An anchor inside the navigation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Raw `href` attribute, possibly relative
    pub href: String,
    /// Whether the active marker is currently set
    pub active: bool,
}

/// The parts of a browser document the navigation engine reads and writes.
///
/// Implementations are driven from one task at a time (the engine holds a lock
/// around every call sequence), so methods take `&mut self` freely.
pub trait Document: Send + 'static {
    /// Address currently shown for this document.
    fn location(&self) -> &Url;

    /// Whether the designated container element exists.
    fn has_container(&self) -> bool;

    /// Current inner markup of the container, `None` when it is absent.
    fn container_html(&self) -> Option<String>;

    /// Replace the container's inner markup. Scripts inserted this way are inert.
    fn set_container_html(&mut self, markup: &str);

    /// Script elements inside the container, in document order.
    fn container_scripts(&self) -> Vec<ScriptElement>;

    /// Replace the script at `index` (as returned by [`Document::container_scripts`])
    /// with a freshly created element, which the browser executes on insertion.
    fn replace_container_script(&mut self, index: usize, script: ScriptElement);

    fn title(&self) -> &str;

    fn set_title(&mut self, title: &str);

    /// Anchors inside the navigation list, in document order.
    fn nav_links(&self) -> Vec<NavLink>;

    fn set_nav_link_active(&mut self, index: usize, active: bool);

    fn add_container_class(&mut self, class: &str);

    fn remove_container_class(&mut self, class: &str);

    /// Make the container programmatically focusable (`tabindex="-1"`) and focus it.
    fn focus_container(&mut self);

    /// Append an element with the given class and inner markup to the body.
    fn append_body_element(&mut self, class: &str, inner_html: &str) -> NodeId;

    /// Remove an element previously returned by [`Document::append_body_element`].
    fn remove_body_element(&mut self, node: NodeId);

    /// Perform a full, non-intercepted page load of `url`.
    fn navigate_hard(&mut self, url: &Url);
}
