//! DOM events the engine listens to

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Snapshot of one element on a click's propagation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    /// Lowercase tag name
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
}

impl ElementInfo {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

/// A click activation, described by its path from the target up to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    path: Vec<ElementInfo>,
    default_prevented: bool,
}

impl ClickEvent {
    /// `path[0]` is the clicked element, the last entry is the outermost ancestor.
    pub fn new(path: Vec<ElementInfo>) -> Self {
        Self {
            path,
            default_prevented: false,
        }
    }

    pub fn path(&self) -> &[ElementInfo] {
        &self.path
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A back/forward traversal, with the state stored on the restored record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PopStateEvent {
    pub state: Option<serde_json::Value>,
}
