//! Markup contract
//!
//! Every served document must carry these markers for interception to work:
//! one container element, a navigation list whose anchors opt in with the
//! internal marker, and the class names used for transition state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Selector of the region replaced on every swap
    pub container_selector: String,
    /// Class of the element holding the intercepted navigation anchors
    pub nav_list_class: String,
    /// Attribute that must be `"true"` on anchors eligible for interception
    pub internal_attribute: String,
    /// Attribute that opts a single anchor out of interception
    pub opt_out_attribute: String,
    /// Class toggled on the nav link matching the current path
    pub active_class: String,
    /// Class held by the container while fading out
    pub exit_class: String,
    /// Class held by the container while fading in
    pub enter_class: String,
    /// Class of the busy indicator appended to the body
    pub busy_indicator_class: String,
}

impl Markers {
    /// Selector matching every anchor inside the navigation list.
    pub fn nav_link_selector(&self) -> String {
        format!(".{} a", self.nav_list_class)
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            container_selector: "main".to_string(),
            nav_list_class: "nav-list".to_string(),
            internal_attribute: "data-internal".to_string(),
            opt_out_attribute: "data-no-pjax".to_string(),
            active_class: "active".to_string(),
            exit_class: "fade-out".to_string(),
            enter_class: "fade-in".to_string(),
            busy_indicator_class: "page-loader".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let markers: Markers =
            serde_json::from_str(r##"{"container_selector": "#app"}"##).unwrap();
        assert_eq!(markers.container_selector, "#app");
        assert_eq!(markers.nav_list_class, "nav-list");
        assert_eq!(markers.nav_link_selector(), ".nav-list a");
    }
}
