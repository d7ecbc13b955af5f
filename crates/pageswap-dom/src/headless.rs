//! Headless page
//!
//! An in-memory [`Document`] + [`SessionHistory`] built from real HTML. It keeps
//! only the state the navigation engine can observe, and records the effects a
//! browser would produce (script execution, hard loads) so they can be checked.

use std::collections::{BTreeMap, BTreeSet};

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::document::{Document, NavLink, NodeId, ScriptElement};
use crate::error::DomError;
use crate::event::{ClickEvent, ElementInfo, PopStateEvent};
use crate::history::SessionHistory;
use crate::markers::Markers;
use crate::Result;

#[derive(Debug, Clone)]
struct ContainerState {
    html: String,
    classes: BTreeSet<String>,
    tabindex: Option<String>,
    focused: bool,
}

#[derive(Debug, Clone)]
struct BodyElement {
    class: String,
    inner_html: String,
}

#[derive(Debug, Clone)]
struct HistoryRecord {
    state: Option<serde_json::Value>,
    url: Url,
}

#[derive(Debug, Clone)]
pub struct HeadlessPage {
    markers: Markers,
    /// Source of the initially loaded document; `scraper::Html` is not `Send`,
    /// so it is re-parsed on demand.
    source: String,
    location: Url,
    title: String,
    container: Option<ContainerState>,
    nav_links: Vec<NavLink>,
    body_elements: BTreeMap<NodeId, BodyElement>,
    next_node: u64,
    executed_scripts: Vec<ScriptElement>,
    hard_navigations: Vec<Url>,
    history: Vec<HistoryRecord>,
    history_index: usize,
}

impl HeadlessPage {
    /// Load `html` as the document shown at `url`.
    pub fn parse(url: Url, html: &str, markers: Markers) -> Result<Self> {
        let container_sel = parse_selector(&markers.container_selector)?;
        let nav_sel = parse_selector(&markers.nav_link_selector())?;
        let title_sel = parse_selector("title")?;

        let doc = Html::parse_document(html);

        let title = doc
            .select(&title_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let container = doc.select(&container_sel).next().map(|el| ContainerState {
            html: el.inner_html(),
            classes: el.value().classes().map(str::to_string).collect(),
            tabindex: el.value().attr("tabindex").map(str::to_string),
            focused: false,
        });

        let nav_links = doc
            .select(&nav_sel)
            .map(|a| NavLink {
                href: a.value().attr("href").unwrap_or_default().to_string(),
                active: a.value().classes().any(|c| c == markers.active_class),
            })
            .collect();

        tracing::debug!(
            url = %url,
            has_container = container.is_some(),
            "Loaded headless page"
        );

        Ok(Self {
            markers,
            source: html.to_string(),
            location: url.clone(),
            title,
            container,
            nav_links,
            body_elements: BTreeMap::new(),
            next_node: 1,
            executed_scripts: Vec::new(),
            hard_navigations: Vec::new(),
            history: vec![HistoryRecord { state: None, url }],
            history_index: 0,
        })
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Build the click event a user would produce by activating the first
    /// element matching `selector`. Content inside the container is searched
    /// first, then the rest of the document.
    pub fn click_event(&self, selector: &str) -> Result<Option<ClickEvent>> {
        let sel = parse_selector(selector)?;
        let container_sel = parse_selector(&self.markers.container_selector)?;
        let doc = Html::parse_document(&self.source);
        let container_el = doc.select(&container_sel).next();

        if let (Some(state), Some(container_el)) = (&self.container, container_el) {
            let fragment = Html::parse_fragment(&state.html);
            if let Some(target) = fragment.select(&sel).next() {
                let mut path = vec![element_info(&target)];
                path.extend(
                    target
                        .ancestors()
                        .filter_map(ElementRef::wrap)
                        .take_while(|el| el.value().name() != "html")
                        .map(|el| element_info(&el)),
                );
                path.push(element_info(&container_el));
                path.extend(
                    container_el
                        .ancestors()
                        .filter_map(ElementRef::wrap)
                        .map(|el| element_info(&el)),
                );
                return Ok(Some(ClickEvent::new(path)));
            }
        }

        let container_id = container_el.map(|el| el.id());
        let target = doc.select(&sel).find(|el| match container_id {
            Some(id) => !el.ancestors().any(|node| node.id() == id),
            None => true,
        });

        Ok(target.map(|target| {
            let mut path = vec![element_info(&target)];
            path.extend(
                target
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .map(|el| element_info(&el)),
            );
            ClickEvent::new(path)
        }))
    }

    /// Traverse one record back, as the browser back button would.
    pub fn go_back(&mut self) -> Option<PopStateEvent> {
        if self.history_index == 0 {
            return None;
        }
        self.history_index -= 1;
        Some(self.restore_current())
    }

    pub fn go_forward(&mut self) -> Option<PopStateEvent> {
        if self.history_index + 1 >= self.history.len() {
            return None;
        }
        self.history_index += 1;
        Some(self.restore_current())
    }

    fn restore_current(&mut self) -> PopStateEvent {
        let record = &self.history[self.history_index];
        self.location = record.url.clone();
        PopStateEvent {
            state: record.state.clone(),
        }
    }

    /// Number of records in the session history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// States of all records, oldest first.
    pub fn history_states(&self) -> Vec<Option<serde_json::Value>> {
        self.history.iter().map(|r| r.state.clone()).collect()
    }

    pub fn container_classes(&self) -> Vec<String> {
        self.container
            .as_ref()
            .map(|c| c.classes.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn container_has_class(&self, class: &str) -> bool {
        self.container
            .as_ref()
            .map(|c| c.classes.contains(class))
            .unwrap_or(false)
    }

    pub fn container_tabindex(&self) -> Option<&str> {
        self.container.as_ref().and_then(|c| c.tabindex.as_deref())
    }

    pub fn is_container_focused(&self) -> bool {
        self.container.as_ref().map(|c| c.focused).unwrap_or(false)
    }

    /// Number of body elements carrying `class`.
    pub fn body_elements_with_class(&self, class: &str) -> usize {
        self.body_elements
            .values()
            .filter(|el| el.class == class)
            .count()
    }

    /// Inner markup of a body element appended by the engine.
    pub fn body_element_html(&self, node: NodeId) -> Option<&str> {
        self.body_elements.get(&node).map(|el| el.inner_html.as_str())
    }

    /// Scripts the browser would have executed, in execution order.
    pub fn executed_scripts(&self) -> &[ScriptElement] {
        &self.executed_scripts
    }

    /// Full page loads requested so far.
    pub fn hard_navigations(&self) -> &[Url] {
        &self.hard_navigations
    }

    /// Hrefs of nav links currently carrying the active marker.
    pub fn active_nav_hrefs(&self) -> Vec<String> {
        self.nav_links
            .iter()
            .filter(|link| link.active)
            .map(|link| link.href.clone())
            .collect()
    }
}

impl Document for HeadlessPage {
    fn location(&self) -> &Url {
        &self.location
    }

    fn has_container(&self) -> bool {
        self.container.is_some()
    }

    fn container_html(&self) -> Option<String> {
        self.container.as_ref().map(|c| c.html.clone())
    }

    fn set_container_html(&mut self, markup: &str) {
        if let Some(container) = self.container.as_mut() {
            container.html = markup.to_string();
        }
    }

    fn container_scripts(&self) -> Vec<ScriptElement> {
        let Some(container) = self.container.as_ref() else {
            return Vec::new();
        };
        let Ok(sel) = Selector::parse("script") else {
            return Vec::new();
        };

        Html::parse_fragment(&container.html)
            .select(&sel)
            .map(|el| ScriptElement {
                src: el.value().attr("src").map(str::to_string),
                text: el.text().collect(),
                is_async: el.value().attr("async").is_some(),
            })
            .collect()
    }

    fn replace_container_script(&mut self, index: usize, script: ScriptElement) {
        if index >= self.container_scripts().len() {
            tracing::warn!(index, "Script replacement out of range");
            return;
        }
        tracing::trace!(index, src = ?script.src, "Executing replaced script");
        self.executed_scripts.push(script);
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn nav_links(&self) -> Vec<NavLink> {
        self.nav_links.clone()
    }

    fn set_nav_link_active(&mut self, index: usize, active: bool) {
        if let Some(link) = self.nav_links.get_mut(index) {
            link.active = active;
        }
    }

    fn add_container_class(&mut self, class: &str) {
        if let Some(container) = self.container.as_mut() {
            container.classes.insert(class.to_string());
        }
    }

    fn remove_container_class(&mut self, class: &str) {
        if let Some(container) = self.container.as_mut() {
            container.classes.remove(class);
        }
    }

    fn focus_container(&mut self) {
        if let Some(container) = self.container.as_mut() {
            container.tabindex = Some("-1".to_string());
            container.focused = true;
        }
    }

    fn append_body_element(&mut self, class: &str, inner_html: &str) -> NodeId {
        let node = NodeId(self.next_node);
        self.next_node += 1;
        self.body_elements.insert(
            node,
            BodyElement {
                class: class.to_string(),
                inner_html: inner_html.to_string(),
            },
        );
        node
    }

    fn remove_body_element(&mut self, node: NodeId) {
        self.body_elements.remove(&node);
    }

    fn navigate_hard(&mut self, url: &Url) {
        tracing::debug!(url = %url, "Full page load");
        self.hard_navigations.push(url.clone());
        self.location = url.clone();
    }
}

impl SessionHistory for HeadlessPage {
    fn push_state(&mut self, state: serde_json::Value, url: &Url) {
        self.history.truncate(self.history_index + 1);
        self.history.push(HistoryRecord {
            state: Some(state),
            url: url.clone(),
        });
        self.history_index = self.history.len() - 1;
        self.location = url.clone();
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| DomError::InvalidSelector(format!("{selector}: {e}")))
}

fn element_info(el: &ElementRef<'_>) -> ElementInfo {
    let mut info = ElementInfo::new(el.value().name());
    for (name, value) in el.value().attrs() {
        info.attributes.insert(name.to_string(), value.to_string());
    }
    info
}
