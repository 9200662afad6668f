//! In-memory `DomPage` used by tests and the demo binary.
//!
//! Elements are flat (no tree); interactions are recorded as [`PageEffect`]s
//! so callers can assert on what the engine did to the page.

use crate::page::{DomPage, NodeId, ScrollTarget};
use crate::selector::Selector;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Element description used to populate a [`MemoryPage`].
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: HashMap<String, String>,
    text: String,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }
}

/// Side effects applied to the page, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEffect {
    Clicked(NodeId),
    Focused(NodeId),
    ValueSet(NodeId, String),
    CheckedSet(NodeId, bool),
    ChangeFired(NodeId),
    OptionsOpened(NodeId),
    FormSubmitted(NodeId),
    MediaPlayed(NodeId),
    MediaPaused(NodeId),
    Navigated(String),
    WentBack,
    Reloaded,
    ScrolledBy(i32),
    ScrolledTo(ScrollTarget),
}

struct NodeData {
    element: Element,
    attached: bool,
}

struct Inner {
    nodes: Vec<NodeData>,
    effects: Vec<PageEffect>,
    location: String,
}

pub struct MemoryPage {
    inner: Mutex<Inner>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                nodes: Vec::new(),
                effects: Vec::new(),
                location: "/".to_string(),
            }),
        }
    }

    /// Appends an element in document order.
    pub fn insert(&self, element: Element) -> NodeId {
        let mut inner = self.inner.lock();
        inner.nodes.push(NodeData {
            element,
            attached: true,
        });
        NodeId(inner.nodes.len() as u64 - 1)
    }

    /// Detaches an element; its handle stays valid but inert.
    pub fn detach(&self, node: NodeId) {
        let mut inner = self.inner.lock();
        if let Some(data) = inner.nodes.get_mut(node.0 as usize) {
            data.attached = false;
        }
    }

    pub fn effects(&self) -> Vec<PageEffect> {
        self.inner.lock().effects.clone()
    }

    pub fn clear_effects(&self) {
        self.inner.lock().effects.clear();
    }

    pub fn location(&self) -> String {
        self.inner.lock().location.clone()
    }

    fn record(&self, effect: PageEffect) {
        self.inner.lock().effects.push(effect);
    }

    /// Applies `f` to an attached node, recording the effect it returns.
    fn interact(&self, node: NodeId, f: impl FnOnce(&Element) -> Vec<PageEffect>) -> bool {
        let mut inner = self.inner.lock();
        let Some(data) = inner.nodes.get(node.0 as usize) else {
            return false;
        };
        if !data.attached {
            return false;
        }
        let effects = f(&data.element);
        inner.effects.extend(effects);
        true
    }
}

impl DomPage for MemoryPage {
    fn query(&self, selector: &str) -> Option<NodeId> {
        let hit = self.query_all(selector).into_iter().next();
        if hit.is_none() {
            tracing::debug!("no element matches {selector:?}");
        }
        hit
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let selectors = Selector::parse_list(selector);
        if selectors.is_empty() {
            return Vec::new();
        }
        let inner = self.inner.lock();
        inner
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, data)| data.attached)
            .filter(|(_, data)| {
                let el = &data.element;
                selectors.iter().any(|sel| {
                    sel.matches(&el.tag, el.id.as_deref(), &el.classes, |name| {
                        el.attrs.get(name).cloned()
                    })
                })
            })
            .map(|(idx, _)| NodeId(idx as u64))
            .collect()
    }

    fn text(&self, node: NodeId) -> Option<String> {
        let inner = self.inner.lock();
        inner
            .nodes
            .get(node.0 as usize)
            .filter(|data| data.attached)
            .map(|data| data.element.text.clone())
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        let inner = self.inner.lock();
        let data = inner.nodes.get(node.0 as usize)?;
        if !data.attached {
            return None;
        }
        if name == "id" {
            return data.element.id.clone();
        }
        data.element.attrs.get(name).cloned()
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let inner = self.inner.lock();
        inner
            .nodes
            .get(node.0 as usize)
            .is_some_and(|data| data.attached)
    }

    fn click(&self, node: NodeId) -> bool {
        let mut inner = self.inner.lock();
        let Some(data) = inner.nodes.get(node.0 as usize) else {
            return false;
        };
        if !data.attached {
            return false;
        }
        // Clicking a link follows its href, like a real anchor.
        let href = (data.element.tag == "a")
            .then(|| data.element.attrs.get("href").cloned())
            .flatten();
        inner.effects.push(PageEffect::Clicked(node));
        if let Some(href) = href {
            inner.location.clone_from(&href);
            inner.effects.push(PageEffect::Navigated(href));
        }
        true
    }

    fn focus(&self, node: NodeId) -> bool {
        self.interact(node, |_| vec![PageEffect::Focused(node)])
    }

    fn set_value(&self, node: NodeId, value: &str) -> bool {
        let value = value.to_string();
        self.interact(node, |_| vec![PageEffect::ValueSet(node, value)])
    }

    fn set_checked(&self, node: NodeId, checked: bool) -> bool {
        self.interact(node, |_| {
            vec![
                PageEffect::CheckedSet(node, checked),
                PageEffect::ChangeFired(node),
            ]
        })
    }

    fn open_options(&self, node: NodeId) -> bool {
        self.interact(node, |_| {
            vec![PageEffect::Focused(node), PageEffect::OptionsOpened(node)]
        })
    }

    fn submit_enclosing_form(&self, node: NodeId) -> bool {
        self.interact(node, |_| vec![PageEffect::FormSubmitted(node)])
    }

    fn play_media(&self, node: NodeId) -> bool {
        self.interact(node, |_| vec![PageEffect::MediaPlayed(node)])
    }

    fn pause_media(&self, node: NodeId) -> bool {
        self.interact(node, |_| vec![PageEffect::MediaPaused(node)])
    }

    fn navigate(&self, path: &str) {
        let mut inner = self.inner.lock();
        inner.location = path.to_string();
        inner.effects.push(PageEffect::Navigated(path.to_string()));
    }

    fn history_back(&self) {
        self.record(PageEffect::WentBack);
    }

    fn reload(&self) {
        self.record(PageEffect::Reloaded);
    }

    fn scroll_by(&self, delta_y: i32) {
        self.record(PageEffect::ScrolledBy(delta_y));
    }

    fn scroll_to(&self, target: ScrollTarget) {
        self.record(PageEffect::ScrolledTo(target));
    }
}
