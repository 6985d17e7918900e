#![forbid(unsafe_code)]

//! Arena-backed page implementing [`Surface`].
//!
//! # Invariants
//!
//! 1. Node 0 is `body`; queries walk the tree from it in document order, so
//!    detached nodes never match.
//! 2. Dispatch clones the matching handlers out of the registry before
//!    calling any of them. Handlers may add listeners, mutate the tree, or
//!    dispatch again.
//! 3. Click, submit, and keydown bubble from the target through its
//!    ancestors to the document and window; focus and blur do not.
//! 4. Only inline styles exist. `style(node, "display")` reports what a
//!    component (or the markup) set, nothing computed.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use vista_core::{
    Clock, EventFlow, EventKind, Handler, Matchable, ScrollBehavior, Selector, Surface,
    Target, UiError, UiEvent, VisibilityCallback, VisibilityEntry, VisibilityOptions, WatchFlow,
};

use crate::clock::FakeClock;

/// Handle to an element in a [`MemorySurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const BODY: NodeId = NodeId(0);

// ---------------------------------------------------------------------------
// Markup builder
// ---------------------------------------------------------------------------

/// Declarative element for mounting into a [`MemorySurface`].
#[derive(Debug, Clone, Default)]
pub struct El {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    offset_top: f64,
    children: Vec<El>,
}

impl El {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Add one or more space-separated classes.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        match self.attrs.iter_mut().find(|(k, _)| k == "class") {
            Some((_, existing)) => {
                existing.push(' ');
                existing.push_str(class);
            }
            None => self.attrs.push(("class".into(), class.into())),
        }
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.retain(|(k, _)| k != name);
        self.attrs.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_owned();
        self
    }

    /// Layout offset reported by [`Surface::offset_top`].
    #[must_use]
    pub fn offset_top(mut self, top: f64) -> Self {
        self.offset_top = top;
        self
    }

    #[must_use]
    pub fn child(mut self, child: El) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = El>) -> Self {
        self.children.extend(children);
        self
    }
}

// ---------------------------------------------------------------------------
// Arena
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    default_value: String,
    offset_top: f64,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl Element {
    fn classes(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .get("class")
            .map(String::as_str)
            .unwrap_or_default()
            .split_whitespace()
    }

    fn set_classes<'a>(&mut self, classes: impl IntoIterator<Item = &'a str>) {
        let joined = classes.into_iter().collect::<Vec<_>>().join(" ");
        self.attrs.insert("class".into(), joined);
    }

    fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "select" | "textarea")
    }
}

impl Matchable for Element {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

struct Listener {
    target: Target<NodeId>,
    kind: EventKind,
    handler: Handler<NodeId>,
}

struct Observer {
    targets: Vec<NodeId>,
    options: VisibilityOptions,
    callback: VisibilityCallback<NodeId>,
}

/// A window-open request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedWindow {
    pub url: String,
    pub target: String,
    pub features: Option<String>,
}

/// In-memory page.
pub struct MemorySurface {
    clock: FakeClock,
    nodes: RefCell<Vec<Element>>,
    listeners: RefCell<Vec<Listener>>,
    observers: RefCell<Vec<Observer>>,
    storage: RefCell<BTreeMap<String, String>>,
    storage_writable: Cell<bool>,
    scroll_y: Cell<f64>,
    scroll_requests: RefCell<Vec<(f64, ScrollBehavior)>>,
    opened: RefCell<Vec<OpenedWindow>>,
    prints: Cell<usize>,
}

impl MemorySurface {
    /// Empty page: a lone `body`, empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: FakeClock::new(),
            nodes: RefCell::new(vec![Element {
                tag: "body".into(),
                ..Element::default()
            }]),
            listeners: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
            storage: RefCell::new(BTreeMap::new()),
            storage_writable: Cell::new(true),
            scroll_y: Cell::new(0.0),
            scroll_requests: RefCell::new(Vec::new()),
            opened: RefCell::new(Vec::new()),
            prints: Cell::new(0),
        }
    }

    /// Empty page whose storage already holds `entries` (a returning visitor).
    #[must_use]
    pub fn with_storage<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let surface = Self::new();
        surface.storage.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned())),
        );
        surface
    }

    /// Append `markup` to `body`.
    pub fn mount(&self, markup: El) -> NodeId {
        self.build(markup, Some(BODY.0))
    }

    fn build(&self, markup: El, parent: Option<usize>) -> NodeId {
        let index = {
            let mut nodes = self.nodes.borrow_mut();
            let value = markup
                .attrs
                .iter()
                .find(|(k, _)| k == "value")
                .map(|(_, v)| v.clone())
                .unwrap_or_default();
            nodes.push(Element {
                tag: markup.tag,
                attrs: markup.attrs.into_iter().collect(),
                text: markup.text,
                default_value: value.clone(),
                value,
                offset_top: markup.offset_top,
                parent,
                ..Element::default()
            });
            let index = nodes.len() - 1;
            if let Some(parent) = parent {
                nodes[parent].children.push(index);
            }
            index
        };
        for child in markup.children {
            self.build(child, Some(index));
        }
        NodeId(index)
    }

    // --- Tree walking ---

    fn descendants(&self, root: usize) -> Vec<usize> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<usize> = nodes[root].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(nodes[next].children.iter().rev().copied());
        }
        out
    }

    fn matching(&self, candidates: Vec<usize>, selector: &Selector) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        candidates
            .into_iter()
            .filter(|&i| selector.matches(&nodes[i]))
            .map(NodeId)
            .collect()
    }

    fn detach(nodes: &mut [Element], child: usize) {
        if let Some(parent) = nodes[child].parent.take() {
            nodes[parent].children.retain(|&c| c != child);
        }
    }

    fn with<R>(&self, node: &NodeId, f: impl FnOnce(&Element) -> R) -> R {
        f(&self.nodes.borrow()[node.0])
    }

    fn with_mut<R>(&self, node: &NodeId, f: impl FnOnce(&mut Element) -> R) -> R {
        f(&mut self.nodes.borrow_mut()[node.0])
    }

    // --- Event dispatch ---

    fn bubbles(kind: EventKind) -> bool {
        matches!(kind, EventKind::Click | EventKind::Submit | EventKind::KeyDown)
    }

    fn propagation_path(&self, event: &UiEvent<NodeId>) -> Vec<Target<NodeId>> {
        let mut path = Vec::new();
        match event.target {
            Some(node) => {
                path.push(Target::Node(node));
                if !Self::bubbles(event.kind) {
                    return path;
                }
                let mut cursor = node;
                while let Some(parent) = self.parent(&cursor) {
                    path.push(Target::Node(parent));
                    cursor = parent;
                }
                path.push(Target::Document);
                path.push(Target::Window);
            }
            None if event.kind == EventKind::KeyDown => {
                path.push(Target::Document);
                path.push(Target::Window);
            }
            None => path.push(Target::Window),
        }
        path
    }

    /// Deliver `event` along its propagation path. Returns whether any
    /// handler asked to prevent the default action.
    pub fn dispatch(&self, event: &UiEvent<NodeId>) -> bool {
        let mut prevented = false;
        for target in self.propagation_path(event) {
            let handlers: Vec<Handler<NodeId>> = self
                .listeners
                .borrow()
                .iter()
                .filter(|l| l.kind == event.kind && l.target == target)
                .map(|l| Rc::clone(&l.handler))
                .collect();
            for handler in handlers {
                if handler(event) == EventFlow::PreventDefault {
                    prevented = true;
                }
            }
        }
        prevented
    }

    /// Click `node`. Returns whether the default action was prevented.
    pub fn click(&self, node: NodeId) -> bool {
        self.dispatch(&UiEvent::new(EventKind::Click).with_target(node))
    }

    /// Submit `form`. Returns whether submission was prevented.
    pub fn submit(&self, form: NodeId) -> bool {
        self.dispatch(&UiEvent::new(EventKind::Submit).with_target(form))
    }

    /// Press `key` with nothing focused.
    pub fn key_down(&self, key: &str) -> bool {
        self.dispatch(&UiEvent::new(EventKind::KeyDown).with_key(key))
    }

    pub fn focus(&self, node: NodeId) {
        self.dispatch(&UiEvent::new(EventKind::Focus).with_target(node));
    }

    pub fn blur(&self, node: NodeId) {
        self.dispatch(&UiEvent::new(EventKind::Blur).with_target(node));
    }

    /// User scroll: move the viewport and fire a window scroll event.
    pub fn scroll_window(&self, y: f64) {
        self.scroll_y.set(y);
        self.dispatch(&UiEvent::new(EventKind::Scroll));
    }

    pub fn fire_load(&self) {
        self.dispatch(&UiEvent::new(EventKind::Load));
    }

    pub fn fire_error(&self, message: &str) {
        self.dispatch(&UiEvent::new(EventKind::Error).with_detail(message));
    }

    pub fn fire_rejection(&self, reason: &str) {
        self.dispatch(&UiEvent::new(EventKind::UnhandledRejection).with_detail(reason));
    }

    // --- Visibility ---

    /// Report `node` as fully in view to every observer watching it.
    pub fn reveal(&self, node: NodeId) {
        self.report_visibility(node, true, 1.0);
    }

    /// Report an arbitrary visibility entry for `node`.
    pub fn report_visibility(&self, node: NodeId, is_intersecting: bool, ratio: f64) {
        let watching: Vec<(usize, VisibilityCallback<NodeId>)> = self
            .observers
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, o)| o.targets.contains(&node))
            .map(|(i, o)| (i, Rc::clone(&o.callback)))
            .collect();
        let entry = VisibilityEntry {
            node,
            is_intersecting,
            ratio,
        };
        for (index, callback) in watching {
            if callback(&entry) == WatchFlow::Unobserve {
                self.observers.borrow_mut()[index]
                    .targets
                    .retain(|&t| t != node);
            }
        }
    }

    /// Whether any observer still watches `node`.
    #[must_use]
    pub fn is_observed(&self, node: NodeId) -> bool {
        self.observers
            .borrow()
            .iter()
            .any(|o| o.targets.contains(&node))
    }

    /// Options of every registered observer, in registration order.
    #[must_use]
    pub fn observer_options(&self) -> Vec<VisibilityOptions> {
        self.observers
            .borrow()
            .iter()
            .map(|o| o.options.clone())
            .collect()
    }

    // --- Time ---

    #[must_use]
    pub fn clock(&self) -> &FakeClock {
        &self.clock
    }

    /// Advance the page clock by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) -> usize {
        self.clock.advance_ms(ms)
    }

    // --- Lookups (panicking) ---

    /// # Panics
    ///
    /// When no attached element has `id`.
    #[must_use]
    pub fn by_id(&self, id: &str) -> NodeId {
        self.element_by_id(id)
            .unwrap_or_else(|| panic!("no element with id {id:?}"))
    }

    /// First attached element matching `selector`.
    ///
    /// # Panics
    ///
    /// When nothing matches.
    #[must_use]
    pub fn find(&self, selector: &Selector) -> NodeId {
        self.query(selector)
            .unwrap_or_else(|| panic!("nothing matches {}", selector.to_css()))
    }

    /// Attached elements carrying `class`.
    #[must_use]
    pub fn with_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(&Selector::class(class))
    }

    // --- Inspection ---

    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut cursor = node;
        loop {
            if cursor == BODY {
                return true;
            }
            match self.parent(&cursor) {
                Some(parent) => cursor = parent,
                None => return false,
            }
        }
    }

    #[must_use]
    pub fn children_of(&self, node: NodeId) -> Vec<NodeId> {
        self.with(&node, |el| el.children.iter().copied().map(NodeId).collect())
    }

    #[must_use]
    pub fn tag_of(&self, node: NodeId) -> String {
        self.with(&node, |el| el.tag.clone())
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    #[must_use]
    pub fn opened_windows(&self) -> Vec<OpenedWindow> {
        self.opened.borrow().clone()
    }

    #[must_use]
    pub fn scroll_requests(&self) -> Vec<(f64, ScrollBehavior)> {
        self.scroll_requests.borrow().clone()
    }

    #[must_use]
    pub fn print_count(&self) -> usize {
        self.prints.get()
    }

    /// Copy of client-local storage, for carrying into the next page load.
    #[must_use]
    pub fn storage_entries(&self) -> BTreeMap<String, String> {
        self.storage.borrow().clone()
    }

    /// Make every later `storage_set` fail, as with a full quota.
    pub fn fail_storage_writes(&self) {
        self.storage_writable.set(false);
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemorySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySurface")
            .field("nodes", &self.nodes.borrow().len())
            .field("listeners", &self.listeners.borrow().len())
            .field("observers", &self.observers.borrow().len())
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl Clock for MemorySurface {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.clock.schedule(delay, task);
    }

    fn today_iso(&self) -> String {
        self.clock.today_iso()
    }
}

impl Surface for MemorySurface {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query(&Selector::id(id))
    }

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        let mut candidates = vec![BODY.0];
        candidates.extend(self.descendants(BODY.0));
        self.matching(candidates, selector)
    }

    fn query_within(&self, root: &NodeId, selector: &Selector) -> Vec<NodeId> {
        self.matching(self.descendants(root.0), selector)
    }

    fn body(&self) -> NodeId {
        BODY
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.with(node, |el| el.parent.map(NodeId))
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, UiError> {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Element {
            tag: tag.to_owned(),
            ..Element::default()
        });
        Ok(NodeId(nodes.len() - 1))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        Self::detach(&mut nodes, child.0);
        nodes[child.0].parent = Some(parent.0);
        nodes[parent.0].children.push(child.0);
    }

    fn prepend_child(&self, parent: &NodeId, child: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        Self::detach(&mut nodes, child.0);
        nodes[child.0].parent = Some(parent.0);
        nodes[parent.0].children.insert(0, child.0);
    }

    fn remove(&self, node: &NodeId) {
        Self::detach(&mut self.nodes.borrow_mut(), node.0);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.with(node, |el| el.has_class(class))
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        self.with_mut(node, |el| {
            if !el.has_class(class) {
                let mut classes: Vec<String> = el.classes().map(str::to_owned).collect();
                classes.push(class.to_owned());
                el.set_classes(classes.iter().map(String::as_str));
            }
        });
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.with_mut(node, |el| {
            if el.has_class(class) {
                let kept: Vec<String> = el
                    .classes()
                    .filter(|c| *c != class)
                    .map(str::to_owned)
                    .collect();
                el.set_classes(kept.iter().map(String::as_str));
            }
        });
    }

    fn set_class_name(&self, node: &NodeId, class_name: &str) {
        self.set_attribute(node, "class", class_name);
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.with(node, |el| el.attrs.get(name).cloned())
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.with_mut(node, |el| {
            el.attrs.insert(name.to_owned(), value.to_owned());
        });
    }

    fn text(&self, node: &NodeId) -> String {
        let mut text = self.with(node, |el| el.text.clone());
        for child in self.descendants(node.0) {
            text.push_str(&self.nodes.borrow()[child].text);
        }
        text
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        let mut nodes = self.nodes.borrow_mut();
        for child in std::mem::take(&mut nodes[node.0].children) {
            nodes[child].parent = None;
        }
        nodes[node.0].text = text.to_owned();
    }

    fn value(&self, node: &NodeId) -> String {
        self.with(node, |el| el.value.clone())
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        self.with_mut(node, |el| el.value = value.to_owned());
    }

    fn reset_form(&self, form: &NodeId) {
        let controls = self.descendants(form.0);
        let mut nodes = self.nodes.borrow_mut();
        for i in controls {
            if nodes[i].is_form_control() {
                nodes[i].value = nodes[i].default_value.clone();
            }
        }
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.with(node, |el| el.styles.get(property).cloned())
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.with_mut(node, |el| {
            el.styles.insert(property.to_owned(), value.to_owned());
        });
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.with(node, |el| el.offset_top)
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        self.scroll_requests.borrow_mut().push((top, behavior));
        self.scroll_y.set(top);
    }

    fn open_window(&self, url: &str, target: &str, features: Option<&str>) {
        self.opened.borrow_mut().push(OpenedWindow {
            url: url.to_owned(),
            target: target.to_owned(),
            features: features.map(str::to_owned),
        });
    }

    fn print(&self) {
        self.prints.set(self.prints.get() + 1);
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        self.storage.borrow().get(key).cloned()
    }

    fn storage_set(&self, key: &str, value: &str) -> Result<(), UiError> {
        if !self.storage_writable.get() {
            return Err(UiError::Storage(format!("quota exceeded writing {key}")));
        }
        self.storage
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn listen(&self, target: Target<NodeId>, kind: EventKind, handler: Handler<NodeId>) {
        self.listeners.borrow_mut().push(Listener {
            target,
            kind,
            handler,
        });
    }

    fn observe_visibility(
        &self,
        targets: &[NodeId],
        options: VisibilityOptions,
        callback: VisibilityCallback<NodeId>,
    ) {
        self.observers.borrow_mut().push(Observer {
            targets: targets.to_vec(),
            options,
            callback,
        });
    }
}
