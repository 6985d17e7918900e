#![forbid(unsafe_code)]

//! [`Surface`] over the live document.
//!
//! # Invariants
//!
//! 1. Every `EventListener` and `IntersectionObserver` registered through the
//!    surface is owned by it. Dropping the surface removes the listeners and
//!    disconnects the observers.
//! 2. Listeners are non-passive except for scroll, so a handler answering
//!    [`EventFlow::PreventDefault`] can always cancel the default action.
//! 3. No `RefCell` borrow is held while a handler runs.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Invalid selector | CSS the browser rejects | `warn!`, empty result |
//! | Storage disabled | Private mode, quota | `storage_get` is `None`, `storage_set` is `Err` |
//! | Observer unsupported | Old browser | `warn!`, targets never reported |
//! | Popup blocked | Browser policy | `open_window` does nothing |

use std::cell::RefCell;
use std::time::Duration;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use js_sys::Array;
use vista_core::{
    Clock, EventFlow, EventKind, Handler, ScrollBehavior, Selector, Surface, Target, UiError,
    UiEvent, VisibilityCallback, VisibilityEntry, VisibilityOptions, WatchFlow,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, ErrorEvent, Event, EventTarget, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, NodeList,
    PromiseRejectionEvent, ScrollToOptions, Window,
};

use crate::clock::BrowserClock;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// An observer and the closure it calls into.
struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// The browser page as a [`Surface`].
pub struct DomSurface {
    window: Window,
    document: Document,
    body: Element,
    clock: BrowserClock,
    listeners: RefCell<Vec<EventListener>>,
    observers: RefCell<Vec<VisibilityObserver>>,
}

impl DomSurface {
    /// Bind to the current window. Fails outside a browsing context or
    /// before `<body>` exists.
    pub fn new() -> Result<Self, UiError> {
        let window = web_sys::window().ok_or_else(|| UiError::missing("window"))?;
        let document = window.document().ok_or_else(|| UiError::missing("document"))?;
        let body = document
            .body()
            .ok_or_else(|| UiError::missing("body"))?
            .unchecked_into::<Element>();
        Ok(Self {
            window,
            document,
            body,
            clock: BrowserClock::new(),
            listeners: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Registered listeners and observers.
    #[must_use]
    pub fn subscription_count(&self) -> (usize, usize) {
        (self.listeners.borrow().len(), self.observers.borrow().len())
    }

    fn event_target(&self, target: &Target<Element>) -> EventTarget {
        match target {
            Target::Window => self.window.clone().into(),
            Target::Document => self.document.clone().into(),
            Target::Node(node) => node.clone().into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

fn dom_error(value: &JsValue) -> UiError {
    UiError::Dom(describe(value))
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn to_ui_event(kind: EventKind, event: &Event) -> UiEvent<Element> {
    let mut ui = UiEvent::new(kind);
    ui.target = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    ui.key = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key);
    ui.detail = if let Some(error) = event.dyn_ref::<ErrorEvent>() {
        Some(error.message())
    } else {
        event
            .dyn_ref::<PromiseRejectionEvent>()
            .map(|rejection| describe(&rejection.reason()))
    };
    ui
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

impl Clock for DomSurface {
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

impl Surface for DomSurface {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, selector: &Selector) -> Vec<Element> {
        let css = selector.to_css();
        match self.document.query_selector_all(&css) {
            Ok(list) => elements(&list),
            Err(err) => {
                tracing::warn!(%css, error = %describe(&err), "selector rejected");
                Vec::new()
            }
        }
    }

    fn query_within(&self, root: &Element, selector: &Selector) -> Vec<Element> {
        let css = selector.to_css();
        match root.query_selector_all(&css) {
            Ok(list) => elements(&list),
            Err(err) => {
                tracing::warn!(%css, error = %describe(&err), "selector rejected");
                Vec::new()
            }
        }
    }

    fn body(&self) -> Element {
        self.body.clone()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn create_element(&self, tag: &str) -> Result<Element, UiError> {
        self.document
            .create_element(tag)
            .map_err(|err| dom_error(&err))
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        let _ = parent.append_child(child);
    }

    fn prepend_child(&self, parent: &Element, child: &Element) {
        let _ = parent.prepend_with_node_1(child);
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn set_class_name(&self, node: &Element, class_name: &str) {
        node.set_class_name(class_name);
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn id_of(&self, node: &Element) -> Option<String> {
        Some(node.id()).filter(|id| !id.is_empty())
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        node.dyn_ref::<HtmlElement>()?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(node) = node.dyn_ref::<HtmlElement>() {
            let _ = node.style().set_property(property, value);
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |node| f64::from(node.offset_top()))
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn open_window(&self, url: &str, target: &str, features: Option<&str>) {
        let opened = match features {
            Some(features) => self
                .window
                .open_with_url_and_target_and_features(url, target, features),
            None => self.window.open_with_url_and_target(url, target),
        };
        if let Err(err) = opened {
            tracing::debug!(%url, error = %describe(&err), "window not opened");
        }
    }

    fn print(&self) {
        let _ = self.window.print();
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        self.window
            .local_storage()
            .ok()
            .flatten()?
            .get_item(key)
            .ok()
            .flatten()
    }

    fn storage_set(&self, key: &str, value: &str) -> Result<(), UiError> {
        let storage = self
            .window
            .local_storage()
            .map_err(|err| UiError::Storage(describe(&err)))?
            .ok_or_else(|| UiError::Storage("localStorage disabled".into()))?;
        storage
            .set_item(key, value)
            .map_err(|err| UiError::Storage(describe(&err)))
    }

    fn listen(&self, target: Target<Element>, kind: EventKind, handler: Handler<Element>) {
        let options = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: kind == EventKind::Scroll,
        };
        let listener = EventListener::new_with_options(
            &self.event_target(&target),
            kind.dom_name(),
            options,
            move |event: &Event| {
                if handler(&to_ui_event(kind, event)) == EventFlow::PreventDefault {
                    event.prevent_default();
                }
            },
        );
        self.listeners.borrow_mut().push(listener);
    }

    fn observe_visibility(
        &self,
        targets: &[Element],
        options: VisibilityOptions,
        callback: VisibilityCallback<Element>,
    ) {
        let on_entries: ObserverCallback = Closure::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let visibility = VisibilityEntry {
                        node: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    };
                    if callback(&visibility) == WatchFlow::Unobserve {
                        observer.unobserve(&visibility.node);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            match IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &init)
            {
                Ok(observer) => observer,
                Err(err) => {
                    tracing::warn!(error = %describe(&err), "visibility observer unavailable");
                    return;
                }
            };
        for target in targets {
            observer.observe(target);
        }
        self.observers.borrow_mut().push(VisibilityObserver {
            observer,
            _callback: on_entries,
        });
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        let (listeners, observers) = self.subscription_count();
        tracing::debug!(listeners, observers, "page surface released");
    }
}
