#![forbid(unsafe_code)]

//! The UI-surface capability interface.
//!
//! A [`Surface`] is everything a component may do to the page: query nodes,
//! read and mutate classes, attributes, styles, text and form values, attach
//! event handlers, observe visibility, scroll, open windows, and use the one
//! key/value slot of client-local storage.
//!
//! # Invariants
//!
//! 1. All methods take `&self`. Backends use interior mutability; the
//!    page is single-threaded and handlers run to completion.
//! 2. A backend never holds an internal borrow while invoking a handler, so
//!    handlers may freely call back into the surface.
//! 3. Listener and observer registrations live as long as the surface.
//!    Dropping the surface disposes them.
//! 4. Query results are in document order.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Absent node | Optional markup missing | Queries return `None` / empty |
//! | Storage disabled | Private mode, quota | `storage_get` is `None`, `storage_set` is `Err` |
//! | Popup blocked | Browser policy | `open_window` is a silent no-op |

use std::fmt;
use std::rc::Rc;

use crate::clock::Clock;
use crate::error::UiError;
use crate::event::{EventKind, Handler, Target};
use crate::selector::Selector;

/// Scroll animation mode for [`Surface::scroll_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Instant,
    Smooth,
}

/// Parameters for a visibility observation.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityOptions {
    /// Fraction of the target that must be visible, in `[0.0, 1.0]`.
    pub threshold: f64,
    /// CSS-style margin applied to the viewport (`"0px 0px -50px 0px"`).
    pub root_margin: String,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".into(),
        }
    }
}

/// One visibility change for an observed target.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEntry<N> {
    pub node: N,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Whether an observer keeps watching a target after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchFlow {
    Keep,
    Unobserve,
}

/// Shared visibility callback.
pub type VisibilityCallback<N> = Rc<dyn Fn(&VisibilityEntry<N>) -> WatchFlow>;

/// Capability interface over a rendered page.
pub trait Surface: Clock {
    /// Handle to one element. Equality is node identity.
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    // --- Queries ---

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// All matching elements in the document.
    fn query_all(&self, selector: &Selector) -> Vec<Self::Node>;

    /// All matching descendants of `root`.
    fn query_within(&self, root: &Self::Node, selector: &Selector) -> Vec<Self::Node>;

    /// First matching element in the document.
    fn query(&self, selector: &Selector) -> Option<Self::Node> {
        self.query_all(selector).into_iter().next()
    }

    /// First matching descendant of `root`.
    fn query_first_within(&self, root: &Self::Node, selector: &Selector) -> Option<Self::Node> {
        self.query_within(root, selector).into_iter().next()
    }

    fn body(&self) -> Self::Node;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    // --- Tree mutation ---

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Result<Self::Node, UiError>;

    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Insert `child` as the first child of `parent`.
    fn prepend_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Detach `node` from the document. Detaching a detached node is a no-op.
    fn remove(&self, node: &Self::Node);

    // --- Classes, attributes, content ---

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&self, node: &Self::Node, class: &str);

    fn remove_class(&self, node: &Self::Node, class: &str);

    fn set_class_name(&self, node: &Self::Node, class_name: &str);

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn id_of(&self, node: &Self::Node) -> Option<String> {
        self.attribute(node, "id")
    }

    fn text(&self, node: &Self::Node) -> String;

    fn set_text(&self, node: &Self::Node, text: &str);

    /// Current value of a form control; empty for non-controls.
    fn value(&self, node: &Self::Node) -> String;

    fn set_value(&self, node: &Self::Node, value: &str);

    /// Restore every control of a form to its initial value.
    fn reset_form(&self, form: &Self::Node);

    // --- Inline style ---

    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;

    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    // --- Window ---

    /// Vertical scroll offset of the page.
    fn scroll_y(&self) -> f64;

    /// Distance from the document top to `node`.
    fn offset_top(&self, node: &Self::Node) -> f64;

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);

    /// Open `url` in a new browsing context.
    fn open_window(&self, url: &str, target: &str, features: Option<&str>);

    fn print(&self);

    // --- Storage ---

    fn storage_get(&self, key: &str) -> Option<String>;

    fn storage_set(&self, key: &str, value: &str) -> Result<(), UiError>;

    // --- Subscriptions ---

    /// Attach `handler` for `kind` events on `target`.
    fn listen(&self, target: Target<Self::Node>, kind: EventKind, handler: Handler<Self::Node>);

    /// Observe visibility of `targets` with a single observer.
    fn observe_visibility(
        &self,
        targets: &[Self::Node],
        options: VisibilityOptions,
        callback: VisibilityCallback<Self::Node>,
    );
}
