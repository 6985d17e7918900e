#![forbid(unsafe_code)]

//! Event model delivered by a [`Surface`](crate::Surface).
//!
//! Events are plain data. A handler inspects the event, mutates state through
//! the surface, and answers with an [`EventFlow`] telling the backend whether
//! to suppress the default browser action (link navigation, form submission).

use std::rc::Rc;

/// Event categories the UI layer subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    Scroll,
    KeyDown,
    Focus,
    Blur,
    /// Window finished loading all resources.
    Load,
    /// Uncaught script error.
    Error,
    /// Unhandled asynchronous rejection.
    UnhandledRejection,
}

impl EventKind {
    /// DOM event type name.
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::Scroll => "scroll",
            Self::KeyDown => "keydown",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Load => "load",
            Self::Error => "error",
            Self::UnhandledRejection => "unhandledrejection",
        }
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum Target<N> {
    Window,
    Document,
    Node(N),
}

/// A delivered event.
#[derive(Debug, Clone, PartialEq)]
pub struct UiEvent<N> {
    pub kind: EventKind,
    /// The node the event originated on, if any.
    pub target: Option<N>,
    /// Key name for [`EventKind::KeyDown`] (`"Escape"`, `"ArrowLeft"`, ...).
    pub key: Option<String>,
    /// Message for [`EventKind::Error`] / [`EventKind::UnhandledRejection`].
    pub detail: Option<String>,
}

impl<N> UiEvent<N> {
    /// Create an event with no target, key, or detail.
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            target: None,
            key: None,
            detail: None,
        }
    }

    /// Set the originating node.
    #[must_use]
    pub fn with_target(mut self, target: N) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the key name.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the detail message.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Whether this is a key press of `name`.
    #[must_use]
    pub fn is_key(&self, name: &str) -> bool {
        self.key.as_deref() == Some(name)
    }
}

/// What the backend should do with the default action after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventFlow {
    #[default]
    Continue,
    PreventDefault,
}

/// Shared event callback.
pub type Handler<N> = Rc<dyn Fn(&UiEvent<N>) -> EventFlow>;
