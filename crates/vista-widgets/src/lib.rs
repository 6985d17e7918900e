#![forbid(unsafe_code)]

//! Page components for the Bella Vista UI layer.
//!
//! Each module owns one component: a small state struct (where the component
//! has state), the pure rules it follows, and an `install` routine that wires
//! it to a [`Surface`]. The [`Controller`] runs the installers in a fixed
//! order at page-ready.
//!
//! | Module | Component |
//! |--------|-----------|
//! | [`navigation`] | Mobile menu toggle, sticky header, smooth anchor scroll |
//! | [`animation`] | Fade-in on first visibility, hero parallax |
//! | [`forms`] | Field validation, contact and reservation forms |
//! | [`toast`] | Single transient message |
//! | [`gallery`] | Category filter and lightbox slideshow |
//! | [`menu`] | Menu category switch |
//! | [`reservation`] | Date floor and time-slot picker |
//! | [`contact`] | Map link interceptor |
//! | [`a11y`] | Skip link, focus ring, global Escape |
//! | [`lazy`] | Lazy image loading |
//! | [`consent`] | Cookie-consent banner |
//! | [`newsletter`] | Newsletter signup |
//! | [`share`] | Social share URLs |
//! | [`diagnostics`] | Top-level error logging, load timing, analytics stub |
//!
//! Handlers hold the surface weakly: dropping the controller drops the
//! surface and, with it, every listener and observer.

pub mod a11y;
pub mod animation;
pub mod consent;
pub mod contact;
pub mod controller;
pub mod diagnostics;
pub mod forms;
pub mod gallery;
pub mod lazy;
pub mod markup;
pub mod menu;
pub mod navigation;
pub mod newsletter;
pub mod reservation;
pub mod share;
pub mod toast;

pub use controller::{Component, Controller};
pub use toast::Severity;

use std::rc::{Rc, Weak};
use std::time::Duration;

use vista_core::{Clock, EventFlow, Handler, Surface, UiEvent};

/// Build a handler that holds `surface` weakly.
pub(crate) fn handler<S, F>(surface: &Rc<S>, f: F) -> Handler<S::Node>
where
    S: Surface + 'static,
    F: Fn(&Rc<S>, &UiEvent<S::Node>) -> EventFlow + 'static,
{
    let weak = Rc::downgrade(surface);
    Rc::new(move |event: &UiEvent<S::Node>| match weak.upgrade() {
        Some(surface) => f(&surface, event),
        None => EventFlow::Continue,
    })
}

/// Run `task` after `delay` if the surface is still alive.
pub(crate) fn after<S, F>(surface: &Rc<S>, delay: Duration, task: F)
where
    S: Surface + 'static,
    F: FnOnce(&S) + 'static,
{
    let weak = Rc::downgrade(surface);
    surface.schedule(
        delay,
        Box::new(move || {
            if let Some(surface) = weak.upgrade() {
                task(&surface);
            }
        }),
    );
}

/// Whether `node` is currently laid out with `display: flex`.
pub(crate) fn is_flex<S: Surface>(surface: &S, node: &S::Node) -> bool {
    surface.style(node, "display").as_deref() == Some("flex")
}

/// Clock view of a surface that does not keep the surface alive.
pub(crate) struct WeakClock<S> {
    surface: Weak<S>,
}

impl<S: Surface> WeakClock<S> {
    pub(crate) fn new(surface: &Rc<S>) -> Rc<Self> {
        Rc::new(Self {
            surface: Rc::downgrade(surface),
        })
    }
}

impl<S: Surface> Clock for WeakClock<S> {
    fn now(&self) -> Duration {
        self.surface.upgrade().map(|s| s.now()).unwrap_or_default()
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        if let Some(s) = self.surface.upgrade() {
            s.schedule(delay, task);
        }
    }

    fn today_iso(&self) -> String {
        self.surface
            .upgrade()
            .map(|s| s.today_iso())
            .unwrap_or_default()
    }
}
