#![forbid(unsafe_code)]

//! Mobile menu toggle, sticky header, and smooth anchor scrolling.

use std::cell::Cell;
use std::rc::Rc;

use vista_core::{EventFlow, EventKind, ScrollBehavior, Selector, Surface, Target, UiEvent};
use vista_runtime::UiConfig;

use crate::handler;
use crate::markup::{classes, ids};

/// Open/closed state of the mobile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuToggle {
    open: bool,
}

impl MenuToggle {
    #[must_use]
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Flip the state; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// One-way reset used when a menu link is followed.
    pub fn close(&mut self) {
        self.open = false;
    }
}

/// Whether the header is sticky at `scroll_y`.
#[must_use]
pub fn is_sticky(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Scroll position that brings an anchor target just below the fixed header.
#[must_use]
pub fn anchor_scroll_top(target_offset: f64, header_offset: f64) -> f64 {
    target_offset - header_offset
}

/// Element id referenced by a same-page `href` (`"#menu"` -> `"menu"`).
#[must_use]
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

fn apply_toggle<S: Surface>(surface: &S, state: MenuToggle, control: &S::Node, menu: &S::Node) {
    for node in [control, menu] {
        if state.is_open() {
            surface.add_class(node, classes::ACTIVE);
        } else {
            surface.remove_class(node, classes::ACTIVE);
        }
    }
}

/// Wire the menu toggle, sticky header, and anchor links.
pub fn install<S: Surface + 'static>(surface: &Rc<S>, config: &Rc<UiConfig>) {
    install_toggle(surface);
    install_sticky_header(surface, config);
    install_smooth_scroll(surface, config);
}

fn install_toggle<S: Surface + 'static>(surface: &Rc<S>) {
    let (Some(control), Some(menu)) = (
        surface.element_by_id(ids::HAMBURGER),
        surface.query(&Selector::class(classes::NAV_MENU)),
    ) else {
        return;
    };
    let state = Rc::new(Cell::new(MenuToggle::default()));

    {
        let (state, c, m) = (Rc::clone(&state), control.clone(), menu.clone());
        surface.listen(
            Target::Node(control.clone()),
            EventKind::Click,
            handler(surface, move |s: &Rc<S>, _| {
                let mut next = state.get();
                next.toggle();
                state.set(next);
                apply_toggle(&**s, next, &c, &m);
                EventFlow::Continue
            }),
        );
    }

    for link in surface.query_all(&Selector::class(classes::NAV_LINK)) {
        let (state, c, m) = (Rc::clone(&state), control.clone(), menu.clone());
        surface.listen(
            Target::Node(link),
            EventKind::Click,
            handler(surface, move |s: &Rc<S>, _| {
                let mut next = state.get();
                next.close();
                state.set(next);
                apply_toggle(&**s, next, &c, &m);
                EventFlow::Continue
            }),
        );
    }
}

fn install_sticky_header<S: Surface + 'static>(surface: &Rc<S>, config: &Rc<UiConfig>) {
    let Some(header) = surface.query(&Selector::class(classes::HEADER)) else {
        return;
    };
    let threshold = config.navigation.sticky_threshold;
    surface.listen(
        Target::Window,
        EventKind::Scroll,
        handler(surface, move |s: &Rc<S>, _| {
            if is_sticky(s.scroll_y(), threshold) {
                s.add_class(&header, classes::STICKY);
            } else {
                s.remove_class(&header, classes::STICKY);
            }
            EventFlow::Continue
        }),
    );
}

fn install_smooth_scroll<S: Surface + 'static>(surface: &Rc<S>, config: &Rc<UiConfig>) {
    let anchors = Selector::tag("a").and(Selector::attr_prefix("href", "#"));
    let header_offset = config.navigation.header_offset;
    for link in surface.query_all(&anchors) {
        let this_link = link.clone();
        surface.listen(
            Target::Node(link),
            EventKind::Click,
            handler(surface, move |s: &Rc<S>, _: &UiEvent<S::Node>| {
                let href = s.attribute(&this_link, "href").unwrap_or_default();
                if let Some(target) = anchor_id(&href).and_then(|id| s.element_by_id(id)) {
                    let top = anchor_scroll_top(s.offset_top(&target), header_offset);
                    s.scroll_to(top, ScrollBehavior::Smooth);
                }
                EventFlow::PreventDefault
            }),
        );
    }
}
