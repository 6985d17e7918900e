#![forbid(unsafe_code)]

//! Skip link, focus ring, and global Escape.
//!
//! # Invariants
//!
//! 1. Exactly one skip link is injected, as the first child of `body`, and it
//!    is itself a focus target.
//! 2. `focused` is present on a control only between its focus and blur.
//! 3. Escape closes every `.modal` / `.lightbox` currently laid out as flex and
//!    restores page scroll. It runs independently of the lightbox's own
//!    Escape handling; closing twice is harmless.

use std::rc::Rc;

use vista_core::{EventFlow, EventKind, Selector, Surface, Target, UiError};
use vista_runtime::UiConfig;

use crate::markup::{classes, ids};
use crate::{handler, is_flex};

/// Controls that receive the focus ring.
#[must_use]
pub fn focusable() -> Selector {
    Selector::any([
        Selector::tag("button"),
        Selector::attr("href"),
        Selector::tag("input"),
        Selector::tag("select"),
        Selector::tag("textarea"),
        Selector::attr("tabindex").and(Selector::attr_eq("tabindex", "-1").negate()),
    ])
}

/// Overlays the global Escape closes.
#[must_use]
pub fn overlays() -> Selector {
    Selector::any_class(&[classes::MODAL, classes::LIGHTBOX])
}

/// A skip link that cannot be created is reported after the focus ring and
/// Escape handling are wired.
pub fn install<S: Surface + 'static>(
    surface: &Rc<S>,
    config: &Rc<UiConfig>,
) -> Result<(), UiError> {
    let skip_link = inject_skip_link(&**surface, &config.messages.skip_link);
    install_focus_ring(surface);
    install_escape(surface);
    skip_link.map(drop)
}

fn inject_skip_link<S: Surface>(surface: &S, label: &str) -> Result<S::Node, UiError> {
    let link = surface.create_element("a")?;
    surface.set_attribute(&link, "href", &format!("#{}", ids::MAIN_CONTENT));
    surface.set_class_name(&link, classes::SKIP_LINK);
    surface.set_text(&link, label);
    surface.prepend_child(&surface.body(), &link);
    Ok(link)
}

fn install_focus_ring<S: Surface + 'static>(surface: &Rc<S>) {
    for control in surface.query_all(&focusable()) {
        let node = control.clone();
        surface.listen(
            Target::Node(control.clone()),
            EventKind::Focus,
            handler(surface, move |s: &Rc<S>, _| {
                s.add_class(&node, classes::FOCUSED);
                EventFlow::Continue
            }),
        );
        let node = control.clone();
        surface.listen(
            Target::Node(control),
            EventKind::Blur,
            handler(surface, move |s: &Rc<S>, _| {
                s.remove_class(&node, classes::FOCUSED);
                EventFlow::Continue
            }),
        );
    }
}

fn install_escape<S: Surface + 'static>(surface: &Rc<S>) {
    surface.listen(
        Target::Document,
        EventKind::KeyDown,
        handler(surface, |s: &Rc<S>, event| {
            if event.is_key("Escape") {
                let closed = close_overlays(&**s);
                if closed > 0 {
                    tracing::debug!(closed, "overlays closed by escape");
                }
            }
            EventFlow::Continue
        }),
    );
}

/// Hide every open overlay; returns how many were open.
pub fn close_overlays<S: Surface>(surface: &S) -> usize {
    let open: Vec<_> = surface
        .query_all(&overlays())
        .into_iter()
        .filter(|node| is_flex(surface, node))
        .collect();
    for node in &open {
        surface.set_style(node, "display", "none");
    }
    if !open.is_empty() {
        surface.set_style(&surface.body(), "overflow", "auto");
    }
    open.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn focusable_css() {
        assert_eq!(
            focusable().to_css(),
            r#"button, [href], input, select, textarea, [tabindex]:not([tabindex="-1"])"#
        );
    }

    #[test]
    fn overlay_css() {
        assert_eq!(overlays().to_css(), ".modal, .lightbox");
    }
}
