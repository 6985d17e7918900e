#![forbid(unsafe_code)]

//! Menu category switch: one visible section per clicked category button.

use std::rc::Rc;

use vista_core::{EventFlow, EventKind, Selector, Surface, Target};

use crate::handler;
use crate::markup::{attrs, classes};

/// Sections whose id equals `category` are active; all others are not.
#[must_use]
pub fn is_selected(section_id: Option<&str>, category: &str) -> bool {
    section_id == Some(category)
}

/// Wire the category buttons.
pub fn install<S: Surface + 'static>(surface: &Rc<S>) {
    let buttons = surface.query_all(&Selector::class(classes::MENU_CATEGORY));
    let sections = surface.query_all(&Selector::class(classes::MENU_SECTION));
    if buttons.is_empty() || sections.is_empty() {
        return;
    }
    let buttons = Rc::new(buttons);
    let sections = Rc::new(sections);

    for button in buttons.iter() {
        let (this_button, buttons, sections) =
            (button.clone(), Rc::clone(&buttons), Rc::clone(&sections));
        surface.listen(
            Target::Node(button.clone()),
            EventKind::Click,
            handler(surface, move |s: &Rc<S>, _| {
                let category = s
                    .attribute(&this_button, attrs::CATEGORY)
                    .unwrap_or_default();
                for b in buttons.iter() {
                    s.remove_class(b, classes::ACTIVE);
                }
                s.add_class(&this_button, classes::ACTIVE);

                for section in sections.iter() {
                    if is_selected(s.id_of(section).as_deref(), &category) {
                        s.add_class(section, classes::ACTIVE);
                    } else {
                        s.remove_class(section, classes::ACTIVE);
                    }
                }
                tracing::debug!(%category, "menu category selected");
                EventFlow::Continue
            }),
        );
    }
}
