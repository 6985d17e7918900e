#![forbid(unsafe_code)]

//! Reservation date floor and single-select time slots.
//!
//! Selecting a slot marks it `selected` and unmarks the others. When the form
//! carries a `#reservation-time` input, the slot's `data-time` (or its text)
//! is mirrored into it so the generic required-field check covers the slot.
//! Once a submission resets the form and empties that input, the slot
//! selection is dropped as well, so the picker never shows a slot the form
//! no longer carries.

use std::cell::Cell;
use std::rc::Rc;

use vista_core::{EventFlow, EventKind, Selector, Surface, Target};

use crate::handler;
use crate::markup::{attrs, classes, ids};

/// At most one selected slot, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotSelection {
    selected: Option<usize>,
}

impl SlotSelection {
    pub fn select(&mut self, index: usize) {
        self.selected = Some(index);
    }

    #[must_use]
    pub fn selected(self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_selected(self, index: usize) -> bool {
        self.selected == Some(index)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// Wire the date floor and slot picker.
pub fn install<S: Surface + 'static>(surface: &Rc<S>) {
    if let Some(date) = surface.element_by_id(ids::RESERVATION_DATE) {
        surface.set_attribute(&date, "min", &surface.today_iso());
    }

    let slots = Rc::new(surface.query_all(&Selector::class(classes::TIME_SLOT)));
    let selection = Rc::new(Cell::new(SlotSelection::default()));

    for (index, slot) in slots.iter().enumerate() {
        let (slots, selection) = (Rc::clone(&slots), Rc::clone(&selection));
        surface.listen(
            Target::Node(slot.clone()),
            EventKind::Click,
            handler(surface, move |s: &Rc<S>, _| {
                let mut next = selection.get();
                next.select(index);
                selection.set(next);
                for (i, slot) in slots.iter().enumerate() {
                    if next.is_selected(i) {
                        s.add_class(slot, classes::SELECTED);
                    } else {
                        s.remove_class(slot, classes::SELECTED);
                    }
                }
                mirror_slot(&**s, &slots[index]);
                EventFlow::Continue
            }),
        );
    }

    // Runs after the form's own submit handler, which may have reset it.
    if let Some(form) = surface.element_by_id(ids::RESERVATION_FORM)
        && !slots.is_empty()
    {
        surface.listen(
            Target::Node(form),
            EventKind::Submit,
            handler(surface, move |s: &Rc<S>, _| {
                let emptied = s
                    .element_by_id(ids::RESERVATION_TIME)
                    .is_some_and(|input| s.value(&input).is_empty());
                let mut next = selection.get();
                if emptied && next.selected().is_some() {
                    next.clear();
                    selection.set(next);
                    for slot in slots.iter() {
                        s.remove_class(slot, classes::SELECTED);
                    }
                    tracing::debug!("time slot cleared with the form");
                }
                EventFlow::Continue
            }),
        );
    }
}

fn mirror_slot<S: Surface>(surface: &S, slot: &S::Node) {
    let Some(input) = surface.element_by_id(ids::RESERVATION_TIME) else {
        return;
    };
    let time = surface
        .attribute(slot, attrs::TIME)
        .unwrap_or_else(|| surface.text(slot).trim().to_owned());
    surface.set_value(&input, &time);
}
