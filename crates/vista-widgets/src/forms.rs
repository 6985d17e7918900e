#![forbid(unsafe_code)]

//! Form validation and the two site forms.
//!
//! # Validation contract
//!
//! - Every `[required]` descendant whose value is blank after trimming gets
//!   the inline error "This field is required"; a non-blank one has its error
//!   cleared.
//! - Every `input[type="email"]` descendant with a non-empty value that fails
//!   the `local@domain.tld` pattern gets "Please enter a valid email address";
//!   one that passes (or is empty and optional) has its error cleared.
//! - Any error fails the whole form. Errors never propagate as `Err`.
//!
//! Error display is clear-then-set, so re-validating never stacks messages.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Field without parent | Detached control | Class toggled, no message node |
//! | Form absent | Page without that form | Installer is a no-op |

use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;
use vista_core::{EventFlow, EventKind, Selector, Surface, Target};
use vista_runtime::UiConfig;

use crate::handler;
use crate::markup::{classes, ids};
use crate::toast::{Severity, notify};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Basic `local@domain.tld` check with no embedded whitespace.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Whether a required field's value counts as filled.
#[must_use]
pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn required_fields() -> Selector {
    Selector::attr("required")
}

fn email_fields() -> Selector {
    Selector::tag("input").and(Selector::attr_eq("type", "email"))
}

/// Validate every field of `form`, updating inline errors.
pub fn validate_form<S: Surface>(surface: &S, form: &S::Node, config: &UiConfig) -> bool {
    let messages = &config.messages;
    let mut blank = Vec::new();

    for field in surface.query_within(form, &required_fields()) {
        if is_filled(&surface.value(&field)) {
            clear_field_error(surface, &field);
        } else {
            show_field_error(surface, &field, &messages.field_required);
            blank.push(field);
        }
    }

    let mut malformed = 0;
    for field in surface.query_within(form, &email_fields()) {
        let value = surface.value(&field);
        if !value.is_empty() && !is_valid_email(&value) {
            show_field_error(surface, &field, &messages.invalid_email);
            malformed += 1;
        } else if !blank.contains(&field) {
            clear_field_error(surface, &field);
        }
    }

    blank.is_empty() && malformed == 0
}

/// Mark `field` invalid with `message`, replacing any previous message.
pub fn show_field_error<S: Surface>(surface: &S, field: &S::Node, message: &str) {
    clear_field_error(surface, field);
    surface.add_class(field, classes::ERROR);
    let Some(parent) = surface.parent(field) else {
        return;
    };
    let note = match surface.create_element("div") {
        Ok(note) => note,
        Err(err) => {
            tracing::warn!(%err, "field error message not shown");
            return;
        }
    };
    surface.set_class_name(&note, classes::FIELD_ERROR);
    surface.set_text(&note, message);
    surface.append_child(&parent, &note);
}

/// Remove the error marker and message of `field`.
pub fn clear_field_error<S: Surface>(surface: &S, field: &S::Node) {
    surface.remove_class(field, classes::ERROR);
    if let Some(parent) = surface.parent(field)
        && let Some(note) = surface.query_first_within(&parent, &Selector::class(classes::FIELD_ERROR))
    {
        surface.remove(&note);
    }
}

/// The site's simulated-submission forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Reservation,
}

impl FormKind {
    pub const ALL: [FormKind; 2] = [FormKind::Contact, FormKind::Reservation];

    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Contact => ids::CONTACT_FORM,
            Self::Reservation => ids::RESERVATION_FORM,
        }
    }

    #[must_use]
    pub fn success_message(self, config: &UiConfig) -> &str {
        match self {
            Self::Contact => &config.messages.contact_success,
            Self::Reservation => &config.messages.reservation_success,
        }
    }
}

/// Wire the contact and reservation forms.
///
/// A valid submission shows the confirmation toast and resets the form. No
/// network call is made; an integrating backend replaces the confirmation
/// with a real submission.
pub fn install<S: Surface + 'static>(surface: &Rc<S>, config: &Rc<UiConfig>) {
    for kind in FormKind::ALL {
        let Some(form) = surface.element_by_id(kind.element_id()) else {
            continue;
        };
        let config = Rc::clone(config);
        let this_form = form.clone();
        surface.listen(
            Target::Node(form),
            EventKind::Submit,
            handler(surface, move |s: &Rc<S>, _| {
                if validate_form(&**s, &this_form, &config) {
                    tracing::debug!(form = kind.element_id(), "form accepted");
                    notify(
                        s,
                        &config.toast,
                        kind.success_message(&config),
                        Severity::Success,
                    );
                    s.reset_form(&this_form);
                } else {
                    tracing::debug!(form = kind.element_id(), "form rejected");
                }
                EventFlow::PreventDefault
            }),
        );
    }
}
