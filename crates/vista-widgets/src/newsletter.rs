#![forbid(unsafe_code)]

//! Newsletter signup: one email field, toast feedback, no network call.

use std::rc::Rc;

use vista_core::{EventFlow, EventKind, Selector, Surface, Target};
use vista_runtime::UiConfig;

use crate::forms::is_valid_email;
use crate::handler;
use crate::markup::ids;
use crate::toast::{Severity, notify};

/// Outcome of a signup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signup {
    Subscribed,
    Rejected,
}

impl Signup {
    /// A missing email field counts as blank.
    #[must_use]
    pub fn evaluate(email: Option<&str>) -> Self {
        match email {
            Some(email) if is_valid_email(email) => Self::Subscribed,
            _ => Self::Rejected,
        }
    }
}

pub fn install<S: Surface + 'static>(surface: &Rc<S>, config: &Rc<UiConfig>) {
    let Some(form) = surface.element_by_id(ids::NEWSLETTER_FORM) else {
        return;
    };
    let email_field = Selector::tag("input").and(Selector::attr_eq("type", "email"));
    let (this_form, config) = (form.clone(), Rc::clone(config));
    surface.listen(
        Target::Node(form),
        EventKind::Submit,
        handler(surface, move |s: &Rc<S>, _| {
            let email = s
                .query_first_within(&this_form, &email_field)
                .map(|field| s.value(&field));
            match Signup::evaluate(email.as_deref()) {
                Signup::Subscribed => {
                    notify(
                        s,
                        &config.toast,
                        &config.messages.newsletter_success,
                        Severity::Success,
                    );
                    s.reset_form(&this_form);
                }
                Signup::Rejected => {
                    notify(
                        s,
                        &config.toast,
                        &config.messages.newsletter_invalid,
                        Severity::Error,
                    );
                }
            }
            EventFlow::PreventDefault
        }),
    );
}
