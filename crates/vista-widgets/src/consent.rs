#![forbid(unsafe_code)]

//! Cookie-consent banner.
//!
//! The banner is shown only while no decision is stored under the consent
//! key. Either button stores its decision and hides the banner; the stored
//! flag keeps it hidden on every later page load until cleared externally.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Storage unavailable | Private mode, quota | Banner hides for this page only, `warn!` logged |
//! | Banner absent | Page without consent markup | Installer is a no-op |

use std::rc::Rc;

use vista_core::{EventFlow, EventKind, Selector, Surface, Target};
use vista_runtime::UiConfig;

use crate::handler;
use crate::markup::{classes, ids};

/// A stored consent decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentDecision {
    Accepted,
    Declined,
}

impl ConsentDecision {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

/// Whether the banner should be shown for a stored value.
///
/// Any non-empty value counts as decided, including values this version
/// does not recognize.
#[must_use]
pub fn needs_prompt(stored: Option<&str>) -> bool {
    stored.is_none_or(str::is_empty)
}

pub fn install<S: Surface + 'static>(surface: &Rc<S>, config: &Rc<UiConfig>) {
    let Some(banner) = surface.element_by_id(ids::COOKIE_CONSENT) else {
        return;
    };
    let key = &config.consent.storage_key;
    if !needs_prompt(surface.storage_get(key).as_deref()) {
        return;
    }
    surface.set_style(&banner, "display", "block");

    for (class, decision) in [
        (classes::ACCEPT_COOKIES, ConsentDecision::Accepted),
        (classes::DECLINE_COOKIES, ConsentDecision::Declined),
    ] {
        let Some(button) = surface.query_first_within(&banner, &Selector::class(class)) else {
            continue;
        };
        let (banner, config) = (banner.clone(), Rc::clone(config));
        surface.listen(
            Target::Node(button),
            EventKind::Click,
            handler(surface, move |s: &Rc<S>, _| {
                record(&**s, &config, decision);
                s.set_style(&banner, "display", "none");
                EventFlow::Continue
            }),
        );
    }
}

fn record<S: Surface>(surface: &S, config: &UiConfig, decision: ConsentDecision) {
    match surface.storage_set(&config.consent.storage_key, decision.as_str()) {
        Ok(()) => tracing::debug!(decision = decision.as_str(), "consent recorded"),
        Err(err) => tracing::warn!(%err, "consent decision not persisted"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_only_without_decision() {
        assert!(needs_prompt(None));
        assert!(needs_prompt(Some("")));
        assert!(!needs_prompt(Some("accepted")));
        assert!(!needs_prompt(Some("declined")));
        assert!(!needs_prompt(Some("yes please")));
    }

    #[test]
    fn decision_names() {
        for decision in [ConsentDecision::Accepted, ConsentDecision::Declined] {
            assert_eq!(ConsentDecision::parse(decision.as_str()), Some(decision));
        }
        assert_eq!(ConsentDecision::parse("maybe"), None);
    }
}
