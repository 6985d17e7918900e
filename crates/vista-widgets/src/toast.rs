#![forbid(unsafe_code)]

//! Transient user-facing messages.
//!
//! # Invariants
//!
//! 1. At most one message node exists: showing a message first removes every
//!    existing `.message` node.
//! 2. Each message removes itself after the configured duration (5000 ms by
//!    default). Removing an already-replaced message is a no-op.
//! 3. Severity only selects the `message-{severity}` styling class.

use std::rc::Rc;

use vista_core::{Selector, Surface, UiError};
use vista_runtime::config::ToastConfig;

use crate::after;
use crate::markup::classes;

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Parse a severity name; unknown names are [`Severity::Info`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    /// Full class attribute for a message of this severity.
    #[must_use]
    pub fn class_name(self) -> String {
        format!("{} {}-{}", classes::MESSAGE, classes::MESSAGE, self.as_str())
    }
}

/// Replace any visible message with `text` and schedule its removal.
pub fn show_message<S: Surface + 'static>(
    surface: &Rc<S>,
    config: &ToastConfig,
    text: &str,
    severity: Severity,
) -> Result<S::Node, UiError> {
    let message = surface.create_element("div")?;
    for existing in surface.query_all(&Selector::class(classes::MESSAGE)) {
        surface.remove(&existing);
    }

    surface.set_class_name(&message, &severity.class_name());
    surface.set_text(&message, text);
    surface.append_child(&surface.body(), &message);
    tracing::debug!(severity = severity.as_str(), "toast shown");

    let expiring = message.clone();
    after(surface, config.duration(), move |s: &S| s.remove(&expiring));
    Ok(message)
}

/// [`show_message`] for handlers: a message that cannot be shown is logged.
pub(crate) fn notify<S: Surface + 'static>(
    surface: &Rc<S>,
    config: &ToastConfig,
    text: &str,
    severity: Severity,
) {
    if let Err(err) = show_message(surface, config, text, severity) {
        tracing::warn!(%err, severity = severity.as_str(), "toast not shown");
    }
}
