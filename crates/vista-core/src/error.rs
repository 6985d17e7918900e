#![forbid(unsafe_code)]

//! Error type shared by every layer.
//!
//! Form validation never produces a [`UiError`]; failed fields fold into a
//! single pass/fail boolean. Errors here describe structural problems with
//! the page, the backend, or configuration.

use thiserror::Error;

/// Errors raised by surfaces, components, and configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// A node the component cannot work without is absent.
    #[error("missing element: {what}")]
    MissingElement { what: String },
    /// The backend rejected a document operation.
    #[error("document operation failed: {0}")]
    Dom(String),
    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Client-local storage was unavailable or refused a write.
    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl UiError {
    /// Shorthand for [`UiError::MissingElement`].
    #[must_use]
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingElement { what: what.into() }
    }
}
