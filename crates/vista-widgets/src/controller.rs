#![forbid(unsafe_code)]

//! Page-ready orchestration.
//!
//! [`Controller::start`] runs every component installer once, in
//! [`Component::ORDER`]. Installers only wire their own elements, so the
//! order is not observable; it is fixed for reproducible logs.
//!
//! # Invariants
//!
//! 1. Every component is attempted, even after an earlier one fails.
//! 2. A failure is logged at `warn` and recorded in [`Controller::failures`].
//! 3. The controller owns the surface; dropping it tears down every listener
//!    and observer the components registered.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use vista_core::{Surface, UiError};
use vista_runtime::UiConfig;

use crate::toast::{Severity, show_message};
use crate::{
    a11y, animation, consent, contact, diagnostics, forms, gallery, lazy, menu, navigation,
    newsletter, reservation, share,
};

/// Installable page components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Diagnostics,
    Navigation,
    Animation,
    Forms,
    Gallery,
    Menu,
    Reservation,
    Contact,
    Accessibility,
    LazyImages,
    CookieConsent,
    Newsletter,
    Analytics,
}

impl Component {
    /// Installation order.
    pub const ORDER: [Component; 13] = [
        Self::Diagnostics,
        Self::Navigation,
        Self::Animation,
        Self::Forms,
        Self::Gallery,
        Self::Menu,
        Self::Reservation,
        Self::Contact,
        Self::Accessibility,
        Self::LazyImages,
        Self::CookieConsent,
        Self::Newsletter,
        Self::Analytics,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diagnostics => "diagnostics",
            Self::Navigation => "navigation",
            Self::Animation => "animation",
            Self::Forms => "forms",
            Self::Gallery => "gallery",
            Self::Menu => "menu",
            Self::Reservation => "reservation",
            Self::Contact => "contact",
            Self::Accessibility => "accessibility",
            Self::LazyImages => "lazy-images",
            Self::CookieConsent => "cookie-consent",
            Self::Newsletter => "newsletter",
            Self::Analytics => "analytics",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner of a wired page.
pub struct Controller<S: Surface> {
    surface: Rc<S>,
    config: Rc<UiConfig>,
    started_at: Duration,
    failures: Vec<(Component, UiError)>,
}

impl<S: Surface + 'static> Controller<S> {
    /// Wire every component against `surface`.
    pub fn start(surface: Rc<S>, config: UiConfig) -> Self {
        let mut controller = Self {
            started_at: surface.now(),
            surface,
            config: Rc::new(config),
            failures: Vec::new(),
        };
        for component in Component::ORDER {
            if let Err(err) = controller.install(component) {
                tracing::warn!(%component, %err, "component not wired");
                controller.failures.push((component, err));
            }
        }
        tracing::info!(
            failed = controller.failures.len(),
            "page controller started"
        );
        controller
    }

    fn install(&self, component: Component) -> Result<(), UiError> {
        let (surface, config) = (&self.surface, &self.config);
        match component {
            Component::Diagnostics => {
                diagnostics::install_error_logging(surface);
                diagnostics::install_load_timing(surface, self.started_at);
            }
            Component::Navigation => navigation::install(surface, config),
            Component::Animation => animation::install(surface, config),
            Component::Forms => forms::install(surface, config),
            Component::Gallery => gallery::install(surface, config)?,
            Component::Menu => menu::install(surface),
            Component::Reservation => reservation::install(surface),
            Component::Contact => contact::install(surface, config),
            Component::Accessibility => a11y::install(surface, config)?,
            Component::LazyImages => lazy::install(surface),
            Component::CookieConsent => consent::install(surface, config),
            Component::Newsletter => newsletter::install(surface, config),
            Component::Analytics => diagnostics::init_analytics(),
        }
        Ok(())
    }

    /// Components that failed to wire, in installation order.
    #[must_use]
    pub fn failures(&self) -> &[(Component, UiError)] {
        &self.failures
    }

    #[must_use]
    pub fn surface(&self) -> &Rc<S> {
        &self.surface
    }

    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Replace any visible toast with `text`.
    pub fn show_message(&self, text: &str, severity: Severity) -> Result<S::Node, UiError> {
        show_message(&self.surface, &self.config.toast, text, severity)
    }

    /// Validate `form`, updating its inline errors.
    pub fn validate_form(&self, form: &S::Node) -> bool {
        forms::validate_form(&*self.surface, form, &self.config)
    }

    /// Open a share popup; `None` for an unknown platform.
    pub fn share_on_social(&self, platform: &str, url: &str, title: &str) -> Option<String> {
        share::share_on_social(&*self.surface, &self.config, platform, url, title)
    }

    pub fn print_page(&self) {
        self.surface.print();
    }
}

impl<S: Surface> fmt::Debug for Controller<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("started_at", &self.started_at)
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn order_lists_each_component_once() {
        let unique: HashSet<_> = Component::ORDER.iter().collect();
        assert_eq!(unique.len(), Component::ORDER.len());
        assert_eq!(Component::ORDER[0], Component::Diagnostics);
    }

    #[test]
    fn names_are_kebab_case() {
        for component in Component::ORDER {
            let name = component.as_str();
            assert!(name.chars().all(|c| c.is_ascii_lowercase() || c == '-'), "{name}");
        }
    }
}
