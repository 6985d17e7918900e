#![forbid(unsafe_code)]

//! Top-level error logging, page load timing, and the analytics stub.
//!
//! Script errors and unhandled rejections are logged and swallowed. Nothing
//! is forwarded to a reporting service.

use std::rc::Rc;
use std::time::Duration;

use vista_core::{EventFlow, EventKind, Surface, Target};

use crate::handler;

pub fn install_error_logging<S: Surface + 'static>(surface: &Rc<S>) {
    surface.listen(
        Target::Window,
        EventKind::Error,
        handler(surface, |_: &Rc<S>, event| {
            tracing::error!(
                error = event.detail.as_deref().unwrap_or("unknown"),
                "script error"
            );
            EventFlow::Continue
        }),
    );
    surface.listen(
        Target::Window,
        EventKind::UnhandledRejection,
        handler(surface, |_: &Rc<S>, event| {
            tracing::error!(
                reason = event.detail.as_deref().unwrap_or("unknown"),
                "unhandled promise rejection"
            );
            EventFlow::Continue
        }),
    );
}

/// Log the time from `started_at` to the window `load` event.
pub fn install_load_timing<S: Surface + 'static>(surface: &Rc<S>, started_at: Duration) {
    surface.listen(
        Target::Window,
        EventKind::Load,
        handler(surface, move |s: &Rc<S>, _| {
            let elapsed = s.now().saturating_sub(started_at);
            tracing::info!(elapsed_ms = elapsed.as_secs_f64() * 1000.0, "page loaded");
            EventFlow::Continue
        }),
    );
}

/// Placeholder for a third-party analytics integration.
pub fn init_analytics() {
    tracing::info!("analytics initialized");
}
