//! Browser backend for the Bella Vista UI layer.
//!
//! On `wasm32` this crate provides [`DomSurface`], a [`Surface`] over
//! `web-sys`, and a `#[wasm_bindgen(start)]` entry point that wires the page
//! once the document is parsed. The page controller lives for the lifetime of
//! the module; `teardown()` drops it, which detaches every listener and
//! disconnects every visibility observer.
//!
//! The configuration and log-filter helpers are plain Rust and build on every
//! target, so they are tested natively.
//!
//! # JavaScript API
//!
//! | Export | Behavior |
//! |--------|----------|
//! | `showMessage(text, kind?)` | Replace the visible toast |
//! | `validateForm(form)` | Validate a form, updating inline errors |
//! | `shareOnSocial(platform, url?, title?)` | Open a share popup |
//! | `debounce(fn, waitMs)` | Trailing-edge debounced wrapper; forwards the first argument only |
//! | `throttle(fn, limitMs)` | Leading-edge throttled wrapper; forwards the first argument only |
//! | `printPage()` | Open the print dialog |
//! | `teardown()` | Drop the page controller |
//!
//! [`Surface`]: vista_core::Surface

pub mod config;
pub mod logging;

#[cfg(target_arch = "wasm32")]
mod clock;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod exports;

#[cfg(target_arch = "wasm32")]
pub use clock::BrowserClock;
#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;

/// Whether a page in `document.readyState` must wait for
/// `DOMContentLoaded` before it can be wired.
#[must_use]
pub fn waits_for_dom(ready_state: &str) -> bool {
    ready_state == "loading"
}
