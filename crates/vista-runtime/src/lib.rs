#![forbid(unsafe_code)]

//! Runtime utilities for the Bella Vista UI layer.
//!
//! - [`timing`]: debounce and throttle wrappers driven by an injected
//!   [`Clock`](vista_core::Clock).
//! - [`watch`]: trigger-once-per-target visibility watchers.
//! - [`config`]: every tunable constant and user-facing message, with
//!   optional TOML/JSON loading behind the `policy-config` feature.

pub mod config;
pub mod timing;
pub mod watch;

pub use config::UiConfig;
pub use timing::{Debounce, Throttle};
pub use watch::OnceWatcher;
