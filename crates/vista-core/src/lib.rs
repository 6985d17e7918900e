#![forbid(unsafe_code)]

//! Core primitives for the Bella Vista UI layer.
//!
//! Components never touch a document directly. They talk to a [`Surface`]:
//! a capability interface for querying nodes, mutating classes and styles,
//! subscribing to events, and observing visibility. Time is injected through
//! [`Clock`], so every delay (toast dismissal, filter transitions, throttle
//! windows) is driven by whoever owns the clock.
//!
//! Two surfaces exist: the browser one in `vista-web` and the in-memory one
//! in `vista-harness`. Everything above this crate is written against the
//! traits only.

pub mod clock;
pub mod error;
pub mod event;
pub mod selector;
pub mod surface;

pub use clock::Clock;
pub use error::UiError;
pub use event::{EventFlow, EventKind, Handler, Target, UiEvent};
pub use selector::{Matchable, Selector};
pub use surface::{
    ScrollBehavior, Surface, VisibilityCallback, VisibilityEntry, VisibilityOptions, WatchFlow,
};
