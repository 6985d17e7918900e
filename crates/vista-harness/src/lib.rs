#![forbid(unsafe_code)]

//! Test harness for the Bella Vista UI layer.
//!
//! - [`FakeClock`]: manual time with an ordered timer queue.
//! - [`MemorySurface`]: an arena-backed page implementing
//!   [`Surface`](vista_core::Surface), with helpers to click, type, scroll,
//!   press keys, reveal nodes, and inspect what the components did.
//! - [`fixture`]: the restaurant page markup the end-to-end suites run on.
//!
//! Helpers that look nodes up for a test panic when the node is missing;
//! that is the failure a test wants.

pub mod clock;
pub mod dom;
pub mod fixture;

pub use clock::FakeClock;
pub use dom::{El, MemorySurface, NodeId, OpenedWindow};
pub use fixture::{boot, boot_with, restaurant_page};
