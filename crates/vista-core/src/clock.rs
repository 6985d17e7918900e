#![forbid(unsafe_code)]

//! Time source and one-shot timer scheduling.
//!
//! # Invariants
//!
//! 1. `now()` is monotonic non-decreasing.
//! 2. A task scheduled with delay `d` at time `t` never runs before `t + d`.
//! 3. Tasks run to completion on the same thread that scheduled them; there
//!    is no cancellation handle. Callers that need "last call wins" semantics
//!    use a generation counter (see `vista_runtime::timing`).

use std::time::Duration;

/// Injected clock: the only way components observe or wait on time.
pub trait Clock {
    /// Elapsed time since an arbitrary, fixed origin.
    fn now(&self) -> Duration;

    /// Run `task` once, after `delay`.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);

    /// Today's calendar date as `YYYY-MM-DD` (UTC).
    fn today_iso(&self) -> String;
}
