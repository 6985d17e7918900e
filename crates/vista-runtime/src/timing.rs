#![forbid(unsafe_code)]

//! Debounce and throttle over an injected clock.
//!
//! # Semantics
//!
//! - [`Debounce`]: a burst of calls produces one invocation, `wait` after the
//!   last call in the burst, with the argument of that last call. Every call
//!   restarts the pending timer.
//! - [`Throttle`]: the first call runs immediately and opens a window of
//!   `limit`; calls inside the window are dropped; the first call after the
//!   window closes runs and opens a new window.
//!
//! # Invariants
//!
//! 1. A debounced function never runs while newer calls are pending.
//! 2. Throttled invocations are at least `limit` apart on the clock.
//! 3. Neither wrapper keeps its function alive through scheduled timers:
//!    dropping the last handle turns pending timers into no-ops.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use vista_core::Clock;

struct DebounceInner<C, A> {
    clock: Rc<C>,
    wait: Duration,
    generation: Cell<u64>,
    pending: RefCell<Option<A>>,
    func: Box<dyn Fn(A)>,
}

/// Trailing-edge debounce wrapper. Cloning shares the pending state.
pub struct Debounce<C, A> {
    inner: Rc<DebounceInner<C, A>>,
}

impl<C, A> Clone for Debounce<C, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C: Clock + 'static, A: 'static> Debounce<C, A> {
    /// Wrap `func` so it runs only after `wait` of silence.
    pub fn new(clock: Rc<C>, wait: Duration, func: impl Fn(A) + 'static) -> Self {
        Self {
            inner: Rc::new(DebounceInner {
                clock,
                wait,
                generation: Cell::new(0),
                pending: RefCell::new(None),
                func: Box::new(func),
            }),
        }
    }

    /// Record a call; restarts the timer.
    pub fn call(&self, arg: A) {
        let generation = self.inner.generation.get().wrapping_add(1);
        self.inner.generation.set(generation);
        *self.inner.pending.borrow_mut() = Some(arg);

        let weak: Weak<DebounceInner<C, A>> = Rc::downgrade(&self.inner);
        self.inner.clock.schedule(
            self.inner.wait,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                if inner.generation.get() != generation {
                    return;
                }
                let arg = inner.pending.borrow_mut().take();
                if let Some(arg) = arg {
                    (inner.func)(arg);
                }
            }),
        );
    }

    /// Whether a call is waiting for its quiet period.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.borrow().is_some()
    }
}

/// Leading-edge throttle wrapper.
pub struct Throttle<C, A> {
    clock: Rc<C>,
    limit: Duration,
    window_end: Cell<Option<Duration>>,
    func: Box<dyn Fn(A)>,
}

impl<C: Clock, A> Throttle<C, A> {
    /// Wrap `func` so it runs at most once per `limit`.
    pub fn new(clock: Rc<C>, limit: Duration, func: impl Fn(A) + 'static) -> Self {
        Self {
            clock,
            limit,
            window_end: Cell::new(None),
            func: Box::new(func),
        }
    }

    /// Invoke if outside the current window. Returns whether `func` ran.
    pub fn call(&self, arg: A) -> bool {
        let now = self.clock.now();
        if let Some(end) = self.window_end.get()
            && now < end
        {
            tracing::trace!(?now, ?end, "throttled call dropped");
            return false;
        }
        self.window_end.set(Some(now + self.limit));
        (self.func)(arg);
        true
    }
}
