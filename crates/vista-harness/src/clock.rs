#![forbid(unsafe_code)]

//! Manually advanced clock.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::time::Duration;

use vista_core::Clock;

struct Pending {
    due: Duration,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

/// Clock that only moves when told to.
///
/// Tasks due at the same instant run in scheduling order. A task scheduled
/// while [`FakeClock::advance`] is running is picked up by the same call if
/// it falls inside the advanced window.
pub struct FakeClock {
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    queue: RefCell<Vec<Pending>>,
    today: RefCell<String>,
}

impl FakeClock {
    /// Clock at time zero on 2026-03-14.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            next_seq: Cell::new(0),
            queue: RefCell::new(Vec::new()),
            today: RefCell::new("2026-03-14".into()),
        }
    }

    pub fn set_today(&self, iso: &str) {
        *self.today.borrow_mut() = iso.to_owned();
    }

    /// Move time forward by `by`, running every task that comes due.
    /// Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let deadline = self.now.get() + by;
        let mut ran = 0;
        while let Some(pending) = self.pop_due(deadline) {
            self.now.set(pending.due.max(self.now.get()));
            (pending.task)();
            ran += 1;
        }
        self.now.set(deadline);
        tracing::trace!(now = ?deadline, ran, pending = self.pending(), "fake clock advanced");
        ran
    }

    /// Advance in milliseconds.
    pub fn advance_ms(&self, ms: u64) -> usize {
        self.advance(Duration::from_millis(ms))
    }

    /// Tasks not yet run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    fn pop_due(&self, deadline: Duration) -> Option<Pending> {
        let mut queue = self.queue.borrow_mut();
        let next = queue
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= deadline)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;
        Some(queue.swap_remove(next))
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.queue.borrow_mut().push(Pending {
            due: self.now.get() + delay,
            seq,
            task,
        });
    }

    fn today_iso(&self) -> String {
        self.today.borrow().clone()
    }
}

impl fmt::Debug for FakeClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeClock")
            .field("now", &self.now.get())
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn recorder(clock: &FakeClock, log: &Log, ms: u64, name: &'static str) {
        let log = Rc::clone(log);
        clock.schedule(
            Duration::from_millis(ms),
            Box::new(move || log.borrow_mut().push(name)),
        );
    }

    #[test]
    fn runs_due_tasks_in_time_then_schedule_order() {
        let clock = FakeClock::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        recorder(&clock, &log, 20, "late");
        recorder(&clock, &log, 10, "early");
        recorder(&clock, &log, 10, "early-second");

        assert_eq!(clock.advance_ms(9), 0);
        assert_eq!(clock.advance_ms(1), 2);
        assert_eq!(*log.borrow(), ["early", "early-second"]);
        assert_eq!(clock.advance_ms(10), 1);
        assert_eq!(clock.now(), Duration::from_millis(20));
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn tasks_scheduled_by_tasks_run_within_the_window() {
        let clock = Rc::new(FakeClock::new());
        let hits = Rc::new(Cell::new(0));
        {
            let (inner_clock, hits) = (Rc::clone(&clock), Rc::clone(&hits));
            clock.schedule(
                Duration::from_millis(5),
                Box::new(move || {
                    let hits = Rc::clone(&hits);
                    inner_clock.schedule(
                        Duration::from_millis(5),
                        Box::new(move || hits.set(hits.get() + 1)),
                    );
                }),
            );
        }
        assert_eq!(clock.advance_ms(10), 2);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn today_is_configurable() {
        let clock = FakeClock::new();
        clock.set_today("2027-01-02");
        assert_eq!(clock.today_iso(), "2027-01-02");
    }
}
