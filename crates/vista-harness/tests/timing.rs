#![forbid(unsafe_code)]

//! Debounce and throttle on the harness clock.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vista_harness::FakeClock;
use vista_runtime::{Debounce, Throttle};

type Calls = Rc<RefCell<Vec<(u64, u32)>>>;

fn recorder(clock: &Rc<FakeClock>) -> (Calls, impl Fn(u32) + 'static) {
    use vista_core::Clock;
    let calls: Calls = Rc::default();
    let (sink, clock) = (Rc::clone(&calls), Rc::clone(clock));
    let record = move |arg| {
        let at = u64::try_from(clock.now().as_millis()).unwrap_or(u64::MAX);
        sink.borrow_mut().push((at, arg));
    };
    (calls, record)
}

#[test]
fn debounce_fires_once_after_the_burst() {
    let clock = Rc::new(FakeClock::new());
    let (calls, record) = recorder(&clock);
    let search = Debounce::new(Rc::clone(&clock), Duration::from_millis(250), record);

    for (gap, arg) in [(0, 1), (100, 2), (100, 3)] {
        clock.advance_ms(gap);
        search.call(arg);
    }
    clock.advance_ms(249);
    assert!(calls.borrow().is_empty());
    assert!(search.is_pending());
    clock.advance_ms(1);
    assert_eq!(*calls.borrow(), [(450, 3)]);
    assert!(!search.is_pending());
}

#[test]
fn dropped_debounce_never_fires() {
    let clock = Rc::new(FakeClock::new());
    let (calls, record) = recorder(&clock);
    let debounced = Debounce::new(Rc::clone(&clock), Duration::from_millis(10), record);
    debounced.call(1);
    drop(debounced);
    clock.advance_ms(50);
    assert!(calls.borrow().is_empty());
}

#[test]
fn throttle_leads_then_waits_out_the_window() {
    let clock = Rc::new(FakeClock::new());
    let (calls, record) = recorder(&clock);
    let scroll = Throttle::new(Rc::clone(&clock), Duration::from_millis(100), record);

    assert!(scroll.call(1));
    clock.advance_ms(60);
    assert!(!scroll.call(2));
    clock.advance_ms(40);
    assert!(scroll.call(3));
    assert_eq!(*calls.borrow(), [(0, 1), (100, 3)]);
}

proptest! {
    #[test]
    fn debounce_runs_once_per_quiet_period(gaps in proptest::collection::vec(0u64..400, 1..20)) {
        let clock = Rc::new(FakeClock::new());
        let (calls, record) = recorder(&clock);
        let wait = 200;
        let debounced = Debounce::new(Rc::clone(&clock), Duration::from_millis(wait), record);

        let mut expected = Vec::new();
        let mut last: Option<(u64, u32)> = None;
        let mut now = 0;
        for (i, gap) in gaps.iter().enumerate() {
            if let Some((at, arg)) = last
                && now + gap >= at + wait
            {
                expected.push((at + wait, arg));
            }
            clock.advance_ms(*gap);
            now += gap;
            let arg = u32::try_from(i).unwrap_or(u32::MAX);
            debounced.call(arg);
            last = Some((now, arg));
        }
        if let Some((at, arg)) = last {
            expected.push((at + wait, arg));
        }
        clock.advance_ms(wait);
        prop_assert_eq!(calls.borrow().clone(), expected);
    }
}
