#![forbid(unsafe_code)]

//! Trigger-once-per-target visibility watchers.
//!
//! A [`OnceWatcher`] pairs a predicate over [`VisibilityEntry`] with an
//! action over the target node. The first entry for a target that satisfies
//! the predicate runs the action and unobserves that target. Fade-in
//! animation and lazy image loading are both instances.
//!
//! # Invariants
//!
//! 1. The action runs at most once per target, even on a backend that keeps
//!    delivering entries after [`WatchFlow::Unobserve`].
//! 2. Entries that fail the predicate keep the target observed.

use std::cell::RefCell;
use std::rc::Rc;

use vista_core::{Surface, VisibilityCallback, VisibilityEntry, VisibilityOptions, WatchFlow};

type Predicate<N> = Box<dyn Fn(&VisibilityEntry<N>) -> bool>;
type Action<N> = Box<dyn Fn(&N)>;

/// One-shot watcher builder.
pub struct OnceWatcher<N> {
    predicate: Predicate<N>,
    action: Action<N>,
}

impl<N: Clone + PartialEq + 'static> OnceWatcher<N> {
    /// Fire `action` the first time a target intersects the viewport.
    pub fn new(action: impl Fn(&N) + 'static) -> Self {
        Self {
            predicate: Box::new(|entry| entry.is_intersecting),
            action: Box::new(action),
        }
    }

    /// Replace the default "is intersecting" predicate.
    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Fn(&VisibilityEntry<N>) -> bool + 'static) -> Self {
        self.predicate = Box::new(predicate);
        self
    }

    /// Convert into a surface callback.
    pub fn into_callback(self) -> VisibilityCallback<N> {
        let fired: RefCell<Vec<N>> = RefCell::new(Vec::new());
        Rc::new(move |entry: &VisibilityEntry<N>| {
            if fired.borrow().contains(&entry.node) {
                return WatchFlow::Unobserve;
            }
            if !(self.predicate)(entry) {
                return WatchFlow::Keep;
            }
            fired.borrow_mut().push(entry.node.clone());
            (self.action)(&entry.node);
            WatchFlow::Unobserve
        })
    }

    /// Observe `targets` on `surface` with a single observer.
    pub fn attach<S>(self, surface: &S, targets: &[N], options: VisibilityOptions)
    where
        S: Surface<Node = N>,
    {
        if targets.is_empty() {
            return;
        }
        surface.observe_visibility(targets, options, self.into_callback());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn entry(node: u32, visible: bool) -> VisibilityEntry<u32> {
        VisibilityEntry {
            node,
            is_intersecting: visible,
            ratio: if visible { 1.0 } else { 0.0 },
        }
    }

    #[test]
    fn fires_once_per_target() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&hits);
        let cb = OnceWatcher::new(move |n: &u32| sink.borrow_mut().push(*n)).into_callback();

        assert_eq!(cb(&entry(1, false)), WatchFlow::Keep);
        assert_eq!(cb(&entry(1, true)), WatchFlow::Unobserve);
        assert_eq!(cb(&entry(2, true)), WatchFlow::Unobserve);
        assert_eq!(cb(&entry(1, true)), WatchFlow::Unobserve);
        assert_eq!(*hits.borrow(), vec![1, 2]);
    }

    #[test]
    fn custom_predicate() {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let cb = OnceWatcher::new(move |_: &u32| c.set(c.get() + 1))
            .with_predicate(|e| e.ratio >= 0.5)
            .into_callback();

        let mut half = entry(3, true);
        half.ratio = 0.2;
        assert_eq!(cb(&half), WatchFlow::Keep);
        half.ratio = 0.6;
        assert_eq!(cb(&half), WatchFlow::Unobserve);
        assert_eq!(count.get(), 1);
    }
}
