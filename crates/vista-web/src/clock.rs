#![forbid(unsafe_code)]

//! Wall clock and `setTimeout` scheduling.

use std::time::Duration;

use gloo::timers::callback::Timeout;
use vista_core::Clock;
use web_time::Instant;

/// [`Clock`] over the browser's monotonic time and timers.
///
/// Timers are fire-and-forget: a scheduled task always runs, so tasks that
/// touch the page check that it is still alive themselves.
#[derive(Debug, Clone, Copy)]
pub struct BrowserClock {
    origin: Instant,
}

impl BrowserClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for BrowserClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for BrowserClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }

    fn today_iso(&self) -> String {
        let iso = String::from(js_sys::Date::new_0().to_iso_string());
        iso.split('T').next().unwrap_or_default().to_owned()
    }
}
