use gloo_timers::callback::Timeout;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use super::{Timer, TimerHandle};

// setTimeout treats anything above i32::MAX as zero.
const MAX_DELAY_MS: u32 = i32::MAX as u32;

/// `setTimeout` through `gloo-timers`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let millis = u32::try_from(delay.as_millis())
            .unwrap_or(MAX_DELAY_MS)
            .min(MAX_DELAY_MS);
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let timeout = Timeout::new(millis, move || {
            flag.set(true);
            callback();
        });
        // A handle released from inside its own callback must not free the
        // closure that is still running.
        TimerHandle::new(move || {
            if fired.get() {
                timeout.forget();
            } else {
                drop(timeout);
            }
        })
    }
}
