// ============================================================================
// TIME - wall clock and cancelable delayed callbacks
// ============================================================================

mod manual;

#[cfg(target_arch = "wasm32")]
mod browser;

pub use manual::ManualTimer;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserTimer;

use std::time::Duration;

pub trait Timer {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// Runs `callback` once after `delay` unless the returned handle is
    /// canceled or dropped first.
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle;
}

/// Pending delayed callback. Dropping the handle cancels it.
#[must_use = "dropping a TimerHandle cancels the scheduled callback"]
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}
