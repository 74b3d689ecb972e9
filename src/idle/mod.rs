// ============================================================================
// IDLE MONITOR - one cancelable timeout, re-armed on user activity
// ============================================================================
// The monitor only decides *when* the user went idle. What happens next
// (notice, logout) belongs to the layout that owns it.
// ============================================================================

#[cfg(target_arch = "wasm32")]
pub mod listeners;

#[cfg(target_arch = "wasm32")]
pub use listeners::ActivityListeners;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::time::{Timer, TimerHandle};

/// Anything that can report "the user did something".
pub trait ActivitySink {
    fn notify_activity(&self);
}

/// Window events that count as activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityEvent {
    MouseMove,
    MouseDown,
    KeyPress,
    Scroll,
    TouchStart,
}

impl ActivityEvent {
    pub const ALL: [ActivityEvent; 5] = [
        ActivityEvent::MouseMove,
        ActivityEvent::MouseDown,
        ActivityEvent::KeyPress,
        ActivityEvent::Scroll,
        ActivityEvent::TouchStart,
    ];

    pub fn event_name(&self) -> &'static str {
        match self {
            ActivityEvent::MouseMove => "mousemove",
            ActivityEvent::MouseDown => "mousedown",
            ActivityEvent::KeyPress => "keypress",
            ActivityEvent::Scroll => "scroll",
            ActivityEvent::TouchStart => "touchstart",
        }
    }
}

struct MonitorState {
    timer: Rc<dyn Timer>,
    timeout: Duration,
    on_timeout: Rc<dyn Fn()>,
    pending: RefCell<Option<TimerHandle>>,
    running: Cell<bool>,
    expired: Cell<bool>,
}

/// Fires `on_timeout` once `timeout` passes without activity. Stops on drop.
pub struct IdleMonitor {
    inner: Rc<MonitorState>,
}

impl IdleMonitor {
    pub fn start<F>(timer: Rc<dyn Timer>, timeout: Duration, on_timeout: F) -> Self
    where
        F: Fn() + 'static,
    {
        log::debug!("⏱️ Idle monitor armed for {:?}", timeout);
        let inner = Rc::new(MonitorState {
            timer,
            timeout,
            on_timeout: Rc::new(on_timeout),
            pending: RefCell::new(None),
            running: Cell::new(true),
            expired: Cell::new(false),
        });
        arm(&inner);
        Self { inner }
    }

    /// Cancels the pending timeout and schedules a fresh one from now.
    pub fn notify_activity(&self) {
        if self.inner.running.get() {
            arm(&self.inner);
        }
    }

    /// Cancels the pending timeout. Later activity is ignored.
    pub fn stop(&self) {
        if !self.inner.running.replace(false) {
            return;
        }
        drop(self.inner.pending.borrow_mut().take());
        log::debug!("⏱️ Idle monitor stopped");
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// True once the timeout fired, until the next activity re-arms it.
    pub fn has_expired(&self) -> bool {
        self.inner.expired.get()
    }

    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Sink for event listeners. Holds the monitor weakly, so a listener
    /// outliving it does nothing.
    pub fn activity_sink(&self) -> Rc<dyn ActivitySink> {
        Rc::new(WeakSink(Rc::downgrade(&self.inner)))
    }
}

impl ActivitySink for IdleMonitor {
    fn notify_activity(&self) {
        IdleMonitor::notify_activity(self);
    }
}

impl Drop for IdleMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

struct WeakSink(Weak<MonitorState>);

impl ActivitySink for WeakSink {
    fn notify_activity(&self) {
        if let Some(inner) = self.0.upgrade() {
            if inner.running.get() {
                arm(&inner);
            }
        }
    }
}

fn arm(inner: &Rc<MonitorState>) {
    let weak = Rc::downgrade(inner);
    let handle = inner.timer.schedule(
        inner.timeout,
        Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if !inner.running.get() {
                return;
            }
            // The spent handle stays in `pending` until the next arm or stop.
            inner.expired.set(true);
            log::info!("💤 No activity for {:?}", inner.timeout);
            let on_timeout = inner.on_timeout.clone();
            drop(inner);
            on_timeout();
        }),
    );

    inner.expired.set(false);
    let previous = inner.pending.borrow_mut().replace(handle);
    drop(previous);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualTimer;

    const TIMEOUT: Duration = Duration::from_secs(20 * 60);

    fn counting_monitor(timer: &ManualTimer) -> (IdleMonitor, Rc<Cell<u32>>) {
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let monitor = IdleMonitor::start(Rc::new(timer.clone()), TIMEOUT, move || {
            counter.set(counter.get() + 1)
        });
        (monitor, fired)
    }

    #[test]
    fn fires_once_after_the_timeout() {
        let timer = ManualTimer::new();
        let (monitor, fired) = counting_monitor(&timer);

        timer.advance(TIMEOUT - Duration::from_millis(1));
        assert_eq!(fired.get(), 0);
        timer.advance(Duration::from_millis(1));
        assert_eq!(fired.get(), 1);
        assert!(monitor.has_expired());

        timer.advance(TIMEOUT * 3);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn activity_pushes_the_deadline_back() {
        let timer = ManualTimer::new();
        let (monitor, fired) = counting_monitor(&timer);

        timer.advance(Duration::from_secs(19 * 60));
        monitor.notify_activity();
        timer.advance(Duration::from_secs(19 * 60));
        assert_eq!(fired.get(), 0);
        assert_eq!(timer.pending(), 1);

        timer.advance(Duration::from_secs(60));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn stop_cancels_the_pending_callback() {
        let timer = ManualTimer::new();
        let (monitor, fired) = counting_monitor(&timer);

        monitor.stop();
        assert_eq!(timer.pending(), 0);
        monitor.notify_activity();
        assert_eq!(timer.pending(), 0);

        timer.advance(TIMEOUT * 2);
        assert_eq!(fired.get(), 0);
        assert!(!monitor.is_running());
    }

    #[test]
    fn drop_is_a_stop() {
        let timer = ManualTimer::new();
        let (monitor, fired) = counting_monitor(&timer);
        let sink = monitor.activity_sink();

        drop(monitor);
        assert_eq!(timer.pending(), 0);

        sink.notify_activity();
        timer.advance(TIMEOUT * 2);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn sink_rearms_while_the_monitor_lives() {
        let timer = ManualTimer::new();
        let (monitor, fired) = counting_monitor(&timer);
        let sink = monitor.activity_sink();

        timer.advance(TIMEOUT - Duration::from_secs(1));
        sink.notify_activity();
        timer.advance(Duration::from_secs(2));
        assert_eq!(fired.get(), 0);
        assert!(!monitor.has_expired());
    }

    #[test]
    fn shortest_timeout_fires_exactly_once_without_activity() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let tick = Duration::from_millis(1);
        let monitor = IdleMonitor::start(Rc::new(timer.clone()), tick, move || {
            counter.set(counter.get() + 1)
        });

        monitor.notify_activity();
        assert_eq!(fired.get(), 0);

        timer.advance(tick);
        timer.advance(tick * 10);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn event_names_match_the_dom() {
        let names: Vec<_> = ActivityEvent::ALL.iter().map(|e| e.event_name()).collect();
        assert_eq!(names, ["mousemove", "mousedown", "keypress", "scroll", "touchstart"]);
    }
}
