use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::{Timer, TimerHandle};

const DEFAULT_START_MILLIS: i64 = 1_700_000_000_000;

/// Virtual clock for hosts (and tests) that drive time themselves.
/// Callbacks only run inside [`ManualTimer::advance`].
#[derive(Clone)]
pub struct ManualTimer {
    state: Rc<RefCell<ManualState>>,
}

struct ManualState {
    now_millis: i64,
    next_id: u64,
    pending: Vec<Scheduled>,
}

struct Scheduled {
    id: u64,
    due: i64,
    callback: Box<dyn FnOnce()>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::starting_at(DEFAULT_START_MILLIS)
    }

    pub fn starting_at(now_millis: i64) -> Self {
        Self {
            state: Rc::new(RefCell::new(ManualState {
                now_millis,
                next_id: 0,
                pending: Vec::new(),
            })),
        }
    }

    /// Moves the clock forward, firing due callbacks in deadline order.
    /// Callbacks scheduled while advancing fire too if they fall inside
    /// the window.
    pub fn advance(&self, by: Duration) {
        let target = self.now_millis() + duration_millis(by);
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let index = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due <= target)
                    .min_by_key(|(_, task)| (task.due, task.id))
                    .map(|(index, _)| index);
                index.map(|index| {
                    let task = state.pending.remove(index);
                    state.now_millis = state.now_millis.max(task.due);
                    task
                })
            };
            match next {
                Some(task) => (task.callback)(),
                None => break,
            }
        }
        self.state.borrow_mut().now_millis = target;
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }
}

impl Default for ManualTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for ManualTimer {
    fn now_millis(&self) -> i64 {
        self.state.borrow().now_millis
    }

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            let due = state.now_millis + duration_millis(delay);
            state.pending.push(Scheduled { id, due, callback });
            id
        };

        let state = Rc::downgrade(&self.state);
        TimerHandle::new(move || {
            if let Some(state) = state.upgrade() {
                // Drop the removed callback after the borrow ends.
                let removed = {
                    let mut state = state.borrow_mut();
                    state
                        .pending
                        .iter()
                        .position(|task| task.id == id)
                        .map(|index| state.pending.remove(index))
                };
                drop(removed);
            }
        })
    }
}

fn duration_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
