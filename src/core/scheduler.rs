//! Delayed and periodic task scheduling
//!
//! Every timer the landing page uses (counter ticks, the simulated submission
//! delay, message dismissal, orb re-coloring) goes through the [`Scheduler`]
//! trait. The browser implementation lives in `ui::timers`; [`VirtualScheduler`]
//! runs tasks against a virtual clock so tests can fast-forward time.
//!
//! # Usage Example
//!
//! ```rust
//! use landing_interactions::core::scheduler::{Scheduler, TaskControl, VirtualScheduler};
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let scheduler = VirtualScheduler::new();
//! let ticks = Rc::new(Cell::new(0));
//!
//! let counter = ticks.clone();
//! scheduler.set_interval(
//!     Duration::from_millis(16),
//!     Box::new(move || {
//!         counter.set(counter.get() + 1);
//!         if counter.get() == 3 { TaskControl::Stop } else { TaskControl::Continue }
//!     }),
//! );
//!
//! scheduler.advance(Duration::from_secs(1));
//! assert_eq!(ticks.get(), 3);
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

/// Identifier of a scheduled task
pub type TaskId = u64;

/// Returned by periodic tasks to decide whether they run again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskControl {
    Continue,
    Stop,
}

/// Scheduler for single-threaded delayed callbacks.
pub trait Scheduler {
    /// Run `task` once after `delay`
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskId;

    /// Run `task` every `period` until it returns [`TaskControl::Stop`] or is cancelled
    fn set_interval(&self, period: Duration, task: Box<dyn FnMut() -> TaskControl>) -> TaskId;

    /// Cancel a pending task. Unknown or finished ids are ignored.
    fn cancel(&self, id: TaskId);
}

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeat {
        period: Duration,
        task: Box<dyn FnMut() -> TaskControl>,
    },
}

#[derive(Default)]
struct VirtualState {
    now: Duration,
    next_id: TaskId,
    queue: BTreeMap<(Duration, TaskId), Task>,
    /// Due time of every live task, including the one currently running
    due: HashMap<TaskId, Duration>,
}

/// Scheduler driven by a virtual clock.
///
/// Nothing runs until [`VirtualScheduler::advance`] is called. Tasks fire in
/// due-time order, ties broken by scheduling order. Clones share the same clock.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    state: Rc<RefCell<VirtualState>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of tasks still waiting to run
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Move the clock forward by `by`, running every task that falls due.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let key = match state.queue.keys().next() {
                    Some(&key) if key.0 <= target => key,
                    _ => break,
                };
                state.now = key.0;
                state.queue.remove(&key).map(|task| (key, task))
            };
            let Some(((due, id), task)) = next else { break };

            // The borrow is released here so tasks may schedule or cancel.
            match task {
                Task::Once(task) => {
                    task();
                    self.state.borrow_mut().due.remove(&id);
                }
                Task::Repeat { period, mut task } => {
                    let control = task();
                    let mut state = self.state.borrow_mut();
                    let alive = state.due.contains_key(&id);
                    if control == TaskControl::Continue && alive {
                        let next_due = due + period;
                        state.due.insert(id, next_due);
                        state
                            .queue
                            .insert((next_due, id), Task::Repeat { period, task });
                    } else {
                        state.due.remove(&id);
                    }
                }
            }
        }
        self.state.borrow_mut().now = target;
    }

    /// Run everything until the queue is empty or `limit` of virtual time passed.
    pub fn run_until_idle(&self, limit: Duration) {
        let deadline = self.now() + limit;
        while self.pending() > 0 && self.now() < deadline {
            let next_due = self.state.borrow().queue.keys().next().map(|k| k.0);
            match next_due {
                Some(due) if due <= deadline => self.advance(due.saturating_sub(self.now())),
                _ => break,
            }
        }
    }

    fn push(&self, delay: Duration, task: Task) -> TaskId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now + delay;
        state.due.insert(id, due);
        state.queue.insert((due, id), task);
        id
    }
}

impl Scheduler for VirtualScheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskId {
        self.push(delay, Task::Once(task))
    }

    fn set_interval(&self, period: Duration, task: Box<dyn FnMut() -> TaskControl>) -> TaskId {
        self.push(period, Task::Repeat { period, task })
    }

    fn cancel(&self, id: TaskId) {
        let mut state = self.state.borrow_mut();
        if let Some(due) = state.due.remove(&id) {
            state.queue.remove(&(due, id));
        }
    }
}
