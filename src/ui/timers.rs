//! Browser implementation of [`Scheduler`] on top of `gloo-timers`.
//!
//! Each task runs as a future on the wasm-bindgen-futures executor, awaiting
//! `TimeoutFuture`s. Cancellation flips a per-task flag checked after every
//! wake-up.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use crate::core::scheduler::{Scheduler, TaskControl, TaskId};

#[derive(Default)]
struct TimerState {
    next_id: TaskId,
    live: HashMap<TaskId, Rc<Cell<bool>>>,
}

/// Scheduler backed by real browser timers
#[derive(Clone, Default)]
pub struct BrowserScheduler {
    state: Rc<RefCell<TimerState>>,
}

fn millis(duration: Duration) -> u32 {
    duration.as_millis().min(u32::MAX as u128) as u32
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&self) -> (TaskId, Rc<Cell<bool>>) {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let cancelled = Rc::new(Cell::new(false));
        state.live.insert(id, Rc::clone(&cancelled));
        (id, cancelled)
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskId {
        let (id, cancelled) = self.register();
        let state = Rc::clone(&self.state);
        spawn_local(async move {
            TimeoutFuture::new(millis(delay)).await;
            if !cancelled.get() {
                task();
            }
            state.borrow_mut().live.remove(&id);
        });
        id
    }

    fn set_interval(&self, period: Duration, mut task: Box<dyn FnMut() -> TaskControl>) -> TaskId {
        let (id, cancelled) = self.register();
        let state = Rc::clone(&self.state);
        let period = millis(period);
        spawn_local(async move {
            loop {
                TimeoutFuture::new(period).await;
                if cancelled.get() || task() == TaskControl::Stop {
                    break;
                }
            }
            state.borrow_mut().live.remove(&id);
        });
        id
    }

    fn cancel(&self, id: TaskId) {
        if let Some(cancelled) = self.state.borrow_mut().live.remove(&id) {
            cancelled.set(true);
        }
    }
}
