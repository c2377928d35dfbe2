//! Animated statistic counters
//!
//! A counter counts up from zero to the integer in its `data-target`
//! attribute once it is half visible. The animation runs on a fixed-period
//! timer: every tick adds `target / (duration / tick)` to a running value and
//! displays its floor, until the running value reaches the target, at which
//! point the exact target is displayed and the timer stops.

use std::cell::RefCell;
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;
use std::time::Duration;

use super::reveal::Intersection;
use super::scheduler::{Scheduler, TaskControl, TaskId};

/// Class added to a counter element once it started animating
pub const ANIMATED_CLASS: &str = "animated";

/// Parse a counter target the way `parseInt` does: optional leading
/// whitespace and sign, then as many digits as follow.
pub fn parse_target(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

/// One displayed step of a counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    pub finished: bool,
}

/// Running state of one counter animation.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: f64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: i64, duration: Duration, tick: Duration) -> Self {
        let ticks = if tick.is_zero() {
            1.0
        } else {
            (duration.as_secs_f64() / tick.as_secs_f64()).max(1.0)
        };
        let target = target as f64;
        Self {
            target,
            increment: target / ticks,
            current: 0.0,
            finished: false,
        }
    }

    /// Advance one tick and return the value to display
    pub fn tick(&mut self) -> CounterFrame {
        if !self.finished {
            self.current += self.increment;
            if self.current >= self.target {
                self.finished = true;
            }
        }

        if self.finished {
            CounterFrame {
                value: self.target as i64,
                finished: true,
            }
        } else {
            CounterFrame {
                value: self.current.floor() as i64,
                finished: false,
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// One-shot "already animated" flags keyed by element identity
#[derive(Debug, Clone)]
pub struct CounterRegistry<K> {
    animated: HashSet<K>,
}

impl<K: Hash + Eq> CounterRegistry<K> {
    pub fn new() -> Self {
        Self {
            animated: HashSet::new(),
        }
    }

    /// Mark `key` as animated. Returns false when it already was.
    pub fn try_begin(&mut self, key: K) -> bool {
        self.animated.insert(key)
    }

    pub fn is_animated(&self, key: &K) -> bool {
        self.animated.contains(key)
    }

    pub fn len(&self) -> usize {
        self.animated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animated.is_empty()
    }
}

impl<K: Hash + Eq> Default for CounterRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// DOM side of the counter feature
pub trait CounterSurface {
    /// Raw `data-target` of the counter at `index`
    fn target(&self, index: usize) -> Option<String>;
    /// Flag the element as animated (the `animated` class)
    fn mark_animated(&self, index: usize);
    /// Show `value` in the counter at `index`
    fn display(&self, index: usize, value: i64);
}

struct CounterInner<S> {
    surface: S,
    scheduler: Rc<dyn Scheduler>,
    duration: Duration,
    tick: Duration,
    registry: RefCell<CounterRegistry<usize>>,
    tasks: RefCell<Vec<TaskId>>,
}

/// Starts counter animations as counters scroll into view.
pub struct CounterController<S> {
    inner: Rc<CounterInner<S>>,
}

impl<S: CounterSurface + 'static> CounterController<S> {
    pub fn new(
        surface: S,
        scheduler: Rc<dyn Scheduler>,
        duration: Duration,
        tick: Duration,
    ) -> Self {
        Self {
            inner: Rc::new(CounterInner {
                surface,
                scheduler,
                duration,
                tick,
                registry: RefCell::new(CounterRegistry::new()),
                tasks: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Handle one observer batch, starting every counter seen for the first time.
    pub fn on_intersections(&self, entries: &[Intersection]) -> Vec<TaskId> {
        entries
            .iter()
            .filter(|entry| entry.is_intersecting)
            .filter_map(|entry| self.start(entry.index))
            .collect()
    }

    fn start(&self, index: usize) -> Option<TaskId> {
        if !self.inner.registry.borrow_mut().try_begin(index) {
            return None;
        }
        self.inner.surface.mark_animated(index);

        let raw = self.inner.surface.target(index).unwrap_or_default();
        let Some(target) = parse_target(&raw) else {
            tracing::warn!("Counter {} has no numeric target: {:?}", index, raw);
            return None;
        };

        let mut animation = CounterAnimation::new(target, self.inner.duration, self.inner.tick);
        let inner = Rc::clone(&self.inner);
        let id = self.inner.scheduler.set_interval(
            self.inner.tick,
            Box::new(move || {
                let frame = animation.tick();
                inner.surface.display(index, frame.value);
                if frame.finished {
                    TaskControl::Stop
                } else {
                    TaskControl::Continue
                }
            }),
        );
        self.inner.tasks.borrow_mut().push(id);
        tracing::debug!("Counter {} animating to {}", index, target);
        Some(id)
    }

    /// Stop every counter animation still running
    pub fn dispose(&self) {
        let tasks: Vec<TaskId> = self.inner.tasks.borrow_mut().drain(..).collect();
        for id in tasks {
            self.inner.scheduler.cancel(id);
        }
    }

    pub fn is_animated(&self, index: usize) -> bool {
        self.inner.registry.borrow().is_animated(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scheduler::VirtualScheduler;
    use std::collections::HashMap;

    #[derive(Clone, Default)]
    struct RecordingCounters {
        targets: Rc<HashMap<usize, String>>,
        marked: Rc<RefCell<Vec<usize>>>,
        shown: Rc<RefCell<Vec<(usize, i64)>>>,
    }

    impl CounterSurface for RecordingCounters {
        fn target(&self, index: usize) -> Option<String> {
            self.targets.get(&index).cloned()
        }

        fn mark_animated(&self, index: usize) {
            self.marked.borrow_mut().push(index);
        }

        fn display(&self, index: usize, value: i64) {
            self.shown.borrow_mut().push((index, value));
        }
    }

    fn counters(targets: &[(usize, &str)]) -> RecordingCounters {
        RecordingCounters {
            targets: Rc::new(
                targets
                    .iter()
                    .map(|(i, t)| (*i, t.to_string()))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    fn run_to_end(target: i64) -> Vec<i64> {
        let mut animation =
            CounterAnimation::new(target, Duration::from_millis(2000), Duration::from_millis(16));
        let mut values = Vec::new();
        for _ in 0..10_000 {
            let frame = animation.tick();
            values.push(frame.value);
            if frame.finished {
                break;
            }
        }
        values
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("1500"), Some(1500));
        assert_eq!(parse_target("  98"), Some(98));
        assert_eq!(parse_target("250+"), Some(250));
        assert_eq!(parse_target("-40"), Some(-40));
        assert_eq!(parse_target("+7"), Some(7));
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("-"), None);
    }

    #[test]
    fn test_animation_ends_exactly_on_target() {
        for target in [0, 1, 7, 98, 125, 500, 1500, 1_000_000] {
            let values = run_to_end(target);
            assert_eq!(*values.last().unwrap(), target, "target {}", target);
        }
    }

    #[test]
    fn test_animation_values_non_decreasing_and_bounded() {
        for target in [3, 98, 1500, 12_345] {
            let values = run_to_end(target);
            assert!(values.windows(2).all(|w| w[0] <= w[1]));
            assert!(values.iter().all(|v| *v <= target));
        }
    }

    #[test]
    fn test_animation_takes_about_125_ticks() {
        let values = run_to_end(1500);
        assert!(values.len() >= 125 && values.len() <= 126, "{}", values.len());
        assert_eq!(values[0], 12);
    }

    #[test]
    fn test_finished_animation_stays_on_target() {
        let mut animation =
            CounterAnimation::new(10, Duration::from_millis(32), Duration::from_millis(16));
        animation.tick();
        assert!(animation.tick().finished);
        assert_eq!(
            animation.tick(),
            CounterFrame {
                value: 10,
                finished: true
            }
        );
        assert!(animation.is_finished());
    }

    #[test]
    fn test_zero_tick_finishes_in_one_step() {
        let mut animation = CounterAnimation::new(50, Duration::from_millis(2000), Duration::ZERO);
        assert_eq!(animation.tick().value, 50);
    }

    #[test]
    fn test_registry_is_one_shot() {
        let mut registry = CounterRegistry::new();
        assert!(registry.try_begin("a"));
        assert!(!registry.try_begin("a"));
        assert!(registry.try_begin("b"));
        assert!(registry.is_animated(&"a"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_controller_runs_counter_to_target() {
        let scheduler = VirtualScheduler::new();
        let surface = counters(&[(0, "1500")]);
        let controller = CounterController::new(
            surface.clone(),
            Rc::new(scheduler.clone()),
            Duration::from_millis(2000),
            Duration::from_millis(16),
        );

        let started = controller.on_intersections(&[Intersection::entering(0)]);
        assert_eq!(started.len(), 1);
        assert_eq!(*surface.marked.borrow(), vec![0]);

        scheduler.advance(Duration::from_millis(2100));
        let shown = surface.shown.borrow();
        assert_eq!(shown.last(), Some(&(0, 1500)));
        assert!(shown.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_controller_ignores_repeat_intersections() {
        let scheduler = VirtualScheduler::new();
        let surface = counters(&[(0, "100")]);
        let controller = CounterController::new(
            surface.clone(),
            Rc::new(scheduler.clone()),
            Duration::from_millis(2000),
            Duration::from_millis(16),
        );

        controller.on_intersections(&[Intersection::entering(0)]);
        scheduler.advance(Duration::from_millis(500));
        let started = controller.on_intersections(&[Intersection::entering(0)]);

        assert!(started.is_empty());
        assert!(controller.is_animated(0));
        assert_eq!(*surface.marked.borrow(), vec![0]);
    }

    #[test]
    fn test_controller_skips_leaving_and_invalid_targets() {
        let scheduler = VirtualScheduler::new();
        let surface = counters(&[(0, "n/a")]);
        let controller = CounterController::new(
            surface.clone(),
            Rc::new(scheduler.clone()),
            Duration::from_millis(2000),
            Duration::from_millis(16),
        );

        assert!(controller.on_intersections(&[Intersection::leaving(0)]).is_empty());
        assert!(!controller.is_animated(0));

        assert!(controller.on_intersections(&[Intersection::entering(0)]).is_empty());
        assert!(controller.on_intersections(&[Intersection::entering(1)]).is_empty());
        scheduler.advance(Duration::from_secs(3));
        assert!(surface.shown.borrow().is_empty());
    }

    #[test]
    fn test_dispose_stops_running_counters() {
        let scheduler = VirtualScheduler::new();
        let surface = counters(&[(0, "1500")]);
        let controller = CounterController::new(
            surface.clone(),
            Rc::new(scheduler.clone()),
            Duration::from_millis(2000),
            Duration::from_millis(16),
        );

        controller.on_intersections(&[Intersection::entering(0)]);
        scheduler.advance(Duration::from_millis(160));
        let shown = surface.shown.borrow().len();
        assert_eq!(shown, 10);

        controller.dispose();
        scheduler.advance(Duration::from_secs(3));

        assert_eq!(surface.shown.borrow().len(), shown);
        assert_eq!(scheduler.pending(), 0);
    }
}
