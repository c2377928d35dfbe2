//! Viewport-entry fade-in animations
//!
//! Content blocks start hidden and slide into place the first time they
//! intersect the viewport. Entries reported together in one observer batch are
//! staggered by their position in that batch, producing a cascade.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use super::config::LandingConfig;
use super::scheduler::{Scheduler, TaskId};

/// Initial inline style of a fade target
pub const FADE_HIDDEN: [(&str, &str); 3] = [
    ("opacity", "0"),
    ("transform", "translateY(30px)"),
    ("transition", "opacity 0.6s ease-out, transform 0.6s ease-out"),
];

/// Final inline style of a revealed fade target
pub const FADE_SHOWN: [(&str, &str); 2] = [("opacity", "1"), ("transform", "translateY(0)")];

/// One entry of an intersection observer batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intersection {
    /// Position of the element in the feature's element list
    pub index: usize,
    pub is_intersecting: bool,
}

impl Intersection {
    pub fn entering(index: usize) -> Self {
        Self {
            index,
            is_intersecting: true,
        }
    }

    pub fn leaving(index: usize) -> Self {
        Self {
            index,
            is_intersecting: false,
        }
    }
}

/// Options for an intersection observer
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl ObserverOptions {
    pub fn fade_in(config: &LandingConfig) -> Self {
        Self {
            threshold: config.fade_threshold,
            root_margin: config.fade_root_margin.clone(),
        }
    }

    pub fn counters(config: &LandingConfig) -> Self {
        Self {
            threshold: config.counter_threshold,
            root_margin: "0px".to_string(),
        }
    }

    /// Any visible pixel counts
    pub fn lazy_images() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".to_string(),
        }
    }
}

/// Animation state of an observed element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Unseen,
    Animating,
    Done,
}

/// DOM side of the fade-in feature
pub trait RevealSurface {
    /// Apply the final (visible) style to the element at `index`
    fn reveal(&self, index: usize);
}

struct FadeInner<S> {
    surface: S,
    scheduler: Rc<dyn Scheduler>,
    stagger: Duration,
    states: RefCell<Vec<RevealState>>,
    // Stagger timers not yet fired, by element index
    pending: RefCell<HashMap<usize, TaskId>>,
}

/// Fade-in controller for a fixed list of elements.
pub struct FadeInController<S> {
    inner: Rc<FadeInner<S>>,
}

impl<S: RevealSurface + 'static> FadeInController<S> {
    pub fn new(surface: S, count: usize, scheduler: Rc<dyn Scheduler>, stagger: Duration) -> Self {
        Self {
            inner: Rc::new(FadeInner {
                surface,
                scheduler,
                stagger,
                states: RefCell::new(vec![RevealState::Unseen; count]),
                pending: RefCell::new(HashMap::new()),
            }),
        }
    }

    /// Handle one observer batch.
    ///
    /// Each unseen, intersecting element is revealed after
    /// `stagger * position-in-batch`. Elements already animating or done are
    /// left alone.
    pub fn on_intersections(&self, entries: &[Intersection]) {
        for (position, entry) in entries.iter().enumerate() {
            if !entry.is_intersecting {
                continue;
            }
            let index = entry.index;
            {
                let mut states = self.inner.states.borrow_mut();
                match states.get_mut(index) {
                    Some(state) if *state == RevealState::Unseen => {
                        *state = RevealState::Animating
                    }
                    Some(_) => continue,
                    None => {
                        tracing::debug!("Ignoring fade entry for unknown element {}", index);
                        continue;
                    }
                }
            }

            let inner = Rc::clone(&self.inner);
            let delay = self.inner.stagger * position as u32;
            let id = self.inner.scheduler.set_timeout(
                delay,
                Box::new(move || {
                    inner.pending.borrow_mut().remove(&index);
                    inner.surface.reveal(index);
                    if let Some(state) = inner.states.borrow_mut().get_mut(index) {
                        *state = RevealState::Done;
                    }
                }),
            );
            self.inner.pending.borrow_mut().insert(index, id);
        }
    }

    /// Cancel every reveal still waiting on its stagger delay
    pub fn dispose(&self) {
        let pending: Vec<TaskId> = self
            .inner
            .pending
            .borrow_mut()
            .drain()
            .map(|(_, id)| id)
            .collect();
        for id in pending {
            self.inner.scheduler.cancel(id);
        }
    }

    pub fn state(&self, index: usize) -> Option<RevealState> {
        self.inner.states.borrow().get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.states.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scheduler::VirtualScheduler;

    #[derive(Clone, Default)]
    struct RecordingSurface {
        revealed: Rc<RefCell<Vec<usize>>>,
    }

    impl RevealSurface for RecordingSurface {
        fn reveal(&self, index: usize) {
            self.revealed.borrow_mut().push(index);
        }
    }

    fn setup(
        count: usize,
    ) -> (
        FadeInController<RecordingSurface>,
        RecordingSurface,
        VirtualScheduler,
    ) {
        let scheduler = VirtualScheduler::new();
        let surface = RecordingSurface::default();
        let controller = FadeInController::new(
            surface.clone(),
            count,
            Rc::new(scheduler.clone()),
            Duration::from_millis(100),
        );
        (controller, surface, scheduler)
    }

    #[test]
    fn test_first_entry_reveals_immediately() {
        let (controller, surface, scheduler) = setup(3);

        controller.on_intersections(&[Intersection::entering(1)]);
        assert_eq!(controller.state(1), Some(RevealState::Animating));

        scheduler.advance(Duration::ZERO);
        assert_eq!(*surface.revealed.borrow(), vec![1]);
        assert_eq!(controller.state(1), Some(RevealState::Done));
    }

    #[test]
    fn test_batch_is_staggered_by_position() {
        let (controller, surface, scheduler) = setup(4);

        controller.on_intersections(&[
            Intersection::entering(2),
            Intersection::entering(0),
            Intersection::entering(3),
        ]);

        scheduler.advance(Duration::ZERO);
        assert_eq!(*surface.revealed.borrow(), vec![2]);

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(*surface.revealed.borrow(), vec![2, 0]);

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(*surface.revealed.borrow(), vec![2, 0, 3]);
    }

    #[test]
    fn test_non_intersecting_entries_still_count_for_stagger() {
        let (controller, surface, scheduler) = setup(2);

        controller.on_intersections(&[Intersection::leaving(0), Intersection::entering(1)]);

        scheduler.advance(Duration::from_millis(99));
        assert!(surface.revealed.borrow().is_empty());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*surface.revealed.borrow(), vec![1]);
        assert_eq!(controller.state(0), Some(RevealState::Unseen));
    }

    #[test]
    fn test_repeated_intersection_is_ignored() {
        let (controller, surface, scheduler) = setup(1);

        controller.on_intersections(&[Intersection::entering(0)]);
        controller.on_intersections(&[Intersection::entering(0)]);
        scheduler.advance(Duration::from_secs(1));
        controller.on_intersections(&[Intersection::entering(0)]);
        scheduler.advance(Duration::from_secs(1));

        assert_eq!(*surface.revealed.borrow(), vec![0]);
    }

    #[test]
    fn test_unknown_index_is_ignored() {
        let (controller, surface, scheduler) = setup(1);

        controller.on_intersections(&[Intersection::entering(7)]);
        scheduler.advance(Duration::from_secs(1));

        assert!(surface.revealed.borrow().is_empty());
        assert_eq!(controller.state(7), None);
    }

    #[test]
    fn test_observer_options() {
        let config = LandingConfig::default();

        let fade = ObserverOptions::fade_in(&config);
        assert_eq!(fade.threshold, 0.1);
        assert_eq!(fade.root_margin, "0px 0px -50px 0px");

        let counters = ObserverOptions::counters(&config);
        assert_eq!(counters.threshold, 0.5);
        assert_eq!(counters.root_margin, "0px");
    }

    #[test]
    fn test_dispose_cancels_staggered_reveals() {
        let (controller, surface, scheduler) = setup(3);

        controller.on_intersections(&[
            Intersection::entering(0),
            Intersection::entering(1),
            Intersection::entering(2),
        ]);
        scheduler.advance(Duration::ZERO);
        assert_eq!(*surface.revealed.borrow(), vec![0]);

        controller.dispose();
        scheduler.advance(Duration::from_secs(1));

        assert_eq!(*surface.revealed.borrow(), vec![0]);
        assert_eq!(scheduler.pending(), 0);
    }
}
