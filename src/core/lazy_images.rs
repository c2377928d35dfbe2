//! Deferred image loading.
//!
//! Images carrying a `data-src` placeholder get their real `src` the first
//! time they intersect the viewport, and are then no longer observed.

use std::cell::RefCell;
use std::collections::HashSet;

use super::reveal::Intersection;

/// Attribute holding the deferred image source
pub const PLACEHOLDER_ATTR: &str = "data-src";

/// DOM side of the lazy-image feature
pub trait ImageSurface {
    /// Current placeholder source of the image at `index`
    fn placeholder(&self, index: usize) -> Option<String>;
    /// Set `src` and drop the placeholder attribute. Returns false when the
    /// source could not be set; the image then stays observed.
    fn load(&self, index: usize, src: &str) -> bool;
    /// Stop observing the image at `index`
    fn unobserve(&self, index: usize);
}

/// Promotes placeholder sources as images approach the viewport.
pub struct LazyImageController<S> {
    surface: S,
    loaded: RefCell<HashSet<usize>>,
}

impl<S: ImageSurface> LazyImageController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            loaded: RefCell::new(HashSet::new()),
        }
    }

    /// Handle one observer batch. Returns the indices loaded by this batch.
    pub fn on_intersections(&self, entries: &[Intersection]) -> Vec<usize> {
        let mut loaded_now = Vec::new();
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            if self.loaded.borrow().contains(&entry.index) {
                continue;
            }
            let Some(src) = self.surface.placeholder(entry.index) else {
                continue;
            };
            if !self.surface.load(entry.index, &src) {
                continue;
            }
            self.surface.unobserve(entry.index);
            self.loaded.borrow_mut().insert(entry.index);
            loaded_now.push(entry.index);
        }
        if !loaded_now.is_empty() {
            tracing::debug!("Loaded deferred images {:?}", loaded_now);
        }
        loaded_now
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.loaded.borrow().contains(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// In-memory stand-in for a set of `<img>` elements
    #[derive(Clone, Default)]
    struct FakeImages {
        placeholders: Rc<RefCell<HashMap<usize, String>>>,
        sources: Rc<RefCell<HashMap<usize, String>>>,
        unobserved: Rc<RefCell<Vec<usize>>>,
        broken: Rc<RefCell<Vec<usize>>>,
    }

    impl FakeImages {
        fn with(placeholders: &[(usize, &str)]) -> Self {
            let images = Self::default();
            for (index, src) in placeholders {
                images
                    .placeholders
                    .borrow_mut()
                    .insert(*index, src.to_string());
            }
            images
        }
    }

    impl ImageSurface for FakeImages {
        fn placeholder(&self, index: usize) -> Option<String> {
            self.placeholders.borrow().get(&index).cloned()
        }

        fn load(&self, index: usize, src: &str) -> bool {
            if self.broken.borrow().contains(&index) {
                return false;
            }
            self.placeholders.borrow_mut().remove(&index);
            self.sources.borrow_mut().insert(index, src.to_string());
            true
        }

        fn unobserve(&self, index: usize) {
            self.unobserved.borrow_mut().push(index);
        }
    }

    #[test]
    fn test_intersection_promotes_placeholder() {
        let images = FakeImages::with(&[(0, "/img/hero.webp"), (1, "/img/team.webp")]);
        let controller = LazyImageController::new(images.clone());

        let loaded = controller.on_intersections(&[Intersection::entering(1)]);

        assert_eq!(loaded, vec![1]);
        assert_eq!(
            images.sources.borrow().get(&1).map(String::as_str),
            Some("/img/team.webp")
        );
        assert!(images.placeholders.borrow().get(&1).is_none());
        assert!(images.sources.borrow().get(&0).is_none());
        assert_eq!(*images.unobserved.borrow(), vec![1]);
    }

    #[test]
    fn test_image_loads_once() {
        let images = FakeImages::with(&[(0, "/a.png")]);
        let controller = LazyImageController::new(images.clone());

        controller.on_intersections(&[Intersection::entering(0)]);
        let second = controller.on_intersections(&[Intersection::entering(0)]);

        assert!(second.is_empty());
        assert!(controller.is_loaded(0));
        assert_eq!(images.unobserved.borrow().len(), 1);
    }

    #[test]
    fn test_leaving_entries_do_nothing() {
        let images = FakeImages::with(&[(0, "/a.png")]);
        let controller = LazyImageController::new(images.clone());

        assert!(controller.on_intersections(&[Intersection::leaving(0)]).is_empty());
        assert!(!controller.is_loaded(0));
    }

    #[test]
    fn test_image_without_placeholder_is_skipped() {
        let images = FakeImages::default();
        let controller = LazyImageController::new(images.clone());

        assert!(controller.on_intersections(&[Intersection::entering(3)]).is_empty());
        assert!(images.unobserved.borrow().is_empty());
    }

    #[test]
    fn test_failed_load_keeps_image_observed() {
        let images = FakeImages::with(&[(0, "/a.png")]);
        images.broken.borrow_mut().push(0);
        let controller = LazyImageController::new(images.clone());

        assert!(controller.on_intersections(&[Intersection::entering(0)]).is_empty());
        assert!(!controller.is_loaded(0));
        assert!(images.unobserved.borrow().is_empty());

        // Next intersection retries
        images.broken.borrow_mut().clear();
        assert_eq!(controller.on_intersections(&[Intersection::entering(0)]), vec![0]);
        assert_eq!(*images.unobserved.borrow(), vec![0]);
    }
}
