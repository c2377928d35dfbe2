//! Deferred image loading

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Element, IntersectionObserver};

use super::dom::{Feature, HostError, query_all};
use super::observer::ViewportObserver;
use crate::core::lazy_images::{ImageSurface, LazyImageController, PLACEHOLDER_ATTR};
use crate::core::reveal::ObserverOptions;

#[derive(Clone)]
struct DeferredImages {
    images: Rc<Vec<Element>>,
    // Filled once the observer exists; the controller needs it to unobserve
    observer: Rc<RefCell<Option<IntersectionObserver>>>,
}

impl ImageSurface for DeferredImages {
    fn placeholder(&self, index: usize) -> Option<String> {
        self.images.get(index)?.get_attribute(PLACEHOLDER_ATTR)
    }

    fn load(&self, index: usize, src: &str) -> bool {
        let Some(image) = self.images.get(index) else {
            return false;
        };
        if let Err(err) = image.set_attribute("src", src) {
            tracing::warn!("Failed to load image {}: {:?}", src, err);
            return false;
        }
        if let Err(err) = image.remove_attribute(PLACEHOLDER_ATTR) {
            tracing::warn!(
                "Failed to drop {} from image {}: {:?}",
                PLACEHOLDER_ATTR,
                src,
                err
            );
        }
        true
    }

    fn unobserve(&self, index: usize) {
        let observer = self.observer.borrow();
        if let (Some(observer), Some(image)) = (observer.as_ref(), self.images.get(index)) {
            observer.unobserve(image);
        }
    }
}

#[derive(Default)]
pub struct LazyImagesFeature {
    observer: Option<ViewportObserver>,
}

impl LazyImagesFeature {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Feature for LazyImagesFeature {
    fn name(&self) -> &'static str {
        "lazy images"
    }

    fn attach(&mut self) -> Result<bool, HostError> {
        if !ViewportObserver::is_supported() {
            tracing::debug!("IntersectionObserver unavailable, images keep their placeholders");
            return Ok(false);
        }
        let images = query_all::<Element>(&format!("img[{}]", PLACEHOLDER_ATTR));
        if images.is_empty() {
            return Ok(false);
        }

        let slot = Rc::new(RefCell::new(None));
        let controller = LazyImageController::new(DeferredImages {
            images: Rc::new(images.clone()),
            observer: Rc::clone(&slot),
        });
        let observer =
            ViewportObserver::observe(images, &ObserverOptions::lazy_images(), move |batch| {
                controller.on_intersections(batch);
            })?;
        *slot.borrow_mut() = Some(observer.raw());
        self.observer = Some(observer);
        Ok(true)
    }

    fn detach(&mut self) {
        self.observer = None;
    }
}
