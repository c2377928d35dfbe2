//! `IntersectionObserver` wrapper translating entries into element indices

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::dom::{HostError, window};
use crate::core::reveal::{Intersection, ObserverOptions};

/// Observes a fixed list of elements; disconnects when dropped.
pub struct ViewportObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl ViewportObserver {
    /// Whether the browser provides `IntersectionObserver`
    pub fn is_supported() -> bool {
        let Ok(window) = window() else {
            return false;
        };
        js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
    }

    /// Observe `elements`. The handler receives each batch with entries
    /// mapped to positions in `elements`, in the order the browser reported them.
    pub fn observe<F>(
        elements: Vec<Element>,
        options: &ObserverOptions,
        mut handler: F,
    ) -> Result<Self, HostError>
    where
        F: FnMut(&[Intersection]) + 'static,
    {
        let targets = elements.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let batch: Vec<Intersection> = entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .filter_map(|entry| {
                        let target = entry.target();
                        let index = targets.iter().position(|element| *element == target)?;
                        Some(Intersection {
                            index,
                            is_intersecting: entry.is_intersecting(),
                        })
                    })
                    .collect();
                handler(&batch);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for element in &elements {
            observer.observe(element);
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// Handle to the underlying observer
    pub fn raw(&self) -> IntersectionObserver {
        self.observer.clone()
    }
}

impl Drop for ViewportObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
