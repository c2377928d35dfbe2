//! Thin helpers over `web_sys` shared by every feature binding

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, EventTarget, HtmlElement, ScrollBehavior, ScrollToOptions, Window,
};

/// Failures talking to the host page
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no window available")]
    MissingWindow,

    #[error("no document available")]
    MissingDocument,

    #[error("document has no body")]
    MissingBody,

    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        HostError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

/// A page feature with an explicit listener lifecycle
pub trait Feature {
    fn name(&self) -> &'static str;

    /// Bind to the page. Returns `Ok(false)` when the page has none of the
    /// hooks this feature needs; the feature then stays inactive.
    fn attach(&mut self) -> Result<bool, HostError>;

    /// Remove every listener, observer and timer the feature installed
    fn detach(&mut self);
}

pub fn window() -> Result<Window, HostError> {
    web_sys::window().ok_or(HostError::MissingWindow)
}

pub fn document() -> Result<Document, HostError> {
    window()?.document().ok_or(HostError::MissingDocument)
}

pub fn body() -> Result<HtmlElement, HostError> {
    document()?.body().ok_or(HostError::MissingBody)
}

/// First element matching `selector`, cast to `T`
pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()
        .ok()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

/// Element with the given id, cast to `T`
pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document().ok()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Every element matching `selector` that can be cast to `T`, in document order
pub fn query_all<T: JsCast>(selector: &str) -> Vec<T> {
    let Ok(document) = document() else {
        return Vec::new();
    };
    let Ok(list) = document.query_selector_all(selector) else {
        tracing::warn!("Invalid selector {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Set an inline style property, logging failures
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        tracing::warn!("Failed to set {} on element: {:?}", property, err);
    }
}

/// Add or remove a class
pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        tracing::warn!("Failed to toggle class {}: {:?}", class, err);
    }
}

/// Current vertical scroll offset of the page
pub fn scroll_offset(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

/// Smooth-scroll the page to a vertical offset
pub fn smooth_scroll_to(top: f64) -> Result<(), HostError> {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window()?.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

/// Event listener that unregisters itself when dropped
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, HostError>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let callback = self.callback.as_ref().unchecked_ref();
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, callback);
    }
}

/// A mounted Leptos view; dropping it unmounts the view.
pub struct MountedView {
    _handle: Box<dyn std::any::Any>,
}

impl MountedView {
    pub fn new<H: 'static>(handle: H) -> Self {
        Self {
            _handle: Box::new(handle),
        }
    }
}
