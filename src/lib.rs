//! Landing Interactions - client-side behaviour for a marketing landing page
//!
//! Mobile navigation, smooth scrolling, scroll-driven styling, viewport-entry
//! animations, the consultation booking form, pointer effects and lazy images,
//! compiled to WebAssembly and attached to server-rendered markup.

pub mod core;

#[cfg(feature = "csr")]
pub mod app;
#[cfg(feature = "csr")]
pub mod ui;

#[cfg(feature = "csr")]
use std::cell::RefCell;

#[cfg(feature = "csr")]
thread_local! {
    static PAGE: RefCell<Option<app::LandingPage>> = const { RefCell::new(None) };
}

#[cfg(feature = "csr")]
fn boot() {
    PAGE.with(|page| {
        if page.borrow().is_some() {
            tracing::debug!("Landing page already started");
            return;
        }
        let mounted = app::LandingPage::mount(app::load_config());
        *page.borrow_mut() = Some(mounted);
    });
}

/// Attach all interactions once the document has been parsed
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn start() {
    use wasm_bindgen::JsCast;

    static LOGGING: std::sync::Once = std::sync::Once::new();
    console_error_panic_hook::set_once();
    LOGGING.call_once(tracing_wasm::set_as_global_default);

    let document = match ui::dom::document() {
        Ok(document) => document,
        Err(err) => {
            tracing::error!("Cannot start: {}", err);
            return;
        }
    };

    if document.ready_state() != "loading" {
        boot();
        return;
    }

    let on_ready = wasm_bindgen::closure::Closure::once_into_js(boot);
    if let Err(err) =
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
    {
        tracing::error!("Failed to wait for DOMContentLoaded: {:?}", err);
    }
}

/// Detach all interactions
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn stop() {
    let page = PAGE.with(|page| page.borrow_mut().take());
    if let Some(page) = page {
        page.unmount();
    }
}
