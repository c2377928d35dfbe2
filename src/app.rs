use std::rc::Rc;

use crate::core::config::{CONFIG_ELEMENT_ID, LandingConfig};
use crate::core::Scheduler;
use crate::ui::{
    BookingFeature, BrowserScheduler, Feature, LazyImagesFeature, NavigationFeature, PointerFeature,
    RevealFeature, ScrollEffectsFeature,
};
use crate::ui::dom::by_id;

/// Read page configuration from `<script type="application/json" id="landing-config">`.
/// A missing or malformed block falls back to the defaults.
pub fn load_config() -> LandingConfig {
    let Some(text) =
        by_id::<web_sys::Element>(CONFIG_ELEMENT_ID).and_then(|el| el.text_content())
    else {
        return LandingConfig::default();
    };
    match LandingConfig::from_json(&text) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, err);
            LandingConfig::default()
        }
    }
}

/// Every interactive feature of the landing page, attached to the live document
pub struct LandingPage {
    features: Vec<Box<dyn Feature>>,
}

impl LandingPage {
    /// Attach every feature. Features whose hooks are missing stay inactive;
    /// a failing feature is logged and does not stop the others.
    pub fn mount(config: LandingConfig) -> Self {
        let config = Rc::new(config);
        let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new());

        let mut features: Vec<Box<dyn Feature>> = vec![
            Box::new(NavigationFeature::new(Rc::clone(&config))),
            Box::new(ScrollEffectsFeature::new(Rc::clone(&config), Rc::clone(&scheduler))),
            Box::new(RevealFeature::new(Rc::clone(&config), Rc::clone(&scheduler))),
            Box::new(BookingFeature::new(Rc::clone(&config), Rc::clone(&scheduler))),
            Box::new(PointerFeature::new(Rc::clone(&config))),
            Box::new(LazyImagesFeature::new()),
        ];

        for feature in features.iter_mut() {
            match feature.attach() {
                Ok(true) => tracing::debug!("Attached {}", feature.name()),
                Ok(false) => tracing::debug!("Skipped {}: hooks not on this page", feature.name()),
                Err(err) => {
                    tracing::error!("Failed to attach {}: {}", feature.name(), err);
                    feature.detach();
                }
            }
        }
        tracing::info!("Landing page interactions ready");

        Self { features }
    }

    /// Remove every listener, observer, timer and mounted view
    pub fn unmount(mut self) {
        for feature in self.features.iter_mut() {
            feature.detach();
        }
        tracing::info!("Landing page interactions removed");
    }
}
