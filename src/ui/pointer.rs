//! Card tilt, testimonial stagger and the pointer trail

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use super::dom::{Feature, HostError, Listener, document, query_all, set_style, window};
use crate::core::LandingConfig;
use crate::core::pointer::{
    CardRect, NEUTRAL_TRANSFORM, PointerTrail, TILT_TRANSITION, Tilt, stagger_delay,
};

pub struct PointerFeature {
    config: Rc<LandingConfig>,
    trail: Rc<RefCell<PointerTrail>>,
    listeners: Vec<Listener>,
}

impl PointerFeature {
    pub fn new(config: Rc<LandingConfig>) -> Self {
        let trail = PointerTrail::new(
            config.trail_max_len,
            config.trail_max_age_ms,
            config.trail_min_viewport_width,
        );
        Self {
            config,
            trail: Rc::new(RefCell::new(trail)),
            listeners: Vec::new(),
        }
    }

    fn attach_tilt(&mut self) -> Result<bool, HostError> {
        let cards = query_all::<HtmlElement>(".feature-card");
        for card in &cards {
            let target = card.clone();
            self.listeners.push(Listener::new(card, "mouseenter", move |_| {
                set_style(&target, "transition", TILT_TRANSITION);
            })?);

            let target = card.clone();
            let divisor = self.config.tilt_divisor;
            self.listeners.push(Listener::new(card, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let bounds = target.get_bounding_client_rect();
                let rect = CardRect {
                    left: bounds.left(),
                    top: bounds.top(),
                    width: bounds.width(),
                    height: bounds.height(),
                };
                let tilt = Tilt::from_pointer(
                    &rect,
                    event.client_x() as f64,
                    event.client_y() as f64,
                    divisor,
                );
                set_style(&target, "transform", &tilt.to_css());
            })?);

            let target = card.clone();
            self.listeners.push(Listener::new(card, "mouseleave", move |_| {
                set_style(&target, "transform", NEUTRAL_TRANSFORM);
            })?);
        }
        Ok(!cards.is_empty())
    }

    fn stagger_testimonials(&self) -> bool {
        let testimonials = query_all::<HtmlElement>(".testimonial-card");
        for (index, card) in testimonials.iter().enumerate() {
            let delay = stagger_delay(index, self.config.testimonial_stagger_secs);
            set_style(card, "animation-delay", &delay);
        }
        !testimonials.is_empty()
    }

    fn attach_trail(&mut self) -> Result<(), HostError> {
        let document = document()?;
        let window = window()?;
        let trail = Rc::clone(&self.trail);
        self.listeners.push(Listener::new(&document, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let viewport_width = window
                .inner_width()
                .ok()
                .and_then(|width| width.as_f64())
                .unwrap_or(0.0);
            trail.borrow_mut().record(
                event.client_x() as f64,
                event.client_y() as f64,
                js_sys::Date::now(),
                viewport_width,
            );
        })?);
        Ok(())
    }
}

impl Feature for PointerFeature {
    fn name(&self) -> &'static str {
        "pointer"
    }

    fn attach(&mut self) -> Result<bool, HostError> {
        self.attach_tilt()?;
        self.stagger_testimonials();
        self.attach_trail()?;
        Ok(true)
    }

    fn detach(&mut self) {
        self.listeners.clear();
    }
}
