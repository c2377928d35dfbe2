//! Viewport-entry animations: card fade-in and statistic counters

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use super::dom::{Feature, HostError, query_all, set_style};
use super::observer::ViewportObserver;
use crate::core::counter::{ANIMATED_CLASS, CounterController, CounterSurface};
use crate::core::reveal::{
    FADE_HIDDEN, FADE_SHOWN, FadeInController, ObserverOptions, RevealSurface,
};
use crate::core::{LandingConfig, Scheduler};

const FADE_SELECTOR: &str = ".feature-card, .testimonial-card, .section-header";
const COUNTER_SELECTOR: &str = ".stat-number[data-target]";

#[derive(Clone)]
struct FadeTargets(Rc<Vec<HtmlElement>>);

impl RevealSurface for FadeTargets {
    fn reveal(&self, index: usize) {
        if let Some(element) = self.0.get(index) {
            for (property, value) in FADE_SHOWN {
                set_style(element, property, value);
            }
        }
    }
}

#[derive(Clone)]
struct StatNumbers(Rc<Vec<HtmlElement>>);

impl CounterSurface for StatNumbers {
    fn target(&self, index: usize) -> Option<String> {
        self.0.get(index)?.get_attribute("data-target")
    }

    fn mark_animated(&self, index: usize) {
        if let Some(element) = self.0.get(index) {
            if let Err(err) = element.class_list().add_1(ANIMATED_CLASS) {
                tracing::warn!("Failed to mark counter {} animated: {:?}", index, err);
            }
        }
    }

    fn display(&self, index: usize, value: i64) {
        if let Some(element) = self.0.get(index) {
            element.set_text_content(Some(&value.to_string()));
        }
    }
}

fn as_elements(elements: &[HtmlElement]) -> Vec<Element> {
    elements
        .iter()
        .map(|element| element.clone().unchecked_into::<Element>())
        .collect()
}

pub struct RevealFeature {
    config: Rc<LandingConfig>,
    scheduler: Rc<dyn Scheduler>,
    observers: Vec<ViewportObserver>,
    fade: Option<Rc<FadeInController<FadeTargets>>>,
    counters: Option<Rc<CounterController<StatNumbers>>>,
}

impl RevealFeature {
    pub fn new(config: Rc<LandingConfig>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            config,
            scheduler,
            observers: Vec::new(),
            fade: None,
            counters: None,
        }
    }

    fn attach_fade_in(&mut self) -> Result<bool, HostError> {
        let cards = query_all::<HtmlElement>(FADE_SELECTOR);
        if cards.is_empty() {
            return Ok(false);
        }
        for card in &cards {
            for (property, value) in FADE_HIDDEN {
                set_style(card, property, value);
            }
        }

        let elements = as_elements(&cards);
        let controller = Rc::new(FadeInController::new(
            FadeTargets(Rc::new(cards)),
            elements.len(),
            Rc::clone(&self.scheduler),
            self.config.fade_stagger(),
        ));
        self.fade = Some(Rc::clone(&controller));
        let observer = ViewportObserver::observe(
            elements,
            &ObserverOptions::fade_in(&self.config),
            move |batch| controller.on_intersections(batch),
        )?;
        self.observers.push(observer);
        Ok(true)
    }

    fn attach_counters(&mut self) -> Result<bool, HostError> {
        let numbers = query_all::<HtmlElement>(COUNTER_SELECTOR);
        if numbers.is_empty() {
            return Ok(false);
        }

        let elements = as_elements(&numbers);
        let controller = Rc::new(CounterController::new(
            StatNumbers(Rc::new(numbers)),
            Rc::clone(&self.scheduler),
            self.config.counter_duration(),
            self.config.counter_tick(),
        ));
        self.counters = Some(Rc::clone(&controller));
        let observer = ViewportObserver::observe(
            elements,
            &ObserverOptions::counters(&self.config),
            move |batch| {
                controller.on_intersections(batch);
            },
        )?;
        self.observers.push(observer);
        Ok(true)
    }
}

impl Feature for RevealFeature {
    fn name(&self) -> &'static str {
        "reveal"
    }

    fn attach(&mut self) -> Result<bool, HostError> {
        if !ViewportObserver::is_supported() {
            tracing::debug!("IntersectionObserver unavailable, leaving elements static");
            return Ok(false);
        }
        let fade = self.attach_fade_in()?;
        let counters = self.attach_counters()?;
        Ok(fade || counters)
    }

    fn detach(&mut self) {
        self.observers.clear();
        if let Some(fade) = self.fade.take() {
            fade.dispose();
        }
        if let Some(counters) = self.counters.take() {
            counters.dispose();
        }
    }
}
