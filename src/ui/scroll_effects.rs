//! Navbar background, orb parallax, orb re-coloring and the scroll-to-top button

use std::rc::Rc;

use leptos::prelude::*;
use web_sys::HtmlElement;

use super::dom::{
    Feature, HostError, Listener, MountedView, body, query, query_all, scroll_offset, set_style,
    window,
};
use super::scroll_top::ScrollToTopButton;
use crate::core::scroll_effects::{
    NavbarStyle, ScrollTopButton, parallax_transforms, pick_orb_gradient,
};
use crate::core::{LandingConfig, Scheduler, TaskControl, TaskId};

pub struct ScrollEffectsFeature {
    config: Rc<LandingConfig>,
    scheduler: Rc<dyn Scheduler>,
    listeners: Vec<Listener>,
    button: Option<MountedView>,
    orb_rotation: Option<TaskId>,
}

impl ScrollEffectsFeature {
    pub fn new(config: Rc<LandingConfig>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            config,
            scheduler,
            listeners: Vec::new(),
            button: None,
            orb_rotation: None,
        }
    }

    fn attach_navbar(&mut self) -> Result<bool, HostError> {
        let Some(navbar) = query::<HtmlElement>(".navbar") else {
            return Ok(false);
        };
        let window = window()?;
        let threshold = self.config.navbar_solid_after;
        let w = window.clone();
        self.listeners.push(Listener::new(&window, "scroll", move |_| {
            let style = NavbarStyle::for_offset(scroll_offset(&w), threshold);
            set_style(&navbar, "background", style.background());
            set_style(&navbar, "box-shadow", style.box_shadow());
        })?);
        Ok(true)
    }

    fn attach_parallax(&mut self, orbs: Rc<Vec<HtmlElement>>) -> Result<(), HostError> {
        let window = window()?;
        let step = self.config.parallax_step;
        let w = window.clone();
        self.listeners.push(Listener::new(&window, "scroll", move |_| {
            let transforms = parallax_transforms(scroll_offset(&w), orbs.len(), step);
            for (orb, transform) in orbs.iter().zip(&transforms) {
                set_style(orb, "transform", transform);
            }
        })?);
        Ok(())
    }

    fn start_orb_rotation(&mut self, orbs: Rc<Vec<HtmlElement>>) {
        let id = self.scheduler.set_interval(
            self.config.orb_rotation(),
            Box::new(move || {
                for orb in orbs.iter() {
                    set_style(orb, "background", pick_orb_gradient(js_sys::Math::random()));
                }
                TaskControl::Continue
            }),
        );
        self.orb_rotation = Some(id);
    }

    fn attach_scroll_top(&mut self) -> Result<(), HostError> {
        let window = window()?;
        let state = ArcRwSignal::new(ScrollTopButton::default());

        let view_state = state.clone();
        let handle = leptos::mount::mount_to(body()?, move || {
            view! { <ScrollToTopButton state=view_state /> }
        });
        self.button = Some(MountedView::new(handle));

        let threshold = self.config.scroll_top_after;
        let w = window.clone();
        self.listeners.push(Listener::new(&window, "scroll", move |_| {
            let mut button = state.get_untracked();
            if button.on_scroll(scroll_offset(&w), threshold) {
                state.set(button);
            }
        })?);
        Ok(())
    }
}

impl Feature for ScrollEffectsFeature {
    fn name(&self) -> &'static str {
        "scroll effects"
    }

    fn attach(&mut self) -> Result<bool, HostError> {
        self.attach_navbar()?;

        let orbs = Rc::new(query_all::<HtmlElement>(".gradient-orb"));
        if !orbs.is_empty() {
            self.attach_parallax(Rc::clone(&orbs))?;
            if self.config.rotate_orb_gradients {
                self.start_orb_rotation(orbs);
            }
        }

        self.attach_scroll_top()?;
        Ok(true)
    }

    fn detach(&mut self) {
        self.listeners.clear();
        self.button = None;
        if let Some(id) = self.orb_rotation.take() {
            self.scheduler.cancel(id);
        }
    }
}
