//! Mobile menu toggle and smooth in-page scrolling

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Element, HtmlElement};

use super::dom::{
    Feature, HostError, Listener, document, query, query_all, set_class, smooth_scroll_to,
};
use crate::core::LandingConfig;
use crate::core::navigation::{AnchorAction, MenuState, anchor_action};

const ACTIVE_CLASS: &str = "active";

pub struct NavigationFeature {
    config: Rc<LandingConfig>,
    menu: Rc<RefCell<MenuState>>,
    // Toggle button and menu panel, once bound
    menu_elements: Option<(Element, Element)>,
    listeners: Vec<Listener>,
}

impl NavigationFeature {
    pub fn new(config: Rc<LandingConfig>) -> Self {
        Self {
            config,
            menu: Rc::new(RefCell::new(MenuState::new())),
            menu_elements: None,
            listeners: Vec::new(),
        }
    }

    fn attach_menu(&mut self) -> Result<bool, HostError> {
        let (Some(toggle), Some(panel)) = (
            query::<Element>(".mobile-menu-toggle"),
            query::<Element>(".nav-menu"),
        ) else {
            return Ok(false);
        };

        let menu = Rc::clone(&self.menu);
        let (t, p) = (toggle.clone(), panel.clone());
        self.listeners.push(Listener::new(&toggle, "click", move |_| {
            let state = menu.borrow_mut().toggle();
            apply(&t, &p, state);
        })?);

        for link in query_all::<Element>(".nav-menu a") {
            let menu = Rc::clone(&self.menu);
            let (t, p) = (toggle.clone(), panel.clone());
            self.listeners.push(Listener::new(&link, "click", move |_| {
                let state = menu.borrow_mut().close();
                apply(&t, &p, state);
            })?);
        }

        self.menu_elements = Some((toggle, panel));
        Ok(true)
    }

    fn attach_anchors(&mut self) -> Result<bool, HostError> {
        let anchors = query_all::<Element>("a[href^=\"#\"]");
        for anchor in &anchors {
            let header_offset = self.config.header_offset;
            let link = anchor.clone();
            self.listeners.push(Listener::new(anchor, "click", move |event| {
                let href = link.get_attribute("href").unwrap_or_default();
                let action = anchor_action(&href, header_offset, target_top);
                if action.prevents_default() {
                    event.prevent_default();
                }
                if let AnchorAction::ScrollTo(top) = action {
                    if let Err(err) = smooth_scroll_to(top) {
                        tracing::warn!("Smooth scroll to {} failed: {}", href, err);
                    }
                }
            })?);
        }
        Ok(!anchors.is_empty())
    }
}

fn apply(toggle: &Element, panel: &Element, state: MenuState) {
    set_class(toggle, ACTIVE_CLASS, state.toggle_active);
    set_class(panel, ACTIVE_CLASS, state.menu_active);
}

/// Document offset of the element selected by `href`; invalid selectors count as missing
fn target_top(href: &str) -> Option<f64> {
    let element = document().ok()?.query_selector(href).ok().flatten()?;
    let element: HtmlElement = wasm_bindgen::JsCast::dyn_into(element).ok()?;
    Some(element.offset_top() as f64)
}

impl Feature for NavigationFeature {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn attach(&mut self) -> Result<bool, HostError> {
        let menu = self.attach_menu()?;
        let anchors = self.attach_anchors()?;
        Ok(menu || anchors)
    }

    fn detach(&mut self) {
        self.listeners.clear();
        let closed = self.menu.borrow_mut().close();
        if let Some((toggle, panel)) = self.menu_elements.take() {
            apply(&toggle, &panel, closed);
        }
    }
}
