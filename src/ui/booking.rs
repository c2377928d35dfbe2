//! Consultation booking form bindings

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement};

use super::dom::{Feature, HostError, Listener, MountedView, by_id, query_all, set_style};
use super::form_message::FormMessage;
use crate::core::booking::{
    BUSY_OPACITY, BookingController, BookingTimings, FormField, FormSurface, MessageId,
    MessageKind, PROCESSING_LABEL, SimulatedGateway, SubmissionRecord, focus_transform,
    format_phone, min_date_attr,
};
use crate::core::{LandingConfig, Scheduler};

const FORM_ID: &str = "consultationForm";
const DATE_ID: &str = "preferredDate";
const PHONE_ID: &str = "phone";
const CONTROL_SELECTOR: &str = ".booking-form input, .booking-form select, .booking-form textarea";

struct MountedMessage {
    id: MessageId,
    exiting: ArcRwSignal<bool>,
    _view: MountedView,
}

/// The booking `<form>` as seen by [`BookingController`]
#[derive(Clone)]
pub struct BrowserForm {
    form: HtmlFormElement,
    submit: Option<HtmlButtonElement>,
    idle_label: Rc<RefCell<Option<String>>>,
    messages: Rc<RefCell<Vec<MountedMessage>>>,
}

impl BrowserForm {
    pub fn new(form: HtmlFormElement) -> Self {
        let submit = form
            .query_selector("button[type=\"submit\"]")
            .ok()
            .flatten()
            .and_then(|button| button.dyn_into::<HtmlButtonElement>().ok());
        if submit.is_none() {
            tracing::debug!("Booking form has no submit button");
        }
        Self {
            form,
            submit,
            idle_label: Rc::new(RefCell::new(None)),
            messages: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Current values of every known form field
    pub fn read(&self) -> Result<SubmissionRecord, HostError> {
        let data = FormData::new_with_form(&self.form)?;
        let mut record = SubmissionRecord::new();
        for field in FormField::ALL {
            if let Some(value) = data.get(field.as_str()).as_string() {
                record.insert(field.as_str(), value);
            }
        }
        Ok(record)
    }
}

impl FormSurface for BrowserForm {
    fn set_busy(&self, busy: bool) {
        let Some(button) = &self.submit else {
            return;
        };
        if busy {
            *self.idle_label.borrow_mut() = Some(button.inner_html());
            button.set_inner_html(PROCESSING_LABEL);
            set_style(button, "opacity", BUSY_OPACITY);
        } else {
            if let Some(label) = self.idle_label.borrow_mut().take() {
                button.set_inner_html(&label);
            }
            set_style(button, "opacity", "1");
        }
        button.set_disabled(busy);
    }

    fn reset(&self) {
        self.form.reset();
    }

    fn attach_message(&self, id: MessageId, kind: MessageKind, text: &str) {
        let exiting = ArcRwSignal::new(false);
        let text = text.to_string();
        let view_exiting = exiting.clone();
        let parent: HtmlElement = self.form.clone().into();
        let handle = leptos::mount::mount_to(parent, move || {
            view! { <FormMessage kind=kind text=text exiting=view_exiting /> }
        });
        self.messages.borrow_mut().push(MountedMessage {
            id,
            exiting,
            _view: MountedView::new(handle),
        });
    }

    fn fade_message(&self, id: MessageId) {
        if let Some(message) = self.messages.borrow().iter().find(|m| m.id == id) {
            message.exiting.set(true);
        }
    }

    fn remove_message(&self, id: MessageId) {
        // Drop outside the borrow: unmounting may run view cleanup
        let removed: Vec<MountedMessage> = {
            let mut messages = self.messages.borrow_mut();
            let (gone, kept): (Vec<_>, Vec<_>) = messages.drain(..).partition(|m| m.id == id);
            *messages = kept;
            gone
        };
        drop(removed);
    }
}

pub struct BookingFeature {
    config: Rc<LandingConfig>,
    scheduler: Rc<dyn Scheduler>,
    listeners: Vec<Listener>,
    controller: Option<Rc<BookingController<BrowserForm>>>,
}

impl BookingFeature {
    pub fn new(config: Rc<LandingConfig>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            config,
            scheduler,
            listeners: Vec::new(),
            controller: None,
        }
    }

    fn attach_form(&mut self, form: HtmlFormElement) -> Result<(), HostError> {
        let surface = BrowserForm::new(form.clone());
        let controller = Rc::new(BookingController::new(
            surface.clone(),
            SimulatedGateway,
            Rc::clone(&self.scheduler),
            BookingTimings::from_config(&self.config),
        ));
        self.controller = Some(Rc::clone(&controller));

        self.listeners.push(Listener::new(&form, "submit", move |event| {
            event.prevent_default();
            let record = match surface.read() {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!("Could not read booking form: {}", err);
                    return;
                }
            };
            // Rejections are logged and shown by the controller
            let _ = controller.submit(record);
        })?);
        Ok(())
    }

    fn attach_phone(&mut self) -> Result<(), HostError> {
        let Some(phone) = by_id::<HtmlInputElement>(PHONE_ID) else {
            return Ok(());
        };
        let input = phone.clone();
        self.listeners.push(Listener::new(&phone, "input", move |_| {
            input.set_value(&format_phone(&input.value()));
        })?);
        Ok(())
    }

    fn attach_focus_effect(&mut self) -> Result<(), HostError> {
        for control in query_all::<HtmlElement>(CONTROL_SELECTOR) {
            for (event, focused) in [("focus", true), ("blur", false)] {
                let target = control.clone();
                self.listeners.push(Listener::new(&control, event, move |_| {
                    if let Some(wrapper) = target
                        .parent_element()
                        .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
                    {
                        set_style(&wrapper, "transform", focus_transform(focused));
                    }
                })?);
            }
        }
        Ok(())
    }
}

impl Feature for BookingFeature {
    fn name(&self) -> &'static str {
        "booking"
    }

    fn attach(&mut self) -> Result<bool, HostError> {
        if let Some(date) = by_id::<HtmlInputElement>(DATE_ID) {
            date.set_min(&min_date_attr(Utc::now().date_naive()));
        }
        self.attach_phone()?;
        self.attach_focus_effect()?;

        let Some(form) = by_id::<HtmlFormElement>(FORM_ID) else {
            tracing::debug!("No #{} on this page", FORM_ID);
            return Ok(false);
        };
        self.attach_form(form)?;
        Ok(true)
    }

    fn detach(&mut self) {
        self.listeners.clear();
        if let Some(controller) = self.controller.take() {
            controller.dispose();
        }
    }
}
