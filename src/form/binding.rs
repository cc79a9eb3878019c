use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, Window,
};

use crate::config::SiteConfig;
use crate::dom;
use crate::form::controller::{ContactForm, FormView, StatusKind};
use crate::form::mask::format_phone;
use crate::form::validate::{FieldKind, FieldRule};

const SENDING_LABEL: &str =
    r#"<span class="material-symbols-outlined">hourglass_empty</span> Enviando..."#;

/// A validated form control.
#[derive(Clone)]
pub enum Field {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
    Select(HtmlSelectElement),
}

impl Field {
    pub fn from_element(element: Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => return Some(Field::Input(input)),
            Err(element) => element,
        };
        let element = match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(area) => return Some(Field::TextArea(area)),
            Err(element) => element,
        };
        element.dyn_into::<HtmlSelectElement>().ok().map(Field::Select)
    }

    pub fn element(&self) -> &Element {
        match self {
            Field::Input(el) => el.as_ref(),
            Field::TextArea(el) => el.as_ref(),
            Field::Select(el) => el.as_ref(),
        }
    }

    pub fn value(&self) -> String {
        match self {
            Field::Input(el) => el.value(),
            Field::TextArea(el) => el.value(),
            Field::Select(el) => el.value(),
        }
    }

    pub fn rule(&self) -> FieldRule {
        let kind = match self {
            Field::Input(el) => FieldKind::from_input_type(&el.type_()),
            _ => FieldKind::Other,
        };
        FieldRule::new(self.element().has_attribute("required"), kind)
    }
}

#[derive(Default)]
struct Timers {
    status: Option<Timeout>,
    restore: Option<Timeout>,
}

/// DOM side of the contact form. Owns its timers, so dropping it cancels
/// any pending status hide or button restore.
pub struct FormElements {
    window: Window,
    form: HtmlFormElement,
    fields: Vec<Field>,
    status: Option<HtmlElement>,
    button: Option<HtmlButtonElement>,
    button_label: String,
    status_hide_ms: u32,
    restore_ms: u32,
    timers: Timers,
}

impl FormElements {
    pub fn new(window: Window, form: HtmlFormElement, status: Option<HtmlElement>, config: &SiteConfig) -> Self {
        let fields = dom::query_all_in(&form, ".form-input, .form-textarea")
            .into_iter()
            .filter_map(Field::from_element)
            .collect();
        let button = form
            .query_selector(".btn-submit")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        let button_label = button.as_ref().map(|b| b.inner_html()).unwrap_or_default();
        Self {
            window,
            form,
            fields,
            status,
            button,
            button_label,
            status_hide_ms: config.status_hide_ms,
            restore_ms: config.submit_restore_ms,
            timers: Timers::default(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl FormView for FormElements {
    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field_rule(&self, index: usize) -> FieldRule {
        self.fields[index].rule()
    }

    fn field_value(&self, index: usize) -> String {
        self.fields[index].value()
    }

    fn field_has_error(&self, index: usize) -> bool {
        self.fields[index].element().class_list().contains("error")
    }

    fn set_field_error(&mut self, index: usize, error: bool) {
        if let Err(e) = dom::toggle_class(self.fields[index].element(), "error", error) {
            log::warn!("field error class update failed: {:?}", e);
        }
    }

    fn value_of(&self, name: &str) -> String {
        self.form
            .query_selector(&format!("[name=\"{}\"]", name))
            .ok()
            .flatten()
            .and_then(Field::from_element)
            .map(|field| field.value())
            .unwrap_or_default()
    }

    fn show_status(&mut self, kind: StatusKind, message: &str) {
        // a newer message outlives any pending hide
        self.timers.status = None;
        let Some(status) = &self.status else {
            log::debug!("no #formStatus element, dropping {:?} status", kind);
            return;
        };
        status.set_text_content(Some(message));
        status.set_class_name(&format!("form-status {}", kind.modifier()));

        if kind == StatusKind::Success {
            let status = status.clone();
            self.timers.status = Some(Timeout::new(self.status_hide_ms, move || {
                status.set_class_name("form-status");
            }));
        }
    }

    fn begin_sending(&mut self) {
        let Some(button) = self.button.clone() else {
            return;
        };
        button.set_disabled(true);
        button.set_inner_html(SENDING_LABEL);

        let label = self.button_label.clone();
        self.timers.restore = Some(Timeout::new(self.restore_ms, move || {
            button.set_disabled(false);
            button.set_inner_html(&label);
        }));
    }

    fn open_link(&mut self, url: &str) {
        match self.window.open_with_url_and_target(url, "_blank") {
            Ok(Some(_)) => {}
            Ok(None) => log::debug!("new window was blocked"),
            Err(e) => log::warn!("window.open failed: {:?}", e),
        }
    }

    fn reset(&mut self) {
        self.form.reset();
    }
}

/// Wires the phone mask, per-field validation and the submit handler.
pub fn bind(window: &Window, document: &Document, config: &SiteConfig) -> Vec<EventListener> {
    let Some(form) = dom::by_id::<HtmlFormElement>(document, "contactForm") else {
        log::debug!("no #contactForm on this page");
        return Vec::new();
    };
    let status = dom::by_id::<HtmlElement>(document, "formStatus");
    let view = Rc::new(RefCell::new(FormElements::new(window.clone(), form.clone(), status, config)));
    let controller = Rc::new(ContactForm::new(config.whatsapp_number.clone()));
    let mut listeners = Vec::new();

    // registered first so validation sees the masked value
    if let Some(phone) = dom::by_id::<HtmlInputElement>(document, "phone") {
        let input = phone.clone();
        listeners.push(EventListener::new(&phone, "input", move |_| {
            input.set_value(&format_phone(&input.value()));
        }));
    }

    let fields: Vec<Field> = view.borrow().fields().to_vec();
    for (index, field) in fields.iter().enumerate() {
        let (v, c) = (view.clone(), controller.clone());
        listeners.push(EventListener::new(field.element(), "blur", move |_| {
            // blur can fire from inside submit when window.open steals focus
            if let Ok(mut view) = v.try_borrow_mut() {
                c.blurred(&mut *view, index);
            }
        }));
        let (v, c) = (view.clone(), controller.clone());
        listeners.push(EventListener::new(field.element(), "input", move |_| {
            if let Ok(mut view) = v.try_borrow_mut() {
                c.edited(&mut *view, index);
            }
        }));
    }

    listeners.push(EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            event.prevent_default();
            match view.try_borrow_mut() {
                Ok(mut view) => {
                    let outcome = controller.submit(&mut *view);
                    log::debug!("contact form submission: {:?}", outcome);
                }
                Err(_) => log::warn!("contact form busy, submit ignored"),
            }
        },
    ));

    listeners
}
