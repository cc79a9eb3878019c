use crate::form::message::ContactRequest;
use crate::form::validate::FieldRule;

pub const ERROR_STATUS: &str = "Por favor, preencha todos os campos corretamente.";
pub const SUCCESS_STATUS: &str = "Redirecionando para WhatsApp! Entraremos em contato em breve.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn modifier(&self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

/// The contact form as the submit workflow sees it. Fields are addressed
/// by position in document order.
pub trait FormView {
    fn field_count(&self) -> usize;
    fn field_rule(&self, index: usize) -> FieldRule;
    fn field_value(&self, index: usize) -> String;
    fn field_has_error(&self, index: usize) -> bool;
    fn set_field_error(&mut self, index: usize, error: bool);
    /// Value of the control named `name`, empty if there is none.
    fn value_of(&self, name: &str) -> String;
    fn show_status(&mut self, kind: StatusKind, message: &str);
    /// Disables the submit button until the view decides to restore it.
    fn begin_sending(&mut self);
    fn open_link(&mut self, url: &str);
    fn reset(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Rejected,
    Sent { url: String },
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    whatsapp_number: String,
}

impl ContactForm {
    pub fn new(whatsapp_number: impl Into<String>) -> Self {
        Self { whatsapp_number: whatsapp_number.into() }
    }

    pub fn validate_field(&self, view: &mut dyn FormView, index: usize) -> bool {
        let valid = view.field_rule(index).accepts(&view.field_value(index));
        view.set_field_error(index, !valid);
        valid
    }

    pub fn blurred(&self, view: &mut dyn FormView, index: usize) -> bool {
        self.validate_field(view, index)
    }

    /// Typing only re-checks a field that is already flagged, so the error
    /// clears as soon as the value becomes acceptable.
    pub fn edited(&self, view: &mut dyn FormView, index: usize) {
        if view.field_has_error(index) {
            self.validate_field(view, index);
        }
    }

    pub fn read_request(view: &dyn FormView) -> ContactRequest {
        ContactRequest {
            name: view.value_of("name"),
            email: view.value_of("email"),
            phone: view.value_of("phone"),
            service: view.value_of("service"),
            message: view.value_of("message"),
        }
    }

    pub fn submit(&self, view: &mut dyn FormView) -> Submission {
        // every field gets validated so all errors show at once
        let mut valid = true;
        for index in 0..view.field_count() {
            if !self.validate_field(view, index) {
                valid = false;
            }
        }

        if !valid {
            view.show_status(StatusKind::Error, ERROR_STATUS);
            return Submission::Rejected;
        }

        view.begin_sending();
        let url = Self::read_request(view).whatsapp_link(&self.whatsapp_number);
        view.open_link(&url);
        view.show_status(StatusKind::Success, SUCCESS_STATUS);
        view.reset();
        Submission::Sent { url }
    }
}
