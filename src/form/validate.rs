use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

// Exactly what the phone mask produces: (DD) D DDDD-DDDD
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\([0-9]{2}\) [0-9] [0-9]{4}-[0-9]{4}$").expect("phone pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Telephone,
    Other,
}

impl FieldKind {
    /// Maps an `<input type>` value; selects and textareas land on `Other`.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type {
            "email" => FieldKind::Email,
            "tel" => FieldKind::Telephone,
            _ => FieldKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldRule {
    pub fn new(required: bool, kind: FieldKind) -> Self {
        Self { required, kind }
    }

    /// Surrounding whitespace is ignored. Format checks only apply to
    /// non-empty values, so an optional email may be left blank.
    pub fn accepts(&self, raw: &str) -> bool {
        let value = raw.trim();
        if value.is_empty() {
            return !self.required;
        }
        match self.kind {
            FieldKind::Email => is_email(value),
            FieldKind::Telephone => is_formatted_phone(value),
            FieldKind::Other => true,
        }
    }
}

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_formatted_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        let rule = FieldRule::new(true, FieldKind::Email);
        assert!(!rule.accepts("not-an-email"));
        assert!(rule.accepts("user@example.com"));
        assert!(rule.accepts("  ana@x.com "));
        assert!(!rule.accepts("user@example"));
        assert!(!rule.accepts("us er@example.com"));
        assert!(!rule.accepts("a@@b.com"));
    }

    #[test]
    fn phone_pattern() {
        let rule = FieldRule::new(true, FieldKind::Telephone);
        assert!(rule.accepts("(81) 9 9999-8888"));
        assert!(rule.accepts("(11) 9 8888-7777"));
        assert!(!rule.accepts("81999998888"));
        assert!(!rule.accepts("(81) 99999-8888"));
        assert!(!rule.accepts("(81) 9 9999-888"));
    }

    #[test]
    fn required_blank_fails_optional_blank_passes() {
        assert!(!FieldRule::new(true, FieldKind::Other).accepts("   "));
        assert!(FieldRule::new(false, FieldKind::Other).accepts(""));
        assert!(FieldRule::new(false, FieldKind::Email).accepts(""));
        assert!(FieldRule::new(false, FieldKind::Telephone).accepts(" "));
    }

    #[test]
    fn optional_fields_still_check_format_when_filled() {
        assert!(!FieldRule::new(false, FieldKind::Email).accepts("nope"));
        assert!(FieldRule::new(false, FieldKind::Other).accepts("anything"));
    }

    #[test]
    fn input_types() {
        assert_eq!(FieldKind::from_input_type("email"), FieldKind::Email);
        assert_eq!(FieldKind::from_input_type("tel"), FieldKind::Telephone);
        assert_eq!(FieldKind::from_input_type("text"), FieldKind::Other);
        assert_eq!(FieldKind::from_input_type("select-one"), FieldKind::Other);
    }
}
