use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Id of the optional inline JSON block that overrides the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Every tunable the page behaviours read. Missing keys fall back to the
/// values the landing page shipped with.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub whatsapp_number: String,
    pub header_threshold: f64,
    pub fab_threshold: f64,
    pub scroll_throttle_ms: u32,
    pub menu_breakpoint: f64,
    pub anchor_margin: f64,
    pub section_margin: f64,
    pub status_hide_ms: u32,
    pub submit_restore_ms: u32,
    pub seconds_per_card: u32,
    pub reveal_selector: String,
    pub feed_widget_id: Option<String>,
    pub service_worker: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: "5581973019151".to_string(),
            header_threshold: 100.0,
            fab_threshold: 300.0,
            scroll_throttle_ms: 100,
            menu_breakpoint: 905.0,
            anchor_margin: 20.0,
            section_margin: 100.0,
            status_hide_ms: 5000,
            submit_restore_ms: 2000,
            seconds_per_card: 5,
            reveal_selector:
                ".service-card, .instagram-card, .reviews-card, .contact-info, .contact-form-wrapper"
                    .to_string(),
            feed_widget_id: None,
            service_worker: None,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the inline config block if the markup carries one.
    pub fn load(document: &Document) -> Self {
        let raw = match document.get_element_by_id(CONFIG_ELEMENT_ID) {
            Some(el) => el.text_content().unwrap_or_default(),
            None => return Self::default(),
        };
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_keeps_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.whatsapp_number, "5581973019151");
        assert_eq!(config.menu_breakpoint, 905.0);
    }

    #[test]
    fn partial_override() {
        let config = SiteConfig::from_json(
            r#"{"fab_threshold": 500, "feed_widget_id": "abc123", "service_worker": "/sw.js"}"#,
        )
        .unwrap();
        assert_eq!(config.fab_threshold, 500.0);
        assert_eq!(config.feed_widget_id.as_deref(), Some("abc123"));
        assert_eq!(config.service_worker.as_deref(), Some("/sw.js"));
        assert_eq!(config.header_threshold, 100.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SiteConfig::from_json("{ not json").is_err());
    }
}
