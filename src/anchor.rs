use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsValue;
use web_sys::{Document, Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::dom;

/// Outcome of clicking an in-page link.
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorAction {
    /// Empty fragment: cancel navigation, do nothing else.
    Suppress,
    /// Target exists: cancel navigation and animate to `top`.
    ScrollTo { top: f64, href: String },
    /// No such element, let the browser handle it.
    Passthrough,
}

/// Page geometry needed to place a target below the fixed header.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub scroll_y: f64,
    pub header_height: f64,
    pub margin: f64,
}

pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn scroll_target(element_top: f64, viewport: Viewport) -> f64 {
    element_top + viewport.scroll_y - viewport.header_height - viewport.margin
}

/// `element_top` resolves an id to its bounding-rect top, `None` if absent.
pub fn route<F>(href: &str, viewport: Viewport, element_top: F) -> AnchorAction
where
    F: FnOnce(&str) -> Option<f64>,
{
    let Some(id) = fragment_id(href) else {
        return AnchorAction::Suppress;
    };
    match element_top(id) {
        Some(top) => AnchorAction::ScrollTo { top: scroll_target(top, viewport), href: href.to_string() },
        None => AnchorAction::Passthrough,
    }
}

fn smooth_scroll(window: &Window, top: f64, href: &str) -> Result<(), JsValue> {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    window.history()?.replace_state_with_url(&JsValue::NULL, "", Some(href))
}

/// Intercepts clicks on every `a[href^="#"]`.
pub fn bind(
    window: &Window,
    document: &Document,
    header: Option<HtmlElement>,
    margin: f64,
) -> Vec<EventListener> {
    dom::query_all(document, "a[href^=\"#\"]")
        .into_iter()
        .map(|anchor| {
            let window = window.clone();
            let document = document.clone();
            let header = header.clone();
            let link = anchor.clone();
            EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    let href = link.get_attribute("href").unwrap_or_default();
                    let viewport = Viewport {
                        scroll_y: window.page_y_offset().unwrap_or(0.0),
                        header_height: header.as_ref().map(|h| h.offset_height() as f64).unwrap_or(0.0),
                        margin,
                    };
                    let action = route(&href, viewport, |id| {
                        document
                            .get_element_by_id(id)
                            .map(|el| el.get_bounding_client_rect().top())
                    });
                    match action {
                        AnchorAction::Suppress => event.prevent_default(),
                        AnchorAction::ScrollTo { top, href } => {
                            event.prevent_default();
                            if let Err(e) = smooth_scroll(&window, top, &href) {
                                log::warn!("smooth scroll to {} failed: {:?}", href, e);
                            }
                        }
                        AnchorAction::Passthrough => {}
                    }
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport { scroll_y: 500.0, header_height: 64.0, margin: 20.0 }
    }

    #[test]
    fn bare_hash_and_empty_are_suppressed() {
        assert_eq!(route("#", viewport(), |_| Some(0.0)), AnchorAction::Suppress);
        assert_eq!(route("", viewport(), |_| Some(0.0)), AnchorAction::Suppress);
    }

    #[test]
    fn existing_target_scrolls_below_header() {
        let action = route("#contato", viewport(), |id| (id == "contato").then_some(300.0));
        assert_eq!(
            action,
            AnchorAction::ScrollTo { top: 300.0 + 500.0 - 64.0 - 20.0, href: "#contato".to_string() }
        );
    }

    #[test]
    fn missing_target_falls_through() {
        assert_eq!(route("#nowhere", viewport(), |_| None), AnchorAction::Passthrough);
    }

    #[test]
    fn target_above_viewport_has_negative_rect_top() {
        assert_eq!(scroll_target(-200.0, viewport()), 216.0);
    }
}
