use std::collections::HashSet;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::dom;

pub const REVEAL_CLASS: &str = "animated";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Hidden starting pose, so content never flashes in before its animation.
const INITIAL_STYLES: &[(&str, &str)] = &[
    ("opacity", "0"),
    ("transform", "translateY(20px)"),
    ("transition", "opacity 0.6s ease-out, transform 0.6s ease-out"),
];

/// Indices still waiting for their first intersection.
#[derive(Debug, Clone)]
pub struct OneShot {
    pending: HashSet<usize>,
}

impl OneShot {
    pub fn new(count: usize) -> Self {
        Self { pending: (0..count).collect() }
    }

    /// True exactly once per index.
    pub fn fire(&mut self, index: usize) -> bool {
        self.pending.remove(&index)
    }

    #[cfg(test)]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

/// An intersection observer that hands each target to `on_first` the first
/// time it intersects and then stops watching it. Nothing is watched until
/// `start`. Disconnects on drop.
pub struct OneShotObserver {
    observer: IntersectionObserver,
    targets: Vec<Element>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl OneShotObserver {
    pub fn new<F>(
        elements: Vec<Element>,
        options: &IntersectionObserverInit,
        mut on_first: F,
    ) -> Result<Self, JsValue>
    where
        F: FnMut(&Element) + 'static,
    {
        let mut tracker = OneShot::new(elements.len());
        let targets = elements.clone();
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let Some(index) = targets.iter().position(|el| *el == target) else {
                    continue;
                };
                if tracker.fire(index) {
                    on_first(&target);
                    observer.unobserve(&target);
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), options)?;
        Ok(Self { observer, targets: elements, _callback: callback })
    }

    pub fn targets(&self) -> &[Element] {
        &self.targets
    }

    pub fn start(self) -> Self {
        for element in &self.targets {
            self.observer.observe(element);
        }
        self
    }
}

impl Drop for OneShotObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn supports_intersection_observer(window: &Window) -> bool {
    Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Fades in every element matching `selector` as it scrolls into view.
pub fn bind(document: &Document, selector: &str) -> Result<Option<OneShotObserver>, JsValue> {
    let elements = dom::query_all(document, selector);
    if elements.is_empty() {
        log::debug!("nothing matches {:?}, reveal animations skipped", selector);
        return Ok(None);
    }
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);

    // Elements are only hidden once an observer exists to reveal them.
    let observer = OneShotObserver::new(elements, &options, |element| {
        if let Err(e) = element.class_list().add_1(REVEAL_CLASS) {
            log::warn!("reveal class update failed: {:?}", e);
        }
    })?;
    for element in observer.targets() {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            dom::set_styles(html, INITIAL_STYLES)?;
        }
    }
    log::debug!("watching {} elements for reveal", observer.targets().len());
    Ok(Some(observer.start()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_index_fires_once() {
        let mut shot = OneShot::new(3);
        assert!(shot.fire(1));
        assert!(!shot.fire(1));
        assert!(!shot.fire(1));
        assert_eq!(shot.remaining(), 2);
    }

    #[test]
    fn unknown_index_never_fires() {
        let mut shot = OneShot::new(2);
        assert!(!shot.fire(7));
        assert_eq!(shot.remaining(), 2);
    }

    #[test]
    fn all_fired_leaves_nothing_pending() {
        let mut shot = OneShot::new(2);
        assert!(shot.fire(0));
        assert!(shot.fire(1));
        assert_eq!(shot.remaining(), 0);
    }
}
