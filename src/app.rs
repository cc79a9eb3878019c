use std::cell::RefCell;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, PageTransitionEvent, Window};

use crate::config::SiteConfig;
use crate::reveal::OneShotObserver;
use crate::{anchor, carousel, dom, feed, form, lazy, menu, offline, reveal, scroll, styles};

thread_local! {
    static LANDING: RefCell<Option<Landing>> = RefCell::new(None);
}

/// Every listener, observer and pending timer the page owns. Dropping it
/// detaches them all.
#[derive(Default)]
pub struct Landing {
    listeners: Vec<EventListener>,
    observers: Vec<OneShotObserver>,
}

impl Landing {
    fn keep(&mut self, observer: Result<Option<OneShotObserver>, wasm_bindgen::JsValue>, what: &str) {
        match observer {
            Ok(Some(observer)) => self.observers.push(observer),
            Ok(None) => {}
            Err(e) => log::error!("{} setup failed: {:?}", what, e),
        }
    }

    pub fn init(window: &Window, document: &Document) -> Self {
        let config = SiteConfig::load(document);
        let mut landing = Landing::default();

        if let Err(e) = styles::inject(document) {
            log::error!("style injection failed: {:?}", e);
        }

        let header = dom::query_html(document, ".top-app-bar");
        landing.listeners.extend(menu::bind(window, document, config.menu_breakpoint));
        landing.listeners.push(scroll::bind(window, document, header.clone(), &config));
        landing.listeners.extend(anchor::bind(window, document, header, config.anchor_margin));
        landing.listeners.extend(form::binding::bind(window, document, &config));

        if reveal::supports_intersection_observer(window) {
            landing.keep(reveal::bind(document, &config.reveal_selector), "reveal animation");
            landing.keep(lazy::bind(document), "lazy image");
            match carousel::init(document, config.seconds_per_card) {
                Ok(Some(cards)) => log::debug!("testimonial track doubled from {} cards", cards),
                Ok(None) => {}
                Err(e) => log::error!("testimonial carousel setup failed: {:?}", e),
            }
        }

        if let Err(e) = feed::load(document, config.feed_widget_id.as_deref()) {
            log::error!("feed widget setup failed: {:?}", e);
        }
        landing.listeners.extend(offline::bind(window, config.service_worker.clone()));

        log::info!("ConfortClean landing page initialised");
        landing
    }
}

fn mount(window: &Window, document: &Document) {
    let landing = Landing::init(window, document);
    LANDING.with(|slot| *slot.borrow_mut() = Some(landing));
}

/// Drops the page state on a real unload; a page entering the back/forward
/// cache keeps it.
fn teardown_on_pagehide(window: &Window) {
    EventListener::new(window, "pagehide", |event| {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .map(|e| e.persisted())
            .unwrap_or(false);
        if !persisted {
            LANDING.with(|slot| slot.borrow_mut().take());
            log::debug!("landing page torn down");
        }
    })
    .forget();
}

/// Starts everything once the DOM is ready.
pub fn start() {
    let Some(window) = web_sys::window() else {
        log::error!("no window, nothing to enhance");
        return;
    };
    let Some(document) = window.document() else {
        log::error!("no document, nothing to enhance");
        return;
    };

    teardown_on_pagehide(&window);

    if document.ready_state() == "loading" {
        let target = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| mount(&window, &target)).forget();
    } else {
        mount(&window, &document);
    }
}
