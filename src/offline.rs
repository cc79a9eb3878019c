use gloo_events::EventListener;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys::Reflect;
use web_sys::Window;

fn supports_service_worker(window: &Window) -> bool {
    Reflect::has(&window.navigator(), &JsValue::from_str("serviceWorker")).unwrap_or(false)
}

fn register(window: &Window, script: String) {
    let container = window.navigator().service_worker();
    spawn_local(async move {
        match JsFuture::from(container.register(&script)).await {
            Ok(_) => log::info!("Service worker registered: {}", script),
            Err(e) => log::warn!("Service worker registration failed: {:?}", e),
        }
    });
}

/// Registers the offline worker once the page has loaded. Does nothing
/// unless a worker script is configured.
pub fn bind(window: &Window, script: Option<String>) -> Option<EventListener> {
    let script = script?;
    if !supports_service_worker(window) {
        log::debug!("no service worker support");
        return None;
    }

    let loaded = window
        .document()
        .map(|d| d.ready_state() == "complete")
        .unwrap_or(false);
    if loaded {
        register(window, script);
        return None;
    }

    let target = window.clone();
    Some(EventListener::once(window, "load", move |_| register(&target, script)))
}
