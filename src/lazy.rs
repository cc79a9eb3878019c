use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::{Document, HtmlImageElement, IntersectionObserverInit};

use crate::dom;
use crate::reveal::OneShotObserver;

/// Browsers with native `loading="lazy"` expose it on image elements.
pub fn supports_native_lazy(document: &Document) -> bool {
    document
        .create_element("img")
        .map(|img| Reflect::has(&img, &JsValue::from_str("loading")).unwrap_or(false))
        .unwrap_or(false)
}

/// `data-src` wins when present and non-empty.
pub fn lazy_source(data_src: Option<String>, src: String) -> String {
    data_src.filter(|s| !s.is_empty()).unwrap_or(src)
}

/// Fallback loader for browsers without native lazy images.
pub fn bind(document: &Document) -> Result<Option<OneShotObserver>, JsValue> {
    if supports_native_lazy(document) {
        return Ok(None);
    }
    let images = dom::query_all(document, "img[loading=\"lazy\"]");
    if images.is_empty() {
        return Ok(None);
    }
    log::debug!("no native lazy loading, observing {} images", images.len());

    let observer = OneShotObserver::new(images, &IntersectionObserverInit::new(), |element| {
        let Some(img) = element.dyn_ref::<HtmlImageElement>() else {
            return;
        };
        img.set_src(&lazy_source(img.get_attribute("data-src"), img.src()));
        if let Err(e) = img.class_list().add_1("loaded") {
            log::warn!("lazy image class update failed: {:?}", e);
        }
    })?;
    Ok(Some(observer.start()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_src_preferred() {
        assert_eq!(lazy_source(Some("/img/full.jpg".into()), "/img/thumb.jpg".into()), "/img/full.jpg");
    }

    #[test]
    fn falls_back_to_current_src() {
        assert_eq!(lazy_source(None, "/img/a.jpg".into()), "/img/a.jpg");
        assert_eq!(lazy_source(Some(String::new()), "/img/a.jpg".into()), "/img/a.jpg");
    }
}
