use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList};

fn collect(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// `querySelectorAll` flattened into owned elements. A bad selector yields
/// an empty list.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    match document.query_selector_all(selector) {
        Ok(list) => collect(list),
        Err(e) => {
            log::warn!("invalid selector {:?}: {:?}", selector, e);
            Vec::new()
        }
    }
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => collect(list),
        Err(e) => {
            log::warn!("invalid selector {:?}: {:?}", selector, e);
            Vec::new()
        }
    }
}

pub fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id).and_then(|el| el.dyn_into::<T>().ok())
}

pub fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), JsValue> {
    let style = element.style();
    for (property, value) in styles {
        style.set_property(property, value)?;
    }
    Ok(())
}

pub fn toggle_class(element: &Element, class: &str, on: bool) -> Result<(), JsValue> {
    let classes = element.class_list();
    if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    }
}
