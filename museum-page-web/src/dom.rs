//! Small DOM helpers shared by the adapter

use gloo::utils::document;
use museum_page_core::error::{CoreError, CoreResult};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement};

/// Convert a failed DOM call into `CoreError::PageError`
pub(crate) fn js_error(context: &str, value: &JsValue) -> CoreError {
    let detail = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"));
    CoreError::PageError(format!("{context}: {detail}"))
}

pub(crate) fn element(id: &str) -> CoreResult<Element> {
    document()
        .get_element_by_id(id)
        .ok_or_else(|| CoreError::ElementNotFound(id.to_string()))
}

pub(crate) fn html_element(id: &str) -> CoreResult<HtmlElement> {
    element(id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| CoreError::PageError(format!("#{id} is not an HTML element")))
}

/// Every element matching `selector`, in document order
pub(crate) fn query_all(root: &Element, selector: &str) -> CoreResult<Vec<Element>> {
    let list = root
        .query_selector_all(selector)
        .map_err(|e| js_error(selector, &e))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Like [`query_all`], from the document root
pub(crate) fn query_document(selector: &str) -> CoreResult<Vec<Element>> {
    let root = document()
        .document_element()
        .ok_or_else(|| CoreError::ElementNotFound("html".to_string()))?;
    query_all(&root, selector)
}

pub(crate) fn toggle_class(element: &Element, class: &str, on: bool) -> CoreResult<()> {
    element
        .class_list()
        .toggle_with_force(class, on)
        .map(|_| ())
        .map_err(|e| js_error(class, &e))
}

/// Set one inline style property
pub(crate) fn set_style(element: &Element, property: &str, value: &str) -> CoreResult<()> {
    let html = element
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| CoreError::PageError(format!("#{} has no style", element.id())))?;
    html.style()
        .set_property(property, value)
        .map_err(|e| js_error(property, &e))
}

pub(crate) fn set_display(element: &Element, display: &str) -> CoreResult<()> {
    set_style(element, "display", display)
}
