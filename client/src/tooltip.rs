use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

const TOOLTIP_NAMESPACE: &str = "aa-intel-tool";

fn tooltip_selector(container_class: &str) -> String {
    format!(".{container_class} [data-bs-tooltip=\"{TOOLTIP_NAMESPACE}\"]")
}

/// Attach the page's Bootstrap tooltips to the images inside a table.
/// A page without Bootstrap is left alone.
pub fn init(container_class: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Ok(bootstrap) = Reflect::get(window.as_ref(), &JsValue::from_str("bootstrap")) else {
        return;
    };
    if bootstrap.is_undefined() || bootstrap.is_null() {
        return;
    }
    let Ok(tooltip) = Reflect::get(&bootstrap, &JsValue::from_str("Tooltip"))
        .and_then(|ctor| ctor.dyn_into::<Function>())
    else {
        return;
    };
    let Ok(nodes) = document.query_selector_all(&tooltip_selector(container_class)) else {
        return;
    };

    for i in 0..nodes.length() {
        if let Some(node) = nodes.item(i) {
            let _ = Reflect::construct(&tooltip, &Array::of1(&node));
        }
    }
}
