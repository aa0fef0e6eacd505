use std::cell::{Cell, RefCell};

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};

use aa_intel_shared::panels::html_escape;
use aa_intel_shared::settings::OutcomeText;

const BUTTON_SELECTOR: &str = "button#btn-copy-permalink-to-clipboard";
const RESULT_SELECTOR: &str = ".aa-intel-copy-result";
const SUCCESS_DISMISS_MS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Error,
}

struct PermalinkBinding {
    button: web_sys::Element,
    callback: Closure<dyn Fn(web_sys::Event)>,
}

impl Drop for PermalinkBinding {
    fn drop(&mut self) {
        let _ = self
            .button
            .remove_event_listener_with_callback("click", self.callback.as_ref().unchecked_ref());
    }
}

/// Counts rendered alerts so a pending auto-close only dismisses its own alert.
struct AlertGenerations {
    current: Cell<u64>,
}

impl AlertGenerations {
    const fn new() -> Self {
        Self {
            current: Cell::new(0),
        }
    }

    fn begin(&self) -> u64 {
        let generation = self.current.get().wrapping_add(1);
        self.current.set(generation);
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.current.get() == generation
    }
}

thread_local! {
    static PERMALINK_BINDING: RefCell<Option<PermalinkBinding>> = const { RefCell::new(None) };
    static ALERT_GENERATIONS: AlertGenerations = const { AlertGenerations::new() };
}

/// Dismissible Bootstrap alert for a copy outcome.
fn alert_html(outcome: Outcome, message: &str) -> String {
    let (level, marker) = match outcome {
        Outcome::Success => ("alert-success", "alert-message-success"),
        Outcome::Error => ("alert-danger", "alert-message-error"),
    };
    format!(
        r#"<div class="alert {level} alert-dismissible {marker} d-flex align-items-center fade show">{}<button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button></div>"#,
        html_escape(message)
    )
}

/// Render the alert and return its generation.
fn show_result(document: &web_sys::Document, outcome: Outcome, message: &str) -> u64 {
    let generation = ALERT_GENERATIONS.with(AlertGenerations::begin);
    if let Ok(Some(container)) = document.query_selector(RESULT_SELECTOR) {
        container.set_inner_html(&alert_html(outcome, message));
    }
    generation
}

fn close_result(document: &web_sys::Document) {
    let selector = format!("{RESULT_SELECTOR} .alert");
    if let Ok(Some(alert)) = document.query_selector(&selector) {
        alert.remove();
    }
}

fn clipboard_available(window: &web_sys::Window) -> bool {
    let navigator = window.navigator();
    js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map(|clipboard| !clipboard.is_undefined() && !clipboard.is_null())
        .unwrap_or(false)
}

async fn copy(window: web_sys::Window, document: web_sys::Document, link: String, text: OutcomeText) {
    let promise = window.navigator().clipboard().write_text(&link);
    match JsFuture::from(promise).await {
        Ok(_) => {
            let generation = show_result(&document, Outcome::Success, &text.success);
            TimeoutFuture::new(SUCCESS_DISMISS_MS).await;
            if ALERT_GENERATIONS.with(|alerts| alerts.is_current(generation)) {
                close_result(&document);
            }
        }
        Err(err) => {
            web_sys::console::warn_2(&"AA Intel Tool: copying permalink failed".into(), &err);
            show_result(&document, Outcome::Error, &text.error);
        }
    }
}

/// Wire the permalink button, or remove it when the clipboard API is missing.
pub fn bind_permalink_button(text: OutcomeText) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Ok(Some(button)) = document.query_selector(BUTTON_SELECTOR) else {
        return;
    };

    if !clipboard_available(&window) {
        button.remove();
        return;
    }

    let target = button.clone();
    let callback = Closure::<dyn Fn(web_sys::Event)>::new(move |e: web_sys::Event| {
        e.prevent_default();
        let Some(link) = target.get_attribute("data-clipboard-text") else {
            return;
        };
        spawn_local(copy(window.clone(), document.clone(), link, text.clone()));
    });
    if button
        .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
        .is_err()
    {
        web_sys::console::warn_1(&"AA Intel Tool: could not bind permalink button".into());
        return;
    }

    PERMALINK_BINDING.with(|slot| {
        *slot.borrow_mut() = Some(PermalinkBinding { button, callback });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_alert_is_dismissible_and_escaped() {
        let html = alert_html(Outcome::Success, "Copied <link>");
        assert!(html.starts_with(
            r#"<div class="alert alert-success alert-dismissible alert-message-success d-flex align-items-center fade show">"#
        ));
        assert!(html.contains("Copied &lt;link&gt;"));
        assert!(html.ends_with(
            r#"<button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button></div>"#
        ));
    }

    #[test]
    fn error_alert_uses_danger_styling() {
        let html = alert_html(Outcome::Error, "Nope");
        assert!(html.contains("alert-danger"));
        assert!(html.contains("alert-message-error"));
        assert!(!html.contains("alert-success"));
    }

    #[test]
    fn only_the_latest_alert_is_auto_closed() {
        let alerts = AlertGenerations::new();
        let first = alerts.begin();
        assert!(alerts.is_current(first));

        let second = alerts.begin();
        assert!(!alerts.is_current(first));
        assert!(alerts.is_current(second));
    }
}
