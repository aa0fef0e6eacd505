use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;

/// GET `url` and decode its JSON body, aborting the request after `timeout_ms`.
pub async fn fetch_json<T: DeserializeOwned>(url: &str, timeout_ms: u32) -> Result<T, String> {
    let controller = web_sys::AbortController::new()
        .map_err(|_| "fetch error: AbortController unavailable".to_string())?;
    let timed_out = Rc::new(Cell::new(false));
    // Dropping the timer cancels it, so it only fires while the request is pending.
    let _timer = {
        let controller = controller.clone();
        let timed_out = Rc::clone(&timed_out);
        Timeout::new(timeout_ms, move || {
            timed_out.set(true);
            controller.abort();
        })
    };
    let signal = controller.signal();

    let outcome = async {
        let resp = gloo_net::http::Request::get(url)
            .header("Accept", "application/json")
            .abort_signal(Some(&signal))
            .send()
            .await
            .map_err(|e| format!("fetch error: {e}"))?;

        if !resp.ok() {
            return Err(format!("HTTP {}", resp.status()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| format!("fetch error: {e}"))?;
        serde_json::from_str::<T>(&body).map_err(|e| format!("parse error: {e}"))
    }
    .await;

    outcome.map_err(|e| {
        if timed_out.get() {
            format!("timed out after {timeout_ms}ms")
        } else {
            e
        }
    })
}

/// Fetch one table section.
///
/// A `null` body is an empty section. Failures are logged and yield `None`.
pub async fn fetch_section<T: DeserializeOwned>(
    section: &str,
    url: &str,
    timeout_ms: u32,
) -> Option<Vec<T>> {
    match fetch_json::<Option<Vec<T>>>(url, timeout_ms).await {
        Ok(rows) => Some(rows.unwrap_or_default()),
        Err(e) => {
            web_sys::console::error_1(&format!("Error fetching {section} data: {e}").into());
            None
        }
    }
}
