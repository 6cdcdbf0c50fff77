//! Fetching the CSV source in the browser.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::error::DataLoadError;

/// GET `url` and return the response body as text.
///
/// Network failures and non-2xx responses become `DataLoadError`s; nothing
/// here panics, so a failed fetch can be shown as a message.
pub async fn fetch_text(url: &str) -> Result<String, DataLoadError> {
    let window = web_sys::window().ok_or_else(|| fetch_error(url, "no window available"))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| fetch_error(url, js_message(&e)))?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| fetch_error(url, js_message(&e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| fetch_error(url, "fetch did not return a Response"))?;

    if !response.ok() {
        return Err(DataLoadError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let body = response.text().map_err(|e| fetch_error(url, js_message(&e)))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|e| fetch_error(url, js_message(&e)))?;

    text.as_string()
        .ok_or_else(|| fetch_error(url, "response body is not text"))
}

fn fetch_error(url: &str, message: impl Into<String>) -> DataLoadError {
    DataLoadError::Fetch {
        url: url.to_string(),
        message: message.into(),
    }
}

fn js_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
