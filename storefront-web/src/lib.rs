//! Browser binding for the storefront controllers.
//!
//! Compiled to WebAssembly and loaded by every storefront template. On start
//! it wires the live DOM, cookies, location, `setTimeout` and the page's
//! toast helper into [`storefront_ui`] and mounts the controllers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod browser;
pub mod dom;
pub mod logging;
pub mod mount;

pub use browser::{TimeoutScheduler, ToastNotifier, WebBrowser};
pub use dom::WebElement;

use std::rc::Rc;
use storefront_ui::{HttpApiClient, Storefront, StorefrontConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Module entry point.
///
/// # Errors
///
/// Returns an error when there is no window or document, the backend URL is
/// unusable, or a listener cannot be attached.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let config = StorefrontConfig::default();
    let base_url = match config.api.base_url.clone() {
        Some(base_url) => base_url,
        None => window.location().origin()?,
    };
    let api = HttpApiClient::new(&base_url, &config.api.csrf_header)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let storefront = Rc::new(
        Storefront::new(
            config,
            Rc::new(api),
            Rc::new(WebBrowser::new(window.clone())),
            Rc::new(TimeoutScheduler::new(window.clone())),
        )
        .with_notifier(Rc::new(ToastNotifier::new(window.clone()))),
    );

    mount::mount_loader(&storefront, &window, &document)?;

    if document.ready_state() == "loading" {
        let ready = document.clone();
        let callback = Closure::once(move || {
            if let Err(err) = mount::mount(&storefront, &ready) {
                tracing::error!(error = ?err, "Failed to mount storefront");
            }
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            callback.as_ref().unchecked_ref(),
        )?;
        callback.forget();
        return Ok(());
    }

    mount::mount(&storefront, &document)
}
