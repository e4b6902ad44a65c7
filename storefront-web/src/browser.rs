//! Window capabilities: cookies and location, toasts, timers.

use std::time::Duration;
use storefront_ui::notify::{Notifier, Severity};
use storefront_ui::schedule::{Scheduler, Task, TaskHandle};
use storefront_ui::Browser;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, Window};

/// Name of the page's optional toast helper, `showToast(message, isError)`.
const TOAST_HOOK: &str = "showToast";

/// [`Browser`] over `window` and `document`.
#[derive(Debug, Clone)]
pub struct WebBrowser {
    window: Window,
}

impl WebBrowser {
    /// Wrap the page window.
    #[must_use]
    pub const fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Browser for WebBrowser {
    fn cookie_string(&self) -> String {
        self.window
            .document()
            .and_then(|document| document.dyn_into::<HtmlDocument>().ok())
            .and_then(|document| document.cookie().ok())
            .unwrap_or_default()
    }

    fn location_search(&self) -> String {
        self.window.location().search().unwrap_or_default()
    }

    fn navigate(&self, url: &str) {
        if let Err(err) = self.window.location().set_href(url) {
            tracing::error!(url = %url, error = ?err, "Navigation failed");
        }
    }
}

/// [`Notifier`] using the page's `showToast` helper, falling back to
/// `alert()` for errors when the page has none.
#[derive(Debug, Clone)]
pub struct ToastNotifier {
    window: Window,
}

impl ToastNotifier {
    /// Wrap the page window.
    #[must_use]
    pub const fn new(window: Window) -> Self {
        Self { window }
    }

    fn hook(&self) -> Option<js_sys::Function> {
        js_sys::Reflect::get(&self.window, &JsValue::from_str(TOAST_HOOK))
            .ok()
            .and_then(|hook| hook.dyn_into::<js_sys::Function>().ok())
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if let Some(hook) = self.hook() {
            let called = hook.call2(
                &JsValue::NULL,
                &JsValue::from_str(message),
                &JsValue::from_bool(severity.is_error()),
            );
            if let Err(err) = called {
                tracing::warn!(error = ?err, "showToast threw");
            }
            return;
        }

        if severity.is_error() {
            if let Err(err) = self.window.alert_with_message(message) {
                tracing::warn!(error = ?err, "alert failed");
            }
        } else {
            tracing::info!(message = %message, "Notification");
        }
    }
}

/// [`Scheduler`] over `setTimeout` / `clearTimeout`.
#[derive(Debug, Clone)]
pub struct TimeoutScheduler {
    window: Window,
}

impl TimeoutScheduler {
    /// Wrap the page window.
    #[must_use]
    pub const fn new(window: Window) -> Self {
        Self { window }
    }
}

/// Delay in the millisecond `i32` `setTimeout` takes, saturating.
pub(crate) fn timeout_ms(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        // Freed when it runs. A timer cancelled first keeps its closure until
        // the page unloads
        let callback = Closure::once_into_js(move || task());
        let scheduled = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                timeout_ms(delay),
            );

        match scheduled {
            Ok(id) => TaskHandle::new(u64::try_from(id).unwrap_or_default()),
            Err(err) => {
                tracing::error!(error = ?err, "setTimeout failed");
                // Timer ids are positive; 0 never matches a live timer
                TaskHandle::new(0)
            }
        }
    }

    fn cancel(&self, handle: TaskHandle) {
        if let Ok(id) = i32::try_from(handle.id()) {
            self.window.clear_timeout_with_handle(id);
        }
    }
}
