//! Shared capabilities handed to every controller.

use crate::api::{ApiClient, ApiRequest, ApiResponse};
use crate::browser::Browser;
use crate::config::StorefrontConfig;
use crate::csrf;
use crate::error::TransportError;
use crate::notify::{LogNotifier, Notifier, Severity};
use crate::schedule::Scheduler;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// Configuration plus the injected capabilities of one page.
///
/// Controllers hold an `Rc<Storefront>`; the page builds exactly one.
pub struct Storefront {
    config: StorefrontConfig,
    api: Rc<dyn ApiClient>,
    browser: Rc<dyn Browser>,
    scheduler: Rc<dyn Scheduler>,
    notifier: Rc<dyn Notifier>,
}

impl Storefront {
    /// Assemble a storefront. Notifications go to the log until
    /// [`Self::with_notifier`] installs something visible.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        api: Rc<dyn ApiClient>,
        browser: Rc<dyn Browser>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            config,
            api,
            browser,
            scheduler,
            notifier: Rc::new(LogNotifier),
        }
    }

    /// Replace the notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Rc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Window capabilities.
    #[must_use]
    pub fn browser(&self) -> &dyn Browser {
        self.browser.as_ref()
    }

    /// Timer capability.
    #[must_use]
    pub fn scheduler(&self) -> Rc<dyn Scheduler> {
        Rc::clone(&self.scheduler)
    }

    /// Surface a notification.
    pub fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity);
    }

    /// Navigate the page.
    pub fn navigate(&self, url: &str) {
        tracing::info!(url = %url, "Navigating");
        self.browser.navigate(url);
    }

    /// Current CSRF token, read fresh from the cookie.
    #[must_use]
    pub fn csrf_token(&self) -> Option<String> {
        csrf::read_cookie(&self.browser.cookie_string(), &self.config.api.csrf_cookie)
    }

    /// `POST` `payload` as JSON to `path` with the CSRF token attached.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response was obtained.
    pub async fn post<P: Serialize>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<ApiResponse, TransportError> {
        let request = ApiRequest::new(path, payload, self.csrf_token())
            .map_err(|e| TransportError::Request(format!("unserializable payload: {e}")))?;

        if request.csrf_token.is_none() {
            tracing::debug!(path = %path, "No CSRF cookie, sending without token");
        }

        match self.api.send(request).await {
            Ok(response) => {
                if !response.is_success() {
                    tracing::warn!(status = response.status, path = %path, "API request rejected");
                }
                Ok(response)
            }
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "API request failed");
                Err(err)
            }
        }
    }
}

impl fmt::Debug for Storefront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
