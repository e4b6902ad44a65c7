//! `reqwest` implementation of [`ApiClient`].
//!
//! On `wasm32` reqwest drives the browser's `fetch`; requests are sent with
//! same-origin credentials so the session cookie set by OTP verification
//! takes effect.

use super::{ApiClient, ApiRequest, ApiResponse};
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue, ACCEPT};
use url::Url;

/// HTTP client for the storefront backend.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: Url,
    csrf_header: HeaderName,
}

impl HttpApiClient {
    /// Create a client resolving paths against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` or `csrf_header` is invalid.
    pub fn new(base_url: &str, csrf_header: &str) -> Result<Self, TransportError> {
        Self::with_client(reqwest::Client::new(), base_url, csrf_header)
    }

    /// Create a client on top of a preconfigured [`reqwest::Client`].
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` or `csrf_header` is invalid.
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        csrf_header: &str,
    ) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url)?;
        let csrf_header = HeaderName::from_bytes(csrf_header.as_bytes())
            .map_err(|e| TransportError::InvalidUrl(format!("bad header name: {e}")))?;

        Ok(Self {
            client,
            base_url,
            csrf_header,
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for a backend path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined onto the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait(?Send)]
impl ApiClient for HttpApiClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request.path)?;

        let mut builder = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(&request.body);

        if let Some(token) = request.csrf_token.as_deref() {
            let value = HeaderValue::from_str(token)
                .map_err(|e| TransportError::Request(format!("unusable CSRF token: {e}")))?;
            builder = builder.header(self.csrf_header.clone(), value);
        }

        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.fetch_credentials_same_origin();
        }

        tracing::debug!(path = %request.path, "Sending API request");

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        let body = serde_json::from_slice(&bytes).ok();
        if body.is_none() && !bytes.is_empty() {
            tracing::debug!(status, path = %request.path, "Response body is not JSON");
        }

        Ok(ApiResponse { status, body })
    }
}
