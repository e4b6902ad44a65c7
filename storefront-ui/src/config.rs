//! Configuration for the storefront controllers.
//!
//! Every section has working defaults matching the storefront templates, so
//! the browser binding runs without any configuration at all. The headless
//! driver layers files and environment on top:
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"
//!
//! [cart]
//! revert_delay_ms = 1500
//!
//! [auth]
//! country_code = "+91"
//! ```

use crate::error::ConfigError;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::time::Duration;

/// Storefront configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorefrontConfig {
    /// Backend API access.
    #[serde(default)]
    pub api: ApiConfig,
    /// Add-to-cart buttons.
    #[serde(default)]
    pub cart: CartConfig,
    /// Checkout form.
    #[serde(default)]
    pub checkout: CheckoutConfig,
    /// OTP login forms.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Startup loading skeleton.
    #[serde(default)]
    pub loader: LoaderConfig,
}

/// Backend API access configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL requests are resolved against. The browser binding uses the
    /// page origin when unset.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Cookie holding the CSRF token.
    #[serde(default = "default_csrf_cookie")]
    pub csrf_cookie: String,
    /// Header the CSRF token is sent in.
    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,
}

/// Add-to-cart configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CartConfig {
    /// How long the success state stays on the button.
    #[serde(default = "default_revert_delay_ms")]
    pub revert_delay_ms: u64,
    /// Label shown while the request is in flight.
    #[serde(default = "default_cart_busy_label")]
    pub busy_label: String,
    /// Label shown after a successful add.
    #[serde(default = "default_cart_success_label")]
    pub success_label: String,
    /// Background applied after a successful add.
    #[serde(default = "default_success_background")]
    pub success_background: String,
    /// Text color applied after a successful add.
    #[serde(default = "default_success_color")]
    pub success_color: String,
}

/// Checkout configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    /// Fixed `shipping_address.state` value. The checkout form has no state
    /// field.
    #[serde(default = "default_shipping_state")]
    pub shipping_state: String,
    /// Page the browser lands on after an order is created.
    #[serde(default = "default_success_path")]
    pub success_path: String,
    /// Label shown while the order is being created.
    #[serde(default = "default_checkout_busy_label")]
    pub busy_label: String,
}

/// OTP login configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Country code prepended to the entered mobile number.
    #[serde(default = "default_country_code")]
    pub country_code: String,
    /// Verification page reached after the OTP is sent.
    #[serde(default = "default_verify_path")]
    pub verify_path: String,
    /// Query parameter carrying the mobile number to the verification page.
    #[serde(default = "default_mobile_param")]
    pub mobile_param: String,
    /// Page reached after a successful verification.
    #[serde(default = "default_landing_path")]
    pub landing_path: String,
    /// Label shown while the OTP is being sent.
    #[serde(default = "default_send_busy_label")]
    pub send_busy_label: String,
    /// Label shown while the OTP is being verified.
    #[serde(default = "default_verify_busy_label")]
    pub verify_busy_label: String,
}

/// Loading skeleton configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    /// Id of the skeleton overlay element.
    #[serde(default = "default_skeleton_id")]
    pub element_id: String,
    /// Class that starts the fade-out transition.
    #[serde(default = "default_hidden_class")]
    pub hidden_class: String,
    /// Custom window event that hides the skeleton.
    #[serde(default = "default_ready_event")]
    pub ready_event: String,
    /// Failsafe after which the skeleton is hidden regardless.
    #[serde(default = "default_failsafe_ms")]
    pub failsafe_ms: u64,
    /// Delay between hiding and removing the element.
    #[serde(default = "default_removal_delay_ms")]
    pub removal_delay_ms: u64,
}

// Default value functions
fn default_csrf_cookie() -> String {
    "csrftoken".to_string()
}

fn default_csrf_header() -> String {
    "X-CSRFToken".to_string()
}

const fn default_revert_delay_ms() -> u64 {
    1500
}

fn default_cart_busy_label() -> String {
    "...".to_string()
}

fn default_cart_success_label() -> String {
    "✓".to_string()
}

fn default_success_background() -> String {
    "#4CAF50".to_string()
}

fn default_success_color() -> String {
    "white".to_string()
}

fn default_shipping_state() -> String {
    "Telangana".to_string()
}

fn default_success_path() -> String {
    "/checkout/success/".to_string()
}

fn default_checkout_busy_label() -> String {
    "Processing...".to_string()
}

fn default_country_code() -> String {
    "+91".to_string()
}

fn default_verify_path() -> String {
    "/verify-otp/".to_string()
}

fn default_mobile_param() -> String {
    "mobile".to_string()
}

fn default_landing_path() -> String {
    "/account/dashboard".to_string()
}

fn default_send_busy_label() -> String {
    "Sending...".to_string()
}

fn default_verify_busy_label() -> String {
    "Verifying...".to_string()
}

fn default_skeleton_id() -> String {
    "initial-skeleton-overlay".to_string()
}

fn default_hidden_class() -> String {
    "hidden".to_string()
}

fn default_ready_event() -> String {
    "app-ready".to_string()
}

const fn default_failsafe_ms() -> u64 {
    3000
}

const fn default_removal_delay_ms() -> u64 {
    600 // 0.5s transition + buffer
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            csrf_cookie: default_csrf_cookie(),
            csrf_header: default_csrf_header(),
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            revert_delay_ms: default_revert_delay_ms(),
            busy_label: default_cart_busy_label(),
            success_label: default_cart_success_label(),
            success_background: default_success_background(),
            success_color: default_success_color(),
        }
    }
}

impl CartConfig {
    /// Revert delay as a [`Duration`].
    #[must_use]
    pub const fn revert_delay(&self) -> Duration {
        Duration::from_millis(self.revert_delay_ms)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            shipping_state: default_shipping_state(),
            success_path: default_success_path(),
            busy_label: default_checkout_busy_label(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            country_code: default_country_code(),
            verify_path: default_verify_path(),
            mobile_param: default_mobile_param(),
            landing_path: default_landing_path(),
            send_busy_label: default_send_busy_label(),
            verify_busy_label: default_verify_busy_label(),
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            element_id: default_skeleton_id(),
            hidden_class: default_hidden_class(),
            ready_event: default_ready_event(),
            failsafe_ms: default_failsafe_ms(),
            removal_delay_ms: default_removal_delay_ms(),
        }
    }
}

impl LoaderConfig {
    /// Failsafe delay as a [`Duration`].
    #[must_use]
    pub const fn failsafe(&self) -> Duration {
        Duration::from_millis(self.failsafe_ms)
    }

    /// Removal delay as a [`Duration`].
    #[must_use]
    pub const fn removal_delay(&self) -> Duration {
        Duration::from_millis(self.removal_delay_ms)
    }
}

impl StorefrontConfig {
    /// Load configuration from files and environment.
    ///
    /// Sources, later ones winning: `config/storefront.toml`,
    /// `config/local.toml`, then `STOREFRONT_*` environment variables with
    /// `__` separating sections (`STOREFRONT_API__BASE_URL`).
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config/storefront.toml")
    }

    /// Load configuration using `path` instead of `config/storefront.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Toml::file("config/local.toml"))
            .merge(Env::prefixed("STOREFRONT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Parse configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Toml::string(toml))
            .extract()
            .map_err(ConfigError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.api.csrf_cookie, "csrftoken");
        assert_eq!(config.api.csrf_header, "X-CSRFToken");
        assert_eq!(config.cart.revert_delay(), Duration::from_millis(1500));
        assert_eq!(config.checkout.shipping_state, "Telangana");
        assert_eq!(config.auth.country_code, "+91");
        assert_eq!(config.loader.failsafe(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StorefrontConfig::from_toml_str(
            r#"
            [api]
            base_url = "http://localhost:8000"

            [cart]
            revert_delay_ms = 2000
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.api.csrf_cookie, "csrftoken");
        assert_eq!(config.cart.revert_delay_ms, 2000);
        assert_eq!(config.cart.success_label, "✓");
        assert_eq!(config.auth.landing_path, "/account/dashboard");
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let result = StorefrontConfig::from_toml_str("[cart]\nrevert_delay_ms = \"soon\"");
        assert!(result.is_err());
    }
}
