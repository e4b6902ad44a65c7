//! Backend HTTP contract.
//!
//! The storefront only ever issues JSON `POST`s to four fixed endpoints. The
//! paths and payload shapes below must stay byte-compatible with the backend.
//!
//! # Endpoints
//!
//! | Action | Path | Body |
//! |---|---|---|
//! | Add to cart | [`CART_ITEMS`] | [`AddCartItem`] |
//! | Create order | [`ORDERS`] | [`CreateOrder`] |
//! | Send OTP | [`OTP_SEND`] | [`SendOtp`] |
//! | Verify OTP | [`OTP_VERIFY`] | [`VerifyOtp`] |

pub mod errors;
pub mod http;

pub use errors::ErrorBody;
pub use http::HttpApiClient;

use crate::error::TransportError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Cart item creation endpoint.
pub const CART_ITEMS: &str = "/api/v1/cart/items";

/// Order creation endpoint.
pub const ORDERS: &str = "/api/v1/orders/";

/// OTP dispatch endpoint.
pub const OTP_SEND: &str = "/api/v1/auth/otp/send";

/// OTP verification endpoint.
pub const OTP_VERIFY: &str = "/api/v1/auth/otp/verify";

/// A JSON `POST` to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Absolute path on the backend, e.g. [`CART_ITEMS`].
    pub path: String,
    /// JSON body.
    pub body: Value,
    /// CSRF token to send in the CSRF header, if the cookie exists.
    pub csrf_token: Option<String>,
}

impl ApiRequest {
    /// Build a request by serializing `payload`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be represented as JSON.
    pub fn new(
        path: &str,
        payload: &impl Serialize,
        csrf_token: Option<String>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            path: path.to_string(),
            body: serde_json::to_value(payload)?,
            csrf_token,
        })
    }
}

/// The backend's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body; `None` when the body is empty or not JSON.
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Build a response with a JSON body.
    #[must_use]
    pub const fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Build a response without a usable body.
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport for [`ApiRequest`]s.
///
/// Futures are not `Send`: in the browser everything runs on the page's
/// single thread.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait ApiClient {
    /// Send `request` and wait for the response.
    ///
    /// Any HTTP status counts as a response; only a failure to get one is an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response could be obtained.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// `POST /api/v1/cart/items` body. Dimensions are always zero for catalogue
/// products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddCartItem {
    /// Product identifier taken from the button.
    pub product_id: String,
    /// Units to add.
    pub quantity: u32,
    /// Custom length.
    pub length: u32,
    /// Custom breadth.
    pub breadth: u32,
    /// Custom height.
    pub height: u32,
}

impl AddCartItem {
    /// One unit of `product_id`, no custom dimensions.
    #[must_use]
    pub fn single(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            quantity: 1,
            length: 0,
            breadth: 0,
            height: 0,
        }
    }
}

/// `POST /api/v1/orders/` body for a guest checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrder {
    /// Contact email.
    pub guest_email: Option<String>,
    /// Contact phone.
    pub guest_phone: Option<String>,
    /// Delivery address.
    pub shipping_address: ShippingAddress,
}

/// Nested address of [`CreateOrder`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingAddress {
    /// Street line.
    pub line1: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Postal code.
    pub zip_code: Option<String>,
    /// Region.
    pub state: String,
}

/// `POST /api/v1/auth/otp/send` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendOtp {
    /// Mobile number including the country code.
    pub mobile_number: String,
}

/// `POST /api/v1/auth/otp/verify` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyOtp {
    /// Mobile number including the country code.
    pub mobile_number: String,
    /// Code the user received.
    pub otp: String,
}
