//! Human-readable messages from backend error bodies.
//!
//! The backend answers failures with either `{"error": "..."}` or a
//! validation map of field name to list of messages, sometimes both. Each
//! endpoint has its own precedence; the helpers here encode it.

use serde_json::Value;

/// Fallback shown when an add-to-cart rejection carries no message.
pub const CART_FALLBACK: &str = "Could not add to cart";

/// Fallback shown when checkout is rejected without a message.
pub const CHECKOUT_FALLBACK: &str = "Checkout failed";

/// Fallback shown when sending the OTP is rejected without a message.
pub const OTP_SEND_FALLBACK: &str = "Failed to send OTP";

/// Fallback shown when verification is rejected without a message.
pub const OTP_VERIFY_FALLBACK: &str = "Invalid OTP";

/// Borrowed view over a JSON error body.
#[derive(Debug, Clone, Copy)]
pub struct ErrorBody<'a>(&'a Value);

impl<'a> ErrorBody<'a> {
    /// Wrap a parsed body.
    #[must_use]
    pub const fn new(body: &'a Value) -> Self {
        Self(body)
    }

    /// Top-level `error` when it is a non-empty string.
    #[must_use]
    pub fn error(&self) -> Option<&'a str> {
        self.0
            .get("error")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
    }

    /// A field entry, unless it is missing or falsy (`null`, `false`, `0`,
    /// `""`).
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'a Value> {
        self.0.get(name).filter(|value| is_truthy(value))
    }

    /// First message of a field error list. A bare string is accepted too.
    #[must_use]
    pub fn first_field_error(&self, name: &str) -> Option<&'a str> {
        match self.field(name)? {
            Value::Array(messages) => messages.first().and_then(Value::as_str),
            Value::String(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Message for a rejected add-to-cart.
#[must_use]
pub fn cart_message(body: &Value) -> String {
    ErrorBody::new(body)
        .error()
        .unwrap_or(CART_FALLBACK)
        .to_string()
}

/// Message for a rejected checkout.
///
/// Address validation errors win and are shown as their compact JSON, so the
/// user sees which address field failed.
#[must_use]
pub fn checkout_message(body: &Value) -> String {
    let body = ErrorBody::new(body);
    if let Some(address) = body.field("shipping_address") {
        return format!("Address: {address}");
    }
    body.error().unwrap_or(CHECKOUT_FALLBACK).to_string()
}

/// Message for a rejected OTP dispatch.
#[must_use]
pub fn otp_send_message(body: &Value) -> String {
    let body = ErrorBody::new(body);
    body.error()
        .or_else(|| body.first_field_error("mobile_number"))
        .unwrap_or(OTP_SEND_FALLBACK)
        .to_string()
}

/// Message for a rejected OTP verification.
///
/// Precedence: `otp[0]`, then `non_field_errors[0]`, then `error`.
#[must_use]
pub fn otp_verify_message(body: &Value) -> String {
    let body = ErrorBody::new(body);
    body.first_field_error("otp")
        .or_else(|| body.first_field_error("non_field_errors"))
        .or_else(|| body.error())
        .unwrap_or(OTP_VERIFY_FALLBACK)
        .to_string()
}
