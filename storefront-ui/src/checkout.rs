//! Guest checkout form.

use crate::api::{errors, ApiResponse, CreateOrder, ShippingAddress, ORDERS};
use crate::browser::with_query;
use crate::context::Storefront;
use crate::dom::Element;
use crate::feedback::{StatusRegion, SubmitOutcome, Trigger};
use serde_json::Value;
use std::rc::Rc;

/// Inline message when the backend could not be reached.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// `#checkoutForm` with its submit button and `#checkoutError` region.
pub struct CheckoutForm<E: Element> {
    storefront: Rc<Storefront>,
    form: E,
    submit: Trigger<E>,
    error: StatusRegion<E>,
}

impl<E: Element> CheckoutForm<E> {
    /// Bind the form, its submit control and the optional error region.
    pub const fn new(storefront: Rc<Storefront>, form: E, submit: E, error: Option<E>) -> Self {
        Self {
            storefront,
            form,
            submit: Trigger::new(submit),
            error: StatusRegion::new(error),
        }
    }

    /// The inline error region.
    pub const fn error(&self) -> &StatusRegion<E> {
        &self.error
    }

    /// Order payload from the current form fields. Missing fields become
    /// `null`; the state always comes from configuration.
    pub fn order(&self) -> CreateOrder {
        CreateOrder {
            guest_email: self.form.form_value("email"),
            guest_phone: self.form.form_value("phone"),
            shipping_address: ShippingAddress {
                line1: self.form.form_value("address"),
                city: self.form.form_value("city"),
                zip_code: self.form.form_value("zip"),
                state: self.storefront.config().checkout.shipping_state.clone(),
            },
        }
    }

    /// Handle a submit. The browser binding has already prevented the
    /// default navigation.
    pub async fn submit(&self) -> SubmitOutcome {
        let checkout = &self.storefront.config().checkout;
        let Some(snapshot) = self.submit.begin(&checkout.busy_label) else {
            return SubmitOutcome::Busy;
        };
        self.error.hide();

        let order = self.order();
        let outcome = match self.storefront.post(ORDERS, &order).await {
            Ok(response) if response.is_success() => {
                if let Some(order_id) = response.body.as_ref().and_then(order_id) {
                    tracing::info!(order_id = %order_id, "Order created");
                    let location = with_query(&checkout.success_path, "order_id", &order_id);
                    self.storefront.navigate(&location);
                    return SubmitOutcome::Redirected { location };
                }
                tracing::warn!(status = response.status, "Order response has no id");
                SubmitOutcome::Rejected {
                    message: errors::CHECKOUT_FALLBACK.to_string(),
                }
            }
            Ok(ApiResponse {
                body: Some(body),
                ..
            }) => SubmitOutcome::Rejected {
                message: errors::checkout_message(&body),
            },
            Ok(_) | Err(_) => SubmitOutcome::NetworkError,
        };

        self.submit.restore(&snapshot);
        match &outcome {
            SubmitOutcome::Rejected { message } => self.error.show(message),
            SubmitOutcome::NetworkError => self.error.show(NETWORK_ERROR_MESSAGE),
            _ => {}
        }
        outcome
    }
}

fn order_id(body: &Value) -> Option<String> {
    match body.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
