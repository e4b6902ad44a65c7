//! Two-step mobile login: send an OTP, then verify it.
//!
//! The number entered on the login page travels to the verification page in
//! its query string without the country code; both steps prefix it before
//! talking to the backend. The session itself is established by the cookie
//! on the verification response.

use crate::api::{errors, ApiResponse, SendOtp, VerifyOtp, OTP_SEND, OTP_VERIFY};
use crate::browser::{query_param, with_query};
use crate::context::Storefront;
use crate::dom::Element;
use crate::error::TransportError;
use crate::feedback::{Snapshot, StatusRegion, SubmitOutcome, Trigger};
use serde_json::Value;
use std::rc::Rc;

/// Inline message when the backend could not be reached.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Inline message when the verification page was opened without a number.
pub const MOBILE_MISSING_MESSAGE: &str = "Mobile number missing";

/// `#mobileForm`: asks the backend to send an OTP.
pub struct OtpSendForm<E: Element> {
    storefront: Rc<Storefront>,
    mobile_input: E,
    submit: Trigger<E>,
    error: StatusRegion<E>,
}

impl<E: Element> OtpSendForm<E> {
    /// Bind `#mobileInput`, the submit control and `#loginError`.
    pub const fn new(
        storefront: Rc<Storefront>,
        mobile_input: E,
        submit: E,
        error: Option<E>,
    ) -> Self {
        Self {
            storefront,
            mobile_input,
            submit: Trigger::new(submit),
            error: StatusRegion::new(error),
        }
    }

    /// The inline error region.
    pub const fn error(&self) -> &StatusRegion<E> {
        &self.error
    }

    /// Handle a submit.
    pub async fn submit(&self) -> SubmitOutcome {
        let auth = &self.storefront.config().auth;
        let entered = self.mobile_input.value();

        let Some(snapshot) = self.submit.begin(&auth.send_busy_label) else {
            return SubmitOutcome::Busy;
        };
        self.error.hide();

        let payload = SendOtp {
            mobile_number: format!("{}{entered}", auth.country_code),
        };
        let response = self.storefront.post(OTP_SEND, &payload).await;

        if response.as_ref().is_ok_and(ApiResponse::is_success) {
            tracing::info!("OTP sent");
            let location = with_query(&auth.verify_path, &auth.mobile_param, &entered);
            self.storefront.navigate(&location);
            return SubmitOutcome::Redirected { location };
        }

        settle(
            &self.submit,
            &self.error,
            &snapshot,
            response,
            errors::otp_send_message,
        )
    }
}

/// `#otpForm`: verifies the OTP for the number in the page URL.
pub struct OtpVerifyForm<E: Element> {
    storefront: Rc<Storefront>,
    otp_input: E,
    submit: Trigger<E>,
    error: StatusRegion<E>,
}

impl<E: Element> OtpVerifyForm<E> {
    /// Bind `#otpInput`, the submit control and `#otpError`.
    pub const fn new(
        storefront: Rc<Storefront>,
        otp_input: E,
        submit: E,
        error: Option<E>,
    ) -> Self {
        Self {
            storefront,
            otp_input,
            submit: Trigger::new(submit),
            error: StatusRegion::new(error),
        }
    }

    /// The inline error region.
    pub const fn error(&self) -> &StatusRegion<E> {
        &self.error
    }

    /// Mobile number from the page URL, unless missing or empty.
    pub fn mobile(&self) -> Option<String> {
        let search = self.storefront.browser().location_search();
        query_param(&search, &self.storefront.config().auth.mobile_param)
            .filter(|mobile| !mobile.is_empty())
    }

    /// Handle a submit.
    pub async fn submit(&self) -> SubmitOutcome {
        let auth = &self.storefront.config().auth;

        let Some(mobile) = self.mobile() else {
            self.error.show(MOBILE_MISSING_MESSAGE);
            return SubmitOutcome::Precondition {
                message: MOBILE_MISSING_MESSAGE.to_string(),
            };
        };

        let Some(snapshot) = self.submit.begin(&auth.verify_busy_label) else {
            return SubmitOutcome::Busy;
        };
        self.error.hide();

        let payload = VerifyOtp {
            mobile_number: format!("{}{mobile}", auth.country_code),
            otp: self.otp_input.value(),
        };
        let response = self.storefront.post(OTP_VERIFY, &payload).await;

        if response.as_ref().is_ok_and(ApiResponse::is_success) {
            tracing::info!("OTP verified");
            let location = auth.landing_path.clone();
            self.storefront.navigate(&location);
            return SubmitOutcome::Redirected { location };
        }

        settle(
            &self.submit,
            &self.error,
            &snapshot,
            response,
            errors::otp_verify_message,
        )
    }
}

/// Failure branch shared by both steps: restore the control and show the
/// extracted or generic message.
fn settle<E: Element>(
    trigger: &Trigger<E>,
    region: &StatusRegion<E>,
    snapshot: &Snapshot,
    response: Result<ApiResponse, TransportError>,
    message_for: fn(&Value) -> String,
) -> SubmitOutcome {
    trigger.restore(snapshot);

    if let Ok(ApiResponse {
        body: Some(body),
        ..
    }) = response
    {
        let message = message_for(&body);
        region.show(&message);
        return SubmitOutcome::Rejected { message };
    }

    region.show(NETWORK_ERROR_MESSAGE);
    SubmitOutcome::NetworkError
}
