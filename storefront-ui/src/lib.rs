//! Storefront page controllers.
//!
//! Provides the add-to-cart buttons, guest checkout, two-step OTP login,
//! header overlays and startup skeleton of the storefront pages, written
//! against a small DOM seam so they run in the browser (through
//! `storefront-web`) and headlessly (in tests and the `storefront` binary).
//!
//! Every action follows the same request/feedback cycle: claim the trigger,
//! send one JSON request with the CSRF header, then show success, the
//! backend's validation message, or a generic network error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod browser;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod context;
pub mod csrf;
pub mod dom;
pub mod error;
pub mod feedback;
pub mod loader;
pub mod notify;
pub mod overlay;
pub mod schedule;

#[cfg(test)]
mod testing;

// Re-export key types for convenience
pub use api::{ApiClient, ApiRequest, ApiResponse, HttpApiClient};
pub use auth::{OtpSendForm, OtpVerifyForm};
pub use browser::{Browser, MemoryBrowser};
pub use cart::{CartButton, CartOutcome};
pub use checkout::CheckoutForm;
pub use config::StorefrontConfig;
pub use context::Storefront;
pub use dom::{Element, MemoryElement};
pub use error::{ConfigError, TransportError};
pub use feedback::SubmitOutcome;
pub use loader::SkeletonLoader;
pub use notify::{LogNotifier, Notifier, RecordingNotifier, Severity};
pub use overlay::{HeaderOverlays, Overlay, OverlayKind};
pub use schedule::{ManualScheduler, Scheduler, TaskHandle};
