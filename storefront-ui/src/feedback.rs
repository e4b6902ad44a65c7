//! The request/feedback pattern shared by every action.
//!
//! Each action follows the same shape: claim the trigger (disable it, swap
//! in a busy label), send one request, then either move on (success) or put
//! the trigger back and show a message (rejection or transport failure).
//! [`Trigger`] and [`StatusRegion`] own those DOM mutations so the actions
//! only decide which branch applies.

use crate::dom::Element;
use std::cell::Cell;
use std::fmt;

/// Trigger state captured before a request starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    label: String,
}

impl Snapshot {
    /// Label the trigger had before the request.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A button or submit control owned by exactly one action.
pub struct Trigger<E: Element> {
    element: E,
    in_flight: Cell<bool>,
}

impl<E: Element> Trigger<E> {
    /// Take ownership of `element`'s interactive state.
    pub const fn new(element: E) -> Self {
        Self {
            element,
            in_flight: Cell::new(false),
        }
    }

    /// The underlying element.
    pub const fn element(&self) -> &E {
        &self.element
    }

    /// Whether a request started by this trigger has not finished yet.
    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    /// Claim the trigger for a request.
    ///
    /// Returns `None` when a request is already in flight or the element is
    /// disabled; the caller must not send anything then. Otherwise the
    /// trigger is disabled and shows `busy_label` until [`Self::restore`].
    pub fn begin(&self, busy_label: &str) -> Option<Snapshot> {
        if self.in_flight.get() || self.element.is_disabled() {
            return None;
        }

        self.in_flight.set(true);
        let snapshot = Snapshot {
            label: self.element.inner_html(),
        };
        self.element.set_disabled(true);
        self.element.set_inner_html(busy_label);
        Some(snapshot)
    }

    /// Put back the label from `snapshot`, re-enable and release the trigger.
    pub fn restore(&self, snapshot: &Snapshot) {
        self.element.set_inner_html(&snapshot.label);
        self.element.set_disabled(false);
        self.in_flight.set(false);
    }
}

impl<E: Element + fmt::Debug> fmt::Debug for Trigger<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("element", &self.element)
            .field("in_flight", &self.in_flight.get())
            .finish()
    }
}

/// Inline error text next to a form. A page without one simply shows
/// nothing.
#[derive(Debug, Clone)]
pub struct StatusRegion<E: Element> {
    element: Option<E>,
}

impl<E: Element> StatusRegion<E> {
    /// Wrap the region element, if the page has one.
    pub const fn new(element: Option<E>) -> Self {
        Self { element }
    }

    /// Show `message`.
    pub fn show(&self, message: &str) {
        if let Some(element) = &self.element {
            element.set_text_content(message);
            element.set_style("display", "block");
        }
    }

    /// Hide the region, keeping its last text.
    pub fn hide(&self) {
        if let Some(element) = &self.element {
            element.set_style("display", "none");
        }
    }

    /// Whether the region is currently displayed.
    pub fn is_visible(&self) -> bool {
        self.element
            .as_ref()
            .is_some_and(|element| element.style("display") == "block")
    }

    /// Current text, empty when there is no region.
    pub fn text(&self) -> String {
        self.element
            .as_ref()
            .map(Element::text_content)
            .unwrap_or_default()
    }
}

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission from the same control is still running.
    Busy,
    /// A local check failed before any request was made.
    Precondition {
        /// Message shown to the user.
        message: String,
    },
    /// The backend accepted; the page is navigating away.
    Redirected {
        /// Navigation target.
        location: String,
    },
    /// The backend rejected the submission.
    Rejected {
        /// Message shown to the user.
        message: String,
    },
    /// No usable response arrived.
    NetworkError,
}
