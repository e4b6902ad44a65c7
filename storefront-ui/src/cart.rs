//! Add-to-cart buttons and the header cart counter.

use crate::api::{errors, AddCartItem, ApiResponse, CART_ITEMS};
use crate::context::Storefront;
use crate::dom::Element;
use crate::feedback::{Snapshot, Trigger};
use crate::notify::Severity;
use crate::schedule::TaskHandle;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Notice for buttons without a product id (template placeholders).
pub const DEMO_PRODUCT_MESSAGE: &str = "This is a demo product. Please view real products.";

/// Notice after a successful add.
pub const ADDED_MESSAGE: &str = "Item added to cart";

/// Notice when the backend could not be reached.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Parse a counter label the way `parseInt(text) || 0` does: optional
/// leading whitespace and sign, then as many digits as there are.
///
/// # Examples
///
/// ```rust
/// use storefront_ui::cart::parse_count;
///
/// assert_eq!(parse_count("3"), 3);
/// assert_eq!(parse_count(" 12 items"), 12);
/// assert_eq!(parse_count("none"), 0);
/// ```
#[must_use]
pub fn parse_count(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// The header element showing how many items are in the cart.
#[derive(Debug, Clone)]
pub struct CartCounter<E: Element> {
    element: E,
}

impl<E: Element> CartCounter<E> {
    /// Wrap the counter element.
    pub const fn new(element: E) -> Self {
        Self { element }
    }

    /// Count currently displayed.
    pub fn count(&self) -> i64 {
        parse_count(&self.element.text_content())
    }

    /// Add one and display the result.
    pub fn increment(&self) -> i64 {
        let count = self.count().saturating_add(1);
        self.element.set_text_content(&count.to_string());
        count
    }
}

/// What a click on an add-to-cart button did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    /// The button has no product id; nothing was sent.
    DemoProduct,
    /// An earlier add from this button has not finished.
    Busy,
    /// The item was added.
    Added {
        /// New counter value, when the page has a counter.
        count: Option<i64>,
    },
    /// The backend refused the item.
    Rejected {
        /// Message shown to the user.
        message: String,
    },
    /// No usable response arrived.
    NetworkError,
}

/// One add-to-cart button.
///
/// After a successful add the button shows the success state and a revert
/// task is scheduled. The task holds only a weak reference; dropping the
/// button or calling [`Self::detach`] cancels it.
pub struct CartButton<E: Element> {
    storefront: Rc<Storefront>,
    trigger: Trigger<E>,
    counter: Option<CartCounter<E>>,
    success: RefCell<Option<Snapshot>>,
    pending_revert: Cell<Option<TaskHandle>>,
}

impl<E: Element> CartButton<E> {
    /// Bind `element` (carrying `data-product-id`) and the optional page
    /// counter.
    pub fn new(storefront: Rc<Storefront>, element: E, counter: Option<E>) -> Rc<Self> {
        Rc::new(Self {
            storefront,
            trigger: Trigger::new(element),
            counter: counter.map(CartCounter::new),
            success: RefCell::new(None),
            pending_revert: Cell::new(None),
        })
    }

    /// Product id from the button, unless missing or empty.
    pub fn product_id(&self) -> Option<String> {
        self.trigger
            .element()
            .attribute("data-product-id")
            .filter(|id| !id.is_empty())
    }

    /// The button element.
    pub const fn element(&self) -> &E {
        self.trigger.element()
    }

    /// Whether the success state is showing and waiting to revert.
    pub fn is_reverting(&self) -> bool {
        self.pending_revert.get().is_some()
    }

    /// Handle a click.
    pub async fn add_to_cart(self: &Rc<Self>) -> CartOutcome {
        let Some(product_id) = self.product_id() else {
            self.storefront.notify(DEMO_PRODUCT_MESSAGE, Severity::Error);
            return CartOutcome::DemoProduct;
        };

        let Some(snapshot) = self
            .trigger
            .begin(&self.storefront.config().cart.busy_label)
        else {
            tracing::debug!(product_id = %product_id, "Add to cart already in flight");
            return CartOutcome::Busy;
        };

        let payload = AddCartItem::single(product_id.as_str());
        match self.storefront.post(CART_ITEMS, &payload).await {
            Ok(response) if response.is_success() => {
                let count = self.counter.as_ref().map(CartCounter::increment);
                self.show_success(snapshot);
                self.storefront.notify(ADDED_MESSAGE, Severity::Info);
                tracing::info!(product_id = %product_id, "Item added to cart");
                CartOutcome::Added { count }
            }
            Ok(ApiResponse {
                body: Some(body),
                ..
            }) => {
                let message = errors::cart_message(&body);
                self.trigger.restore(&snapshot);
                self.storefront.notify(&message, Severity::Error);
                CartOutcome::Rejected { message }
            }
            Ok(_) | Err(_) => {
                self.trigger.restore(&snapshot);
                self.storefront.notify(NETWORK_ERROR_MESSAGE, Severity::Error);
                CartOutcome::NetworkError
            }
        }
    }

    /// Revert the success state now instead of waiting for the timer.
    pub fn reset(&self) {
        self.cancel_revert();
        self.revert();
    }

    /// Cancel the pending revert and leave the button as it is.
    pub fn detach(&self) {
        self.cancel_revert();
    }

    fn show_success(self: &Rc<Self>, snapshot: Snapshot) {
        let cart = &self.storefront.config().cart;
        let element = self.trigger.element();
        element.set_inner_html(&cart.success_label);
        element.set_style("background", &cart.success_background);
        element.set_style("color", &cart.success_color);
        *self.success.borrow_mut() = Some(snapshot);

        let button = Rc::downgrade(self);
        let handle = self.storefront.scheduler().schedule(
            cart.revert_delay(),
            Box::new(move || {
                if let Some(button) = button.upgrade() {
                    button.pending_revert.set(None);
                    button.revert();
                }
            }),
        );
        self.pending_revert.set(Some(handle));
    }

    fn revert(&self) {
        let snapshot = self.success.borrow_mut().take();
        if let Some(snapshot) = snapshot {
            let element = self.trigger.element();
            element.set_style("background", "");
            element.set_style("color", "");
            self.trigger.restore(&snapshot);
        }
    }

    fn cancel_revert(&self) {
        if let Some(handle) = self.pending_revert.take() {
            self.storefront.scheduler().cancel(handle);
        }
    }
}

impl<E: Element> Drop for CartButton<E> {
    fn drop(&mut self) {
        self.cancel_revert();
    }
}
