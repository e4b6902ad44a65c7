//! Startup loading skeleton.
//!
//! The skeleton overlay is hidden on the first of: the window `load` event,
//! the custom ready event, or the failsafe timer. Hiding adds the hidden
//! class to start the fade-out; the element is removed from the document
//! once the transition has had time to finish.
//!
//! The element is looked up on every attempt, since the loader is armed
//! before the body has been parsed.

use crate::context::Storefront;
use crate::dom::Element;
use crate::schedule::TaskHandle;
use std::cell::Cell;
use std::rc::Rc;

/// Finds the skeleton element, if the page has one yet.
pub type Locate<E> = Box<dyn Fn() -> Option<E>>;

/// Controller for `#initial-skeleton-overlay`.
pub struct SkeletonLoader<E: Element> {
    storefront: Rc<Storefront>,
    locate: Locate<E>,
    failsafe: Cell<Option<TaskHandle>>,
}

impl<E: Element> SkeletonLoader<E> {
    /// Create a loader resolving its element through `locate`.
    pub fn new(storefront: Rc<Storefront>, locate: impl Fn() -> Option<E> + 'static) -> Rc<Self> {
        Rc::new(Self {
            storefront,
            locate: Box::new(locate),
            failsafe: Cell::new(None),
        })
    }

    /// Arm the failsafe.
    pub fn install(self: &Rc<Self>) {
        let loader = Rc::downgrade(self);
        let handle = self.storefront.scheduler().schedule(
            self.storefront.config().loader.failsafe(),
            Box::new(move || {
                if let Some(loader) = loader.upgrade() {
                    loader.failsafe.set(None);
                    if loader.hide() {
                        tracing::debug!("Skeleton hidden by failsafe");
                    }
                }
            }),
        );
        self.failsafe.set(Some(handle));
    }

    /// Whether the skeleton has started hiding (or there is none).
    pub fn is_hidden(&self) -> bool {
        let hidden_class = &self.storefront.config().loader.hidden_class;
        (self.locate)().is_none_or(|element| element.has_class(hidden_class))
    }

    /// Start hiding the skeleton. Returns `false` when there was nothing to
    /// do.
    pub fn hide(&self) -> bool {
        let loader = &self.storefront.config().loader;
        let Some(element) = (self.locate)() else {
            return false;
        };
        if element.has_class(&loader.hidden_class) {
            return false;
        }

        element.add_class(&loader.hidden_class);
        self.cancel_failsafe();

        self.storefront.scheduler().schedule(
            loader.removal_delay(),
            Box::new(move || element.remove()),
        );
        tracing::info!("Skeleton hidden");
        true
    }

    fn cancel_failsafe(&self) {
        if let Some(handle) = self.failsafe.take() {
            self.storefront.scheduler().cancel(handle);
        }
    }
}

impl<E: Element> Drop for SkeletonLoader<E> {
    fn drop(&mut self) {
        self.cancel_failsafe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApiClient;
    use crate::dom::MemoryElement;
    use crate::testing::Harness;
    use std::cell::RefCell;
    use std::time::Duration;

    fn skeleton() -> (MemoryElement, MemoryElement) {
        let body = MemoryElement::new("body");
        let overlay = MemoryElement::new("div").with_attribute("id", "initial-skeleton-overlay");
        body.append(&overlay);
        (body, overlay)
    }

    fn loader_for(harness: &Harness, overlay: &MemoryElement) -> Rc<SkeletonLoader<MemoryElement>> {
        let overlay = overlay.clone();
        SkeletonLoader::new(harness.storefront(MockApiClient::new()), move || {
            Some(overlay.clone())
        })
    }

    #[test]
    fn test_hide_is_idempotent_and_removes_after_delay() {
        let harness = Harness::new();
        let (body, overlay) = skeleton();
        let loader = loader_for(&harness, &overlay);

        assert!(loader.hide());
        assert!(overlay.has_class("hidden"));
        assert!(!loader.hide());
        assert_eq!(harness.scheduler.pending(), 1);

        harness.scheduler.advance(Duration::from_millis(599));
        assert!(body.contains(&overlay));
        harness.scheduler.advance(Duration::from_millis(1));
        assert!(!body.contains(&overlay));
        assert!(!overlay.is_connected());
    }

    #[test]
    fn test_failsafe_hides_after_three_seconds() {
        let harness = Harness::new();
        let (_body, overlay) = skeleton();
        let loader = loader_for(&harness, &overlay);
        loader.install();

        harness.scheduler.advance(Duration::from_millis(2999));
        assert!(!loader.is_hidden());
        harness.scheduler.advance(Duration::from_millis(1));
        assert!(loader.is_hidden());

        harness.scheduler.advance(Duration::from_millis(600));
        assert!(!overlay.is_connected());
    }

    #[test]
    fn test_early_hide_cancels_failsafe() {
        let harness = Harness::new();
        let (_body, overlay) = skeleton();
        let loader = loader_for(&harness, &overlay);
        loader.install();
        assert_eq!(harness.scheduler.pending(), 1);

        loader.hide();
        // Only the removal is left
        assert_eq!(harness.scheduler.pending(), 1);
        assert_eq!(harness.scheduler.advance(Duration::from_secs(10)), 1);
    }

    #[test]
    fn test_skeleton_parsed_after_install_is_still_hidden() {
        let harness = Harness::new();
        let slot: Rc<RefCell<Option<MemoryElement>>> = Rc::new(RefCell::new(None));
        let lookup = Rc::clone(&slot);
        let loader = SkeletonLoader::new(harness.storefront(MockApiClient::new()), move || {
            lookup.borrow().clone()
        });
        loader.install();
        assert!(!loader.hide());

        let (_body, overlay) = skeleton();
        *slot.borrow_mut() = Some(overlay.clone());

        harness.scheduler.advance(Duration::from_secs(3));
        assert!(overlay.has_class("hidden"));
        harness.scheduler.advance(Duration::from_millis(600));
        assert!(!overlay.is_connected());
    }

    #[test]
    fn test_missing_skeleton_is_noop() {
        let harness = Harness::new();
        let loader: Rc<SkeletonLoader<MemoryElement>> =
            SkeletonLoader::new(harness.storefront(MockApiClient::new()), || None);
        loader.install();
        assert!(!loader.hide());
        assert!(loader.is_hidden());

        // The failsafe fires and finds nothing to do
        assert_eq!(harness.scheduler.advance(Duration::from_secs(3)), 1);
        assert_eq!(harness.scheduler.pending(), 0);
    }
}
