//! Finds the storefront elements on the page and attaches their listeners.
//!
//! Each block is skipped when the page lacks its elements, so one bundle
//! serves every template. Listener closures live for the life of the page.

use crate::dom::WebElement;
use std::rc::Rc;
use storefront_ui::{
    CartButton, CheckoutForm, HeaderOverlays, OtpSendForm, OtpVerifyForm, Overlay, OverlayKind,
    SkeletonLoader, Storefront,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, EventTarget, Window};

const CART_BUTTONS: &str = ".btn-add-mini, .btn-add-large";
const CART_COUNT: &str = ".cart-count";
const SUBMIT_BUTTON: &str = "button[type=\"submit\"]";

/// Attach `handler` to `event` on `target` for the life of the page.
fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let callback = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Arm the skeleton loader. Runs as soon as the bundle starts, before the
/// rest of the page is mounted and possibly before the skeleton is parsed.
///
/// # Errors
///
/// Returns an error if a listener cannot be attached.
pub fn mount_loader(
    storefront: &Rc<Storefront>,
    window: &Window,
    document: &Document,
) -> Result<(), JsValue> {
    let config = &storefront.config().loader;
    let lookup = document.clone();
    let element_id = config.element_id.clone();
    let loader = SkeletonLoader::new(Rc::clone(storefront), move || {
        WebElement::by_id(&lookup, &element_id)
    });
    loader.install();

    if document.ready_state() == "complete" {
        loader.hide();
        return Ok(());
    }

    for event in ["load", config.ready_event.as_str()] {
        let loader = Rc::clone(&loader);
        listen(window, event, move |_| {
            loader.hide();
        })?;
    }
    Ok(())
}

/// Mount every controller whose elements exist on the page.
///
/// # Errors
///
/// Returns an error if a listener cannot be attached.
pub fn mount(storefront: &Rc<Storefront>, document: &Document) -> Result<(), JsValue> {
    mount_header(document)?;
    mount_cart(storefront, document)?;
    mount_checkout(storefront, document)?;
    mount_login(storefront, document)?;
    Ok(())
}

fn overlay(document: &Document, trigger: &str, region: &str) -> Option<Overlay<WebElement>> {
    Some(Overlay::new(
        WebElement::query(document, trigger)?,
        WebElement::by_id(document, region)?,
    ))
}

fn mount_header(document: &Document) -> Result<(), JsValue> {
    let header = Rc::new(HeaderOverlays::new(
        overlay(document, ".search-trigger", "searchOverlay"),
        overlay(document, ".menu-trigger", "menuDropdown"),
    ));

    for kind in [OverlayKind::Search, OverlayKind::Menu] {
        let Some(trigger) = header.get(kind).map(|overlay| overlay.trigger().clone()) else {
            continue;
        };
        let header = Rc::clone(&header);
        listen(trigger.inner(), "click", move |event| {
            event.prevent_default();
            event.stop_propagation();
            header.toggle(kind);
        })?;
    }

    if header.get(OverlayKind::Search).is_some() {
        if let Some(close) = WebElement::by_id(document, "closeSearchBtn") {
            let header = Rc::clone(&header);
            listen(close.inner(), "click", move |event| {
                event.prevent_default();
                event.stop_propagation();
                header.close(OverlayKind::Search);
            })?;
        }
    }

    listen(document, "click", move |event| {
        let target = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok());
        if let Some(target) = target {
            header.handle_document_click(&WebElement::new(target));
        }
    })
}

fn mount_cart(storefront: &Rc<Storefront>, document: &Document) -> Result<(), JsValue> {
    let counter = WebElement::query(document, CART_COUNT);
    let elements = WebElement::query_all(document, CART_BUTTONS);
    tracing::debug!(buttons = elements.len(), "Mounting add-to-cart buttons");

    for element in elements {
        let target = element.inner().clone();
        let button = CartButton::new(Rc::clone(storefront), element, counter.clone());
        listen(&target, "click", move |event| {
            event.prevent_default();
            event.stop_propagation();
            let button = Rc::clone(&button);
            spawn_local(async move {
                let outcome = button.add_to_cart().await;
                tracing::debug!(?outcome, "Add to cart finished");
            });
        })?;
    }
    Ok(())
}

fn mount_checkout(storefront: &Rc<Storefront>, document: &Document) -> Result<(), JsValue> {
    let Some(form) = WebElement::by_id(document, "checkoutForm") else {
        return Ok(());
    };
    let Some(submit) = form.query_within(SUBMIT_BUTTON) else {
        tracing::warn!("#checkoutForm has no submit button");
        return Ok(());
    };

    let target = form.inner().clone();
    let checkout = Rc::new(CheckoutForm::new(
        Rc::clone(storefront),
        form,
        submit,
        WebElement::by_id(document, "checkoutError"),
    ));
    listen(&target, "submit", move |event| {
        event.prevent_default();
        let checkout = Rc::clone(&checkout);
        spawn_local(async move {
            let outcome = checkout.submit().await;
            tracing::debug!(?outcome, "Checkout finished");
        });
    })
}

fn mount_login(storefront: &Rc<Storefront>, document: &Document) -> Result<(), JsValue> {
    if let Some(form) = WebElement::by_id(document, "mobileForm") {
        let submit = form.query_within(SUBMIT_BUTTON);
        let input = WebElement::by_id(document, "mobileInput");
        if let (Some(submit), Some(input)) = (submit, input) {
            let send = Rc::new(OtpSendForm::new(
                Rc::clone(storefront),
                input,
                submit,
                WebElement::by_id(document, "loginError"),
            ));
            listen(form.inner(), "submit", move |event| {
                event.prevent_default();
                let send = Rc::clone(&send);
                spawn_local(async move {
                    let outcome = send.submit().await;
                    tracing::debug!(?outcome, "OTP send finished");
                });
            })?;
        } else {
            tracing::warn!("#mobileForm is missing its input or submit button");
        }
    }

    if let Some(form) = WebElement::by_id(document, "otpForm") {
        let submit = form.query_within(SUBMIT_BUTTON);
        let input = WebElement::by_id(document, "otpInput");
        if let (Some(submit), Some(input)) = (submit, input) {
            let verify = Rc::new(OtpVerifyForm::new(
                Rc::clone(storefront),
                input,
                submit,
                WebElement::by_id(document, "otpError"),
            ));
            listen(form.inner(), "submit", move |event| {
                event.prevent_default();
                let verify = Rc::clone(&verify);
                spawn_local(async move {
                    let outcome = verify.submit().await;
                    tracing::debug!(?outcome, "OTP verify finished");
                });
            })?;
        } else {
            tracing::warn!("#otpForm is missing its input or submit button");
        }
    }

    Ok(())
}
