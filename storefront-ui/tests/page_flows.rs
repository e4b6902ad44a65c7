//! End-to-end page flows over the in-memory DOM with a scripted backend.

use async_trait::async_trait;
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;
use storefront_ui::{
    ApiClient, ApiRequest, ApiResponse, CartButton, CartOutcome, CheckoutForm, Element,
    HeaderOverlays, ManualScheduler, MemoryBrowser, MemoryElement, OtpSendForm, OtpVerifyForm,
    Overlay, OverlayKind, RecordingNotifier, SkeletonLoader, Storefront, StorefrontConfig,
    SubmitOutcome, TransportError,
};

/// Backend that answers from a queue and records what it was sent.
#[derive(Default)]
struct ScriptedApi {
    responses: RefCell<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedApi {
    fn respond(&self, response: Result<ApiResponse, TransportError>) {
        self.responses.borrow_mut().push_back(response);
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ApiClient for ScriptedApi {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted response".to_string())))
    }
}

struct Site {
    api: Rc<ScriptedApi>,
    browser: Rc<MemoryBrowser>,
    scheduler: Rc<ManualScheduler>,
    notifier: Rc<RecordingNotifier>,
    storefront: Rc<Storefront>,
}

impl Site {
    fn new(cookies: &str) -> Self {
        let api = Rc::new(ScriptedApi::default());
        let browser = Rc::new(MemoryBrowser::new().with_cookies(cookies));
        let scheduler = Rc::new(ManualScheduler::new());
        let notifier = Rc::new(RecordingNotifier::new());
        let storefront = Rc::new(
            Storefront::new(
                StorefrontConfig::default(),
                api.clone(),
                browser.clone(),
                scheduler.clone(),
            )
            .with_notifier(notifier.clone()),
        );
        Self {
            api,
            browser,
            scheduler,
            notifier,
            storefront,
        }
    }
}

#[tokio::test]
async fn test_product_grid_adds_items_and_counts() {
    let site = Site::new("csrftoken=tok%2Fen");
    let counter = MemoryElement::new("span").with_html("0");
    let first = MemoryElement::new("button")
        .with_attribute("data-product-id", "101")
        .with_html("Add");
    let second = MemoryElement::new("button")
        .with_attribute("data-product-id", "202")
        .with_html("<i>Add</i>");

    let buttons = [
        CartButton::new(Rc::clone(&site.storefront), first.clone(), Some(counter.clone())),
        CartButton::new(Rc::clone(&site.storefront), second.clone(), Some(counter.clone())),
    ];

    site.api.respond(Ok(ApiResponse::json(201, json!({"id": 1}))));
    site.api.respond(Ok(ApiResponse::json(201, json!({"id": 2}))));

    assert_eq!(buttons[0].add_to_cart().await, CartOutcome::Added { count: Some(1) });
    assert_eq!(buttons[1].add_to_cart().await, CartOutcome::Added { count: Some(2) });
    assert_eq!(counter.text_content(), "2");

    let requests = site.api.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].csrf_token.as_deref(), Some("tok/en"));
    assert_eq!(requests[1].body["product_id"], "202");

    site.scheduler.advance(Duration::from_millis(1500));
    assert_eq!(first.inner_html(), "Add");
    assert_eq!(second.inner_html(), "<i>Add</i>");
    assert!(!first.is_disabled() && !second.is_disabled());
}

#[tokio::test]
async fn test_missing_csrf_cookie_still_sends() {
    let site = Site::new("");
    let button = MemoryElement::new("button").with_attribute("data-product-id", "1");
    site.api.respond(Ok(ApiResponse::empty(204)));

    CartButton::new(Rc::clone(&site.storefront), button, None)
        .add_to_cart()
        .await;

    assert_eq!(site.api.requests()[0].csrf_token, None);
}

#[tokio::test]
async fn test_cart_revert_is_dropped_with_the_page() {
    let site = Site::new("csrftoken=abc");
    let button = MemoryElement::new("button")
        .with_attribute("data-product-id", "1")
        .with_html("Add");
    site.api.respond(Ok(ApiResponse::empty(201)));

    let cart = CartButton::new(Rc::clone(&site.storefront), button.clone(), None);
    cart.add_to_cart().await;
    drop(cart);

    assert_eq!(site.scheduler.advance(Duration::from_secs(2)), 0);
    assert_eq!(button.inner_html(), "✓");
}

#[tokio::test]
async fn test_login_flow_carries_number_to_verification() {
    let site = Site::new("csrftoken=abc");

    let mobile = MemoryElement::new("input").with_value("9876543210");
    let send = OtpSendForm::new(
        Rc::clone(&site.storefront),
        mobile,
        MemoryElement::new("button").with_html("Continue"),
        Some(MemoryElement::new("div")),
    );
    site.api.respond(Ok(ApiResponse::json(200, json!({"message": "sent"}))));

    let SubmitOutcome::Redirected { location } = send.submit().await else {
        panic!("OTP send did not redirect");
    };
    let (_, search) = location.split_once('?').unwrap();
    site.browser.set_search(&format!("?{search}"));

    let verify = OtpVerifyForm::new(
        Rc::clone(&site.storefront),
        MemoryElement::new("input").with_value("424242"),
        MemoryElement::new("button").with_html("Verify & Login"),
        Some(MemoryElement::new("div")),
    );
    site.api.respond(Ok(ApiResponse::json(200, json!({"user_id": 9}))));

    assert_eq!(
        verify.submit().await,
        SubmitOutcome::Redirected {
            location: "/account/dashboard".to_string()
        }
    );

    let requests = site.api.requests();
    assert_eq!(requests[0].body, json!({"mobile_number": "+919876543210"}));
    assert_eq!(
        requests[1].body,
        json!({"mobile_number": "+919876543210", "otp": "424242"})
    );
    assert_eq!(
        site.browser.navigations(),
        vec!["/verify-otp/?mobile=9876543210", "/account/dashboard"]
    );
}

#[tokio::test]
async fn test_checkout_retry_after_validation_error() {
    let site = Site::new("csrftoken=abc");
    let form = MemoryElement::new("form");
    let zip = MemoryElement::new("input")
        .with_attribute("name", "zip")
        .with_value("5");
    form.append(&zip);
    let button = MemoryElement::new("button").with_html("Place Order");
    let error = MemoryElement::new("div");

    let checkout = CheckoutForm::new(
        Rc::clone(&site.storefront),
        form,
        button.clone(),
        Some(error.clone()),
    );

    site.api.respond(Ok(ApiResponse::json(
        400,
        json!({"shipping_address": {"zip_code": ["Ensure this field has at least 6 characters."]}}),
    )));
    let outcome = checkout.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
    assert!(error.text_content().contains("zip_code"));
    assert_eq!(button.inner_html(), "Place Order");

    zip.set_value("500001");
    site.api.respond(Ok(ApiResponse::json(201, json!({"id": 77}))));
    assert_eq!(
        checkout.submit().await,
        SubmitOutcome::Redirected {
            location: "/checkout/success/?order_id=77".to_string()
        }
    );
    assert_eq!(error.style("display"), "none");
    assert_eq!(site.api.requests()[1].body["shipping_address"]["zip_code"], "500001");
}

#[tokio::test]
async fn test_demo_product_notice_reaches_notifier() {
    let site = Site::new("csrftoken=abc");
    let cart = CartButton::new(
        Rc::clone(&site.storefront),
        MemoryElement::new("button").with_html("Add"),
        None,
    );

    assert_eq!(cart.add_to_cart().await, CartOutcome::DemoProduct);
    assert!(site.api.requests().is_empty());
    let notice = site.notifier.last().unwrap();
    assert!(notice.severity.is_error());
    assert!(notice.message.contains("demo product"));
}

#[test]
fn test_header_overlays_and_skeleton() {
    let site = Site::new("");
    let body = MemoryElement::new("body");

    let skeleton = MemoryElement::new("div").with_attribute("id", "initial-skeleton-overlay");
    body.append(&skeleton);
    let lookup = skeleton.clone();
    let loader = SkeletonLoader::new(Rc::clone(&site.storefront), move || Some(lookup.clone()));
    loader.install();

    let search_trigger = MemoryElement::new("a");
    let search_region = MemoryElement::new("div");
    let search_input = MemoryElement::new("input");
    search_region.append(&search_input);
    let menu_trigger = MemoryElement::new("a");
    let menu_region = MemoryElement::new("div");
    for element in [&search_trigger, &search_region, &menu_trigger, &menu_region] {
        body.append(element);
    }

    let header = HeaderOverlays::new(
        Some(Overlay::new(search_trigger.clone(), search_region.clone())),
        Some(Overlay::new(menu_trigger, menu_region.clone())),
    );

    header.toggle(OverlayKind::Menu);
    header.toggle(OverlayKind::Search);
    assert_eq!(menu_region.style("display"), "none");
    assert_eq!(search_region.style("display"), "block");
    assert!(search_input.is_focused());

    header.handle_document_click(&search_input);
    assert!(header.is_open(OverlayKind::Search));
    header.handle_document_click(&body);
    assert!(!header.is_open(OverlayKind::Search));

    // Window load arrives before the failsafe
    site.scheduler.advance(Duration::from_millis(1000));
    assert!(loader.hide());
    site.scheduler.advance(Duration::from_millis(600));
    assert!(!body.contains(&skeleton));
    assert_eq!(site.scheduler.pending(), 0);
}
