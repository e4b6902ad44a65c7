//! [`Element`] over `web_sys`.

use storefront_ui::Element;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
};

/// A live page element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebElement(web_sys::Element);

impl WebElement {
    /// Wrap a `web_sys` element.
    #[must_use]
    pub const fn new(element: web_sys::Element) -> Self {
        Self(element)
    }

    /// The wrapped element.
    #[must_use]
    pub const fn inner(&self) -> &web_sys::Element {
        &self.0
    }

    /// `document.getElementById(id)`.
    #[must_use]
    pub fn by_id(document: &Document, id: &str) -> Option<Self> {
        document.get_element_by_id(id).map(Self)
    }

    /// `document.querySelector(selector)`.
    #[must_use]
    pub fn query(document: &Document, selector: &str) -> Option<Self> {
        document.query_selector(selector).ok().flatten().map(Self)
    }

    /// `document.querySelectorAll(selector)`, in document order.
    #[must_use]
    pub fn query_all(document: &Document, selector: &str) -> Vec<Self> {
        let Ok(nodes) = document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(Self)
            .collect()
    }

    /// `querySelector` scoped to this element.
    #[must_use]
    pub fn query_within(&self, selector: &str) -> Option<Self> {
        self.0.query_selector(selector).ok().flatten().map(Self)
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.0.dyn_ref::<HtmlElement>()
    }
}

fn log_failure(operation: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::debug!(operation, error = ?err, "DOM operation failed");
    }
}

impl Element for WebElement {
    fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn text_content(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn is_disabled(&self) -> bool {
        if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
            return button.disabled();
        }
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            return input.disabled();
        }
        self.0.has_attribute("disabled")
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if disabled {
            log_failure("set disabled", self.0.set_attribute("disabled", ""));
        } else {
            log_failure("clear disabled", self.0.remove_attribute("disabled"));
        }
    }

    fn style(&self, property: &str) -> String {
        self.html()
            .and_then(|element| element.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(element) = self.html() else {
            return;
        };
        let style = element.style();
        if value.is_empty() {
            log_failure("remove style", style.remove_property(property).map(drop));
        } else {
            log_failure("set style", style.set_property(property, value));
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        log_failure("add class", self.0.class_list().add_1(class));
    }

    fn contains(&self, other: &Self) -> bool {
        let other: &web_sys::Node = other.0.as_ref();
        self.0.contains(Some(other))
    }

    fn first_input(&self) -> Option<Self> {
        self.query_within("input")
    }

    fn focus(&self) {
        if let Some(element) = self.html() {
            log_failure("focus", element.focus());
        }
    }

    fn value(&self) -> String {
        self.0
            .dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::value)
            .unwrap_or_default()
    }

    fn form_value(&self, name: &str) -> Option<String> {
        let form = self.0.dyn_ref::<HtmlFormElement>()?;
        FormData::new_with_form(form).ok()?.get(name).as_string()
    }

    fn remove(&self) {
        self.0.remove();
    }
}
