//! DOM seam used by every controller.
//!
//! Controllers never talk to a concrete DOM. They are generic over
//! [`Element`], which the browser binding implements over `web_sys` and
//! [`memory::MemoryElement`] implements as an in-memory tree for tests and
//! the headless driver.

pub mod memory;

pub use memory::MemoryElement;

/// A handle to one element of the page.
///
/// Handles are cheap to clone and compare by identity. All mutation goes
/// through `&self`; the page is single-threaded.
pub trait Element: Clone + 'static {
    /// Current markup of the element (the trigger label).
    fn inner_html(&self) -> String;

    /// Replace the element's markup.
    fn set_inner_html(&self, html: &str);

    /// Text content of the element.
    fn text_content(&self) -> String;

    /// Replace the element's children with plain text.
    fn set_text_content(&self, text: &str);

    /// Attribute value, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Whether the element is disabled.
    fn is_disabled(&self) -> bool;

    /// Set or clear the disabled flag.
    fn set_disabled(&self, disabled: bool);

    /// Inline style property value; empty when unset.
    fn style(&self, property: &str) -> String;

    /// Set an inline style property. An empty value removes it.
    fn set_style(&self, property: &str, value: &str);

    /// Whether the element carries `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Add `class` to the element.
    fn add_class(&self, class: &str);

    /// Inclusive descendant check, like `Node.contains`.
    fn contains(&self, other: &Self) -> bool;

    /// First `input` element inside this one.
    fn first_input(&self) -> Option<Self>;

    /// Move keyboard focus to the element.
    fn focus(&self);

    /// Current value of an input element; empty for anything else.
    fn value(&self) -> String;

    /// Value of the named field when this element is a form, like
    /// `FormData.get(name)`.
    fn form_value(&self, name: &str) -> Option<String>;

    /// Detach the element from the document.
    fn remove(&self);
}
