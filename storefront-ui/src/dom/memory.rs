//! In-memory element tree.
//!
//! Markup is not parsed: `inner_html` and `text_content` share one content
//! string. That is enough for the controllers, which only ever swap labels
//! and messages.
//!
//! # Examples
//!
//! ```rust
//! use storefront_ui::dom::{Element, MemoryElement};
//!
//! let form = MemoryElement::new("form");
//! let email = MemoryElement::new("input").with_attribute("name", "email");
//! email.set_value("guest@example.com");
//! form.append(&email);
//!
//! assert_eq!(form.form_value("email").as_deref(), Some("guest@example.com"));
//! assert!(form.contains(&email));
//! ```

use super::Element;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Default)]
struct Node {
    tag: String,
    attributes: RefCell<BTreeMap<String, String>>,
    content: RefCell<String>,
    style: RefCell<BTreeMap<String, String>>,
    classes: RefCell<Vec<String>>,
    value: RefCell<String>,
    disabled: Cell<bool>,
    focused: Cell<bool>,
    connected: Cell<bool>,
    children: RefCell<Vec<MemoryElement>>,
    parent: RefCell<Weak<Node>>,
}

/// Reference-counted in-memory element.
#[derive(Clone)]
pub struct MemoryElement(Rc<Node>);

impl MemoryElement {
    /// Create a detached element with the given tag name.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(Node {
            tag: tag.to_ascii_lowercase(),
            connected: Cell::new(true),
            ..Node::default()
        }))
    }

    /// Builder form of setting an attribute.
    #[must_use]
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of setting the content.
    #[must_use]
    pub fn with_html(self, html: &str) -> Self {
        self.set_inner_html(html);
        self
    }

    /// Builder form of setting an input value.
    #[must_use]
    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    /// Tag name, lowercased.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    /// Set an attribute.
    pub fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    /// Set the value of an input element.
    pub fn set_value(&self, value: &str) {
        *self.0.value.borrow_mut() = value.to_string();
    }

    /// Append `child`, detaching it from any previous parent.
    pub fn append(&self, child: &Self) -> &Self {
        child.detach_from_parent();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
        self
    }

    /// Whether focus was moved to this element.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.0.focused.get()
    }

    /// Whether the element is still part of the document.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.0.connected.get()
    }

    /// Depth-first search of the descendants, excluding `self`.
    pub fn find(&self, predicate: &dyn Fn(&Self) -> bool) -> Option<Self> {
        for child in self.0.children.borrow().iter() {
            if predicate(child) {
                return Some(child.clone());
            }
            if let Some(found) = child.find(predicate) {
                return Some(found);
            }
        }
        None
    }

    /// Direct parent, if attached.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(Self)
    }

    fn detach_from_parent(&self) {
        if let Some(parent) = self.parent() {
            parent
                .0
                .children
                .borrow_mut()
                .retain(|child| !Rc::ptr_eq(&child.0, &self.0));
        }
        *self.0.parent.borrow_mut() = Weak::new();
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for MemoryElement {}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryElement")
            .field("tag", &self.0.tag)
            .field("attributes", &self.0.attributes.borrow())
            .field("content", &self.0.content.borrow())
            .finish_non_exhaustive()
    }
}

impl Element for MemoryElement {
    fn inner_html(&self) -> String {
        self.0.content.borrow().clone()
    }

    fn set_inner_html(&self, html: &str) {
        *self.0.content.borrow_mut() = html.to_string();
    }

    fn text_content(&self) -> String {
        self.0.content.borrow().clone()
    }

    fn set_text_content(&self, text: &str) {
        *self.0.content.borrow_mut() = text.to_string();
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.attributes.borrow().get(name).cloned()
    }

    fn is_disabled(&self) -> bool {
        self.0.disabled.get()
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.disabled.set(disabled);
    }

    fn style(&self, property: &str) -> String {
        self.0
            .style
            .borrow()
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut style = self.0.style.borrow_mut();
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_string(), value.to_string());
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.classes.borrow_mut().push(class.to_string());
        }
    }

    fn contains(&self, other: &Self) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node == *self {
                return true;
            }
            current = node.parent();
        }
        false
    }

    fn first_input(&self) -> Option<Self> {
        self.find(&|el| el.tag() == "input")
    }

    fn focus(&self) {
        self.0.focused.set(true);
    }

    fn value(&self) -> String {
        self.0.value.borrow().clone()
    }

    fn form_value(&self, name: &str) -> Option<String> {
        self.find(&|el| el.attribute("name").as_deref() == Some(name))
            .map(|field| field.value())
    }

    fn remove(&self) {
        self.detach_from_parent();
        self.0.connected.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive_and_transitive() {
        let root = MemoryElement::new("div");
        let child = MemoryElement::new("span");
        let grandchild = MemoryElement::new("input");
        root.append(&child);
        child.append(&grandchild);

        assert!(root.contains(&root));
        assert!(root.contains(&grandchild));
        assert!(!child.contains(&root));
        assert!(!grandchild.contains(&MemoryElement::new("div")));
    }

    #[test]
    fn test_first_input_searches_depth_first() {
        let overlay = MemoryElement::new("div");
        let wrapper = MemoryElement::new("label");
        let input = MemoryElement::new("INPUT");
        overlay.append(&wrapper);
        wrapper.append(&input);
        overlay.append(&MemoryElement::new("input"));

        assert_eq!(overlay.first_input(), Some(input));
    }

    #[test]
    fn test_empty_style_value_removes_property() {
        let el = MemoryElement::new("button");
        el.set_style("color", "white");
        assert_eq!(el.style("color"), "white");
        el.set_style("color", "");
        assert_eq!(el.style("color"), "");
    }

    #[test]
    fn test_remove_detaches_from_parent() {
        let body = MemoryElement::new("body");
        let skeleton = MemoryElement::new("div");
        body.append(&skeleton);

        skeleton.remove();

        assert!(!skeleton.is_connected());
        assert!(skeleton.parent().is_none());
        assert!(!body.contains(&skeleton));
    }

    #[test]
    fn test_form_value_absent_field() {
        let form = MemoryElement::new("form");
        assert_eq!(form.form_value("email"), None);
    }
}
