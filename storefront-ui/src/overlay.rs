//! Header overlays: the search panel and the menu dropdown.
//!
//! Visibility is explicit state on [`Overlay`] and is mirrored onto the
//! region's `display` style. At most one of the two header overlays is open
//! at a time.

use crate::dom::Element;
use std::cell::Cell;

/// A region shown and hidden by a trigger.
pub struct Overlay<E: Element> {
    trigger: E,
    region: E,
    open: Cell<bool>,
}

impl<E: Element> Overlay<E> {
    /// Control `region` from `trigger`. The starting state is read from the
    /// region's inline `display` style.
    pub fn new(trigger: E, region: E) -> Self {
        let open = region.style("display") == "block";
        Self {
            trigger,
            region,
            open: Cell::new(open),
        }
    }

    /// Whether the region is shown.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Show the region and focus its first input.
    pub fn open(&self) {
        self.open.set(true);
        self.region.set_style("display", "block");
        if let Some(input) = self.region.first_input() {
            input.focus();
        }
    }

    /// Hide the region.
    pub fn close(&self) {
        self.open.set(false);
        self.region.set_style("display", "none");
    }

    /// Flip the region. Returns the new state.
    pub fn toggle(&self) -> bool {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
        self.is_open()
    }

    /// Whether `target` is the trigger, the region, or inside either.
    pub fn contains(&self, target: &E) -> bool {
        self.trigger.contains(target) || self.region.contains(target)
    }

    /// The trigger element.
    pub const fn trigger(&self) -> &E {
        &self.trigger
    }

    /// The region element.
    pub const fn region(&self) -> &E {
        &self.region
    }
}

/// Which header overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// The search panel.
    Search,
    /// The menu dropdown.
    Menu,
}

impl OverlayKind {
    const fn other(self) -> Self {
        match self {
            Self::Search => Self::Menu,
            Self::Menu => Self::Search,
        }
    }
}

/// The two mutually exclusive header overlays. Either may be missing from a
/// page.
pub struct HeaderOverlays<E: Element> {
    search: Option<Overlay<E>>,
    menu: Option<Overlay<E>>,
}

impl<E: Element> HeaderOverlays<E> {
    /// Group the page's overlays.
    pub const fn new(search: Option<Overlay<E>>, menu: Option<Overlay<E>>) -> Self {
        Self { search, menu }
    }

    /// The overlay of the given kind, if the page has it.
    pub const fn get(&self, kind: OverlayKind) -> Option<&Overlay<E>> {
        match kind {
            OverlayKind::Search => self.search.as_ref(),
            OverlayKind::Menu => self.menu.as_ref(),
        }
    }

    /// Whether the overlay of the given kind is open.
    pub fn is_open(&self, kind: OverlayKind) -> bool {
        self.get(kind).is_some_and(Overlay::is_open)
    }

    /// Trigger click: close the other overlay, flip this one. Returns the new
    /// state of `kind`.
    pub fn toggle(&self, kind: OverlayKind) -> bool {
        self.close(kind.other());
        self.get(kind).is_some_and(Overlay::toggle)
    }

    /// Open `kind`, closing the other overlay.
    pub fn open(&self, kind: OverlayKind) {
        self.close(kind.other());
        if let Some(overlay) = self.get(kind) {
            overlay.open();
        }
    }

    /// Close `kind`.
    pub fn close(&self, kind: OverlayKind) {
        if let Some(overlay) = self.get(kind) {
            overlay.close();
        }
    }

    /// Document click: close every overlay the click landed outside of.
    pub fn handle_document_click(&self, target: &E) {
        for kind in [OverlayKind::Search, OverlayKind::Menu] {
            if let Some(overlay) = self.get(kind) {
                if overlay.is_open() && !overlay.contains(target) {
                    tracing::debug!(?kind, "Closing overlay on outside click");
                    overlay.close();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryElement;

    struct Header {
        overlays: HeaderOverlays<MemoryElement>,
        search_trigger: MemoryElement,
        search_region: MemoryElement,
        search_input: MemoryElement,
        menu_trigger: MemoryElement,
        menu_region: MemoryElement,
        menu_link: MemoryElement,
    }

    fn header() -> Header {
        let search_trigger = MemoryElement::new("a").with_attribute("class", "search-trigger");
        let search_region = MemoryElement::new("div").with_attribute("id", "searchOverlay");
        let search_input = MemoryElement::new("input");
        search_region.append(&search_input);

        let menu_trigger = MemoryElement::new("a").with_attribute("class", "menu-trigger");
        let menu_region = MemoryElement::new("div").with_attribute("id", "menuDropdown");
        let menu_link = MemoryElement::new("a");
        menu_region.append(&menu_link);

        Header {
            overlays: HeaderOverlays::new(
                Some(Overlay::new(search_trigger.clone(), search_region.clone())),
                Some(Overlay::new(menu_trigger.clone(), menu_region.clone())),
            ),
            search_trigger,
            search_region,
            search_input,
            menu_trigger,
            menu_region,
            menu_link,
        }
    }

    #[test]
    fn test_toggle_opens_and_focuses_input() {
        let h = header();
        assert!(h.overlays.toggle(OverlayKind::Search));
        assert_eq!(h.search_region.style("display"), "block");
        assert!(h.search_input.is_focused());

        assert!(!h.overlays.toggle(OverlayKind::Search));
        assert_eq!(h.search_region.style("display"), "none");
    }

    #[test]
    fn test_opening_search_closes_menu() {
        let h = header();
        h.overlays.toggle(OverlayKind::Menu);
        assert!(h.overlays.is_open(OverlayKind::Menu));

        h.overlays.toggle(OverlayKind::Search);
        assert!(h.overlays.is_open(OverlayKind::Search));
        assert!(!h.overlays.is_open(OverlayKind::Menu));
        assert_eq!(h.menu_region.style("display"), "none");
    }

    #[test]
    fn test_opening_menu_closes_search() {
        let h = header();
        h.overlays.open(OverlayKind::Search);
        h.overlays.toggle(OverlayKind::Menu);
        assert!(h.overlays.is_open(OverlayKind::Menu));
        assert!(!h.overlays.is_open(OverlayKind::Search));
    }

    #[test]
    fn test_outside_click_closes_open_overlays() {
        let h = header();
        h.overlays.open(OverlayKind::Menu);
        h.overlays.handle_document_click(&MemoryElement::new("main"));
        assert!(!h.overlays.is_open(OverlayKind::Menu));
    }

    #[test]
    fn test_click_inside_region_or_on_trigger_keeps_overlay() {
        let h = header();
        h.overlays.open(OverlayKind::Menu);
        h.overlays.handle_document_click(&h.menu_link);
        assert!(h.overlays.is_open(OverlayKind::Menu));
        h.overlays.handle_document_click(&h.menu_trigger);
        assert!(h.overlays.is_open(OverlayKind::Menu));

        h.overlays.open(OverlayKind::Search);
        h.overlays.handle_document_click(&h.search_trigger);
        assert!(h.overlays.is_open(OverlayKind::Search));
    }

    #[test]
    fn test_initial_state_comes_from_style() {
        let region = MemoryElement::new("div");
        region.set_style("display", "block");
        let overlay = Overlay::new(MemoryElement::new("a"), region.clone());
        assert!(overlay.is_open());
        assert_eq!(overlay.region(), &region);
    }

    #[test]
    fn test_missing_overlay_is_tolerated() {
        let region = MemoryElement::new("div");
        let overlays = HeaderOverlays::new(None, Some(Overlay::new(MemoryElement::new("a"), region)));
        assert!(!overlays.toggle(OverlayKind::Search));
        assert!(overlays.toggle(OverlayKind::Menu));
        overlays.close(OverlayKind::Search);
        assert!(overlays.is_open(OverlayKind::Menu));
    }
}
