//! Window-level capabilities: cookies, location and navigation.

use std::cell::RefCell;

/// The parts of `window` / `document` the controllers depend on.
pub trait Browser {
    /// The `document.cookie` string.
    fn cookie_string(&self) -> String;

    /// The `location.search` string, including the leading `?` if any.
    fn location_search(&self) -> String;

    /// Navigate the page to `url`.
    fn navigate(&self, url: &str);
}

/// Look up a query parameter in a `location.search` string, like
/// `URLSearchParams.get`.
///
/// # Examples
///
/// ```rust
/// use storefront_ui::browser::query_param;
///
/// assert_eq!(query_param("?mobile=9000000000", "mobile").as_deref(), Some("9000000000"));
/// assert_eq!(query_param("", "mobile"), None);
/// ```
#[must_use]
pub fn query_param(search: &str, name: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Build `path?name=value` with the value form-encoded.
#[must_use]
pub fn with_query(path: &str, name: &str, value: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(name, value)
        .finish();
    format!("{path}?{query}")
}

/// Browser stand-in holding cookies and location in memory.
///
/// Navigations are recorded instead of performed.
#[derive(Debug, Default)]
pub struct MemoryBrowser {
    cookies: RefCell<String>,
    search: RefCell<String>,
    navigations: RefCell<Vec<String>>,
}

impl MemoryBrowser {
    /// Create an empty browser: no cookies, no query string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::set_cookies`].
    #[must_use]
    pub fn with_cookies(self, cookies: &str) -> Self {
        self.set_cookies(cookies);
        self
    }

    /// Builder form of [`Self::set_search`].
    #[must_use]
    pub fn with_search(self, search: &str) -> Self {
        self.set_search(search);
        self
    }

    /// Replace the cookie string.
    pub fn set_cookies(&self, cookies: &str) {
        *self.cookies.borrow_mut() = cookies.to_string();
    }

    /// Replace the query string.
    pub fn set_search(&self, search: &str) {
        *self.search.borrow_mut() = search.to_string();
    }

    /// Every navigation requested so far, oldest first.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    /// The most recent navigation target.
    #[must_use]
    pub fn last_navigation(&self) -> Option<String> {
        self.navigations.borrow().last().cloned()
    }
}

impl Browser for MemoryBrowser {
    fn cookie_string(&self) -> String {
        self.cookies.borrow().clone()
    }

    fn location_search(&self) -> String {
        self.search.borrow().clone()
    }

    fn navigate(&self, url: &str) {
        tracing::debug!(url = %url, "Recorded navigation");
        self.navigations.borrow_mut().push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_decodes_value() {
        assert_eq!(
            query_param("?next=%2Fcart&mobile=90+00", "mobile").as_deref(),
            Some("90 00")
        );
    }

    #[test]
    fn test_query_param_without_question_mark() {
        assert_eq!(query_param("mobile=1", "mobile").as_deref(), Some("1"));
    }

    #[test]
    fn test_query_param_empty_value_is_present() {
        assert_eq!(query_param("?mobile=", "mobile").as_deref(), Some(""));
    }

    #[test]
    fn test_with_query_encodes_value() {
        assert_eq!(with_query("/verify-otp/", "mobile", "9000000000"), "/verify-otp/?mobile=9000000000");
        assert_eq!(with_query("/p/", "q", "a b&c"), "/p/?q=a+b%26c");
    }

    #[test]
    fn test_memory_browser_exposes_search() {
        let browser = MemoryBrowser::new().with_search("?mobile=9000000000");
        assert_eq!(
            query_param(&browser.location_search(), "mobile").as_deref(),
            Some("9000000000")
        );
    }

    #[test]
    fn test_memory_browser_records_navigation() {
        let browser = MemoryBrowser::new();
        browser.navigate("/a");
        browser.navigate("/b");
        assert_eq!(browser.navigations(), vec!["/a", "/b"]);
        assert_eq!(browser.last_navigation().as_deref(), Some("/b"));
    }
}
