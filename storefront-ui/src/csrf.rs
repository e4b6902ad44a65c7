//! CSRF token lookup from the document cookie string.
//!
//! The backend issues the token as a cookie and expects it back in a request
//! header on every mutating request. The token is read fresh each time; it is
//! never cached.

/// Return the percent-decoded value of the first cookie called `name`.
///
/// `cookies` is a `document.cookie` style string: `a=1; b=2`. Absence is a
/// normal outcome and yields `None`. A value with a malformed percent escape
/// is returned as-is.
///
/// # Examples
///
/// ```rust
/// use storefront_ui::csrf::read_cookie;
///
/// let cookies = "sessionid=abc; csrftoken=tok%3D1";
/// assert_eq!(read_cookie(cookies, "csrftoken").as_deref(), Some("tok=1"));
/// assert_eq!(read_cookie(cookies, "missing"), None);
/// ```
#[must_use]
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }

    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| {
            cookie
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .map(|raw| {
            urlencoding::decode(raw).map_or_else(|_| raw.to_string(), std::borrow::Cow::into_owned)
        })
}
