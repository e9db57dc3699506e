//! Request/response collaborator traits.
//!
//! The resolver never touches global state; the host framework hands it a
//! request view and a response sink for every operation.

use crate::cookie::LanguageCookie;

/// Read access to the inbound request plus the in-process cookie view.
///
/// `set_cookie_value` and `remove_cookie` only change what later reads
/// within the same request observe; they never reach the client.
pub trait LanguageRequest {
    /// Value of the named cookie.
    fn cookie(&self, name: &str) -> Option<&str>;

    /// Value of the named header. Lookups are case-insensitive.
    fn header(&self, name: &str) -> Option<&str>;

    /// Make `name` read as `value` for the rest of the request.
    fn set_cookie_value(&mut self, name: &str, value: &str);

    /// Drop `name` from the in-process view, returning the old value.
    fn remove_cookie(&mut self, name: &str) -> Option<String>;
}

/// Write access to the outbound response's cookies.
pub trait LanguageResponse {
    /// Queue a `Set-Cookie` for `cookie`.
    fn set_cookie(&mut self, cookie: &LanguageCookie);

    /// Queue a cookie that deletes the client's copy.
    fn expire_cookie(&mut self, cookie: &LanguageCookie) {
        self.set_cookie(cookie);
    }
}
