//! Owned request and response collaborators.
//!
//! [`RequestContext`] and [`ResponseCookies`] let hosts without their own
//! request types use the resolver directly. With the `http` feature they can
//! be built from, and written back to, `http` crate types.

use crate::cookie::{LanguageCookie, parse_cookie_header};
use crate::traits::{LanguageRequest, LanguageResponse};
use std::collections::HashMap;

/// Request headers and cookies for a single request.
///
/// Header names are stored lower-cased. Cookies start out as parsed from
/// the `Cookie` header and then act as the in-process cookie view.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    headers: HashMap<String, String>,
    cookies: HashMap<String, String>,
}

impl RequestContext {
    /// Empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from header name/value pairs. Every `Cookie` header is parsed.
    pub fn from_headers<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        headers
            .into_iter()
            .fold(Self::new(), |ctx, (name, value)| {
                ctx.with_header(name.as_ref(), value.as_ref())
            })
    }

    /// Add a header. A repeated header is joined with `", "`; `Cookie`
    /// headers additionally feed the cookie view.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        let name = name.to_ascii_lowercase();

        if name == "cookie" {
            for (cookie, cookie_value) in parse_cookie_header(value) {
                self.cookies.entry(cookie).or_insert(cookie_value);
            }
        }

        self.headers
            .entry(name)
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
        self
    }

    /// Add a cookie to the view directly.
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Current cookie view.
    pub fn cookies(&self) -> &HashMap<String, String> {
        &self.cookies
    }

    /// Build from an `http` header map.
    #[cfg(feature = "http")]
    pub fn from_header_map(headers: &http::HeaderMap) -> Self {
        headers
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
            .fold(Self::new(), |ctx, (name, value)| ctx.with_header(name, value))
    }

    /// Build from the head of an `http` request.
    #[cfg(feature = "http")]
    pub fn from_parts(parts: &http::request::Parts) -> Self {
        Self::from_header_map(&parts.headers)
    }
}

impl LanguageRequest for RequestContext {
    fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn set_cookie_value(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_string(), value.to_string());
    }

    fn remove_cookie(&mut self, name: &str) -> Option<String> {
        self.cookies.remove(name)
    }
}

/// Cookies queued for the response, in write order.
#[derive(Debug, Clone, Default)]
pub struct ResponseCookies {
    cookies: Vec<LanguageCookie>,
}

impl ResponseCookies {
    /// Nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queued cookies.
    pub fn cookies(&self) -> &[LanguageCookie] {
        &self.cookies
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// `Set-Cookie` header values, one per queued cookie.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.cookies
            .iter()
            .map(LanguageCookie::to_header_value)
            .collect()
    }

    /// Append the queued cookies to an `http` header map.
    #[cfg(feature = "http")]
    pub fn apply_to(&self, headers: &mut http::HeaderMap) {
        for cookie in &self.cookies {
            headers.set_cookie(cookie);
        }
    }
}

impl LanguageResponse for ResponseCookies {
    fn set_cookie(&mut self, cookie: &LanguageCookie) {
        self.cookies.push(cookie.clone());
    }
}

#[cfg(feature = "http")]
impl LanguageResponse for http::HeaderMap {
    fn set_cookie(&mut self, cookie: &LanguageCookie) {
        match http::HeaderValue::try_from(cookie.to_header_value()) {
            Ok(value) => {
                self.append(http::header::SET_COOKIE, value);
            }
            Err(e) => {
                langdetect_log::warn!("Dropping unrepresentable cookie {}: {}", cookie.name, e);
            }
        }
    }
}
