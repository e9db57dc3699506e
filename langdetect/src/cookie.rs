//! Preference cookie handling: reading `Cookie` headers, sanitizing stored
//! values and rendering `Set-Cookie` headers.

use crate::config::CookieConfig;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// IMF-fixdate, as used by the `Expires` attribute.
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Remove markup from a cookie value.
///
/// Everything from a `<` up to and including the next `>` is dropped; an
/// unclosed `<` drops the rest of the input. NUL bytes are removed.
///
/// ```
/// use langdetect::strip_tags;
///
/// assert_eq!(strip_tags("<b>de</b>"), "de");
/// assert_eq!(strip_tags("en<script"), "en");
/// assert_eq!(strip_tags("a > b"), "a > b");
/// ```
pub fn strip_tags(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_tag = false;

    for c in value.chars() {
        match c {
            '\0' => {}
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => out.push(c),
        }
    }

    out
}

/// Language code stored in a preference cookie value: markup stripped,
/// then at most the first two characters.
///
/// ```
/// use langdetect::cookie_language;
///
/// assert_eq!(cookie_language("de"), "de");
/// assert_eq!(cookie_language("<i>fr</i>-FR"), "fr");
/// assert_eq!(cookie_language("<x>"), "");
/// ```
pub fn cookie_language(value: &str) -> String {
    strip_tags(value).chars().take(2).collect()
}

/// Parse a `Cookie` request header into name/value pairs.
///
/// Pairs without `=` are skipped, surrounding double quotes are removed
/// from values, and the first occurrence of a name wins.
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for pair in header.split(';') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);

        cookies
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
    }

    cookies
}

/// A preference cookie to be written to a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCookie {
    /// Cookie name
    pub name: String,
    /// Cookie value (empty when expiring)
    pub value: String,
    /// Absolute expiry; `None` makes a session cookie
    pub expires: Option<DateTime<Utc>>,
    /// `Max-Age` in seconds, only set when expiring
    pub max_age: Option<i64>,
    /// Cookie path (empty omits the attribute)
    pub path: String,
    /// Cookie domain (empty omits the attribute)
    pub domain: String,
    /// Secure flag
    pub secure: bool,
    /// HttpOnly flag
    pub http_only: bool,
}

impl LanguageCookie {
    /// Cookie carrying `value` with the configured attributes.
    ///
    /// An `expire` of `0` (or one outside the representable range) yields a
    /// session cookie.
    pub fn new(config: &CookieConfig, value: impl Into<String>) -> Self {
        let expires = match config.expire {
            0 => None,
            timestamp => DateTime::from_timestamp(timestamp, 0),
        };

        Self {
            name: config.name.clone(),
            value: value.into(),
            expires,
            max_age: None,
            path: config.path.clone(),
            domain: config.domain.clone(),
            secure: config.secure,
            http_only: config.http_only,
        }
    }

    /// Cookie that makes the client drop the configured preference cookie
    /// immediately.
    pub fn expired(config: &CookieConfig) -> Self {
        Self {
            value: String::new(),
            expires: DateTime::from_timestamp(0, 0),
            max_age: Some(0),
            ..Self::new(config, "")
        }
    }

    /// Whether this cookie deletes the client's copy.
    pub fn is_expired(&self) -> bool {
        self.max_age.is_some_and(|age| age <= 0)
            || self.expires.is_some_and(|at| at <= Utc::now())
    }

    /// Render as a `Set-Cookie` header value.
    ///
    /// ```
    /// use langdetect::{CookieConfig, LanguageCookie};
    ///
    /// let config = CookieConfig::default().with_domain("example.com").with_secure(true);
    /// let cookie = LanguageCookie::new(&config, "de");
    /// assert_eq!(
    ///     cookie.to_header_value(),
    ///     "LanguageDetection=de; Path=/; Domain=example.com; Secure"
    /// );
    /// ```
    pub fn to_header_value(&self) -> String {
        let mut header = format!("{}={}", self.name, self.value);

        if let Some(expires) = self.expires {
            header.push_str(&format!("; Expires={}", expires.format(EXPIRES_FORMAT)));
        }

        if let Some(max_age) = self.max_age {
            header.push_str(&format!("; Max-Age={}", max_age));
        }

        if !self.path.is_empty() {
            header.push_str(&format!("; Path={}", self.path));
        }

        if !self.domain.is_empty() {
            header.push_str(&format!("; Domain={}", self.domain));
        }

        if self.secure {
            header.push_str("; Secure");
        }

        if self.http_only {
            header.push_str("; HttpOnly");
        }

        header
    }
}
