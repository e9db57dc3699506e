//! Request Language Detection
//!
//! Resolves the language to serve a visitor from, in order:
//!
//! - **Preference cookie**: a code stored by an earlier [`LanguageResolver::set_language`]
//! - **Accept-Language**: the browser's ranked preferences
//! - **Fallback**: the configured default
//!
//! The resolved language is always one of the configured available
//! languages or the fallback.
//!
//! # Quick Start
//!
//! ```rust
//! use langdetect::{LanguageResolver, RequestContext, ResolverConfig, ResponseCookies};
//!
//! let config = ResolverConfig::builder()
//!     .available_languages(["en", "de", "fr"])
//!     .fallback_language("en")
//!     .cookie_http_only(true)
//!     .build()
//!     .unwrap();
//! let resolver = LanguageResolver::new(config);
//!
//! let mut request = RequestContext::from_headers([
//!     ("Accept-Language", "fr-CH, fr;q=0.9, en;q=0.8"),
//!     ("Cookie", "session=abc"),
//! ]);
//! assert_eq!(resolver.determine_language(&request), "fr");
//!
//! // Remember an explicit choice
//! let mut response = ResponseCookies::new();
//! resolver.set_language(&mut request, &mut response, "de");
//! assert_eq!(resolver.determine_language(&request), "de");
//! assert_eq!(
//!     response.set_cookie_headers(),
//!     ["LanguageDetection=de; Path=/; HttpOnly"]
//! );
//! ```
//!
//! # Host Integration
//!
//! Any request or response type can take part by implementing
//! [`LanguageRequest`] and [`LanguageResponse`]. The `http` feature provides
//! conversions from `http::request::Parts` and writes `Set-Cookie` headers
//! into an `http::HeaderMap`.

mod accept;
mod code;
mod config;
mod context;
mod cookie;
mod error;
mod resolver;
mod traits;

pub use accept::{AcceptedLanguage, parse_accept_language, sanitize_tag};
pub use code::LanguageCode;
pub use config::{
    CookieConfig, DEFAULT_COOKIE_NAME, DEFAULT_FALLBACK, ResolverConfig, ResolverConfigBuilder,
};
pub use context::{RequestContext, ResponseCookies};
pub use cookie::{LanguageCookie, cookie_language, parse_cookie_header, strip_tags};
pub use error::LanguageError;
pub use resolver::{ACCEPT_LANGUAGE, Detection, LanguageResolver, LanguageSource};
pub use traits::{LanguageRequest, LanguageResponse};

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, LanguageError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        LanguageCode, LanguageError, LanguageRequest, LanguageResolver, LanguageResponse,
        RequestContext, ResolverConfig, ResponseCookies, Result,
    };
}
