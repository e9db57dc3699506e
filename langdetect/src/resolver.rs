//! Language resolution.

use crate::accept::{AcceptedLanguage, parse_accept_language};
use crate::code::LanguageCode;
use crate::config::ResolverConfig;
use crate::cookie::{LanguageCookie, cookie_language};
use crate::traits::{LanguageRequest, LanguageResponse};
use langdetect_log::debug;
use std::fmt;
use std::sync::Arc;

/// Header consulted when no preference cookie decides the language.
pub const ACCEPT_LANGUAGE: &str = "accept-language";

/// What decided the resolved language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageSource {
    /// An available code from the preference cookie
    Cookie,
    /// An entry of the `Accept-Language` header
    Header,
    /// Nothing matched, or the cookie held an unknown code
    Fallback,
}

impl fmt::Display for LanguageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LanguageSource::Cookie => "cookie",
            LanguageSource::Header => "header",
            LanguageSource::Fallback => "fallback",
        })
    }
}

/// Outcome of [`LanguageResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Resolved language, always available or the fallback
    pub language: LanguageCode,
    /// Where it came from
    pub source: LanguageSource,
}

/// Picks one language per request from the preference cookie, the
/// `Accept-Language` header or the configured fallback.
///
/// Cloning is cheap; clones share the configuration.
///
/// # Example
///
/// ```
/// use langdetect::{LanguageResolver, RequestContext, ResolverConfig, ResponseCookies};
///
/// let resolver = LanguageResolver::new(ResolverConfig::new(["en", "de"]).unwrap());
///
/// let mut request = RequestContext::new().with_header("Accept-Language", "de-DE,en-US;q=0.7");
/// assert_eq!(resolver.determine_language(&request), "de");
///
/// let mut response = ResponseCookies::new();
/// let written = resolver.set_language(&mut request, &mut response, "en");
/// assert_eq!(written.as_deref(), Some("en"));
/// assert_eq!(resolver.determine_language(&request), "en");
/// ```
#[derive(Debug, Clone)]
pub struct LanguageResolver {
    config: Arc<ResolverConfig>,
}

impl LanguageResolver {
    /// Create a resolver.
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The resolver's configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Language for this request.
    pub fn determine_language<R>(&self, request: &R) -> LanguageCode
    where
        R: LanguageRequest + ?Sized,
    {
        self.resolve(request).language
    }

    /// Language for this request, with the source that decided it.
    ///
    /// With cookies enabled, a preference cookie whose sanitized value is
    /// non-empty decides alone: an unknown code yields the fallback without
    /// looking at the header.
    pub fn resolve<R>(&self, request: &R) -> Detection
    where
        R: LanguageRequest + ?Sized,
    {
        if let Some(stored) = self.cookie_preference(request) {
            let detection = if self.config.is_available(&stored) {
                Detection {
                    language: LanguageCode::from(stored),
                    source: LanguageSource::Cookie,
                }
            } else {
                debug!("Preference cookie holds unavailable language {:?}", stored);
                self.fallback()
            };
            debug!("Resolved language {} from {}", detection.language, detection.source);
            return detection;
        }

        let detection = self
            .accepted_languages(request)
            .iter()
            .map(AcceptedLanguage::iso2)
            .find(|code| self.config.is_available(code))
            .map(|code| Detection {
                language: LanguageCode::from(code),
                source: LanguageSource::Header,
            })
            .unwrap_or_else(|| self.fallback());

        debug!("Resolved language {} from {}", detection.language, detection.source);
        detection
    }

    /// Parsed `Accept-Language` entries of this request, best first.
    pub fn accepted_languages<R>(&self, request: &R) -> Vec<AcceptedLanguage>
    where
        R: LanguageRequest + ?Sized,
    {
        request
            .header(ACCEPT_LANGUAGE)
            .map(parse_accept_language)
            .unwrap_or_default()
    }

    /// Persist `language` as the preference.
    ///
    /// Unknown codes are replaced by the fallback. The cookie is queued on
    /// `response` and the request's cookie view is updated so the rest of
    /// this request sees the new value. Returns the written code, or `None`
    /// when cookie support is disabled and nothing was written.
    pub fn set_language<R, W>(
        &self,
        request: &mut R,
        response: &mut W,
        language: &str,
    ) -> Option<LanguageCode>
    where
        R: LanguageRequest + ?Sized,
        W: LanguageResponse + ?Sized,
    {
        if !self.config.cookie_enabled() {
            debug!("Cookie support disabled, not persisting {:?}", language);
            return None;
        }

        let language = if self.config.is_available(language) {
            LanguageCode::from(language)
        } else {
            debug!(
                "Language {:?} unavailable, persisting fallback {}",
                language,
                self.config.fallback_language()
            );
            self.config.fallback_language().clone()
        };

        let cookie = LanguageCookie::new(self.config.cookie(), language.as_str());
        response.set_cookie(&cookie);
        request.set_cookie_value(&cookie.name, language.as_str());

        Some(language)
    }

    /// Clear the persisted preference, if there is one.
    pub fn unset_language<R, W>(&self, request: &mut R, response: &mut W)
    where
        R: LanguageRequest + ?Sized,
        W: LanguageResponse + ?Sized,
    {
        let cookie = self.config.cookie();
        if request.remove_cookie(&cookie.name).is_some() {
            response.expire_cookie(&LanguageCookie::expired(cookie));
            debug!("Expired preference cookie {}", cookie.name);
        }
    }

    /// Sanitized, non-empty cookie code when cookie support is on.
    fn cookie_preference<R>(&self, request: &R) -> Option<String>
    where
        R: LanguageRequest + ?Sized,
    {
        if !self.config.cookie_enabled() {
            return None;
        }

        request
            .cookie(&self.config.cookie().name)
            .map(cookie_language)
            .filter(|code| !code.is_empty())
    }

    fn fallback(&self) -> Detection {
        Detection {
            language: self.config.fallback_language().clone(),
            source: LanguageSource::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{RequestContext, ResponseCookies};

    fn resolver(languages: &[&str]) -> LanguageResolver {
        LanguageResolver::new(ResolverConfig::new(languages.iter().copied()).unwrap())
    }

    #[test]
    fn test_resolve_sources() {
        let resolver = resolver(&["en", "de"]);

        let request = RequestContext::new().with_cookie("LanguageDetection", "de");
        assert_eq!(resolver.resolve(&request).source, LanguageSource::Cookie);

        let request = RequestContext::new().with_header("accept-language", "de");
        assert_eq!(resolver.resolve(&request).source, LanguageSource::Header);

        let request = RequestContext::new();
        assert_eq!(
            resolver.resolve(&request),
            Detection {
                language: LanguageCode::from("en"),
                source: LanguageSource::Fallback,
            }
        );
    }

    #[test]
    fn test_unknown_cookie_skips_header() {
        let resolver = resolver(&["en", "de"]);
        let request = RequestContext::new()
            .with_cookie("LanguageDetection", "xx")
            .with_header("accept-language", "de");

        let detection = resolver.resolve(&request);
        assert_eq!(detection.language, "en");
        assert_eq!(detection.source, LanguageSource::Fallback);
    }

    #[test]
    fn test_empty_cookie_falls_through_to_header() {
        let resolver = resolver(&["en", "de"]);
        let request = RequestContext::new()
            .with_cookie("LanguageDetection", "<b></b>")
            .with_header("accept-language", "de");

        assert_eq!(resolver.resolve(&request).source, LanguageSource::Header);
    }

    #[test]
    fn test_zero_cookie_counts_as_present() {
        let resolver = resolver(&["en", "de"]);
        let request = RequestContext::new()
            .with_cookie("LanguageDetection", "0")
            .with_header("accept-language", "de");

        let detection = resolver.resolve(&request);
        assert_eq!(detection.language, "en");
        assert_eq!(detection.source, LanguageSource::Fallback);
    }

    #[test]
    fn test_cookie_is_truncated_to_two_characters() {
        let resolver = resolver(&["en", "de"]);
        let request = RequestContext::new().with_cookie("LanguageDetection", "de-AT");

        assert_eq!(resolver.determine_language(&request), "de");
    }

    #[test]
    fn test_disabled_cookies_are_ignored() {
        let config = ResolverConfig::builder()
            .available_languages(["en", "de"])
            .cookie_enabled(false)
            .build()
            .unwrap();
        let resolver = LanguageResolver::new(config);
        let request = RequestContext::new()
            .with_cookie("LanguageDetection", "en")
            .with_header("accept-language", "de");

        assert_eq!(resolver.determine_language(&request), "de");
    }

    #[test]
    fn test_custom_cookie_name() {
        let config = ResolverConfig::builder()
            .available_languages(["en", "fr"])
            .cookie_name("lang")
            .build()
            .unwrap();
        let resolver = LanguageResolver::new(config);

        let request = RequestContext::new().with_cookie("LanguageDetection", "fr");
        assert_eq!(resolver.determine_language(&request), "en");

        let request = RequestContext::new().with_cookie("lang", "fr");
        assert_eq!(resolver.determine_language(&request), "fr");
    }

    #[test]
    fn test_accepted_languages() {
        let resolver = resolver(&[]);
        let request = RequestContext::new().with_header("Accept-Language", "en;q=0.2, nl");

        let tags: Vec<_> = resolver
            .accepted_languages(&request)
            .into_iter()
            .map(|entry| entry.tag)
            .collect();
        assert_eq!(tags, ["nl", "en"]);

        assert!(resolver.accepted_languages(&RequestContext::new()).is_empty());
    }

    #[test]
    fn test_set_language_writes_cookie() {
        let resolver = resolver(&["en", "de"]);
        let mut request = RequestContext::new();
        let mut response = ResponseCookies::new();

        let written = resolver.set_language(&mut request, &mut response, "de");

        assert_eq!(written, Some(LanguageCode::from("de")));
        assert_eq!(response.set_cookie_headers(), ["LanguageDetection=de; Path=/"]);
        assert_eq!(request.cookie("LanguageDetection"), Some("de"));
    }

    #[test]
    fn test_unset_language_expires_cookie() {
        let resolver = resolver(&["en", "de"]);
        let mut request = RequestContext::new().with_cookie("LanguageDetection", "de");
        let mut response = ResponseCookies::new();

        resolver.unset_language(&mut request, &mut response);

        assert_eq!(request.cookie("LanguageDetection"), None);
        assert_eq!(response.cookies().len(), 1);
        assert!(response.cookies()[0].is_expired());
        assert_eq!(response.cookies()[0].name, "LanguageDetection");
    }

    #[test]
    fn test_resolver_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LanguageResolver>();

        let resolver = resolver(&["en"]);
        let clone = resolver.clone();
        assert!(std::ptr::eq(resolver.config(), clone.config()));
    }
}
