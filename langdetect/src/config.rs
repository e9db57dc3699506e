//! Resolver configuration.
//!
//! A [`ResolverConfig`] is built once, through [`ResolverConfigBuilder`], a
//! TOML document or environment variables, and is read-only afterwards.

use crate::code::LanguageCode;
use crate::error::LanguageError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default fallback language.
pub const DEFAULT_FALLBACK: &str = "en";

/// Default cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "LanguageDetection";

/// Attributes of the preference cookie, passed through verbatim when the
/// cookie is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Cookie name
    pub name: String,

    /// Expiry as a Unix timestamp in seconds; `0` makes a session cookie
    pub expire: i64,

    /// Cookie path (empty omits the attribute)
    pub path: String,

    /// Cookie domain (empty omits the attribute)
    pub domain: String,

    /// Secure flag (HTTPS only)
    pub secure: bool,

    /// HttpOnly flag
    pub http_only: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_string(),
            expire: 0,
            path: "/".to_string(),
            domain: String::new(),
            secure: false,
            http_only: false,
        }
    }
}

impl CookieConfig {
    /// Set cookie name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set expiry timestamp
    pub fn with_expire(mut self, expire: i64) -> Self {
        self.expire = expire;
        self
    }

    /// Set cookie path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set cookie domain
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set secure flag
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set HttpOnly flag
    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    fn validate(&self) -> Result<()> {
        if is_cookie_token(&self.name) {
            Ok(())
        } else {
            Err(LanguageError::InvalidCookieName(self.name.clone()))
        }
    }
}

/// RFC 6265 `cookie-name`: a non-empty HTTP token.
fn is_cookie_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic()
                && !matches!(
                    b,
                    b'(' | b')'
                        | b'<'
                        | b'>'
                        | b'@'
                        | b','
                        | b';'
                        | b':'
                        | b'\\'
                        | b'"'
                        | b'/'
                        | b'['
                        | b']'
                        | b'?'
                        | b'='
                        | b'{'
                        | b'}'
                )
        })
}

/// RFC 6265 `cookie-octet`s only, so a code can be written verbatim as a
/// cookie value.
fn is_cookie_value(code: &str) -> bool {
    code.bytes()
        .all(|b| b.is_ascii_graphic() && !matches!(b, b'"' | b',' | b';' | b'\\'))
}

/// Immutable resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    available_languages: Vec<LanguageCode>,
    fallback_language: LanguageCode,
    cookie_enabled: bool,
    cookie: CookieConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            available_languages: Vec::new(),
            fallback_language: LanguageCode::new(DEFAULT_FALLBACK),
            cookie_enabled: true,
            cookie: CookieConfig::default(),
        }
    }
}

impl ResolverConfig {
    /// Start building a configuration.
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::new()
    }

    /// Validated configuration with the given available languages and
    /// defaults everywhere else.
    pub fn new<I, L>(available_languages: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<LanguageCode>,
    {
        ResolverConfigBuilder::new()
            .available_languages(available_languages)
            .build()
    }

    /// Parse and validate a TOML document.
    ///
    /// ```
    /// use langdetect::ResolverConfig;
    ///
    /// let config = ResolverConfig::from_toml_str(r#"
    ///     available_languages = ["en", "de"]
    ///     fallback_language = "de"
    ///
    ///     [cookie]
    ///     name = "lang"
    ///     secure = true
    /// "#).unwrap();
    ///
    /// assert_eq!(config.fallback_language(), "de");
    /// assert_eq!(config.cookie().name, "lang");
    /// assert_eq!(config.cookie().path, "/");
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)?;
        raw.into_config()
    }

    /// Load and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Read `{prefix}_*` environment variables on top of the defaults.
    ///
    /// Recognised keys: `AVAILABLE_LANGUAGES` (comma separated),
    /// `FALLBACK_LANGUAGE`, `COOKIE_ENABLED`, `COOKIE_NAME`, `COOKIE_EXPIRE`,
    /// `COOKIE_PATH`, `COOKIE_DOMAIN`, `COOKIE_SECURE`, `COOKIE_HTTP_ONLY`.
    pub fn from_env(prefix: &str) -> Result<Self> {
        Self::from_lookup(prefix, |key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            let full_key = if prefix.is_empty() {
                key.to_string()
            } else {
                format!("{}_{}", prefix.trim_end_matches('_'), key)
            };
            lookup(&full_key).map(|value| (full_key, value))
        };

        let mut builder = ResolverConfigBuilder::new();

        if let Some((_, value)) = var("AVAILABLE_LANGUAGES") {
            builder = builder.available_languages(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty()),
            );
        }
        if let Some((_, value)) = var("FALLBACK_LANGUAGE") {
            builder = builder.fallback_language(value.trim());
        }
        if let Some((key, value)) = var("COOKIE_ENABLED") {
            builder = builder.cookie_enabled(parse_bool(&key, &value)?);
        }
        if let Some((_, value)) = var("COOKIE_NAME") {
            builder = builder.cookie_name(value.trim());
        }
        if let Some((key, value)) = var("COOKIE_EXPIRE") {
            let expire = value
                .trim()
                .parse()
                .map_err(|_| LanguageError::InvalidEnvValue { key, value })?;
            builder = builder.cookie_expire(expire);
        }
        if let Some((_, value)) = var("COOKIE_PATH") {
            builder = builder.cookie_path(value);
        }
        if let Some((_, value)) = var("COOKIE_DOMAIN") {
            builder = builder.cookie_domain(value);
        }
        if let Some((key, value)) = var("COOKIE_SECURE") {
            builder = builder.cookie_secure(parse_bool(&key, &value)?);
        }
        if let Some((key, value)) = var("COOKIE_HTTP_ONLY") {
            builder = builder.cookie_http_only(parse_bool(&key, &value)?);
        }

        builder.build()
    }

    /// Languages the resolver may return.
    pub fn available_languages(&self) -> &[LanguageCode] {
        &self.available_languages
    }

    /// Language returned when nothing else matches.
    pub fn fallback_language(&self) -> &LanguageCode {
        &self.fallback_language
    }

    /// Whether the preference cookie is read and written.
    pub fn cookie_enabled(&self) -> bool {
        self.cookie_enabled
    }

    /// Preference cookie attributes.
    pub fn cookie(&self) -> &CookieConfig {
        &self.cookie
    }

    /// Whether `code` is one of the available languages.
    pub fn is_available(&self, code: &str) -> bool {
        self.available_languages.iter().any(|lang| lang == code)
    }

    fn validate(&self) -> Result<()> {
        if self.fallback_language.is_empty() {
            return Err(LanguageError::EmptyFallback);
        }
        if let Some(code) = self
            .available_languages
            .iter()
            .chain(std::iter::once(&self.fallback_language))
            .find(|code| !is_cookie_value(code))
        {
            return Err(LanguageError::InvalidLanguageCode(code.to_string()));
        }
        self.cookie.validate()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(LanguageError::InvalidEnvValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Serialized form of [`ResolverConfig`].
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawConfig {
    available_languages: Vec<LanguageCode>,
    fallback_language: LanguageCode,
    cookie_enabled: bool,
    cookie: CookieConfig,
}

impl Default for RawConfig {
    fn default() -> Self {
        let defaults = ResolverConfig::default();
        Self {
            available_languages: defaults.available_languages,
            fallback_language: defaults.fallback_language,
            cookie_enabled: defaults.cookie_enabled,
            cookie: defaults.cookie,
        }
    }
}

impl RawConfig {
    fn into_config(self) -> Result<ResolverConfig> {
        let config = ResolverConfig {
            available_languages: self.available_languages,
            fallback_language: self.fallback_language,
            cookie_enabled: self.cookie_enabled,
            cookie: self.cookie,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Builder for [`ResolverConfig`].
#[derive(Debug, Clone, Default)]
pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    /// Create a builder holding the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the available languages.
    pub fn available_languages<I, L>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LanguageCode>,
    {
        self.config.available_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Append one available language.
    pub fn language(mut self, language: impl Into<LanguageCode>) -> Self {
        self.config.available_languages.push(language.into());
        self
    }

    /// Set the fallback language.
    pub fn fallback_language(mut self, language: impl Into<LanguageCode>) -> Self {
        self.config.fallback_language = language.into();
        self
    }

    /// Enable or disable cookie support.
    pub fn cookie_enabled(mut self, enabled: bool) -> Self {
        self.config.cookie_enabled = enabled;
        self
    }

    /// Replace all cookie attributes.
    pub fn cookie(mut self, cookie: CookieConfig) -> Self {
        self.config.cookie = cookie;
        self
    }

    /// Set cookie name
    pub fn cookie_name(mut self, name: impl Into<String>) -> Self {
        self.config.cookie.name = name.into();
        self
    }

    /// Set cookie expiry timestamp
    pub fn cookie_expire(mut self, expire: i64) -> Self {
        self.config.cookie.expire = expire;
        self
    }

    /// Set cookie path
    pub fn cookie_path(mut self, path: impl Into<String>) -> Self {
        self.config.cookie.path = path.into();
        self
    }

    /// Set cookie domain
    pub fn cookie_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.cookie.domain = domain.into();
        self
    }

    /// Set cookie secure flag
    pub fn cookie_secure(mut self, secure: bool) -> Self {
        self.config.cookie.secure = secure;
        self
    }

    /// Set cookie HttpOnly flag
    pub fn cookie_http_only(mut self, http_only: bool) -> Self {
        self.config.cookie.http_only = http_only;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<ResolverConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert!(config.available_languages().is_empty());
        assert_eq!(config.fallback_language(), "en");
        assert!(config.cookie_enabled());

        let cookie = config.cookie();
        assert_eq!(cookie.name, "LanguageDetection");
        assert_eq!(cookie.expire, 0);
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.domain, "");
        assert!(!cookie.secure);
        assert!(!cookie.http_only);
    }

    #[test]
    fn test_builder() {
        let config = ResolverConfig::builder()
            .available_languages(["en", "de"])
            .language("fr")
            .fallback_language("de")
            .cookie_enabled(false)
            .cookie_name("lang")
            .cookie_expire(1_700_000_000)
            .cookie_domain("example.com")
            .cookie_secure(true)
            .cookie_http_only(true)
            .build()
            .unwrap();

        assert_eq!(config.available_languages().len(), 3);
        assert!(config.is_available("fr"));
        assert!(!config.is_available("es"));
        assert_eq!(config.fallback_language(), "de");
        assert!(!config.cookie_enabled());
        assert_eq!(config.cookie().name, "lang");
        assert_eq!(config.cookie().expire, 1_700_000_000);
        assert_eq!(config.cookie().domain, "example.com");
        assert!(config.cookie().secure);
        assert!(config.cookie().http_only);
    }

    #[test]
    fn test_builder_rejects_empty_fallback() {
        let result = ResolverConfig::builder().fallback_language("").build();
        assert!(matches!(result, Err(LanguageError::EmptyFallback)));
    }

    #[test]
    fn test_builder_rejects_invalid_language_codes() {
        for code in ["de; Domain=evil.example", "en fr", "d,e", "\"de\"", "de\\", "de\n"] {
            let result = ResolverConfig::builder().language(code).build();
            assert!(
                matches!(result, Err(LanguageError::InvalidLanguageCode(ref c)) if c == code),
                "{code:?} should be rejected"
            );
        }

        let result = ResolverConfig::builder().fallback_language("en;x").build();
        assert!(matches!(result, Err(LanguageError::InvalidLanguageCode(_))));

        let result = ResolverConfig::new(["en", "de; Secure"]);
        assert!(matches!(result, Err(LanguageError::InvalidLanguageCode(_))));

        let result = ResolverConfig::from_toml_str("available_languages = [\"en\", \"x;y\"]");
        assert!(matches!(result, Err(LanguageError::InvalidLanguageCode(_))));

        assert!(ResolverConfig::new(["en", "de-AT", "zh_Hant"]).is_ok());
    }

    #[test]
    fn test_builder_rejects_invalid_cookie_name() {
        for name in ["", "lang pref", "lang;x", "a=b", "ä"] {
            let result = ResolverConfig::builder().cookie_name(name).build();
            assert!(
                matches!(result, Err(LanguageError::InvalidCookieName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_toml_defaults() {
        let config = ResolverConfig::from_toml_str("").unwrap();
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_from_toml_full() {
        let config = ResolverConfig::from_toml_str(
            r#"
            available_languages = ["en", "de", "fr"]
            fallback_language = "fr"
            cookie_enabled = false

            [cookie]
            name = "site_lang"
            expire = 42
            path = "/app"
            domain = ".example.org"
            secure = true
            http_only = true
            "#,
        )
        .unwrap();

        assert_eq!(config.available_languages(), ["en", "de", "fr"].map(LanguageCode::from));
        assert_eq!(config.fallback_language(), "fr");
        assert!(!config.cookie_enabled());
        assert_eq!(
            config.cookie(),
            &CookieConfig::default()
                .with_name("site_lang")
                .with_expire(42)
                .with_path("/app")
                .with_domain(".example.org")
                .with_secure(true)
                .with_http_only(true)
        );
    }

    #[test]
    fn test_from_toml_invalid() {
        let result = ResolverConfig::from_toml_str("available_languages = 3");
        assert!(matches!(result, Err(LanguageError::ParseError(_))));

        let result = ResolverConfig::from_toml_str("[cookie]\nname = \"bad name\"");
        assert!(matches!(result, Err(LanguageError::InvalidCookieName(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("langdetect.toml");
        std::fs::write(&path, "available_languages = [\"nl\"]\nfallback_language = \"nl\"\n").unwrap();

        let config = ResolverConfig::from_file(&path).unwrap();
        assert!(config.is_available("nl"));
        assert_eq!(config.fallback_language(), "nl");

        let missing = ResolverConfig::from_file(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(LanguageError::IoError(_))));
    }

    #[test]
    fn test_from_lookup() {
        let config = ResolverConfig::from_lookup(
            "APP",
            lookup(&[
                ("APP_AVAILABLE_LANGUAGES", "en, de,,fr "),
                ("APP_FALLBACK_LANGUAGE", "de"),
                ("APP_COOKIE_ENABLED", "false"),
                ("APP_COOKIE_NAME", "lang"),
                ("APP_COOKIE_EXPIRE", "3600"),
                ("APP_COOKIE_SECURE", "yes"),
                ("APP_COOKIE_HTTP_ONLY", "1"),
            ]),
        )
        .unwrap();

        assert_eq!(config.available_languages(), ["en", "de", "fr"].map(LanguageCode::from));
        assert_eq!(config.fallback_language(), "de");
        assert!(!config.cookie_enabled());
        assert_eq!(config.cookie().name, "lang");
        assert_eq!(config.cookie().expire, 3600);
        assert_eq!(config.cookie().path, "/");
        assert!(config.cookie().secure);
        assert!(config.cookie().http_only);
    }

    #[test]
    fn test_from_lookup_invalid_values() {
        let result = ResolverConfig::from_lookup("APP", lookup(&[("APP_COOKIE_SECURE", "maybe")]));
        assert!(matches!(
            result,
            Err(LanguageError::InvalidEnvValue { ref key, .. }) if key == "APP_COOKIE_SECURE"
        ));

        let result = ResolverConfig::from_lookup("APP_", lookup(&[("APP_COOKIE_EXPIRE", "soon")]));
        assert!(matches!(result, Err(LanguageError::InvalidEnvValue { .. })));
    }

    #[test]
    fn test_from_env_without_variables() {
        let config = ResolverConfig::from_env("LANGDETECT_TEST_UNSET_PREFIX_93731").unwrap();
        assert_eq!(config, ResolverConfig::default());
    }
}
