//! Error types for resolver configuration

use thiserror::Error;

/// Errors raised while building or loading a [`ResolverConfig`](crate::ResolverConfig).
///
/// Request-time operations never fail; only configuration can.
#[derive(Debug, Error)]
pub enum LanguageError {
    /// Fallback language is empty
    #[error("Fallback language must not be empty")]
    EmptyFallback,

    /// Language code cannot be stored in a cookie value
    #[error("Invalid language code: {0:?}")]
    InvalidLanguageCode(String),

    /// Cookie name is not a valid RFC 6265 token
    #[error("Invalid cookie name: {0:?}")]
    InvalidCookieName(String),

    /// Environment variable holds an unusable value
    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnvValue { key: String, value: String },

    /// Failed to parse a TOML configuration document
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
