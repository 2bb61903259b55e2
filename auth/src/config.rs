//! JWT configuration.
//!
//! Values are supplied by the embedding service; nothing here reads the
//! process environment.

use std::fmt;

use crate::key::SigningKey;

/// Default access token lifetime: 15 minutes.
pub(crate) const DEFAULT_ACCESS_TTL_SECS: i64 = 15 * 60;

/// Default refresh token lifetime: 7 days.
pub(crate) const DEFAULT_REFRESH_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// JWT configuration.
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Access token validity duration in seconds
    pub access_ttl_secs: i64,
    /// Refresh token validity duration in seconds
    pub refresh_ttl_secs: i64,
}

impl JwtConfig {
    /// Create a new JWT configuration with default lifetimes.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_ttl_secs: DEFAULT_ACCESS_TTL_SECS,
            refresh_ttl_secs: DEFAULT_REFRESH_TTL_SECS,
        }
    }

    /// Set the access token lifetime.
    pub fn with_access_ttl(mut self, secs: i64) -> Self {
        self.access_ttl_secs = secs;
        self
    }

    /// Set the refresh token lifetime.
    pub fn with_refresh_ttl(mut self, secs: i64) -> Self {
        self.refresh_ttl_secs = secs;
        self
    }

    /// Signing key derived from the configured secret.
    pub fn signing_key(&self) -> SigningKey {
        SigningKey::from(self.secret.as_str())
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetimes() {
        let config = JwtConfig::new("secret1");
        assert_eq!(config.access_ttl_secs, 900);
        assert_eq!(config.refresh_ttl_secs, 604_800);
        assert_eq!(config.signing_key().as_bytes(), b"secret1");
    }

    #[test]
    fn test_builder_overrides() {
        let config = JwtConfig::new("secret1")
            .with_access_ttl(60)
            .with_refresh_ttl(3600);
        assert_eq!(config.access_ttl_secs, 60);
        assert_eq!(config.refresh_ttl_secs, 3600);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", JwtConfig::new("topsecret"));
        assert!(!debug.contains("topsecret"));
    }
}
