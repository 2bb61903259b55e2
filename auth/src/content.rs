//! Token content and kind definitions.

use std::collections::BTreeMap;
use std::fmt;

use auth_error::AuthError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Arbitrary application claim value.
pub type ClaimValue = serde_json::Value;

/// Application claims keyed by name. Ordered so that serialization is stable.
pub type Claims = BTreeMap<String, ClaimValue>;

/// Claim name carrying the token kind.
pub const TYPE_CLAIM: &str = "type";

/// Claim name carrying the expiry timestamp.
pub const EXP_CLAIM: &str = "exp";

/// Token kind tag, transported as the `type` claim.
///
/// Kept as an open string so tokens minted with kinds this crate does not
/// know about still parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenKind(String);

impl TokenKind {
    /// Tag of access tokens.
    pub const ACCESS: &'static str = "access";
    /// Tag of refresh tokens.
    pub const REFRESH: &'static str = "refresh";

    /// Create a kind from any tag.
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// The `access` kind.
    pub fn access() -> Self {
        Self::new(Self::ACCESS)
    }

    /// The `refresh` kind.
    pub fn refresh() -> Self {
        Self::new(Self::REFRESH)
    }

    /// Tag as transported in the `type` claim.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is an access token kind.
    pub fn is_access(&self) -> bool {
        self.0 == Self::ACCESS
    }

    /// Check if this is a refresh token kind.
    pub fn is_refresh(&self) -> bool {
        self.0 == Self::REFRESH
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl From<String> for TokenKind {
    fn from(kind: String) -> Self {
        Self(kind)
    }
}

impl PartialEq<str> for TokenKind {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TokenKind {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Authenticated payload of a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenContent {
    /// Token kind (`access`, `refresh`, ...)
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Claimed expiration time (Unix timestamp, seconds)
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// Additional application claims. `exp` and `type` are reserved.
    #[serde(default)]
    pub data: Claims,
}

impl TokenContent {
    /// Create content with no application claims.
    pub fn new(kind: impl Into<TokenKind>, expires_at: i64) -> Self {
        Self {
            kind: kind.into(),
            expires_at,
            data: Claims::new(),
        }
    }

    /// Create access token content.
    pub fn access(expires_at: i64) -> Self {
        Self::new(TokenKind::access(), expires_at)
    }

    /// Create refresh token content.
    pub fn refresh(expires_at: i64) -> Self {
        Self::new(TokenKind::refresh(), expires_at)
    }

    /// Replace the application claims.
    pub fn with_data(mut self, data: Claims) -> Self {
        self.data = data;
        self
    }

    /// Add a single application claim.
    ///
    /// Fails with [`AuthError::Signing`] when `value` has no JSON
    /// representation (for example a map with non-string keys).
    pub fn with_claim(
        mut self,
        key: impl Into<String>,
        value: impl Serialize,
    ) -> Result<Self, AuthError> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|e| {
            tracing::error!("Failed to encode claim '{}': {}", key, e);
            AuthError::Signing(format!("claim '{}' is not encodable: {}", key, e))
        })?;
        self.data.insert(key, value);
        Ok(self)
    }

    /// Look up an application claim.
    pub fn claim(&self, key: &str) -> Option<&ClaimValue> {
        self.data.get(key)
    }

    /// Claimed expiry as a UTC datetime, if it is in chrono's range.
    pub fn expires_at_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }

    /// Check the claimed expiry against the wall clock.
    pub fn is_expired(&self) -> bool {
        crate::expiry::is_expired(self, Utc::now().timestamp())
    }
}
