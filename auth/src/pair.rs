//! Access/refresh token pair issuance.

use auth_error::AuthError;
use serde::{Deserialize, Serialize};

use crate::codec::TokenCodec;
use crate::config::{JwtConfig, DEFAULT_ACCESS_TTL_SECS, DEFAULT_REFRESH_TTL_SECS};
use crate::content::{Claims, TokenContent, TokenKind};

/// A matched access/refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access: String,
    /// Signed refresh token
    pub refresh: String,
}

/// Issues access/refresh pairs through a [`TokenCodec`].
#[derive(Debug, Clone)]
pub struct PairIssuer {
    codec: TokenCodec,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl PairIssuer {
    /// Create an issuer around `codec` with the default lifetimes.
    pub fn new(codec: TokenCodec) -> Self {
        Self {
            codec,
            access_ttl_secs: DEFAULT_ACCESS_TTL_SECS,
            refresh_ttl_secs: DEFAULT_REFRESH_TTL_SECS,
        }
    }

    /// Create an issuer whose key and lifetimes all come from `config`.
    pub fn from_config(config: &JwtConfig) -> Result<Self, AuthError> {
        let codec = TokenCodec::new(config.signing_key())?;
        Ok(Self {
            codec,
            access_ttl_secs: config.access_ttl_secs,
            refresh_ttl_secs: config.refresh_ttl_secs,
        })
    }

    /// Codec used for signing, also usable for parsing what it issued.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Access token lifetime in seconds.
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl_secs
    }

    /// Refresh token lifetime in seconds.
    pub fn refresh_ttl_secs(&self) -> i64 {
        self.refresh_ttl_secs
    }

    /// Sign a pair from prepared contents.
    ///
    /// Kinds are checked before anything is signed. Either both tokens are
    /// returned or none.
    pub fn issue_pair_with_content(
        &self,
        access: &TokenContent,
        refresh: &TokenContent,
    ) -> Result<TokenPair, AuthError> {
        ensure_kind(access, TokenKind::ACCESS)?;
        ensure_kind(refresh, TokenKind::REFRESH)?;

        let access = self.codec.sign(access)?;
        let refresh = self.codec.sign(refresh)?;

        Ok(TokenPair { access, refresh })
    }

    /// Sign a pair from expiries and claims.
    pub fn issue_pair(
        &self,
        access_expires_at: i64,
        refresh_expires_at: i64,
        access_data: Claims,
        refresh_data: Claims,
    ) -> Result<TokenPair, AuthError> {
        self.issue_pair_with_content(
            &TokenContent::access(access_expires_at).with_data(access_data),
            &TokenContent::refresh(refresh_expires_at).with_data(refresh_data),
        )
    }

    /// Sign a pair whose expiries are `now` plus the issuer's lifetimes.
    pub fn issue_pair_from_now(
        &self,
        now: i64,
        access_data: Claims,
        refresh_data: Claims,
    ) -> Result<TokenPair, AuthError> {
        self.issue_pair(
            now.saturating_add(self.access_ttl_secs),
            now.saturating_add(self.refresh_ttl_secs),
            access_data,
            refresh_data,
        )
    }
}

fn ensure_kind(content: &TokenContent, expected: &str) -> Result<(), AuthError> {
    if content.kind != expected {
        tracing::warn!(
            "Refusing to issue pair: expected {} token, got {}",
            expected,
            content.kind
        );
        return Err(AuthError::TypeMismatch {
            expected: expected.to_string(),
            found: content.kind.to_string(),
        });
    }
    Ok(())
}
