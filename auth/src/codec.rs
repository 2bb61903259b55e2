//! JWT signing and parsing.

use std::fmt;

use auth_error::AuthError;
use hmac::{Hmac, Mac};
use jwt::header::HeaderType;
use jwt::token::{Signed, Verified};
use jwt::{AlgorithmType, Header, SignWithKey, Token, VerifyWithKey};
use sha2::Sha256;

use crate::bearer::{self, HeaderSource};
use crate::content::{Claims, TokenContent, EXP_CLAIM, TYPE_CLAIM};
use crate::key::SigningKey;

type HmacSha256 = Hmac<Sha256>;

/// The only algorithm tokens are signed and accepted with.
const EXPECTED_ALGORITHM: AlgorithmType = AlgorithmType::Hs256;

/// Signs [`TokenContent`] into HS256 tokens and parses them back.
///
/// Built once from the process signing key and shared; it holds no mutable
/// state.
#[derive(Clone)]
pub struct TokenCodec {
    key: HmacSha256,
}

impl TokenCodec {
    /// Create a codec for `key`.
    ///
    /// An empty key is a deployment mistake and is rejected up front.
    pub fn new(key: impl Into<SigningKey>) -> Result<Self, AuthError> {
        let key = key.into();
        if key.is_empty() {
            tracing::error!("Refusing to build token codec with an empty signing key");
            return Err(AuthError::InvalidKey("signing key is empty".to_string()));
        }

        let key = HmacSha256::new_from_slice(key.as_bytes()).map_err(|e| {
            tracing::error!("Failed to create HMAC key: {}", e);
            AuthError::InvalidKey(e.to_string())
        })?;

        Ok(Self { key })
    }

    /// Sign `content` into a compact `header.claims.signature` token.
    ///
    /// `type` and `exp` are written last and win over same-named entries in
    /// `content.data`.
    pub fn sign(&self, content: &TokenContent) -> Result<String, AuthError> {
        let mut claims = content.data.clone();
        for reserved in [TYPE_CLAIM, EXP_CLAIM] {
            if claims.contains_key(reserved) {
                tracing::debug!("Overwriting reserved claim '{}' from token data", reserved);
            }
        }
        claims.insert(TYPE_CLAIM.to_string(), content.kind.as_str().into());
        claims.insert(EXP_CLAIM.to_string(), content.expires_at.into());

        let header = Header {
            algorithm: EXPECTED_ALGORITHM,
            type_: Some(HeaderType::JsonWebToken),
            ..Default::default()
        };

        let token: Token<Header, Claims, Signed> = Token::new(header, claims)
            .sign_with_key(&self.key)
            .map_err(|e| {
                tracing::error!("Failed to sign {} token: {}", content.kind, e);
                AuthError::Signing(e.to_string())
            })?;

        Ok(token.as_str().to_string())
    }

    /// Verify `token` and convert its claims back into [`TokenContent`].
    ///
    /// Expiry is returned as claimed and is not checked here; see
    /// [`crate::expiry`].
    pub fn parse(&self, token: &str) -> Result<TokenContent, AuthError> {
        if token.is_empty() {
            return Err(AuthError::Extraction("token is empty".to_string()));
        }

        let unverified: Token<Header, Claims, _> = Token::parse_unverified(token).map_err(|e| {
            tracing::warn!("Malformed token: {}", e);
            AuthError::Extraction(format!("malformed token: {}", e))
        })?;

        let algorithm = unverified.header().algorithm;
        if algorithm != EXPECTED_ALGORITHM {
            tracing::warn!("Rejected token signed with {:?}", algorithm);
            return Err(AuthError::AlgorithmMismatch {
                expected: algorithm_name(EXPECTED_ALGORITHM),
                found: algorithm_name(algorithm),
            });
        }

        let verified: Token<Header, Claims, Verified> =
            unverified.verify_with_key(&self.key).map_err(|e| {
                tracing::warn!("Token signature verification failed: {}", e);
                AuthError::Verification
            })?;

        content_from_claims(verified.claims())
    }

    /// Extract a token from an `Authorization` header value and parse it.
    pub fn parse_bearer(&self, header_value: &str) -> Result<TokenContent, AuthError> {
        let token = bearer::extract_token(header_value);
        if token.is_empty() {
            return Err(AuthError::Extraction(
                "no bearer token in authorization header".to_string(),
            ));
        }
        self.parse(token)
    }

    /// Extract a token from the request's `Authorization` header and parse it.
    pub fn parse_from_headers<H>(&self, headers: &H) -> Result<TokenContent, AuthError>
    where
        H: HeaderSource + ?Sized,
    {
        let token = bearer::extract_from_headers(headers);
        if token.is_empty() {
            return Err(AuthError::Extraction(
                "no bearer token in request headers".to_string(),
            ));
        }
        self.parse(token)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &EXPECTED_ALGORITHM)
            .finish_non_exhaustive()
    }
}

fn content_from_claims(claims: &Claims) -> Result<TokenContent, AuthError> {
    let expires_at = claims
        .get(EXP_CLAIM)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| claim_shape(EXP_CLAIM))?;

    let kind = claims
        .get(TYPE_CLAIM)
        .and_then(|v| v.as_str())
        .ok_or_else(|| claim_shape(TYPE_CLAIM))?;

    let data = claims
        .iter()
        .filter(|(k, _)| k.as_str() != EXP_CLAIM && k.as_str() != TYPE_CLAIM)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(TokenContent::new(kind, expires_at).with_data(data))
}

fn claim_shape(claim: &str) -> AuthError {
    tracing::warn!("Token claim '{}' is missing or malformed", claim);
    AuthError::ClaimShape {
        claim: claim.to_string(),
    }
}

/// Wire name of an algorithm, as it appears in the `alg` header.
fn algorithm_name(algorithm: AlgorithmType) -> String {
    serde_json::to_value(algorithm)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("{:?}", algorithm))
}
