//! Signed access/refresh tokens for microservices.
//!
//! This crate issues HS256 JWTs carrying arbitrary application claims,
//! parses and verifies them, and extracts them from `Authorization: Bearer`
//! headers.
//!
//! ```no_run
//! use bearer_auth::{PairIssuer, TokenCodec, TokenContent};
//!
//! # fn main() -> Result<(), bearer_auth::AuthError> {
//! let codec = TokenCodec::new("secret1")?;
//! let token = codec.sign(&TokenContent::access(1516239022).with_claim("sub", "user123")?)?;
//!
//! let content = codec.parse_bearer(&format!("Bearer {}", token))?;
//! assert!(content.kind.is_access());
//!
//! let pair = PairIssuer::new(codec).issue_pair(
//!     1516239022,
//!     1516839022,
//!     Default::default(),
//!     Default::default(),
//! )?;
//! # let _ = pair;
//! # Ok(())
//! # }
//! ```

mod bearer;
mod codec;
mod config;
mod content;
pub mod expiry;
mod key;
mod pair;

pub use bearer::{
    extract_from_header, extract_from_headers, extract_token, HeaderSource, AUTHORIZATION_HEADER,
};
pub use codec::TokenCodec;
pub use config::JwtConfig;
pub use content::{ClaimValue, Claims, TokenContent, TokenKind, EXP_CLAIM, TYPE_CLAIM};
pub use expiry::{ensure_not_expired, is_expired};
pub use key::SigningKey;
pub use pair::{PairIssuer, TokenPair};

pub use auth_error::{AuthError, ErrorResponse};
