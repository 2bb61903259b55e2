//! Expiry checks for the boundary layer.
//!
//! [`TokenCodec::parse`](crate::TokenCodec::parse) returns the claimed expiry
//! without judging it. Callers that want to enforce it pass their own clock
//! reading here.

use auth_error::AuthError;

use crate::content::TokenContent;

/// Whether `content` has expired at `now` (Unix seconds).
pub fn is_expired(content: &TokenContent, now: i64) -> bool {
    now > content.expires_at
}

/// Reject `content` if it has expired at `now`.
pub fn ensure_not_expired(content: &TokenContent, now: i64) -> Result<(), AuthError> {
    if is_expired(content, now) {
        tracing::warn!("Token expired at {}, now {}", content.expires_at, now);
        return Err(AuthError::TokenExpired {
            expired_at: content.expires_at,
        });
    }
    Ok(())
}
