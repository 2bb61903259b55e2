//! Common error types for bearer token authentication.
//!
//! This crate provides the failure taxonomy shared by token signing,
//! parsing and pair issuance, along with its mapping to HTTP responses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authentication-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A claim could not be encoded, or the signer rejected the token.
    #[error("Token signing failed: {0}")]
    Signing(String),

    /// No token could be found, or the token is not a well-formed JWS string.
    #[error("Token extraction failed: {0}")]
    Extraction(String),

    #[error("Unexpected signing algorithm: expected {expected}, got {found}")]
    AlgorithmMismatch { expected: String, found: String },

    #[error("Token signature verification failed")]
    Verification,

    /// `exp` or `type` is missing or has the wrong JSON type.
    #[error("Claim '{claim}' is missing or malformed")]
    ClaimShape { claim: String },

    #[error("Token type mismatch: expected {expected}, got {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Token expired at {expired_at}")]
    TokenExpired { expired_at: i64 },
}

impl AuthError {
    /// Whether the failure was caused by what the client sent.
    ///
    /// Everything else is a server-side problem (misconfiguration or a
    /// programming error in the caller).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::Extraction(_)
                | AuthError::AlgorithmMismatch { .. }
                | AuthError::Verification
                | AuthError::ClaimShape { .. }
                | AuthError::TokenExpired { .. }
        )
    }

    /// HTTP status code to answer with.
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            401
        } else {
            500
        }
    }

    /// Error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Signing(_) => "AUTH_TOKEN_SIGNING_FAILED",
            AuthError::Extraction(_) => "AUTH_TOKEN_MISSING",
            AuthError::AlgorithmMismatch { .. } => "AUTH_ALGORITHM_MISMATCH",
            AuthError::Verification => "AUTH_INVALID_SIGNATURE",
            AuthError::ClaimShape { .. } => "AUTH_MALFORMED_CLAIMS",
            AuthError::TypeMismatch { .. } => "AUTH_TOKEN_TYPE_MISMATCH",
            AuthError::InvalidKey(_) => "AUTH_INVALID_KEY",
            AuthError::TokenExpired { .. } => "AUTH_TOKEN_EXPIRED",
        }
    }
}

/// Error response for API clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Add details to the error response.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let message = match &err {
            AuthError::Extraction(_) => "Missing or malformed bearer token",
            AuthError::AlgorithmMismatch { .. }
            | AuthError::Verification
            | AuthError::ClaimShape { .. } => "Invalid token",
            AuthError::TokenExpired { .. } => "Token has expired",
            // Server-side failures keep their detail out of the response body.
            AuthError::Signing(_) | AuthError::TypeMismatch { .. } | AuthError::InvalidKey(_) => {
                return Self::new(err.code(), "Internal authentication error");
            }
        };
        Self::new(err.code(), message).with_details(err.to_string())
    }
}

/// Result type alias using AuthError.
pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_401() {
        let errors = [
            AuthError::Extraction("empty".to_string()),
            AuthError::AlgorithmMismatch {
                expected: "HS256".to_string(),
                found: "none".to_string(),
            },
            AuthError::Verification,
            AuthError::ClaimShape {
                claim: "exp".to_string(),
            },
            AuthError::TokenExpired { expired_at: 0 },
        ];

        for err in errors {
            assert!(err.is_client_error(), "{err} should be a client error");
            assert_eq!(err.status_code(), 401);
        }
    }

    #[test]
    fn test_server_errors_map_to_500() {
        let errors = [
            AuthError::Signing("bad claim".to_string()),
            AuthError::TypeMismatch {
                expected: "access".to_string(),
                found: "refresh".to_string(),
            },
            AuthError::InvalidKey("empty".to_string()),
        ];

        for err in errors {
            assert!(!err.is_client_error(), "{err} should be a server error");
            assert_eq!(err.status_code(), 500);
        }
    }

    #[test]
    fn test_error_response_hides_server_details() {
        let response = ErrorResponse::from(AuthError::InvalidKey("secret is empty".to_string()));
        assert_eq!(response.code, "AUTH_INVALID_KEY");
        assert!(response.details.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_error_response_from_client_error() {
        let response = ErrorResponse::from(AuthError::ClaimShape {
            claim: "type".to_string(),
        });
        assert_eq!(response.code, "AUTH_MALFORMED_CLAIMS");
        assert_eq!(response.message, "Invalid token");
        assert_eq!(
            response.details.as_deref(),
            Some("Claim 'type' is missing or malformed")
        );
    }
}
