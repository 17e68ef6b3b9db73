//! Authentication failure kinds

use crate::error::ApiError;
use thiserror::Error;

/// Why a token failed verification
///
/// Only ever logged; clients see a single unauthorized response.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature does not match")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed,
}

/// Failures of the authentication gate and request filter
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user already exists")]
    AlreadyExists,

    #[error("invalid token")]
    TokenInvalid,

    #[error("unexpected authentication failure: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        tracing::debug!(reason = %err, "Token rejected");
        AuthError::TokenInvalid
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            // Login failures and token failures look identical to the client
            AuthError::InvalidCredentials | AuthError::TokenInvalid => {
                ApiError::Unauthorized("Unauthorized".to_string())
            }
            AuthError::AlreadyExists => ApiError::Conflict("User already exists".to_string()),
            AuthError::Unexpected(e) => ApiError::Internal(e),
        }
    }
}
