//! JWT token issuance and verification
//!
//! Tokens are HS256-signed, carry only the subject and their validity
//! window, and are never stored server-side.

use super::error::TokenError;
use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Longest accepted token lifetime (30 days)
pub const MAX_TOKEN_EXPIRY_SECS: i64 = 30 * 24 * 60 * 60;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// Token issuance and verification
///
/// Cloning is cheap: keys and validation rules are shared behind `Arc`.
#[derive(Clone)]
pub struct TokenService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    expiry_secs: i64,
}

impl TokenService {
    /// Create a token service with pre-computed keys
    ///
    /// Call this once at application startup and store in AppState.
    /// Fails if `expiry_secs` is not within `1..=MAX_TOKEN_EXPIRY_SECS`.
    pub fn new(secret: &str, expiry_secs: i64) -> Result<Self> {
        if !(1..=MAX_TOKEN_EXPIRY_SECS).contains(&expiry_secs) {
            bail!(
                "token expiry must be between 1 and {} seconds, got {}",
                MAX_TOKEN_EXPIRY_SECS,
                expiry_secs
            );
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Ok(Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            expiry_secs,
        })
    }

    /// Issue a token for `subject`, valid for the configured TTL from now
    #[inline]
    pub fn issue(&self, subject: &str) -> Result<String> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`
    pub(crate) fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String> {
        let exp = Duration::try_seconds(self.expiry_secs)
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| anyhow!("Token expiry out of range"))?;

        let claims = Claims {
            sub: subject.to_string(),
            exp: exp.timestamp(),
            iat: issued_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, self.keys.encoding())
            .map_err(|e| anyhow!("Failed to sign token: {}", e))
    }

    /// Verify a token and return its claims
    ///
    /// The signature is checked before any claim, so a tampered token is
    /// reported as such even when it is also expired.
    pub fn verify_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, self.keys.decoding(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }

    /// Verify a token and return the subject it was issued for
    #[inline]
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_claims(token).map(|claims| claims.sub)
    }

    /// Token lifetime in seconds
    #[inline]
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }
}
