//! Password hashing using bcrypt
//!
//! Provides secure password hashing and verification.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. The async variants run on the
//! blocking thread pool so request handling is not starved.

use anyhow::Result;
use std::sync::Arc;

const DUMMY_PASSWORD: &str = "timing-equalizer-password";

/// Password hashing service
///
/// Every hash embeds its own random salt and cost, so hashes produced with
/// an older cost setting keep verifying after the cost is raised.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Hash checked against when the account does not exist, so a missing
    /// user costs the same as a wrong password.
    dummy_hash: Arc<str>,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost (4..=31)
    ///
    /// Computes one hash up front, so this should only be called at startup.
    pub fn new(cost: u32) -> Result<Self> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, cost)
            .map_err(|e| anyhow::anyhow!("Invalid bcrypt cost {}: {}", cost, e))?;

        Ok(Self {
            cost,
            dummy_hash: dummy_hash.into(),
        })
    }

    /// Configured work factor
    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password (blocking operation)
    pub fn hash(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Returns `Ok(false)` on mismatch. A stored hash that cannot be parsed
    /// is an error: it means the credential data is corrupt.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(&self, password: String) -> Result<String> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(&self, password: String, hash: String) -> Result<bool> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Spend one verification's worth of CPU without a real hash
    pub async fn verify_dummy(&self, password: String) -> Result<()> {
        let hash = self.dummy_hash.to_string();
        self.verify_async(password, hash).await.map(|_| ())
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the suite fast; production cost is enforced by config.
    fn test_hasher() -> PasswordHasher {
        PasswordHasher::new(4).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = test_hasher();
        let hash = hasher.hash("secure_password_123").unwrap();

        assert!(hasher.verify("secure_password_123", &hash).unwrap());
        assert!(!hasher.verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hasher = test_hasher();
        let hash = hasher.hash("secret123").unwrap();
        assert!(!hash.contains("secret123"));
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hasher = test_hasher();
        let hash1 = hasher.hash("test_password").unwrap();
        let hash2 = hasher.hash("test_password").unwrap();

        // Hashes should be different due to random salt
        assert_ne!(hash1, hash2);

        assert!(hasher.verify("test_password", &hash1).unwrap());
        assert!(hasher.verify("test_password", &hash2).unwrap());
    }

    #[test]
    fn test_cost_is_embedded_in_hash() {
        let hash = test_hasher().hash("test_password").unwrap();
        assert!(hash.contains("$04$"));
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = test_hasher();
        assert!(hasher.verify("anything", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn test_invalid_cost_rejected() {
        assert!(PasswordHasher::new(2).is_err());
        assert!(PasswordHasher::new(32).is_err());
    }

    #[test]
    fn test_debug_omits_dummy_hash() {
        let debug = format!("{:?}", test_hasher());
        assert!(debug.contains("cost: 4"));
        assert!(!debug.contains("$2"));
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let hasher = test_hasher();
        let hash = hasher.hash_async("async_test_password".to_string()).await.unwrap();

        assert!(hasher
            .verify_async("async_test_password".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!hasher.verify_async("wrong".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_dummy_succeeds() {
        assert!(test_hasher().verify_dummy("whatever".to_string()).await.is_ok());
    }
}
