//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Pre-compute expensive resources**: JWT keys, the timing-equalizer
//!    hash and the DB pool are created once
//! 2. **Cheap cloning**: All fields use Arc or are already Clone-cheap
//! 3. **Immutable after creation**: State is read-only during request handling

use crate::auth::{PasswordHasher, TokenService};
use crate::config::AppConfig;
use crate::repositories::{CredentialStore, PgCredentialStore};
use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token issuance and verification with cached keys
    pub tokens: TokenService,
    /// bcrypt hasher configured with the deployment's cost
    pub passwords: PasswordHasher,
    /// Account lookup for the authentication gate and request filter
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    /// Create application state backed by PostgreSQL for credentials
    ///
    /// # Note
    /// This derives JWT keys and computes one bcrypt hash, so it should
    /// only be called once at application startup.
    pub fn new(db: PgPool, config: AppConfig) -> Result<Self> {
        let credentials = Arc::new(PgCredentialStore::new(db.clone()));
        Self::with_credential_store(db, config, credentials)
    }

    /// Create application state with a custom credential store
    pub fn with_credential_store(
        db: PgPool,
        config: AppConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let tokens = TokenService::new(&config.jwt.secret, config.jwt.token_expiry_secs)?;
        let passwords = PasswordHasher::new(config.password.bcrypt_cost)?;

        Ok(Self {
            db,
            config: Arc::new(config),
            tokens,
            passwords,
            credentials,
        })
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the token service
    #[inline]
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Get a reference to the password hasher
    #[inline]
    pub fn passwords(&self) -> &PasswordHasher {
        &self.passwords
    }

    /// Get a reference to the credential store
    #[inline]
    pub fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }
}
