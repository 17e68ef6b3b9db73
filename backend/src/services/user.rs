//! User service for registration and login
//!
//! # Performance Optimizations
//!
//! - Password hashing/verification runs on blocking thread pool
//! - Token service is passed by reference (pre-computed keys)

use crate::auth::{AuthError, PasswordHasher, TokenService};
use crate::repositories::{Credential, CredentialStore, CredentialStoreError};
use expense_tracker_shared::types::AuthToken;
use expense_tracker_shared::Role;
use tracing::{info, warn};

/// Authentication gate: credential checks and token issuance
pub struct UserService;

impl UserService {
    /// Register a new account
    ///
    /// The password is hashed before anything is stored. A duplicate
    /// username fails with `AlreadyExists`, including when a concurrent
    /// registration wins the race between the existence check and the insert.
    pub async fn register(
        store: &dyn CredentialStore,
        hasher: &PasswordHasher,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Credential, AuthError> {
        if store
            .exists_by_username(username)
            .await
            .map_err(|e| AuthError::Unexpected(e.into()))?
        {
            return Err(AuthError::AlreadyExists);
        }

        let password_hash = hasher.hash_async(password.to_string()).await?;

        let credential = Credential {
            username: username.to_string(),
            password_hash,
            role,
        };

        match store.save(&credential).await {
            Ok(()) => {}
            Err(CredentialStoreError::Conflict(_)) => return Err(AuthError::AlreadyExists),
            Err(e) => return Err(AuthError::Unexpected(e.into())),
        }

        info!(username = %credential.username, role = %credential.role, "User registered");
        Ok(credential)
    }

    /// Check credentials and issue an access token
    ///
    /// Unknown usernames and wrong passwords fail identically, and both
    /// pay for one bcrypt verification.
    pub async fn login(
        store: &dyn CredentialStore,
        hasher: &PasswordHasher,
        tokens: &TokenService,
        username: &str,
        password: &str,
    ) -> Result<AuthToken, AuthError> {
        let credential = store
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::Unexpected(e.into()))?;

        let Some(credential) = credential else {
            hasher.verify_dummy(password.to_string()).await?;
            warn!(username = %username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let valid = hasher
            .verify_async(password.to_string(), credential.password_hash.clone())
            .await?;

        if !valid {
            warn!(username = %username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = tokens.issue(&credential.username)?;

        info!(username = %credential.username, "Token issued");
        Ok(AuthToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.expiry_secs(),
        })
    }
}
