//! Credential store for registered accounts
//!
//! The authentication core only needs three operations, so the store is a
//! trait with exactly those. `PgCredentialStore` backs production; the
//! in-memory store backs tests and database-less local runs.

use async_trait::async_trait;
use expense_tracker_shared::Role;
use sqlx::PgPool;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

use super::is_unique_violation;

/// A registered account
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Credential store failures
#[derive(Error, Debug)]
pub enum CredentialStoreError {
    #[error("username already taken: {0}")]
    Conflict(String),

    #[error("stored credential is invalid: {0}")]
    InvalidRecord(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence for credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a credential by username
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, CredentialStoreError>;

    /// Check whether a username is taken
    async fn exists_by_username(&self, username: &str) -> Result<bool, CredentialStoreError>;

    /// Insert a new credential
    ///
    /// Fails with `Conflict` if the username is already present, even when
    /// a racing registration got there first.
    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError>;
}

/// User row from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct CredentialRecord {
    username: String,
    password_hash: String,
    role: String,
}

impl TryFrom<CredentialRecord> for Credential {
    type Error = CredentialStoreError;

    fn try_from(record: CredentialRecord) -> Result<Self, Self::Error> {
        let role = record
            .role
            .parse::<Role>()
            .map_err(CredentialStoreError::InvalidRecord)?;

        Ok(Credential {
            username: record.username,
            password_hash: record.password_hash,
            role,
        })
    }
}

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, CredentialStoreError> {
        let record = sqlx::query_as::<_, CredentialRecord>(
            r#"
            SELECT username, password_hash, role
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        record.map(Credential::try_from).transpose()
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, CredentialStoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&credential.username)
        .bind(&credential.password_hash)
        .bind(credential.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CredentialStoreError::Conflict(credential.username.clone())
            } else {
                CredentialStoreError::Database(e)
            }
        })?;

        Ok(())
    }
}

/// Credential store kept in process memory
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<HashMap<String, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials
    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, CredentialStoreError> {
        Ok(self.credentials.read().await.get(username).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, CredentialStoreError> {
        Ok(self.credentials.read().await.contains_key(username))
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        let mut credentials = self.credentials.write().await;
        if credentials.contains_key(&credential.username) {
            return Err(CredentialStoreError::Conflict(credential.username.clone()));
        }
        credentials.insert(credential.username.clone(), credential.clone());
        Ok(())
    }
}
