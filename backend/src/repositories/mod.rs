//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod category;
pub mod credential;
pub mod expense;

pub use category::{CategoryRecord, CategoryRepository};
pub use credential::{
    Credential, CredentialStore, CredentialStoreError, InMemoryCredentialStore,
    PgCredentialStore,
};
pub use expense::{ExpenseRecord, ExpenseRepository, SaveExpense};

/// True if the error is a unique constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// True if the error is a foreign key violation
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

/// True if a repository error was caused by a unique constraint violation
pub(crate) fn is_conflict(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .is_some_and(is_unique_violation)
}

/// True if a repository error was caused by a foreign key violation
pub(crate) fn is_missing_reference(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .is_some_and(is_foreign_key_violation)
}
