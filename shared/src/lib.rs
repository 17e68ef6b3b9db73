//! Expense Tracker Shared Library
//!
//! This crate contains shared types, models, and validation used by
//! the backend and any API client.

pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use models::{Category, Expense, Role};
pub use types::*;
