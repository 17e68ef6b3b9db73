//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the authentication core.

pub mod category;
pub mod expense;
pub mod user;

pub use category::CategoryService;
pub use expense::ExpenseService;
pub use user::UserService;
