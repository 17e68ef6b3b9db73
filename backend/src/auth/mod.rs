//! Authentication module
//!
//! Provides JWT-based authentication with bcrypt password hashing and the
//! per-request authorization filter.

mod error;
mod jwt;
mod middleware;
mod password;

pub use error::{AuthError, TokenError};
pub use jwt::{Claims, TokenService, MAX_TOKEN_EXPIRY_SECS};
pub use middleware::{authenticate, authorize, bearer_token, is_public, AuthenticatedPrincipal};
pub use password::PasswordHasher;
