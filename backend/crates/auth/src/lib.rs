//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - Cookie session, HTML views, handlers, router
//!
//! ## Features
//! - Login with username + password, logout
//! - Signed cookie sessions with one-time flash messages
//! - Per-request loading of the logged-in user
//! - Route guard redirecting anonymous visitors to the login page
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (PHC strings)
//! - Session cookies signed with HMAC-SHA256; tampered cookies are ignored
//! - The session is replaced wholesale on login and emptied on logout

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::{AuthAppState, CurrentUser, Session, require_login, with_auth};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod views {
    pub use crate::presentation::views::*;
}
