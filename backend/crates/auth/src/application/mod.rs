//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod load_user;
pub mod sign_in;
pub mod sign_up;

// Re-exports
pub use config::AuthConfig;
pub use load_user::LoadUserUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpUseCase};
