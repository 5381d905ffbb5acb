//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user and return it with its assigned id
    ///
    /// Fails with [`AuthError::UserNameTaken`](crate::error::AuthError::UserNameTaken)
    /// when the name is already registered; no row is written in that case.
    async fn create(&self, user: NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find user by exact, case-sensitive user name
    async fn find_by_user_name(&self, user_name: &str) -> AuthResult<Option<User>>;
}
