//! Load User Use Case
//!
//! Resolves the user id stored in a session to the current account.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

/// Load user use case
pub struct LoadUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> LoadUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// `None` in, `None` out. An id that no longer resolves (the account
    /// row is gone) is also `None`: the visitor is simply logged out.
    pub async fn execute(&self, user_id: Option<UserId>) -> AuthResult<Option<User>> {
        let Some(user_id) = user_id else {
            return Ok(None);
        };

        let user = self.user_repo.find_by_id(user_id).await?;
        if user.is_none() {
            tracing::debug!(user_id = %user_id, "Session refers to a missing user");
        }

        Ok(user)
    }
}
