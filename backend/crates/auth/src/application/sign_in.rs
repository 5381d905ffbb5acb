//! Sign In Use Case
//!
//! Checks a user name and password pair. Establishing the session is left
//! to the presentation layer, which owns the cookie.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_password::RawPassword;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in use case
///
/// Failed attempts are neither counted nor throttled; every attempt is
/// independent.
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Returns the authenticated user, or
    /// [`AuthError::IncorrectUserName`] / [`AuthError::IncorrectPassword`].
    pub async fn execute(&self, input: SignInInput) -> AuthResult<User> {
        let user = self
            .user_repo
            .find_by_user_name(&input.user_name)
            .await?
            .ok_or(AuthError::IncorrectUserName)?;

        let raw_password = RawPassword::submitted(input.password);
        let password_hash = user.password_hash.clone();

        let password_valid =
            tokio::task::spawn_blocking(move || password_hash.verify(&raw_password))
                .await
                .map_err(|e| {
                    AuthError::Internal(format!("Password verification task failed: {e}"))
                })?;

        if !password_valid {
            tracing::debug!(user_id = %user.user_id, "Sign in rejected: incorrect password");
            return Err(AuthError::IncorrectPassword);
        }

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed in"
        );

        Ok(user)
    }
}
