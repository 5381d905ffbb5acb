//! Sign Up Use Case
//!
//! Registers a new user account. Reached only from the `add-user`
//! command; there is no public sign-up route.

use std::sync::Arc;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub password: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Hash the password and insert the account
    ///
    /// A duplicate name surfaces as [`AuthError::UserNameTaken`], decided by
    /// the store's unique constraint rather than a separate lookup.
    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        let user_name = UserName::new(input.user_name)?;
        let raw_password = RawPassword::new(input.password)?;

        // Argon2 is CPU-bound by design; keep it off the async workers.
        let password_hash =
            tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw_password))
                .await
                .map_err(|e| {
                    AuthError::Internal(format!("Password hashing task failed: {e}"))
                })??;

        let user = self
            .user_repo
            .create(NewUser::new(user_name, password_hash))
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(user)
    }
}
