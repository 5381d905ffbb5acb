//! User Entity
//!
//! One row of the `users` table.

use crate::domain::value_object::{
    user_id::UserId, user_name::UserName, user_password::UserPassword,
};

/// User account
///
/// Created only by the registration command. Nothing in this crate
/// updates or deletes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Database-assigned identifier
    pub user_id: UserId,
    /// Unique, case-sensitive login name
    pub user_name: UserName,
    pub password_hash: UserPassword,
}

/// A user that has not been stored yet and therefore has no id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub password_hash: UserPassword,
}

impl NewUser {
    pub fn new(user_name: UserName, password_hash: UserPassword) -> Self {
        Self {
            user_name,
            password_hash,
        }
    }

    /// Attach the id the store assigned on insert
    pub fn into_user(self, user_id: UserId) -> User {
        User {
            user_id,
            user_name: self.user_name,
            password_hash: self.password_hash,
        }
    }
}
