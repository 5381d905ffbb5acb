//! User Name Value Object
//!
//! The login handle of an account. It is matched exactly: no trimming, no
//! case folding, no Unicode normalization. `Alice` and `alice` are two
//! different users, and uniqueness is enforced by the database.
//!
//! ## Invariants
//! - Not empty

use derive_more::Display;
use thiserror::Error;

/// User name validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("User name cannot be empty")]
    Empty,
}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct UserName(String);

impl UserName {
    /// Validate a user name supplied by an operator
    pub fn new(input: impl Into<String>) -> Result<Self, UserNameError> {
        let input = input.into();

        if input.is_empty() {
            return Err(UserNameError::Empty);
        }

        Ok(Self(input))
    }

    /// Restore from a stored row
    pub fn from_db(stored: String) -> Self {
        Self(stored)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
