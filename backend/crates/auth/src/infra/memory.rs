//! In-Memory Repository Implementation
//!
//! Behaves like the PostgreSQL repository (sequential ids, exact-match
//! unique user names) without a database. Used by the test suite and by
//! `noah serve --in-memory` for local development.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    last_id: i64,
}

/// Process-local user store
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let mut state = self.lock();

        if state
            .users
            .iter()
            .any(|existing| existing.user_name == user.user_name)
        {
            return Err(AuthError::UserNameTaken);
        }

        state.last_id += 1;
        let user = user.into_user(UserId::new(state.last_id));
        state.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.user_id == user_id)
            .cloned())
    }

    async fn find_by_user_name(&self, user_name: &str) -> AuthResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.user_name.as_str() == user_name)
            .cloned())
    }
}
