//! Auth Middleware
//!
//! `load_logged_in_user` runs on every request and publishes a
//! [`CurrentUser`]. `login_required` guards individual routes.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::application::LoadUserUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::handlers::AuthAppState;
use crate::presentation::session::Session;

/// The user behind the current request, if logged in
///
/// Extracting it never fails: a request the loader did not see is anonymous.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(Option<User>);

impl CurrentUser {
    pub fn new(user: Option<User>) -> Self {
        Self(user)
    }

    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Middleware that resolves the session's user id to a [`CurrentUser`]
///
/// A missing or stale id yields an anonymous user. Repository failures
/// abort the request with a 500.
pub async fn load_logged_in_user<R>(
    State(state): State<AuthAppState<R>>,
    session: Session,
    mut req: Request,
    next: Next,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoadUserUseCase::new(state.repo.clone());
    let user = use_case.execute(session.user_id()).await?;

    req.extensions_mut().insert(CurrentUser::new(user));

    Ok(next.run(req).await)
}

/// Middleware that redirects anonymous visitors to the login page
pub async fn login_required(
    State(config): State<Arc<AuthConfig>>,
    current_user: CurrentUser,
    req: Request,
    next: Next,
) -> Response {
    if !current_user.is_authenticated() {
        tracing::debug!(path = %req.uri().path(), "Login required, redirecting");
        return Redirect::to(&config.login_path).into_response();
    }

    next.run(req).await
}
