//! HTTP Handlers

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::application::config::AuthConfig;
use crate::application::{SignInInput, SignInUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::LoginForm;
use crate::presentation::middleware::CurrentUser;
use crate::presentation::session::Session;
use crate::presentation::views;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// GET /auth/login
pub async fn login_page(session: Session, current_user: CurrentUser) -> Html<String> {
    Html(views::login_page(
        current_user.user(),
        &session.take_flashes(),
    ))
}

/// POST /auth/login
///
/// On success the session is replaced by one holding only the user id.
/// A wrong user name or password is flashed and the form is rendered again
/// in the same response.
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    session: Session,
    current_user: CurrentUser,
    Form(form): Form<LoginForm>,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone());

    let input = SignInInput {
        user_name: form.username,
        password: form.password,
    };

    match use_case.execute(input).await {
        Ok(user) => {
            session.clear();
            session.set_user_id(user.user_id);
            Ok(Redirect::to(&state.config.home_path).into_response())
        }
        Err(e) if e.is_login_failure() => {
            session.flash(e.to_string());
            let html = views::login_page(current_user.user(), &session.take_flashes());
            Ok(Html(html).into_response())
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Logout
// ============================================================================

/// GET /auth/logout
pub async fn logout<R>(State(state): State<AuthAppState<R>>, session: Session) -> Redirect
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    if let Some(user_id) = session.user_id() {
        tracing::info!(user_id = %user_id, "User signed out");
    }

    session.clear();
    Redirect::to(&state.config.home_path)
}
