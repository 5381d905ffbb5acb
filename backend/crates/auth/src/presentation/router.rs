//! Auth Router

use std::sync::Arc;

use axum::{Router, middleware, routing::get};

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{load_logged_in_user, login_required};
use crate::presentation::session::session_layer;

/// Create the `/auth` routes for any repository implementation
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/login",
            get(handlers::login_page).post(handlers::login::<R>),
        )
        .route("/logout", get(handlers::logout::<R>))
        .with_state(state)
}

/// Redirect anonymous requests to any route of `router` to the login page
///
/// Uses `route_layer`, so unmatched paths still fall through to a 404.
pub fn require_login(router: Router, config: &Arc<AuthConfig>) -> Router {
    router.route_layer(middleware::from_fn_with_state(
        config.clone(),
        login_required,
    ))
}

/// Nest the auth routes under `/auth` and wrap everything in the session
/// and user-loading layers
pub fn with_auth<R>(app: Router, state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let config = state.config.clone();

    app.nest("/auth", auth_router(state.clone()))
        .layer(middleware::from_fn_with_state(
            state,
            load_logged_in_user::<R>,
        ))
        .layer(middleware::from_fn_with_state(config, session_layer))
}
