//! Application Pages
//!
//! `/` is public; `/account` sits behind the login guard.

use axum::Router;
use axum::response::Html;
use axum::routing::get;

use auth::domain::repository::UserRepository;
use auth::views::{escape_html, page};
use auth::{AuthAppState, CurrentUser, Session, require_login, with_auth};

/// GET /
pub async fn index(session: Session, current_user: CurrentUser) -> Html<String> {
    let content = match current_user.user() {
        Some(user) => format!(
            r#"<p>Logged in as <strong>{}</strong>. <a href="/account">Your account</a></p>"#,
            escape_html(user.user_name.as_str())
        ),
        None => r#"<p>You are not logged in. <a href="/auth/login">Log in</a> to continue.</p>"#
            .to_string(),
    };

    Html(page(
        "Home",
        current_user.user(),
        &session.take_flashes(),
        &content,
    ))
}

/// GET /account
pub async fn account(session: Session, current_user: CurrentUser) -> Html<String> {
    let content = current_user
        .user()
        .map(|user| {
            format!(
                "<dl><dt>User</dt><dd>{}</dd><dt>Id</dt><dd>{}</dd></dl>",
                escape_html(user.user_name.as_str()),
                user.user_id
            )
        })
        .unwrap_or_default();

    Html(page(
        "Account",
        current_user.user(),
        &session.take_flashes(),
        &content,
    ))
}

/// Full application router: pages plus `/auth`
pub fn router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let protected = require_login(
        Router::new().route("/account", get(account)),
        &state.config,
    );

    let app = Router::new().route("/", get(index)).merge(protected);

    with_auth(app, state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use auth::application::{SignUpInput, SignUpUseCase};
    use auth::{AuthConfig, InMemoryUserRepository};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    async fn app() -> Router {
        let repo = InMemoryUserRepository::new();
        SignUpUseCase::new(Arc::new(repo.clone()))
            .execute(SignUpInput {
                user_name: "alice".to_string(),
                password: "s3cret".to_string(),
            })
            .await
            .unwrap();

        router(AuthAppState::new(repo, AuthConfig::development()))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_home_page_for_guest() {
        let response = app()
            .await
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("You are not logged in."));
        assert!(body.contains(r#"href="/auth/login""#));
    }

    #[tokio::test]
    async fn test_account_page_after_login() {
        let app = app().await;

        let login = Request::post("/auth/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("username=alice&password=s3cret"))
            .unwrap();
        let response = app.clone().oneshot(login).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        let request = Request::get("/account")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<dd>alice</dd>"));
        assert!(body.contains(r#"href="/auth/logout""#));
    }

    #[tokio::test]
    async fn test_account_page_requires_login() {
        let response = app()
            .await
            .oneshot(Request::get("/account").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/auth/login");
    }
}
