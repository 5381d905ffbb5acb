//! Noah Server Entry Point
//!
//! Parses the command line and either serves the web application or
//! manages user accounts. Uses `anyhow` for startup errors; request-level
//! errors go through `auth::AuthError` and `kernel::error::AppError`.

mod cli;
mod config;
mod pages;

use std::sync::Arc;

use anyhow::Context;
use auth::application::{SignUpInput, SignUpUseCase};
use auth::domain::repository::UserRepository;
use auth::{AuthAppState, AuthError, InMemoryUserRepository, PgUserRepository};
use clap::Parser;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::config::{ServerConfig, database_url};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "noah=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Cli::parse().command.unwrap_or_default() {
        Command::Serve {
            in_memory: true,
            users,
        } => {
            let repo = InMemoryUserRepository::new();
            for entry in users {
                let (username, password) = entry
                    .split_once(':')
                    .context("--user expects USERNAME:PASSWORD")?;
                add_user(repo.clone(), username.to_string(), password.to_string()).await?;
            }
            tracing::warn!("Serving from process memory; accounts are lost on exit");
            serve(repo, ServerConfig::from_env()?).await
        }
        Command::Serve { in_memory: false, .. } => {
            let pool = connect().await?;
            serve(PgUserRepository::new(pool), ServerConfig::from_env()?).await
        }
        Command::AddUser { username, password } => {
            let pool = connect().await?;
            add_user(PgUserRepository::new(pool), username, password).await
        }
        Command::GenerateSecret => {
            println!("{}", platform::crypto::to_base64(&platform::crypto::random_secret()));
            Ok(())
        }
    }
}

/// Connect to PostgreSQL and bring the schema up to date
async fn connect() -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url()?)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    Ok(pool)
}

/// Register an account and report the outcome on stdout
async fn add_user<R>(repo: R, username: String, password: String) -> anyhow::Result<()>
where
    R: UserRepository,
{
    println!("{}", register_user(repo, username, password).await?);
    Ok(())
}

/// Register an account and describe the outcome
///
/// An already registered name is reported, not treated as a failure.
async fn register_user<R>(repo: R, username: String, password: String) -> anyhow::Result<String>
where
    R: UserRepository,
{
    let use_case = SignUpUseCase::new(Arc::new(repo));

    let input = SignUpInput {
        user_name: username.clone(),
        password,
    };

    match use_case.execute(input).await {
        Ok(_) => Ok(format!("Successfully added {username} to database.")),
        Err(AuthError::UserNameTaken) => Ok(format!("User {username} is already registered.")),
        Err(e) => Err(e).context(format!("Failed to add user {username}")),
    }
}

async fn serve<R>(repo: R, config: ServerConfig) -> anyhow::Result<()>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let app = pages::router(AuthAppState::new(repo, config.auth)).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_user_messages() {
        let repo = InMemoryUserRepository::new();

        let message = register_user(repo.clone(), "alice".to_string(), "s3cret".to_string())
            .await
            .unwrap();
        assert_eq!(message, "Successfully added alice to database.");

        let message = register_user(repo.clone(), "alice".to_string(), "other".to_string())
            .await
            .unwrap();
        assert_eq!(message, "User alice is already registered.");

        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_register_user_empty_input_is_an_error() {
        let repo = InMemoryUserRepository::new();

        assert!(register_user(repo.clone(), String::new(), "s3cret".to_string())
            .await
            .is_err());
        assert!(register_user(repo.clone(), "alice".to_string(), String::new())
            .await
            .is_err());
        assert!(repo.is_empty());
    }
}
