//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`],
//! and the HTTP rendering of [`AppError`] itself.

use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::bad_request("Malformed JSON").with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a PostgreSQL SQLSTATE code
///
/// See <https://www.postgresql.org/docs/current/errcodes-appendix.html>
#[cfg(feature = "sqlx")]
fn classify_sqlstate(code: &str) -> (ErrorKind, &'static str) {
    match code {
        // Class 23 - Integrity Constraint Violation
        "23505" => (ErrorKind::Conflict, "Duplicate key value"),
        "23502" => (ErrorKind::BadRequest, "Required field is null"),
        "23503" => (ErrorKind::Conflict, "Foreign key violation"),
        "23514" => (ErrorKind::BadRequest, "Check constraint violation"),
        c if c.starts_with("23") => (ErrorKind::Conflict, "Integrity constraint violation"),
        // Class 53 - Insufficient Resources, Class 57 - Operator Intervention
        c if c.starts_with("53") => (ErrorKind::ServiceUnavailable, "Database resource exhausted"),
        c if c.starts_with("57") => (ErrorKind::ServiceUnavailable, "Database unavailable"),
        _ => (ErrorKind::InternalServerError, "Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                let (kind, message) = db_err
                    .code()
                    .map(|code| classify_sqlstate(&code))
                    .unwrap_or((ErrorKind::InternalServerError, "Database error"));
                AppError::new(kind, message).with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
        });

        (status, Json(body)).into_response()
    }
}
