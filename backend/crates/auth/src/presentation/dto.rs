//! Form Payloads

use serde::Deserialize;

/// POST /auth/login body (`application/x-www-form-urlencoded`)
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}
