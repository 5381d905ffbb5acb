//! Server Configuration
//!
//! Read from the environment (and `.env`, loaded in `main`).

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::crypto::{SECRET_LEN, from_base64};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";

/// PostgreSQL connection string from `DATABASE_URL`
pub fn database_url() -> anyhow::Result<String> {
    env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")
}

/// Settings for `noah serve`
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:31113")?;

        let mut auth = match env::var("SECRET_KEY") {
            Ok(encoded) => AuthConfig::with_secret(parse_secret(&encoded)?),
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("SECRET_KEY not set, using a random key; sessions end on restart");
                AuthConfig::development()
            }
            Err(_) => bail!("SECRET_KEY must be set in production"),
        };

        if let Ok(secure) = env::var("COOKIE_SECURE") {
            auth.cookie_secure = parse_bool(&secure)
                .with_context(|| format!("COOKIE_SECURE must be true or false, got {secure:?}"))?;
        }

        Ok(Self { bind_addr, auth })
    }
}

/// Decode a base64 `SECRET_KEY` into the session signing key
fn parse_secret(encoded: &str) -> anyhow::Result<[u8; SECRET_LEN]> {
    let bytes = from_base64(encoded.trim()).context("SECRET_KEY must be base64")?;

    bytes.as_slice().try_into().map_err(|_| {
        anyhow::anyhow!(
            "SECRET_KEY must decode to {SECRET_LEN} bytes, got {}",
            bytes.len()
        )
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::crypto::to_base64;

    #[test]
    fn test_parse_secret() {
        let key = [5u8; SECRET_LEN];
        assert_eq!(parse_secret(&to_base64(&key)).unwrap(), key);
    }

    #[test]
    fn test_parse_secret_rejects_wrong_length() {
        assert!(parse_secret(&to_base64(&[1u8; 16])).is_err());
        assert!(parse_secret("not base64!").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" OFF "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
