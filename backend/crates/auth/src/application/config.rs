//! Application Configuration
//!
//! Configuration for the Auth application layer.

use platform::cookie::CookieConfig;
use platform::crypto::{SECRET_LEN, random_secret};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// HMAC key that signs the session cookie
    pub session_secret: [u8; SECRET_LEN],
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Where anonymous visitors of protected views are sent
    pub login_path: String,
    /// Where login and logout land
    pub home_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            session_secret: [0u8; SECRET_LEN],
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            login_path: "/auth/login".to_string(),
            home_path: "/".to_string(),
        }
    }
}

impl AuthConfig {
    /// Production config signed with the given secret
    pub fn with_secret(session_secret: [u8; SECRET_LEN]) -> Self {
        Self {
            session_secret,
            ..Default::default()
        }
    }

    /// Create config with a random session secret
    ///
    /// Sessions do not survive a restart with this config.
    pub fn with_random_secret() -> Self {
        Self::with_secret(random_secret())
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Cookie attributes for the session cookie
    ///
    /// No Max-Age: the cookie lives as long as the browser session.
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();

        assert_eq!(config.session_cookie_name, "session");
        assert_eq!(config.login_path, "/auth/login");
        assert_eq!(config.home_path, "/");
        assert!(config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Lax);
    }

    #[test]
    fn test_with_random_secret() {
        let config1 = AuthConfig::with_random_secret();
        let config2 = AuthConfig::with_random_secret();

        assert_ne!(config1.session_secret, config2.session_secret);
        assert!(config1.cookie_secure);
    }

    #[test]
    fn test_development_config() {
        let config = AuthConfig::development();

        assert!(!config.cookie_secure);
        assert!(config.session_secret.iter().any(|&b| b != 0));
        assert!(!config.session_cookie().secure);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = AuthConfig::default().session_cookie();

        assert_eq!(cookie.name, "session");
        assert!(cookie.http_only);
        assert_eq!(cookie.path, "/");
        assert!(cookie.max_age_secs.is_none());
    }
}
