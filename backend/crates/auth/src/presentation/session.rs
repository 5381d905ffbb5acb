//! Cookie Session
//!
//! The session is a small string-keyed map held by the client in a signed
//! cookie: `base64url(json).base64url(hmac_sha256(secret, payload))`.
//! The client can read it but cannot forge or alter it.
//!
//! [`session_layer`] decodes the cookie before the handler runs and writes
//! it back only when the handler changed the contents. Handlers reach the
//! session through the [`Session`] extractor.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use platform::cookie::{extract_cookie, to_header_value};
use platform::crypto::{from_base64url, sign, to_base64url, verify};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthError;

/// Session key holding the logged-in user's id
pub const USER_ID_KEY: &str = "user_id";

/// Session key holding pending flash messages
pub const FLASHES_KEY: &str = "_flashes";

/// Session cookie decoding errors
#[derive(Debug, Error)]
pub enum SessionCodecError {
    #[error("Malformed session cookie")]
    Malformed,

    #[error("Session cookie signature mismatch")]
    BadSignature,

    #[error("Session payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Session Data
// ============================================================================

/// Contents of a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionData(BTreeMap<String, Value>);

impl SessionData {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize and sign into a cookie value
    pub fn encode(&self, secret: &[u8]) -> Result<String, SessionCodecError> {
        let json = serde_json::to_vec(&self.0)?;
        let payload = to_base64url(&json);
        let signature = sign(secret, payload.as_bytes());
        Ok(format!("{payload}.{signature}"))
    }

    /// Verify and deserialize a cookie value
    ///
    /// The signature is checked before the payload is parsed.
    pub fn decode(cookie: &str, secret: &[u8]) -> Result<Self, SessionCodecError> {
        let (payload, signature) = cookie
            .split_once('.')
            .ok_or(SessionCodecError::Malformed)?;

        if !verify(secret, payload.as_bytes(), signature) {
            return Err(SessionCodecError::BadSignature);
        }

        let json = from_base64url(payload).map_err(|_| SessionCodecError::Malformed)?;
        Ok(Self(serde_json::from_slice(&json)?))
    }
}

// ============================================================================
// Session Handle
// ============================================================================

#[derive(Debug)]
struct SessionState {
    /// Contents as received; the cookie is rewritten only if `data` differs.
    original: SessionData,
    data: SessionData,
}

/// Handle to the current request's session
///
/// Cloning is cheap and every clone sees the same contents: the layer keeps
/// one clone to write the cookie, the handler gets another.
#[derive(Debug, Clone)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    pub fn new(data: SessionData) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState {
                original: data.clone(),
                data,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Typed read; a value of the wrong shape reads as absent
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let state = self.lock();
        let value = state.data.0.get(key)?;
        T::deserialize(value).ok()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.lock().data.0.insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.lock().data.0.remove(key)
    }

    /// Remove every key
    pub fn clear(&self) {
        self.lock().data.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lock().data.is_empty()
    }

    /// Whether the contents differ from what the client sent
    pub fn is_modified(&self) -> bool {
        let state = self.lock();
        state.data != state.original
    }

    /// Copy of the current contents
    pub fn data(&self) -> SessionData {
        self.lock().data.clone()
    }

    /// Id of the logged-in user, if any
    pub fn user_id(&self) -> Option<UserId> {
        self.get::<i64>(USER_ID_KEY).map(UserId::new)
    }

    pub fn set_user_id(&self, user_id: UserId) {
        self.insert(USER_ID_KEY, user_id.get());
    }

    /// Queue a one-time message for the next rendered page
    pub fn flash(&self, message: impl Into<String>) {
        let mut state = self.lock();
        let flashes = state
            .data
            .0
            .entry(FLASHES_KEY.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));

        match flashes {
            Value::Array(messages) => messages.push(Value::String(message.into())),
            other => *other = Value::Array(vec![Value::String(message.into())]),
        }
    }

    /// Remove and return all pending flash messages, oldest first
    pub fn take_flashes(&self) -> Vec<String> {
        let Some(Value::Array(messages)) = self.remove(FLASHES_KEY) else {
            return Vec::new();
        };

        messages
            .into_iter()
            .filter_map(|message| match message {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// `Set-Cookie` value reflecting the changes made during this request
    ///
    /// `None` when nothing changed. An emptied session deletes the cookie.
    pub fn set_cookie_value(&self, config: &AuthConfig) -> Option<String> {
        if !self.is_modified() {
            return None;
        }

        let cookie = config.session_cookie();
        let data = self.data();
        if data.is_empty() {
            return Some(cookie.build_delete_cookie());
        }

        match data.encode(&config.session_secret) {
            Ok(value) => Some(cookie.build_set_cookie(&value)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode session cookie");
                None
            }
        }
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthError::SessionMissing)
    }
}

// ============================================================================
// Layer
// ============================================================================

/// Middleware that loads the session from the cookie and persists changes
///
/// A cookie that fails verification is ignored: the request proceeds with
/// an empty session.
pub async fn session_layer(
    State(config): State<Arc<AuthConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    let data = match extract_cookie(req.headers(), &config.session_cookie_name) {
        Some(cookie) => SessionData::decode(&cookie, &config.session_secret).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding invalid session cookie");
            SessionData::default()
        }),
        None => SessionData::default(),
    };

    let session = Session::new(data);
    req.extensions_mut().insert(session.clone());

    let mut response = next.run(req).await;

    if let Some(value) = session
        .set_cookie_value(&config)
        .as_deref()
        .and_then(to_header_value)
    {
        response.headers_mut().append(header::SET_COOKIE, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [9u8; 32];

    fn config() -> AuthConfig {
        AuthConfig {
            cookie_secure: false,
            ..AuthConfig::with_secret(SECRET)
        }
    }

    #[test]
    fn test_encode_decode() {
        let session = Session::new(SessionData::default());
        session.set_user_id(UserId::new(42));

        let cookie = session.data().encode(&SECRET).unwrap();
        let decoded = SessionData::decode(&cookie, &SECRET).unwrap();

        assert_eq!(Session::new(decoded).user_id(), Some(UserId::new(42)));
    }

    #[test]
    fn test_decode_rejects_tampered_payload() {
        let session = Session::new(SessionData::default());
        session.set_user_id(UserId::new(1));
        let cookie = session.data().encode(&SECRET).unwrap();

        let (_, signature) = cookie.split_once('.').unwrap();
        let forged_payload = to_base64url(br#"{"user_id":2}"#);
        let forged = format!("{forged_payload}.{signature}");

        assert!(matches!(
            SessionData::decode(&forged, &SECRET),
            Err(SessionCodecError::BadSignature)
        ));
    }

    #[test]
    fn test_decode_rejects_other_secret() {
        let cookie = Session::new(SessionData::default()).data().encode(&SECRET).unwrap();
        assert!(SessionData::decode(&cookie, &[1u8; 32]).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            SessionData::decode("no-dot-here", &SECRET),
            Err(SessionCodecError::Malformed)
        ));
        assert!(SessionData::decode("a.b", &SECRET).is_err());
    }

    #[test]
    fn test_user_id_of_wrong_type_reads_as_absent() {
        let session = Session::new(SessionData::default());
        session.insert(USER_ID_KEY, "not a number");
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn test_flashes_are_read_once_and_ordered() {
        let session = Session::new(SessionData::default());
        session.flash("first");
        session.flash("second");

        assert_eq!(session.take_flashes(), vec!["first", "second"]);
        assert!(session.take_flashes().is_empty());
    }

    #[test]
    fn test_flash_then_take_leaves_session_unmodified() {
        let session = Session::new(SessionData::default());
        session.flash("Incorrect password.");
        let _ = session.take_flashes();

        assert!(!session.is_modified());
        assert_eq!(session.set_cookie_value(&config()), None);
    }

    #[test]
    fn test_unmodified_session_writes_no_cookie() {
        let data = {
            let session = Session::new(SessionData::default());
            session.set_user_id(UserId::new(3));
            session.data()
        };

        let session = Session::new(data);
        assert_eq!(session.user_id(), Some(UserId::new(3)));
        assert_eq!(session.set_cookie_value(&config()), None);
    }

    #[test]
    fn test_modified_session_writes_signed_cookie() {
        let session = Session::new(SessionData::default());
        session.set_user_id(UserId::new(5));

        let cookie = session.set_cookie_value(&config()).unwrap();
        assert!(cookie.starts_with("session="));
        assert!(cookie.contains("HttpOnly"));

        let value = cookie
            .trim_start_matches("session=")
            .split(';')
            .next()
            .unwrap();
        let decoded = SessionData::decode(value, &SECRET).unwrap();
        assert_eq!(Session::new(decoded).user_id(), Some(UserId::new(5)));
    }

    #[test]
    fn test_cleared_session_deletes_cookie() {
        let data = {
            let session = Session::new(SessionData::default());
            session.set_user_id(UserId::new(3));
            session.data()
        };

        let session = Session::new(data);
        session.clear();

        let cookie = session.set_cookie_value(&config()).unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_clearing_empty_session_is_a_no_op() {
        let session = Session::new(SessionData::default());
        session.clear();
        assert!(!session.is_modified());
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::new(SessionData::default());
        let handle = session.clone();
        handle.set_user_id(UserId::new(8));
        assert_eq!(session.user_id(), Some(UserId::new(8)));
    }
}
