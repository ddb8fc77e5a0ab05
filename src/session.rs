//! Cookie-based session identity
//!
//! A session is nothing more than an opaque key carried in a cookie. The
//! server never stores or validates it; the key only partitions to-do rows.

use crate::config::SessionConfig;
use crate::error::{Result, TodoError};
use axum::http::{header, HeaderMap, HeaderValue};
use uuid::Uuid;

/// Session key resolved for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey {
    /// The opaque key
    pub key: String,
    /// True when the key was minted for this request and must be sent back
    pub is_new: bool,
}

/// Read the session cookie from request headers
///
/// Returns `None` when no cookie named `cookie_name` is present or its value
/// is empty.
pub fn session_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == cookie_name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Reuse the caller's session key or mint a new one
///
/// # Examples
///
/// ```
/// use axum::http::HeaderMap;
/// use session_todo::session::ensure_session;
///
/// let session = ensure_session(&HeaderMap::new(), "session_key");
/// assert!(session.is_new);
/// assert!(!session.key.is_empty());
/// ```
pub fn ensure_session(headers: &HeaderMap, cookie_name: &str) -> SessionKey {
    match session_from_headers(headers, cookie_name) {
        Some(key) => SessionKey { key, is_new: false },
        None => {
            let key = new_session_key();
            tracing::debug!(session_key = %key, "Issued new session");
            SessionKey { key, is_new: true }
        }
    }
}

/// Generate a fresh opaque session key
pub fn new_session_key() -> String {
    Uuid::new_v4().to_string()
}

/// Build the `Set-Cookie` header value for `key`
pub fn session_cookie(key: &str, config: &SessionConfig) -> Result<HeaderValue> {
    let mut cookie = format!("{}={}; Path=/; SameSite=Lax", config.cookie_name, key);
    if config.http_only {
        cookie.push_str("; HttpOnly");
    }
    if config.secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|e| TodoError::Config(format!("Invalid session cookie: {}", e)).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_session_from_headers_finds_named_cookie() {
        let headers = headers_with_cookie("theme=dark; session_key=abc123; other=1");
        assert_eq!(
            session_from_headers(&headers, "session_key").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_session_from_headers_ignores_prefix_match() {
        let headers = headers_with_cookie("session_key_old=zzz");
        assert!(session_from_headers(&headers, "session_key").is_none());
    }

    #[test]
    fn test_session_from_headers_empty_value_is_none() {
        let headers = headers_with_cookie("session_key=");
        assert!(session_from_headers(&headers, "session_key").is_none());
    }

    #[test]
    fn test_session_from_headers_across_multiple_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("session_key=xyz"));
        assert_eq!(
            session_from_headers(&headers, "session_key").as_deref(),
            Some("xyz")
        );
    }

    #[test]
    fn test_ensure_session_reuses_existing_key() {
        let headers = headers_with_cookie("session_key=existing");
        let session = ensure_session(&headers, "session_key");
        assert_eq!(
            session,
            SessionKey {
                key: "existing".to_string(),
                is_new: false
            }
        );
    }

    #[test]
    fn test_ensure_session_mints_unique_keys() {
        let a = ensure_session(&HeaderMap::new(), "session_key");
        let b = ensure_session(&HeaderMap::new(), "session_key");
        assert!(a.is_new && b.is_new);
        assert_ne!(a.key, b.key);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let config = SessionConfig::default();
        let value = session_cookie("abc", &config).unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("session_key=abc;"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("HttpOnly"));
        assert!(!value.contains("Secure"));

        let secure = SessionConfig {
            secure: true,
            http_only: false,
            ..SessionConfig::default()
        };
        let value = session_cookie("abc", &secure).unwrap();
        let value = value.to_str().unwrap();
        assert!(value.contains("Secure"));
        assert!(!value.contains("HttpOnly"));
    }

    #[test]
    fn test_session_cookie_rejects_invalid_bytes() {
        assert!(session_cookie("bad\nkey", &SessionConfig::default()).is_err());
    }

    #[test]
    fn test_session_cookie_failure_is_a_server_error() {
        let config = SessionConfig {
            cookie_name: "bad\nname".to_string(),
            ..SessionConfig::default()
        };
        let err = session_cookie("abc", &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TodoError>(),
            Some(TodoError::Config(_))
        ));

        let api = crate::server::ApiError::from(err);
        assert_eq!(api.status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
