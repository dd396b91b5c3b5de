use axum::http::HeaderMap;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::Key;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::cookie::SignedCookieJar;
use config::ConfigError;

use crate::config::MIN_SECRET_LENGTH;

/// Signed cookie carrying the session id in session mode.
///
/// The HMAC key is derived from the configured session secret; cookies with
/// a bad signature are dropped by the jar and read as absent.
#[derive(Clone)]
pub struct SessionCookie {
    name: String,
    key: Key,
}

impl SessionCookie {
    /// # Errors
    /// Secret shorter than [`MIN_SECRET_LENGTH`] bytes
    pub fn new(name: impl Into<String>, secret: &[u8]) -> Result<Self, ConfigError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "session secret must be at least {MIN_SECRET_LENGTH} bytes"
            )));
        }

        Ok(Self {
            name: name.into(),
            key: Key::derive_from(secret),
        })
    }

    /// Session id from a validly signed cookie, if any.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        SignedCookieJar::from_headers(headers, self.key.clone())
            .get(&self.name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Jar that sets the cookie to `session_id`.
    pub fn set(&self, session_id: &str) -> SignedCookieJar {
        let cookie = Cookie::build((self.name.clone(), session_id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();

        SignedCookieJar::new(self.key.clone()).add(cookie)
    }

    /// Jar that tells the client to drop the cookie.
    pub fn clear(&self) -> SignedCookieJar {
        let cookie = Cookie::build((self.name.clone(), String::new()))
            .path("/")
            .build();

        SignedCookieJar::new(self.key.clone()).remove(cookie)
    }
}
