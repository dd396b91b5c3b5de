use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by an access token.
///
/// `iat` and `exp` are Unix timestamps in seconds; they and `jti` are stamped
/// by [`JwtHandler::issue`](super::JwtHandler::issue). Claims built with
/// [`Claims::for_identity`] leave the times at zero and `jti` empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    pub email: String,
    pub name: String,
    pub surname: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Token identifier, unique per issuance
    pub jti: String,
}

impl Claims {
    /// Create identity claims for a user, not yet stamped with times.
    pub fn for_identity(
        user_id: impl ToString,
        email: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            email: email.into(),
            name: name.into(),
            surname: surname.into(),
            iat: 0,
            exp: 0,
            jti: String::new(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is still valid during the second named by `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
