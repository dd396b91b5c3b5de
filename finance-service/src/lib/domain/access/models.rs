use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Caller identity resolved for the lifetime of one request.
///
/// Recomputed from the user store on every request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub role: Role,
}

impl From<&User> for AuthenticatedIdentity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_string(),
            name: user.name.as_str().to_string(),
            surname: user.surname.as_str().to_string(),
            role: user.role,
        }
    }
}

/// The raw credential artifact the caller presented (token or session id).
///
/// Kept next to the identity so logout can revoke exactly what was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedCredential(pub String);

/// Credential handed out on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssuedCredential {
    /// Signed bearer token, sent back in the response body.
    Bearer {
        token: String,
        expires_at: DateTime<Utc>,
    },
    /// Opaque session id, sent back as a signed cookie.
    Session {
        token: String,
        expires_at: DateTime<Utc>,
    },
}

impl IssuedCredential {
    pub fn token(&self) -> &str {
        match self {
            IssuedCredential::Bearer { token, .. } | IssuedCredential::Session { token, .. } => {
                token
            }
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        match self {
            IssuedCredential::Bearer { expires_at, .. }
            | IssuedCredential::Session { expires_at, .. } => *expires_at,
        }
    }
}

/// Where a verifier expects to find the credential artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialTransport {
    /// `Authorization: Bearer <token>`
    AuthorizationHeader,
    /// Signed cookie carrying the session id
    Cookie,
}
