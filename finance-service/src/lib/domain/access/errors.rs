use thiserror::Error;

use crate::domain::user::models::Role;

/// Reasons a request is refused by the access-control pipeline.
///
/// Bearer failures surface as 401, session and authorization failures as 403.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token malformed: {0}")]
    TokenMalformed(String),

    #[error("Token revoked")]
    TokenRevoked,

    #[error("User no longer exists: {0}")]
    UnknownUser(String),

    #[error("Missing session cookie")]
    MissingSession,

    #[error("Session not found")]
    SessionNotFound,

    #[error("No authenticated identity on request")]
    Unauthenticated,

    #[error("Caller does not own resource {resource_owner}")]
    NotOwner { resource_owner: String },

    #[error("Role {required} required")]
    MissingRole { required: Role },

    #[error("Credential backend error: {0}")]
    Internal(String),
}
