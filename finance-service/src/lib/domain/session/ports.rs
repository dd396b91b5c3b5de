use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::user::models::UserId;

/// Storage for server-side sessions, keyed by token.
///
/// Implementations must tolerate concurrent readers and writers.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Store a session, replacing any session with the same token.
    async fn insert(&self, session: Session) -> Result<(), SessionError>;

    /// Look up a session by token. Expiry is not checked here.
    async fn find(&self, token: &str) -> Result<Option<Session>, SessionError>;

    /// Remove a session. Removing an unknown token is not an error.
    async fn remove(&self, token: &str) -> Result<(), SessionError>;

    /// Remove every session belonging to `user_id`.
    ///
    /// # Returns
    /// Number of sessions removed
    async fn remove_for_user(&self, user_id: &UserId) -> Result<usize, SessionError>;

    /// Drop every session that expired before `now`.
    ///
    /// # Returns
    /// Number of sessions removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionError>;
}
