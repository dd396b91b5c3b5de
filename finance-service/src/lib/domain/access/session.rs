use std::sync::Arc;

use async_trait::async_trait;
use auth::Clock;
use chrono::Duration;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::AuthenticatedIdentity;
use crate::domain::access::models::CredentialTransport;
use crate::domain::access::models::IssuedCredential;
use crate::domain::access::ports::CredentialIssuer;
use crate::domain::access::ports::CredentialVerifier;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionStore;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;

/// Cookie-carried opaque sessions backed by a [`SessionStore`].
///
/// A session is only valid while unexpired and while its user still exists;
/// sessions failing either check are removed when looked up. A user holds at
/// most one session: logging in replaces the previous one.
pub struct SessionCredentials<UR, SS>
where
    UR: UserRepository,
    SS: SessionStore,
{
    users: Arc<UR>,
    sessions: Arc<SS>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl<UR, SS> SessionCredentials<UR, SS>
where
    UR: UserRepository,
    SS: SessionStore,
{
    pub fn new(users: Arc<UR>, sessions: Arc<SS>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            users,
            sessions,
            clock,
            ttl,
        }
    }

    async fn discard(&self, token: &str) -> Result<(), AccessError> {
        self.sessions
            .remove(token)
            .await
            .map_err(|e| AccessError::Internal(e.to_string()))
    }
}

#[async_trait]
impl<UR, SS> CredentialVerifier for SessionCredentials<UR, SS>
where
    UR: UserRepository,
    SS: SessionStore,
{
    fn transport(&self) -> CredentialTransport {
        CredentialTransport::Cookie
    }

    async fn verify(&self, credential: &str) -> Result<AuthenticatedIdentity, AccessError> {
        let session = self
            .sessions
            .find(credential)
            .await
            .map_err(|e| AccessError::Internal(e.to_string()))?
            .ok_or(AccessError::SessionNotFound)?;

        if session.is_expired(self.clock.now()) {
            self.discard(credential).await?;
            return Err(AccessError::SessionNotFound);
        }

        let user = self
            .users
            .find_by_id(&session.user_id)
            .await
            .map_err(|e| AccessError::Internal(e.to_string()))?;

        match user {
            Some(user) => Ok(AuthenticatedIdentity::from(&user)),
            None => {
                tracing::warn!(user_id = %session.user_id, "Session points at a deleted user");
                self.discard(credential).await?;
                Err(AccessError::SessionNotFound)
            }
        }
    }
}

#[async_trait]
impl<UR, SS> CredentialIssuer for SessionCredentials<UR, SS>
where
    UR: UserRepository,
    SS: SessionStore,
{
    async fn issue(&self, user: &User) -> Result<IssuedCredential, AccessError> {
        let now = self.clock.now();
        let session = Session {
            token: auth::generate_session_token(),
            user_id: user.id,
            created_at: now,
            expires_at: now + self.ttl,
        };
        let credential = IssuedCredential::Session {
            token: session.token.clone(),
            expires_at: session.expires_at,
        };

        let replaced = self
            .sessions
            .remove_for_user(&user.id)
            .await
            .map_err(|e| AccessError::Internal(e.to_string()))?;
        if replaced > 0 {
            tracing::debug!(user_id = %user.id, replaced, "Previous sessions replaced");
        }

        self.sessions
            .insert(session)
            .await
            .map_err(|e| AccessError::Internal(e.to_string()))?;

        Ok(credential)
    }

    async fn revoke(
        &self,
        _identity: &AuthenticatedIdentity,
        credential: &str,
    ) -> Result<(), AccessError> {
        self.discard(credential).await
    }
}
