use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::JwtError;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::AuthenticatedIdentity;
use crate::domain::access::models::CredentialTransport;
use crate::domain::access::models::IssuedCredential;
use crate::domain::access::ports::CredentialIssuer;
use crate::domain::access::ports::CredentialVerifier;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Stateless JWT credentials with a server-side mirror.
///
/// Every issued token is mirrored into the user's `session_token`. When
/// `revoke_on_logout` is set, a token is only accepted while it is still the
/// mirrored one, so logout (which clears the mirror) and a later login
/// (which replaces it) both invalidate it before `exp`.
pub struct BearerCredentials<UR>
where
    UR: UserRepository,
{
    authenticator: Arc<Authenticator>,
    users: Arc<UR>,
    revoke_on_logout: bool,
}

impl<UR> BearerCredentials<UR>
where
    UR: UserRepository,
{
    pub fn new(authenticator: Arc<Authenticator>, users: Arc<UR>, revoke_on_logout: bool) -> Self {
        Self {
            authenticator,
            users,
            revoke_on_logout,
        }
    }
}

#[async_trait]
impl<UR> CredentialVerifier for BearerCredentials<UR>
where
    UR: UserRepository,
{
    fn transport(&self) -> CredentialTransport {
        CredentialTransport::AuthorizationHeader
    }

    async fn verify(&self, credential: &str) -> Result<AuthenticatedIdentity, AccessError> {
        let claims = self
            .authenticator
            .validate_token(credential)
            .map_err(|e| match e {
                JwtError::Expired => AccessError::TokenExpired,
                JwtError::Malformed(reason) => AccessError::TokenMalformed(reason),
                JwtError::EncodingFailed(reason) => AccessError::Internal(reason),
            })?;

        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| AccessError::TokenMalformed(e.to_string()))?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(|e| AccessError::Internal(e.to_string()))?
            .ok_or_else(|| AccessError::UnknownUser(user_id.to_string()))?;

        if self.revoke_on_logout && user.session_token.as_deref() != Some(credential) {
            return Err(AccessError::TokenRevoked);
        }

        Ok(AuthenticatedIdentity::from(&user))
    }
}

#[async_trait]
impl<UR> CredentialIssuer for BearerCredentials<UR>
where
    UR: UserRepository,
{
    async fn issue(&self, user: &User) -> Result<IssuedCredential, AccessError> {
        let claims = Claims::for_identity(
            user.id,
            user.email.as_str(),
            user.name.as_str(),
            user.surname.as_str(),
        );

        let issued = self
            .authenticator
            .issue_token(claims)
            .map_err(|e| AccessError::Internal(e.to_string()))?;

        self.users
            .set_session_token(&user.id, Some(issued.token.clone()))
            .await
            .map_err(|e| AccessError::Internal(e.to_string()))?;

        Ok(IssuedCredential::Bearer {
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    async fn revoke(
        &self,
        identity: &AuthenticatedIdentity,
        _credential: &str,
    ) -> Result<(), AccessError> {
        match self.users.set_session_token(&identity.id, None).await {
            Ok(()) | Err(UserError::NotFound(_)) => Ok(()),
            Err(e) => Err(AccessError::Internal(e.to_string())),
        }
    }
}
