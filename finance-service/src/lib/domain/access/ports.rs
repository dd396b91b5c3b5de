use async_trait::async_trait;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::AuthenticatedIdentity;
use crate::domain::access::models::CredentialTransport;
use crate::domain::access::models::IssuedCredential;
use crate::domain::user::models::User;

/// Resolves a presented credential artifact into a caller identity.
///
/// One implementation per deployment mode (bearer, session), chosen from
/// configuration at startup. The HTTP middleware only talks to this trait.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Transport this verifier reads its artifact from.
    fn transport(&self) -> CredentialTransport;

    /// Verify an artifact and re-resolve the user it belongs to.
    ///
    /// # Errors
    /// * `TokenExpired` / `TokenMalformed` / `TokenRevoked` - Bearer token rejected
    /// * `UnknownUser` - Token is valid but its user no longer exists
    /// * `SessionNotFound` - No live session for the artifact
    /// * `Internal` - Backing store failed
    async fn verify(&self, credential: &str) -> Result<AuthenticatedIdentity, AccessError>;
}

/// Hands out and revokes credentials for authenticated users.
#[async_trait]
pub trait CredentialIssuer: Send + Sync + 'static {
    /// Issue a credential for a user whose password was just verified.
    ///
    /// # Errors
    /// * `Internal` - Signing or storage failed
    async fn issue(&self, user: &User) -> Result<IssuedCredential, AccessError>;

    /// Revoke a credential. Revoking twice is not an error.
    ///
    /// # Errors
    /// * `Internal` - Storage failed
    async fn revoke(
        &self,
        identity: &AuthenticatedIdentity,
        credential: &str,
    ) -> Result<(), AccessError>;
}
