use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT issuance.
///
/// Built once at startup from the process-wide signing secret and shared
/// behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl_hours` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl_hours: i64) -> Self {
        Self::with_clock(jwt_secret, token_ttl_hours, Arc::new(SystemClock))
    }

    /// Create a new authenticator with an explicit time source.
    pub fn with_clock(jwt_secret: &[u8], token_ttl_hours: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::with_clock(jwt_secret, clock),
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Sign identity claims with the configured lifetime.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, claims: Claims) -> Result<IssuedToken, JwtError> {
        self.jwt_handler.issue(claims, self.token_ttl)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `Expired` - Token is past its expiry
    /// * `Malformed` - Token signature or structure is invalid
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token)
    }

    /// Lifetime applied to issued tokens.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_verify_password_success() {
        let authenticator = Authenticator::new(SECRET, 24);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert!(authenticator.verify_password("my_password", &hash).is_ok());
    }

    #[test]
    fn test_verify_password_mismatch() {
        let authenticator = Authenticator::new(SECRET, 24);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.verify_password("wrong_password", &hash);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        let authenticator = Authenticator::new(SECRET, 24);

        let result = authenticator.verify_password("my_password", "not-a-phc-string");
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(_))
        ));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = Authenticator::new(SECRET, 24);

        let claims = Claims::for_identity("user123", "mario@test.com", "Mario", "Rossi");
        let issued = authenticator
            .issue_token(claims)
            .expect("Failed to issue token");

        let decoded = authenticator
            .validate_token(&issued.token)
            .expect("Failed to validate token");

        assert_eq!(decoded.sub, "user123");
        assert_eq!(decoded.exp - decoded.iat, authenticator.token_ttl().num_seconds());
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET, 24);

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
