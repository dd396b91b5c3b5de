use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

use super::claims::Claims;
use super::errors::JwtError;
use crate::clock::Clock;
use crate::clock::SystemClock;

const JTI_LENGTH: usize = 24;

/// A freshly signed token and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT token handler for issuing and verifying identity tokens.
///
/// Uses HS256 (HMAC with SHA-256). Tokens are stateless: the handler keeps no
/// revocation list, so a token stays valid until `exp` unless the caller
/// checks something else.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    clock: Arc<dyn Clock>,
}

impl JwtHandler {
    /// Create a new JWT handler reading time from the system clock.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it once at startup from the environment, never from request data
    pub fn new(secret: &[u8]) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    /// Create a new JWT handler with an explicit time source.
    pub fn with_clock(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            clock,
        }
    }

    /// Sign claims into a token valid for `ttl` from now.
    ///
    /// Overwrites `iat`, `exp` and `jti` on the given claims. The random `jti`
    /// makes every issuance distinct, even within the same second.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, mut claims: Claims, ttl: Duration) -> Result<IssuedToken, JwtError> {
        let now = self.clock.now();
        let expires_at = now + ttl;
        claims.iat = now.timestamp();
        claims.exp = expires_at.timestamp();
        claims.jti = OsRng
            .sample_iter(&Alphanumeric)
            .take(JTI_LENGTH)
            .map(char::from)
            .collect();

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature and expiry and return the embedded claims.
    ///
    /// Expiry is checked against the handler's clock rather than inside
    /// `jsonwebtoken`, with no leeway.
    ///
    /// # Errors
    /// * `Expired` - Current time is past `exp`
    /// * `Malformed` - Signature, structure or claim set is invalid
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = ["exp", "sub"].iter().map(|c| c.to_string()).collect();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::Malformed(e.to_string()))?
            .claims;

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}
