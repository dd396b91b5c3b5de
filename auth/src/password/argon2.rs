use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id with a fixed work factor. Every hash gets a fresh random salt, so
/// hashing the same password twice yields two different PHC strings, both of
/// which verify.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Memory cost in KiB.
    pub const MEMORY_COST_KIB: u32 = 19_456;
    /// Number of passes.
    pub const TIME_COST: u32 = 2;
    /// Degree of parallelism.
    pub const PARALLELISM: u32 = 1;

    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Self::argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The salt and cost are read from the stored PHC string, so hashes
    /// produced under older parameters keep verifying.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash is not a parseable PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Ok(Self::argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn argon2() -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(
            Self::MEMORY_COST_KIB,
            Self::TIME_COST,
            Self::PARALLELISM,
            None,
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "password123";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert_ne!(hash, password);
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));
        assert!(!hasher
            .verify("password124", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_same_password_different_salt() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("password123").expect("Failed to hash password");
        let second = hasher.hash("password123").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("password123", &first).unwrap());
        assert!(hasher.verify("password123", &second).unwrap());
    }

    #[test]
    fn test_hash_embeds_fixed_cost() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password123").expect("Failed to hash password");

        assert!(hash.contains("m=19456,t=2,p=1"));
    }

    #[test]
    fn test_verify_malformed_hash() {
        let hasher = PasswordHasher::new();

        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn test_verify_does_not_accept_plaintext_as_hash() {
        let hasher = PasswordHasher::new();

        assert!(hasher.verify("password123", "password123").is_err());
    }
}
