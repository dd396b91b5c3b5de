//! Authentication primitives for the finance backend.
//!
//! Provides the building blocks the service wires together at startup:
//! - Password hashing (Argon2id with a fixed work factor)
//! - Signed, time-limited identity tokens (HS256 JWT)
//! - Opaque session token generation
//! - A clock abstraction so expiry can be tested deterministically
//!
//! Nothing in here knows about HTTP or storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Identity Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_identity("user123", "mario@test.com", "Mario", "Rossi");
//! let issued = handler.issue(claims, Duration::hours(24)).unwrap();
//! let decoded = handler.verify(&issued.token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 24);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! auth.verify_password("password123", &hash).unwrap();
//! let claims = Claims::for_identity("user123", "mario@test.com", "Mario", "Rossi");
//! let issued = auth.issue_token(claims).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&issued.token).unwrap();
//! assert_eq!(decoded.email, "mario@test.com");
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;
pub mod session;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session::generate_session_token;
