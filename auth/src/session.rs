use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Length of generated session tokens, in characters.
pub const SESSION_TOKEN_LENGTH: usize = 48;

/// Generate an opaque session token.
///
/// 48 alphanumeric characters drawn from the OS random source (~285 bits).
/// The token carries no information; it only has meaning as a key into a
/// server-side session store.
pub fn generate_session_token() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
