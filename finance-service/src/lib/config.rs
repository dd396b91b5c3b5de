use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Minimum length, in bytes, of the token signing and cookie signing secrets.
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub jwt: JwtConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// How callers prove who they are.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// JWT in `Authorization: Bearer <token>`
    Bearer,
    /// Opaque server-side session in a signed cookie
    Session,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub mode: AuthMode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub revoke_on_logout: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_name: String,
    pub expiration_hours: i64,
    pub purge_interval_seconds: u64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, AUTH__MODE, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    ///
    /// # Errors
    /// Fails when a source cannot be parsed or when [`Config::validate`]
    /// rejects the result, so a misconfigured process never starts serving.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 3000)?
            .set_default("auth.mode", "bearer")?
            .set_default("jwt.secret", "")?
            .set_default("jwt.expiration_hours", 24)?
            .set_default("jwt.revoke_on_logout", true)?
            .set_default("session.secret", "")?
            .set_default("session.cookie_name", "connect.sid")?
            .set_default("session.expiration_hours", 24)?
            .set_default("session.purge_interval_seconds", 300)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Check invariants the deserializer cannot express.
    ///
    /// # Errors
    /// * JWT secret missing or shorter than [`MIN_SECRET_LENGTH`]
    /// * Session secret missing or too short while running in session mode
    /// * Non-positive expiration
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_secret("jwt.secret", &self.jwt.secret)?;

        if self.jwt.expiration_hours <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_hours must be positive".to_string(),
            ));
        }

        if self.auth.mode == AuthMode::Session {
            require_secret("session.secret", &self.session.secret)?;

            if self.session.expiration_hours <= 0 {
                return Err(ConfigError::Message(
                    "session.expiration_hours must be positive".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn require_secret(key: &str, secret: &str) -> Result<(), ConfigError> {
    if secret.is_empty() {
        return Err(ConfigError::Message(format!("{key} is not set")));
    }

    if secret.len() < MIN_SECRET_LENGTH {
        return Err(ConfigError::Message(format!(
            "{key} must be at least {MIN_SECRET_LENGTH} bytes"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "a-test-secret-that-is-long-enough-for-hs256";

    fn config(mode: AuthMode, jwt_secret: &str, session_secret: &str) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgres://localhost/finance".to_string(),
                max_connections: 5,
            },
            server: ServerConfig { http_port: 3000 },
            auth: AuthConfig { mode },
            jwt: JwtConfig {
                secret: jwt_secret.to_string(),
                expiration_hours: 24,
                revoke_on_logout: true,
            },
            session: SessionConfig {
                secret: session_secret.to_string(),
                cookie_name: "connect.sid".to_string(),
                expiration_hours: 24,
                purge_interval_seconds: 300,
            },
        }
    }

    #[test]
    fn test_missing_jwt_secret_is_fatal() {
        assert!(config(AuthMode::Bearer, "", "").validate().is_err());
        assert!(config(AuthMode::Bearer, "short", "").validate().is_err());
        assert!(config(AuthMode::Bearer, SECRET, "").validate().is_ok());
    }

    #[test]
    fn test_session_secret_required_only_in_session_mode() {
        assert!(config(AuthMode::Session, SECRET, "").validate().is_err());
        assert!(config(AuthMode::Session, SECRET, SECRET).validate().is_ok());
    }

    #[test]
    fn test_non_positive_expiration_rejected() {
        let mut invalid = config(AuthMode::Bearer, SECRET, "");
        invalid.jwt.expiration_hours = 0;
        assert!(invalid.validate().is_err());
    }
}
