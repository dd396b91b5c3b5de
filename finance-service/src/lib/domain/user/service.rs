use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::access::models::AuthenticatedIdentity;
use crate::domain::access::models::IssuedCredential;
use crate::domain::access::ports::CredentialIssuer;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for registration, login and profiles.
///
/// The credential mode (bearer or session) is decided by the injected
/// issuer; the service itself only verifies passwords.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    issuer: Arc<dyn CredentialIssuer>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and verification
    /// * `issuer` - Credential strategy used on login and logout
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        issuer: Arc<dyn CredentialIssuer>,
    ) -> Self {
        Self {
            repository,
            authenticator,
            issuer,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            surname: command.surname,
            email: command.email,
            password_hash,
            role: Role::User,
            session_token: None,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError> {
        let Some(mut user) = self.repository.find_by_email(&command.email).await? else {
            tracing::warn!("Login attempt for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        self.authenticator
            .verify_password(&command.password, &user.password_hash)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
                    UserError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => UserError::Password(err),
                AuthenticationError::JwtError(err) => UserError::Unknown(err.to_string()),
            })?;

        let credential = self.issuer.issue(&user).await?;
        if let IssuedCredential::Bearer { token, .. } = &credential {
            user.session_token = Some(token.clone());
        }

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome { user, credential })
    }

    async fn logout(
        &self,
        identity: &AuthenticatedIdentity,
        credential: &str,
    ) -> Result<(), UserError> {
        self.issuer.revoke(identity, credential).await?;
        tracing::info!(user_id = %identity.id, "User logged out");

        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            if new_email != user.email {
                let taken = self
                    .repository
                    .find_by_email(new_email.as_str())
                    .await?
                    .is_some_and(|other| other.id != user.id);
                if taken {
                    return Err(UserError::EmailAlreadyExists(new_email.as_str().to_string()));
                }
            }
            user.email = new_email;
        }

        if let Some(new_name) = command.name {
            user.name = new_name;
        }

        if let Some(new_surname) = command.surname {
            user.surname = new_surname;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.authenticator.hash_password(&new_password)?;
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
