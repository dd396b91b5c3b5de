use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::access::models::IssuedCredential;
use crate::user::errors::EmailError;
use crate::user::errors::PersonNameError;
use crate::user::errors::RoleError;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Identity plus credential record. `password_hash` is a PHC string and never
/// leaves the service; `session_token` mirrors the last bearer token issued
/// so logout can invalidate it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: PersonName,
    pub surname: PersonName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub session_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name or surname.
///
/// Non-blank, at most 100 characters. Stored as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 100;

    /// Create a new validated name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name longer than 100 characters
    pub fn new(name: String) -> Result<Self, PersonNameError> {
        if name.trim().is_empty() {
            return Err(PersonNameError::Empty);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(PersonNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 parser. Not normalised: lookups compare the
/// exact string, so addresses differing only in case are distinct users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `Empty` - Email is empty or whitespace only
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.trim().is_empty() {
            return Err(EmailError::Empty);
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authorization role carried by every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: PersonName,
    pub surname: PersonName,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    /// Build a register command from raw, possibly absent, fields.
    ///
    /// # Errors
    /// * `MissingFields` - Any field is absent or blank
    /// * `InvalidName` / `InvalidEmail` - A present field fails validation
    pub fn parse(
        name: Option<String>,
        surname: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, UserError> {
        let (Some(name), Some(surname), Some(email), Some(password)) = (
            non_blank(name),
            non_blank(surname),
            non_blank(email),
            non_blank(password),
        ) else {
            return Err(UserError::MissingFields(
                "name, surname, email and password are required".to_string(),
            ));
        };

        Ok(Self {
            name: PersonName::new(name)?,
            surname: PersonName::new(surname)?,
            email: EmailAddress::new(email)?,
            password,
        })
    }
}

/// Command to log in with email and password.
///
/// The email is kept as a raw string: a malformed address simply matches no
/// user and fails as invalid credentials.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    /// # Errors
    /// * `MissingFields` - Email or password is absent or blank
    pub fn parse(email: Option<String>, password: Option<String>) -> Result<Self, UserError> {
        match (non_blank(email), non_blank(password)) {
            (Some(email), Some(password)) => Ok(Self { email, password }),
            _ => Err(UserError::MissingFields(
                "email and password are required".to_string(),
            )),
        }
    }
}

/// Command to update an existing user with optional validated fields.
///
/// Only provided fields are updated; the password is re-hashed only when
/// present.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub name: Option<PersonName>,
    pub surname: Option<PersonName>,
    pub email: Option<EmailAddress>,
    pub password: Option<String>,
}

/// Result of a successful login: the user and the credential handed out.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub credential: IssuedCredential,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
