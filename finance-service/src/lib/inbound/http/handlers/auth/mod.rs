use serde::Serialize;

use crate::domain::access::models::AuthenticatedIdentity;
use crate::domain::user::models::User;

pub mod login;
pub mod logout;
pub mod me;
pub mod register;

/// Public profile of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub role: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            name: user.name.as_str().to_string(),
            surname: user.surname.as_str().to_string(),
            role: user.role.as_str().to_string(),
        }
    }
}

impl From<&AuthenticatedIdentity> for UserData {
    fn from(identity: &AuthenticatedIdentity) -> Self {
        Self {
            id: identity.id.to_string(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            surname: identity.surname.clone(),
            role: identity.role.as_str().to_string(),
        }
    }
}
