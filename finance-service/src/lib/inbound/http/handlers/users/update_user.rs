use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::get_user::UserProfileData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        // Validation happens here - errors are automatically converted via #[from]
        let name = self.name.map(PersonName::new).transpose()?;
        let surname = self.surname.map(PersonName::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;

        // A blank password means "unchanged", never "set to blank"
        let password = self.password.filter(|p| !p.trim().is_empty());

        Ok(UpdateUserCommand {
            name,
            surname,
            email,
            password,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserProfileData>, ApiError> {
    let Json(req) = body?;

    // Parse user ID and request at HTTP boundary - errors automatically converted
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(StatusCode::OK, "Utente aggiornato con successo", user.into())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_password_leaves_password_unchanged() {
        for blank in ["", "   ", "\t\n"] {
            let request = UpdateUserRequest {
                password: Some(blank.to_string()),
                ..Default::default()
            };

            let command = request.try_into_command().unwrap();
            assert!(command.password.is_none(), "{blank:?}");
        }
    }

    #[test]
    fn test_non_blank_password_is_kept() {
        let request = UpdateUserRequest {
            password: Some(" new secret ".to_string()),
            ..Default::default()
        };

        let command = request.try_into_command().unwrap();
        assert_eq!(command.password.as_deref(), Some(" new secret "));
    }
}
