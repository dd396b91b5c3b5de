use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::UserData;
use crate::domain::user::models::RegisterCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = body?;
    let command = RegisterCommand::parse(body.name, body.surname, body.email, body.password)?;

    state
        .user_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(
                StatusCode::CREATED,
                "Utente registrato con successo",
                user.into(),
            )
        })
}

/// Every field is optional here so that absent fields surface as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequestBody {
    name: Option<String>,
    surname: Option<String>,
    email: Option<String>,
    password: Option<String>,
}
