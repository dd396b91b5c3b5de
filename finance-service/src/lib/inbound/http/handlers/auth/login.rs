use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::UserData;
use crate::domain::access::models::IssuedCredential;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Verify credentials and hand out a bearer token or a session cookie.
///
/// In bearer mode the token is returned in the body; in session mode only
/// the signed cookie carries the credential.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<(Option<SignedCookieJar>, ApiSuccess<LoginResponseData>), ApiError> {
    let Json(body) = body?;
    let command = LoginCommand::parse(body.email, body.password)?;

    let outcome = state.user_service.login(command).await?;

    let (token, jar) = match &outcome.credential {
        IssuedCredential::Bearer { token, .. } => (Some(token.clone()), None),
        IssuedCredential::Session { token, .. } => {
            let cookie = state.session_cookie.as_ref().ok_or_else(|| {
                ApiError::InternalServerError("session cookie is not configured".to_string())
            })?;
            (None, Some(cookie.set(token)))
        }
    };

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            "Login effettuato con successo",
            LoginResponseData {
                token,
                user: (&outcome.user).into(),
                expires_in: format!("{}h", state.credential_ttl_hours),
            },
        ),
    ))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequestBody {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub user: UserData,
    pub expires_in: String,
}
