use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::UserData;
use crate::domain::access::models::AuthenticatedIdentity;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;

pub async fn me(
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        "Utente autenticato",
        MeResponseData {
            user: (&identity).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user: UserData,
}
