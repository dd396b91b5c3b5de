use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::ActivityData;
use super::ActivityRequestBody;
use crate::domain::access::models::AuthenticatedIdentity;
use crate::domain::activity::models::CreateActivityCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_activity(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    body: Result<Json<ActivityRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<ActivityData>, ApiError> {
    let Json(body) = body?;
    let command = CreateActivityCommand::parse(
        body.name,
        body.amount,
        body.description,
        body.date,
        body.kind,
        body.typology_id,
    )?;

    state
        .activity_service
        .create_activity(identity.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref activity| {
            ApiSuccess::new(
                StatusCode::CREATED,
                "Attività creata con successo",
                activity.into(),
            )
        })
}
