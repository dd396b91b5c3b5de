use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::ActivityData;
use super::ActivityRequestBody;
use crate::domain::access::models::AuthenticatedIdentity;
use crate::domain::activity::errors::ActivityError;
use crate::domain::activity::models::ActivityId;
use crate::domain::activity::models::UpdateActivityCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_activity(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Path(activity_id): Path<String>,
    body: Result<Json<ActivityRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<ActivityData>, ApiError> {
    let Json(body) = body?;
    let activity_id = ActivityId::from_string(&activity_id).map_err(ActivityError::from)?;
    let command = UpdateActivityCommand::parse(
        body.name,
        body.amount,
        body.description,
        body.date,
        body.kind,
        body.typology_id,
    )?;

    state
        .activity_service
        .update_activity(identity.id, activity_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref activity| {
            ApiSuccess::new(
                StatusCode::OK,
                "Attività aggiornata con successo",
                activity.into(),
            )
        })
}
