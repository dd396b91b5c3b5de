use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::access::models::AuthenticatedIdentity;
use crate::domain::activity::errors::ActivityError;
use crate::domain::activity::models::ActivityId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_activity(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Path(activity_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let activity_id = ActivityId::from_string(&activity_id).map_err(ActivityError::from)?;

    state
        .activity_service
        .delete_activity(identity.id, activity_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, "Attività eliminata con successo", ()))
}
