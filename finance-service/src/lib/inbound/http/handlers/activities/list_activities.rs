use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::to_data;
use super::ActivityData;
use crate::domain::access::models::AuthenticatedIdentity;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Activities of the caller.
pub async fn list_my_activities(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<Vec<ActivityData>>, ApiError> {
    state
        .activity_service
        .list_user_activities(identity.id)
        .await
        .map_err(ApiError::from)
        .map(|ref activities| {
            ApiSuccess::new(StatusCode::OK, "Attività trovate", to_data(activities))
        })
}

/// Activities of the user in the path; guarded by the ownership check.
pub async fn list_user_activities(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<Vec<ActivityData>>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    state
        .activity_service
        .list_user_activities(user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref activities| {
            ApiSuccess::new(StatusCode::OK, "Attività trovate", to_data(activities))
        })
}

/// Activities of every user; guarded by the admin role check.
pub async fn list_all_activities(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ActivityData>>, ApiError> {
    state
        .activity_service
        .list_all_activities()
        .await
        .map_err(ApiError::from)
        .map(|ref activities| {
            ApiSuccess::new(StatusCode::OK, "Attività trovate", to_data(activities))
        })
}
