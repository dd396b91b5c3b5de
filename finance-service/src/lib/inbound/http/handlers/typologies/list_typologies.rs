use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::TypologyData;
use crate::domain::typology::errors::TypologyError;
use crate::domain::typology::models::EntryKind;
use crate::domain::typology::models::Typology;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TypologyFilter {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Active typologies, optionally filtered with `?type=income|expense`.
pub async fn list_active_typologies(
    State(state): State<AppState>,
    Query(filter): Query<TypologyFilter>,
) -> Result<ApiSuccess<Vec<TypologyData>>, ApiError> {
    let kind = filter
        .kind
        .map(|k| k.parse::<EntryKind>())
        .transpose()
        .map_err(TypologyError::from)?;

    state
        .typology_service
        .list_active(kind)
        .await
        .map_err(ApiError::from)
        .map(|ref typologies| respond(typologies))
}

pub async fn list_all_active_typologies(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<TypologyData>>, ApiError> {
    state
        .typology_service
        .list_active(None)
        .await
        .map_err(ApiError::from)
        .map(|ref typologies| respond(typologies))
}

/// Every typology including inactive ones; admin only.
pub async fn list_admin_typologies(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<TypologyData>>, ApiError> {
    state
        .typology_service
        .list_all()
        .await
        .map_err(ApiError::from)
        .map(|ref typologies| respond(typologies))
}

fn respond(typologies: &[Typology]) -> ApiSuccess<Vec<TypologyData>> {
    ApiSuccess::new(
        StatusCode::OK,
        "Tipologie trovate",
        typologies.iter().map(TypologyData::from).collect(),
    )
}
