use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::TypologyData;
use crate::domain::typology::errors::TypologyError;
use crate::domain::typology::models::TypologyId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_typology(
    State(state): State<AppState>,
    Path(typology_id): Path<String>,
) -> Result<ApiSuccess<TypologyData>, ApiError> {
    let typology_id = TypologyId::from_string(&typology_id).map_err(TypologyError::from)?;

    state
        .typology_service
        .get_typology(&typology_id)
        .await
        .map_err(ApiError::from)
        .map(|ref typology| ApiSuccess::new(StatusCode::OK, "Tipologia trovata", typology.into()))
}
