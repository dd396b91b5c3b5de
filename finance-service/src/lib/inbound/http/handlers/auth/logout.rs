use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::cookie::SignedCookieJar;

use crate::domain::access::models::AuthenticatedIdentity;
use crate::domain::access::models::PresentedCredential;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Extension(credential): Extension<PresentedCredential>,
) -> Result<(Option<SignedCookieJar>, ApiSuccess<()>), ApiError> {
    state.user_service.logout(&identity, &credential.0).await?;

    let jar = state.session_cookie.as_ref().map(|cookie| cookie.clear());

    Ok((
        jar,
        ApiSuccess::new(StatusCode::OK, "Logout effettuato con successo", ()),
    ))
}
