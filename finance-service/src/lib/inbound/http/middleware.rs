use std::collections::HashMap;

use axum::extract::Path;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::AuthenticatedIdentity;
use crate::domain::access::models::CredentialTransport;
use crate::domain::access::models::PresentedCredential;
use crate::domain::access::policy;
use crate::domain::user::models::Role;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Path parameter naming the user a resource belongs to.
pub const OWNER_PATH_PARAM: &str = "user_id";

/// Resolve the caller from the configured credential transport.
///
/// On success the request carries an [`AuthenticatedIdentity`] and the
/// [`PresentedCredential`] it was derived from.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credential = match state.verifier.transport() {
        CredentialTransport::AuthorizationHeader => extract_bearer_token(req.headers())?,
        CredentialTransport::Cookie => {
            let cookie = state.session_cookie.as_ref().ok_or_else(|| {
                ApiError::InternalServerError("session cookie is not configured".to_string())
            })?;
            cookie
                .read(req.headers())
                .ok_or(AccessError::MissingSession)?
        }
    };

    let identity = state.verifier.verify(&credential).await.map_err(|e| {
        tracing::warn!(error = %e, "Credential rejected");
        ApiError::from(e)
    })?;

    tracing::debug!(user_id = %identity.id, "Request authenticated");

    req.extensions_mut().insert(identity);
    req.extensions_mut().insert(PresentedCredential(credential));

    Ok(next.run(req).await)
}

/// Allow only the user named by the `user_id` path parameter.
///
/// Must run after [`authenticate`].
pub async fn require_owner(
    Path(params): Path<HashMap<String, String>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let resource_owner = params
        .get(OWNER_PATH_PARAM)
        .map(String::as_str)
        .unwrap_or_default();

    policy::ensure_owner(
        req.extensions().get::<AuthenticatedIdentity>(),
        resource_owner,
    )
    .map_err(|e| {
        tracing::warn!(error = %e, "Ownership check failed");
        ApiError::from(e)
    })?;

    Ok(next.run(req).await)
}

/// Allow only callers holding the role given as layer state.
///
/// Must run after [`authenticate`].
pub async fn require_role(
    State(required): State<Role>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    policy::ensure_role(req.extensions().get::<AuthenticatedIdentity>(), required).map_err(
        |e| {
            tracing::warn!(error = %e, "Role check failed");
            ApiError::from(e)
        },
    )?;

    Ok(next.run(req).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AccessError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AccessError::MissingToken)?
        .to_str()
        .map_err(|_| AccessError::TokenMalformed("non-ASCII Authorization header".to_string()))?;

    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AccessError::MissingToken),
    }
}
