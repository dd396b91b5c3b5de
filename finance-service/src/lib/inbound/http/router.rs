use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cookies::SessionCookie;
use super::handlers::activities::create_activity::create_activity;
use super::handlers::activities::delete_activity::delete_activity;
use super::handlers::activities::get_activity::get_activity;
use super::handlers::activities::list_activities::list_all_activities;
use super::handlers::activities::list_activities::list_my_activities;
use super::handlers::activities::list_activities::list_user_activities;
use super::handlers::activities::update_activity::update_activity;
use super::handlers::auth::login::login;
use super::handlers::auth::logout::logout;
use super::handlers::auth::me::me;
use super::handlers::auth::register::register;
use super::handlers::typologies::get_typology::get_typology;
use super::handlers::typologies::list_typologies::list_active_typologies;
use super::handlers::typologies::list_typologies::list_admin_typologies;
use super::handlers::typologies::list_typologies::list_all_active_typologies;
use super::handlers::users::delete_user::delete_user;
use super::handlers::users::get_user::get_user;
use super::handlers::users::update_user::update_user;
use super::middleware::authenticate;
use super::middleware::require_owner;
use super::middleware::require_role;
use crate::domain::access::ports::CredentialVerifier;
use crate::domain::activity::ports::ActivityServicePort;
use crate::domain::typology::ports::TypologyServicePort;
use crate::domain::user::models::Role;
use crate::domain::user::ports::UserServicePort;

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub activity_service: Arc<dyn ActivityServicePort>,
    pub typology_service: Arc<dyn TypologyServicePort>,
    pub verifier: Arc<dyn CredentialVerifier>,
    /// Present only in session mode.
    pub session_cookie: Option<SessionCookie>,
    /// Lifetime of issued credentials, reported to clients on login.
    pub credential_ttl_hours: i64,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/typologies", get(list_active_typologies))
        .route("/api/typologies/all", get(list_all_active_typologies))
        .route("/api/typologies/:typology_id", get(get_typology));

    let authenticated_routes = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .route(
            "/api/activities",
            get(list_my_activities).post(create_activity),
        )
        .route(
            "/api/activities/:activity_id",
            get(get_activity)
                .put(update_activity)
                .delete(delete_activity),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Layers run bottom-up: authenticate first, then the ownership check.
    let owner_routes = Router::new()
        .route(
            "/api/users/:user_id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/api/users/:user_id/activities", get(list_user_activities))
        .route_layer(middleware::from_fn(require_owner))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let admin_routes = Router::new()
        .route("/api/activities/all", get(list_all_activities))
        .route("/api/typologies/admin", get(list_admin_typologies))
        .route_layer(middleware::from_fn_with_state(Role::Admin, require_role))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(owner_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
